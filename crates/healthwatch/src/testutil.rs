//! Shared fixtures for engine tests: an in-memory registry, a scriptable
//! pinger and target builders.

use std::collections::VecDeque;
use std::net::IpAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::probe::{PingError, Pinger};
use crate::registry::{SettingsSource, TargetRegistry};
use crate::target::{Client, HealthCheckConfig, Service};
use crate::types::HealthCheckSettings;

pub(crate) fn service_with_check(id: &str, url: &str, enabled: bool) -> Service {
    let now = Utc::now();
    Service {
        id: id.to_string(),
        name: id.to_string(),
        url: url.to_string(),
        description: None,
        icon: None,
        custom_icon: None,
        category: None,
        tags: Vec::new(),
        health_check: Some(HealthCheckConfig {
            enabled,
            url: url.to_string(),
            method: "GET".to_string(),
            timeout: None,
            expected_status: 200,
        }),
        last_seen: None,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn pingable_client(id: &str, ip: Option<&str>) -> Client {
    let now = Utc::now();
    Client {
        id: id.to_string(),
        name: id.to_string(),
        client_type: "health-check".to_string(),
        ip_address: ip.map(str::to_string),
        mac_address: None,
        wol_address: None,
        wol_port: None,
        description: None,
        icon: None,
        custom_icon: None,
        category: None,
        tags: Vec::new(),
        last_seen: None,
        created_at: now,
        updated_at: now,
    }
}

/// In-memory registry with switchable failure modes and call counters.
#[derive(Default)]
pub(crate) struct MockRegistry {
    pub services: Mutex<Vec<Service>>,
    pub clients: Mutex<Vec<Client>>,
    pub service_list_calls: AtomicUsize,
    pub client_list_calls: AtomicUsize,
    pub last_seen_writes: Mutex<Vec<(String, DateTime<Utc>)>>,
    reads_fail: AtomicBool,
    writes_fail: AtomicBool,
}

impl MockRegistry {
    pub fn push_service(&self, service: Service) {
        self.services.lock().unwrap().push(service);
    }

    pub fn push_client(&self, client: Client) {
        self.clients.lock().unwrap().push(client);
    }

    pub fn fail_reads(&self) {
        self.reads_fail.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.writes_fail.store(true, Ordering::SeqCst);
    }

    fn check_reads(&self) -> Result<()> {
        if self.reads_fail.load(Ordering::SeqCst) {
            bail!("registry unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl TargetRegistry for MockRegistry {
    async fn services(&self) -> Result<Vec<Service>> {
        self.service_list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reads()?;
        Ok(self.services.lock().unwrap().clone())
    }

    async fn service(&self, id: &str) -> Result<Option<Service>> {
        self.check_reads()?;
        Ok(self
            .services
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn clients(&self) -> Result<Vec<Client>> {
        self.client_list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reads()?;
        Ok(self.clients.lock().unwrap().clone())
    }

    async fn client(&self, id: &str) -> Result<Option<Client>> {
        self.check_reads()?;
        Ok(self
            .clients
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn update_service_last_seen(&self, id: &str, seen: DateTime<Utc>) -> Result<()> {
        if self.writes_fail.load(Ordering::SeqCst) {
            bail!("registry write failed");
        }
        self.last_seen_writes
            .lock()
            .unwrap()
            .push((id.to_string(), seen));
        if let Some(service) = self.services.lock().unwrap().iter_mut().find(|s| s.id == id) {
            service.last_seen = Some(seen);
        }
        Ok(())
    }

    async fn update_client_last_seen(&self, id: &str, seen: DateTime<Utc>) -> Result<()> {
        if self.writes_fail.load(Ordering::SeqCst) {
            bail!("registry write failed");
        }
        self.last_seen_writes
            .lock()
            .unwrap()
            .push((id.to_string(), seen));
        if let Some(client) = self.clients.lock().unwrap().iter_mut().find(|c| c.id == id) {
            client.last_seen = Some(seen);
        }
        Ok(())
    }
}

/// Settings source with a swappable value and a failure switch.
pub(crate) struct MockSettings {
    pub settings: Mutex<HealthCheckSettings>,
    fail: AtomicBool,
}

impl MockSettings {
    pub fn new(settings: HealthCheckSettings) -> Self {
        Self {
            settings: Mutex::new(settings),
            fail: AtomicBool::new(false),
        }
    }

    pub fn replace(&self, settings: HealthCheckSettings) {
        *self.settings.lock().unwrap() = settings;
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl Default for MockSettings {
    fn default() -> Self {
        Self::new(HealthCheckSettings::default())
    }
}

#[async_trait]
impl SettingsSource for MockSettings {
    async fn health_check_settings(&self) -> Result<HealthCheckSettings> {
        if self.fail.load(Ordering::SeqCst) {
            bail!("settings store unavailable");
        }
        Ok(self.settings.lock().unwrap().clone())
    }
}

/// Pinger that replays a scripted sequence of outcomes; the last script
/// entry repeats once the queue is drained.
pub(crate) struct ScriptedPinger {
    script: Mutex<VecDeque<Result<Duration, PingError>>>,
    fallback: Result<Duration, PingError>,
    pub calls: AtomicUsize,
}

impl ScriptedPinger {
    pub fn new(outcomes: Vec<Result<Duration, PingError>>) -> Self {
        Self {
            script: Mutex::new(outcomes.into()),
            fallback: Err(PingError::Timeout),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always_alive(rtt: Duration) -> Self {
        let mut pinger = Self::new(Vec::new());
        pinger.fallback = Ok(rtt);
        pinger
    }
}

fn clone_outcome(outcome: &Result<Duration, PingError>) -> Result<Duration, PingError> {
    match outcome {
        Ok(rtt) => Ok(*rtt),
        Err(PingError::Timeout) => Err(PingError::Timeout),
        Err(PingError::Probe(message)) => Err(PingError::Probe(message.clone())),
    }
}

#[async_trait]
impl Pinger for ScriptedPinger {
    async fn ping(&self, _addr: IpAddr, _timeout: Duration) -> Result<Duration, PingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script.lock().unwrap().pop_front() {
            Some(outcome) => outcome,
            None => clone_outcome(&self.fallback),
        }
    }
}
