use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::probe::{HttpProbeOutcome, HttpProber, Pinger};
use crate::reconcile::Reconciler;
use crate::target::{Client, Service};
use crate::types::{StatusRecord, TargetKind};

/// Runs one liveness probe against one target and folds the outcome,
/// together with last-seen reconciliation, into a [`StatusRecord`].
///
/// Never fails: every probe outcome, including timeouts and transport
/// errors, maps to a record. Targets with checking disabled or missing
/// configuration are classified `unknown` without any network I/O.
pub struct CheckExecutor {
    http: HttpProber,
    pinger: Arc<dyn Pinger>,
    reconciler: Arc<Reconciler>,
}

impl CheckExecutor {
    pub fn new(http: HttpProber, pinger: Arc<dyn Pinger>, reconciler: Arc<Reconciler>) -> Self {
        Self {
            http,
            pinger,
            reconciler,
        }
    }

    /// HTTP health check for one service. `default_timeout_ms` applies when
    /// the service carries no per-check timeout override.
    pub async fn check_service(&self, service: &Service, default_timeout_ms: u64) -> StatusRecord {
        let Some(check) = service.health_check.as_ref().filter(|hc| hc.enabled) else {
            return StatusRecord::unknown();
        };

        let timeout = Duration::from_millis(check.timeout.unwrap_or(default_timeout_ms));
        let now = Utc::now();

        match self.http.probe(check, timeout).await {
            HttpProbeOutcome::Delivered { status_code } if status_code == check.expected_status => {
                let seen = self
                    .reconciler
                    .persist_last_seen(TargetKind::Service, &service.id, now)
                    .await;
                StatusRecord::healthy(now, status_code).with_last_seen(Some(seen))
            }
            HttpProbeOutcome::Delivered { status_code } => {
                let seen = self
                    .reconciler
                    .resolve_last_seen(TargetKind::Service, &service.id)
                    .await;
                StatusRecord::unhealthy_status(now, status_code).with_last_seen(seen)
            }
            HttpProbeOutcome::Failed { error } => {
                let seen = self
                    .reconciler
                    .resolve_last_seen(TargetKind::Service, &service.id)
                    .await;
                StatusRecord::failed(now, error).with_last_seen(seen)
            }
        }
    }

    /// ICMP liveness check for one client.
    pub async fn check_client(&self, client: &Client, timeout_secs: u64) -> StatusRecord {
        if !client.is_pingable() {
            return StatusRecord::unknown();
        }
        let Some(ip) = client.ip_address.as_deref() else {
            return StatusRecord::unknown().with_error("IP address not configured");
        };
        let Ok(addr) = ip.parse::<IpAddr>() else {
            return StatusRecord::unknown().with_error(format!("invalid IP address: {ip}"));
        };

        let now = Utc::now();
        match self
            .pinger
            .ping(addr, Duration::from_secs(timeout_secs))
            .await
        {
            Ok(rtt) => {
                let seen = self
                    .reconciler
                    .persist_last_seen(TargetKind::Client, &client.id, now)
                    .await;
                StatusRecord::online(now, rtt.as_millis() as u64).with_last_seen(Some(seen))
            }
            Err(err) => {
                let seen = self
                    .reconciler
                    .resolve_last_seen(TargetKind::Client, &client.id)
                    .await;
                StatusRecord::offline(now, err.to_string()).with_last_seen(seen)
            }
        }
    }
}
