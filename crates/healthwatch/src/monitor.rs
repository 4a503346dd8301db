use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use futures::future::join_all;
use tracing::{error, warn};

use crate::cache::StatusCache;
use crate::error::HealthError;
use crate::executor::CheckExecutor;
use crate::probe::{HttpProber, Pinger};
use crate::reconcile::Reconciler;
use crate::registry::{SettingsSource, TargetRegistry};
use crate::target::{Client, Service};
use crate::types::{HealthCheckSettings, StatusRecord, TargetKind, TargetReport};
use crate::validation;

/// Facade over the health monitoring engine.
///
/// Owns the status cache, the check executor and the last-seen reconciler;
/// one instance is constructed per process and injected into the API layer.
/// On-demand checks run the same executor/reconciler/cache path as the
/// scheduled sweeps, so scheduled and on-demand results are
/// indistinguishable once cached.
pub struct HealthMonitor {
    registry: Arc<dyn TargetRegistry>,
    settings: Arc<dyn SettingsSource>,
    executor: CheckExecutor,
    cache: Arc<StatusCache>,
}

impl HealthMonitor {
    pub fn new(
        registry: Arc<dyn TargetRegistry>,
        settings: Arc<dyn SettingsSource>,
        pinger: Arc<dyn Pinger>,
    ) -> Result<Self> {
        let cache = Arc::new(StatusCache::new());
        let reconciler = Arc::new(Reconciler::new(registry.clone(), cache.clone()));
        let executor = CheckExecutor::new(HttpProber::new()?, pinger, reconciler);
        Ok(Self {
            registry,
            settings,
            executor,
            cache,
        })
    }

    /// Current settings, sanitized. Fails when the settings store does;
    /// the scheduler uses this to decide whether a reschedule is safe.
    pub async fn settings(&self) -> Result<HealthCheckSettings> {
        let settings = self.settings.health_check_settings().await?;
        Ok(validation::sanitize_settings(settings))
    }

    /// Settings for a check path: a failing settings store degrades to
    /// defaults rather than blocking the check.
    async fn settings_or_default(&self) -> HealthCheckSettings {
        match self.settings().await {
            Ok(settings) => settings,
            Err(err) => {
                warn!("failed to read health-check settings, using defaults: {err:#}");
                HealthCheckSettings::default()
            }
        }
    }

    /// Live check of a single service; the result is written through to the
    /// cache before being returned.
    pub async fn check_service(&self, id: &str) -> Result<StatusRecord, HealthError> {
        let service = self
            .registry
            .service(id)
            .await
            .map_err(HealthError::Registry)?
            .ok_or_else(|| HealthError::TargetNotFound {
                kind: TargetKind::Service,
                id: id.to_string(),
            })?;

        let settings = self.settings_or_default().await;
        let record = self
            .executor
            .check_service(&service, settings.service_timeout)
            .await;
        self.cache.set(service.id, record.clone());
        Ok(record)
    }

    /// Live check of a single client.
    pub async fn check_client(&self, id: &str) -> Result<StatusRecord, HealthError> {
        let client = self
            .registry
            .client(id)
            .await
            .map_err(HealthError::Registry)?
            .ok_or_else(|| HealthError::TargetNotFound {
                kind: TargetKind::Client,
                id: id.to_string(),
            })?;

        let settings = self.settings_or_default().await;
        let record = self
            .executor
            .check_client(&client, settings.client_timeout)
            .await;
        self.cache.set(client.id, record.clone());
        Ok(record)
    }

    /// Live checks across every catalogued service, concurrently. Services
    /// without an enabled check come back `unknown` without being probed.
    pub async fn check_all_services(&self) -> Result<Vec<TargetReport>, HealthError> {
        let services = self
            .registry
            .services()
            .await
            .map_err(HealthError::Registry)?;
        let settings = self.settings_or_default().await;

        let reports = join_all(services.iter().map(|service| async {
            let record = self
                .executor
                .check_service(service, settings.service_timeout)
                .await;
            self.cache.set(service.id.clone(), record.clone());
            TargetReport {
                id: service.id.clone(),
                record,
            }
        }))
        .await;

        Ok(reports)
    }

    /// Live checks across every catalogued client, concurrently.
    pub async fn check_all_clients(&self) -> Result<Vec<TargetReport>, HealthError> {
        let clients = self
            .registry
            .clients()
            .await
            .map_err(HealthError::Registry)?;
        let settings = self.settings_or_default().await;

        let reports = join_all(clients.iter().map(|client| async {
            let record = self
                .executor
                .check_client(client, settings.client_timeout)
                .await;
            self.cache.set(client.id.clone(), record.clone());
            TargetReport {
                id: client.id.clone(),
                record,
            }
        }))
        .await;

        Ok(reports)
    }

    /// Cached view of the latest known record per target id. Triggers no
    /// new checks.
    pub fn cached_snapshot(&self) -> HashMap<String, StatusRecord> {
        self.cache.snapshot()
    }

    /// One scheduled sweep over services with checking enabled. Each target
    /// gets its own task; results land in the cache as they complete, and a
    /// failing task is logged without aborting the rest of the batch.
    pub async fn run_service_sweep(self: &Arc<Self>) {
        let settings = self.settings_or_default().await;
        let services = match self.registry.services().await {
            Ok(services) => services,
            Err(err) => {
                warn!("service sweep skipped, registry unavailable: {err:#}");
                return;
            }
        };

        let mut tasks = Vec::new();
        for service in services.into_iter().filter(Service::is_checkable) {
            let monitor = Arc::clone(self);
            let timeout_ms = settings.service_timeout;
            tasks.push(tokio::spawn(async move {
                let record = monitor.executor.check_service(&service, timeout_ms).await;
                monitor.cache.set(service.id, record);
            }));
        }

        for task in tasks {
            if let Err(err) = task.await {
                error!("service check task failed: {err}");
            }
        }
    }

    /// One scheduled sweep over ping-capable clients.
    pub async fn run_client_sweep(self: &Arc<Self>) {
        let settings = self.settings_or_default().await;
        let clients = match self.registry.clients().await {
            Ok(clients) => clients,
            Err(err) => {
                warn!("client sweep skipped, registry unavailable: {err:#}");
                return;
            }
        };

        let mut tasks = Vec::new();
        for client in clients.into_iter().filter(Client::is_pingable) {
            let monitor = Arc::clone(self);
            let timeout_secs = settings.client_timeout;
            tasks.push(tokio::spawn(async move {
                let record = monitor.executor.check_client(&client, timeout_secs).await;
                monitor.cache.set(client.id, record);
            }));
        }

        for task in tasks {
            if let Err(err) = task.await {
                error!("client check task failed: {err}");
            }
        }
    }
}
