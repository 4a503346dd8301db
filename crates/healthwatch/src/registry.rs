use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::target::{Client, Service};
use crate::types::HealthCheckSettings;

/// Durable catalog of monitored targets.
///
/// Every method is fallible; callers in the engine must treat a failing
/// registry as a degraded-but-survivable condition, never a fatal one.
#[async_trait]
pub trait TargetRegistry: Send + Sync {
    async fn services(&self) -> Result<Vec<Service>>;

    async fn service(&self, id: &str) -> Result<Option<Service>>;

    async fn clients(&self) -> Result<Vec<Client>>;

    async fn client(&self, id: &str) -> Result<Option<Client>>;

    /// Persist the durable last-seen timestamp for a service.
    async fn update_service_last_seen(&self, id: &str, seen: DateTime<Utc>) -> Result<()>;

    /// Persist the durable last-seen timestamp for a client.
    async fn update_client_last_seen(&self, id: &str, seen: DateTime<Utc>) -> Result<()>;
}

/// Source of the runtime health-check settings.
#[async_trait]
pub trait SettingsSource: Send + Sync {
    /// Current cadences and timeouts. Implementations return defaults for
    /// fields absent from the underlying store.
    async fn health_check_settings(&self) -> Result<HealthCheckSettings>;
}
