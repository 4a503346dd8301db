use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::{debug, warn};

use crate::cache::StatusCache;
use crate::registry::TargetRegistry;
use crate::types::TargetKind;

/// Resolves and persists the durable last-seen timestamp for targets.
///
/// Classification never depends on storage availability: a failing registry
/// degrades only the durability of `last_seen`. Reads fall back to the value
/// this process last cached, writes are best-effort and retried implicitly by
/// the next successful check.
///
/// A process-local high-water mark keeps `last_seen` monotonically
/// non-decreasing even when concurrent checks for the same target complete
/// out of order.
pub struct Reconciler {
    registry: Arc<dyn TargetRegistry>,
    cache: Arc<StatusCache>,
    high_water: DashMap<String, DateTime<Utc>>,
}

impl Reconciler {
    pub fn new(registry: Arc<dyn TargetRegistry>, cache: Arc<StatusCache>) -> Self {
        Self {
            registry,
            cache,
            high_water: DashMap::new(),
        }
    }

    /// Record a confirmed-alive observation and best-effort persist it.
    ///
    /// Returns the timestamp now in force for the target, which is never
    /// earlier than one previously recorded by this process.
    pub async fn persist_last_seen(
        &self,
        kind: TargetKind,
        id: &str,
        seen: DateTime<Utc>,
    ) -> DateTime<Utc> {
        let seen = {
            let mut mark = self.high_water.entry(id.to_string()).or_insert(seen);
            if *mark < seen {
                *mark = seen;
            }
            *mark
        };

        let result = match kind {
            TargetKind::Service => self.registry.update_service_last_seen(id, seen).await,
            TargetKind::Client => self.registry.update_client_last_seen(id, seen).await,
        };
        if let Err(err) = result {
            warn!(target_id = id, "failed to persist last-seen timestamp: {err:#}");
        }

        seen
    }

    /// Resolve the last known confirmed-alive timestamp without advancing it.
    pub async fn resolve_last_seen(&self, kind: TargetKind, id: &str) -> Option<DateTime<Utc>> {
        let durable = match self.lookup(kind, id).await {
            Ok(value) => value,
            Err(err) => {
                debug!(target_id = id, "registry lookup failed, using cached value: {err:#}");
                self.cache.get(id).and_then(|record| record.last_seen)
            }
        };
        let local = self.high_water.get(id).map(|mark| *mark);

        match (durable, local) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }

    async fn lookup(&self, kind: TargetKind, id: &str) -> anyhow::Result<Option<DateTime<Utc>>> {
        Ok(match kind {
            TargetKind::Service => self
                .registry
                .service(id)
                .await?
                .and_then(|service| service.last_seen),
            TargetKind::Client => self
                .registry
                .client(id)
                .await?
                .and_then(|client| client.last_seen),
        })
    }
}
