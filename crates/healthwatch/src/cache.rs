use std::collections::HashMap;

use dashmap::DashMap;

use crate::types::StatusRecord;

/// In-memory map from target id to its most recent status record.
///
/// Last write wins: concurrent checks for the same target may land out of
/// order and the slower one overwrites. Freshness is judged by the
/// `last_checked` field, not by the cache itself; there is no expiry and
/// nothing is persisted. After a restart the cache refills on the first
/// check cycle.
#[derive(Debug, Default)]
pub struct StatusCache {
    records: DashMap<String, StatusRecord>,
}

impl StatusCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<StatusRecord> {
        self.records.get(id).map(|entry| entry.value().clone())
    }

    pub fn set(&self, id: impl Into<String>, record: StatusRecord) {
        self.records.insert(id.into(), record);
    }

    pub fn snapshot(&self) -> HashMap<String, StatusRecord> {
        self.records
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TargetStatus;
    use chrono::Utc;

    #[test]
    fn set_overwrites_previous_record() {
        let cache = StatusCache::new();
        let now = Utc::now();

        cache.set("service-1", StatusRecord::healthy(now, 200));
        cache.set("service-1", StatusRecord::unhealthy_status(now, 503));

        let record = cache.get("service-1").unwrap();
        assert_eq!(record.status, TargetStatus::Unhealthy);
        assert_eq!(record.status_code, Some(503));
    }

    #[test]
    fn snapshot_contains_all_entries() {
        let cache = StatusCache::new();
        let now = Utc::now();

        cache.set("service-1", StatusRecord::healthy(now, 200));
        cache.set("client-1", StatusRecord::online(now, 12));

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["client-1"].status, TargetStatus::Online);
    }

    #[test]
    fn miss_returns_none() {
        let cache = StatusCache::new();
        assert!(cache.get("service-missing").is_none());
    }
}
