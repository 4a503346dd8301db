use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// How many failures the log keeps; older entries fall off the end.
const MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub route: String,
}

/// Bounded in-memory log of recent API failures, newest first. Not
/// persisted; it exists so the dashboard can show what went wrong recently
/// without log-file access.
#[derive(Debug, Default)]
pub struct ErrorLog {
    entries: Mutex<VecDeque<ErrorEntry>>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, route: &str, message: impl Into<String>) -> ErrorEntry {
        let entry = ErrorEntry {
            id: format!("error-{}", Uuid::new_v4()),
            timestamp: Utc::now(),
            message: message.into(),
            route: route.to_string(),
        };

        let mut entries = self.entries.lock().unwrap();
        entries.push_front(entry.clone());
        entries.truncate(MAX_ENTRIES);
        entry
    }

    pub fn recent(&self, limit: usize) -> Vec<ErrorEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}
