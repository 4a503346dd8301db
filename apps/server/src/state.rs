use std::sync::Arc;

use healthwatch::{HealthMonitor, HealthScheduler};
use tracing::error;

use crate::errlog::ErrorLog;
use crate::error::ApiError;
use crate::storage::FileStore;

/// Shared per-process state handed to every route handler.
pub struct AppState {
    pub store: Arc<FileStore>,
    pub monitor: Arc<HealthMonitor>,
    pub scheduler: Arc<HealthScheduler>,
    pub errors: Arc<ErrorLog>,
}

impl AppState {
    /// Record an internal failure in the error log and convert it into the
    /// 500 response for the caller.
    pub fn internal(&self, route: &str, err: anyhow::Error) -> ApiError {
        error!(route, "request failed: {err:#}");
        self.errors.record(route, format!("{err:#}"));
        ApiError::Internal(format!("{err:#}"))
    }
}
