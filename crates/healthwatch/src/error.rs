use thiserror::Error;

use crate::types::TargetKind;

/// Caller-facing failures of the on-demand check operations.
///
/// Probe and persistence failures never surface here; they are absorbed
/// into [`StatusRecord`](crate::types::StatusRecord) fields. Only lookup
/// problems reach the caller.
#[derive(Debug, Error)]
pub enum HealthError {
    #[error("{kind} {id} not found")]
    TargetNotFound { kind: TargetKind, id: String },

    #[error("registry error: {0:#}")]
    Registry(anyhow::Error),
}
