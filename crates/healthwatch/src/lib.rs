//! Health monitoring and liveness tracking for the Purtal portal.
//!
//! This library decides whether each catalogued target is reachable,
//! classifies its status, tracks the durable "last seen" timestamp and
//! exposes live and cached views:
//! - HTTP and ICMP probes with hard per-check deadlines
//! - a last-write-wins status cache
//! - last-seen reconciliation that tolerates storage failures
//! - a scheduler whose cadences are reconfigurable at runtime
//!
//! The catalog and settings live behind the [`registry`] traits; the API
//! layer talks to the [`HealthMonitor`] facade and [`HealthScheduler`].

pub mod cache;
pub mod error;
pub mod executor;
pub mod monitor;
pub mod probe;
pub mod reconcile;
pub mod registry;
pub mod scheduler;
pub mod target;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::HealthError;
pub use monitor::HealthMonitor;
pub use registry::{SettingsSource, TargetRegistry};
pub use scheduler::HealthScheduler;
pub use target::{Client, HealthCheckConfig, Service};
pub use types::{HealthCheckSettings, StatusRecord, TargetKind, TargetReport, TargetStatus};
