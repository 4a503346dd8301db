//! Tracing bootstrap shared by the portal binaries.

mod tracing;

pub use tracing::init_tracing;
