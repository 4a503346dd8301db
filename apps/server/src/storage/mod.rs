//! Durable portal storage: the target catalog and settings behind the
//! engine's registry traits, persisted as a single JSON document.

mod file;

pub use file::FileStore;
