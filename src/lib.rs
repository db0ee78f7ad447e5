//! Fonoteca Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod catalog_store;
pub mod config;
pub mod resource_id;
pub mod server;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use catalog_store::{CatalogStore, CreateOutcome, SqliteCatalogStore};
pub use server::{run_server, RequestsLoggingLevel};
