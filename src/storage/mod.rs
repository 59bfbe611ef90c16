//! Storage module: durable values, workout persistence and configuration.

pub mod config;
pub mod durable;
pub mod persistence;

pub use config::{AppConfig, ConfigError, GeolocationSettings, MapSettings, StorageSettings};
pub use durable::{DurableStore, FileStore, MemoryStore, StorageError};
pub use persistence::{PersistenceAdapter, PersistenceError, DEFAULT_STORAGE_KEY};
