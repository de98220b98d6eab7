//! Storage layer
//!
//! The durable mirror beneath the in-memory stores: one JSON file per store
//! name, holding the full entity array, rewritten atomically on every
//! mutation and read once when a store opens.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::{JsonPersistence, StorageStats, StoreFile};
