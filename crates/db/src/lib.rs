//! Storage layer for tvk-site.
//!
//! All site content is kept as JSON documents in a key-value store. This
//! crate owns the store backends, the key space, the stored record types,
//! the generic repositories built over them, and first-run seeding.

pub mod entities;
pub mod keys;
pub mod repositories;
pub mod seed;
pub mod store;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use std::sync::Arc;

use tvk_common::config::{StoreBackend, StoreConfig};

pub use keys::StoreKey;
pub use store::{FileStore, KeyValueStore, MemoryStore, SharedStore};

/// Open the configured store.
#[must_use]
pub fn init(config: &StoreConfig) -> SharedStore {
    match config.backend {
        StoreBackend::Memory => {
            tracing::info!(quota_bytes = ?config.quota_bytes, "Using in-memory store");
            match config.quota_bytes {
                Some(quota) => Arc::new(MemoryStore::with_quota(quota)),
                None => Arc::new(MemoryStore::new()),
            }
        }
        StoreBackend::File => {
            tracing::info!(path = %config.path.display(), "Using file store");
            Arc::new(FileStore::new(config.path.clone()))
        }
    }
}
