//! Test utilities for store-backed code.

use std::sync::Arc;

use tvk_common::hash_password;

use crate::seed::{AdminSeed, SeedOptions, initialize_once};
use crate::store::{MemoryStore, SharedStore};

/// Email of the seeded test administrator.
pub const TEST_ADMIN_EMAIL: &str = "admin@tvk.org";

/// Password of the seeded test administrator.
pub const TEST_ADMIN_PASSWORD: &str = "correct-horse-battery";

/// A fresh, empty in-memory store.
#[must_use]
pub fn empty_store() -> SharedStore {
    Arc::new(MemoryStore::new())
}

/// An in-memory store with seed content and a test administrator.
///
/// # Panics
///
/// Panics if hashing or seeding fails.
pub async fn seeded_store() -> SharedStore {
    let store = empty_store();
    let options = SeedOptions {
        admin: Some(AdminSeed {
            name: "Test Admin".to_string(),
            email: TEST_ADMIN_EMAIL.to_string(),
            password_hash: hash_password(TEST_ADMIN_PASSWORD).expect("hash test password"),
        }),
    };

    initialize_once(store.as_ref(), &options)
        .await
        .expect("seed test store");

    store
}
