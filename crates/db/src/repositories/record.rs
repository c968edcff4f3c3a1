//! Single-record repository.

use std::marker::PhantomData;

use tvk_common::AppResult;

use crate::entities::Record;
use crate::store::{SharedStore, get_json, set_json};

/// Typed access to one JSON object in the store.
pub struct RecordRepository<T> {
    store: SharedStore,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for RecordRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Record> RecordRepository<T> {
    /// Create a repository over `T::KEY`.
    #[must_use]
    pub const fn new(store: SharedStore) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// The stored record, or `T::default()` when absent or corrupt.
    pub async fn get(&self) -> AppResult<T> {
        get_json(self.store.as_ref(), T::KEY, T::default()).await
    }

    /// Overwrite the record.
    pub async fn set(&self, value: &T) -> AppResult<()> {
        set_json(self.store.as_ref(), T::KEY, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{PollData, PollOption};
    use crate::store::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_get_defaults_when_absent() {
        let repo = RecordRepository::<PollData>::new(Arc::new(MemoryStore::new()));
        assert_eq!(repo.get().await.unwrap(), PollData::default());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = Arc::new(MemoryStore::new());
        let repo = RecordRepository::<PollData>::new(store.clone());
        let poll = PollData {
            question: "Top priority?".to_string(),
            options: vec![PollOption {
                id: "p1".to_string(),
                label: "Education".to_string(),
                percentage: 60,
            }],
        };

        repo.set(&poll).await.unwrap();

        assert_eq!(repo.get().await.unwrap(), poll);
        assert!(store.contains("poll").await.unwrap());
    }
}
