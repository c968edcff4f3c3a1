//! Generic list repository.

use std::marker::PhantomData;

use tvk_common::{AppError, AppResult, IdGenerator};

use crate::entities::{Collection, Entity};
use crate::store::{SharedStore, get_json, set_json};

/// Typed access to one JSON array in the store.
pub struct Repository<T> {
    store: SharedStore,
    id_gen: IdGenerator,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            id_gen: self.id_gen.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Collection> Repository<T> {
    /// Create a repository over `T::KEY`.
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            id_gen: IdGenerator::new(),
            _marker: PhantomData,
        }
    }

    /// All items in stored order. Absent or corrupt data reads as empty.
    pub async fn list(&self) -> AppResult<Vec<T>> {
        let items: Vec<T> = get_json(self.store.as_ref(), T::KEY, Vec::new()).await?;
        tracing::debug!(key = %T::KEY, count = items.len(), "Listed collection");
        Ok(items)
    }

    /// Overwrite the whole list.
    pub async fn replace_all(&self, items: &[T]) -> AppResult<()> {
        set_json(self.store.as_ref(), T::KEY, items).await
    }

    /// Number of stored items.
    pub async fn count(&self) -> AppResult<usize> {
        Ok(self.list().await?.len())
    }
}

impl<T: Entity> Repository<T> {
    /// Create a record from `draft` with a fresh id, append it and persist.
    pub async fn create(&self, draft: T::Draft) -> AppResult<T> {
        let mut items = self.list().await?;

        let mut id = self.id_gen.generate();
        while items.iter().any(|item| item.id() == id) {
            id = self.id_gen.generate();
        }

        let item = T::from_draft(id, draft);
        items.push(item.clone());
        self.replace_all(&items).await?;

        Ok(item)
    }

    /// Find a record by id.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<T>> {
        Ok(self.list().await?.into_iter().find(|item| item.id() == id))
    }

    /// Get a record by id, returning error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<T> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} item not found: {id}", T::KEY)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        Achievement, Banner, Event, EventType, IdeologyPoint, LeadershipMember, ManifestoPoint,
        ManifestoSuggestion, MediaAsset, MediaType, NewEvent, NewManifestoPoint, SuggestionStatus,
        TickerItem, User, UserRole, VoteOption,
    };
    use crate::store::{KeyValueStore, MemoryStore};
    use chrono::Utc;
    use std::collections::HashSet;
    use std::fmt::Debug;
    use std::sync::Arc;

    fn store() -> SharedStore {
        Arc::new(MemoryStore::new())
    }

    async fn assert_round_trip<T>(items: Vec<T>)
    where
        T: Collection + PartialEq + Debug,
    {
        let repo = Repository::<T>::new(store());
        repo.replace_all(&items).await.unwrap();
        assert_eq!(repo.list().await.unwrap(), items);
    }

    #[tokio::test]
    async fn test_list_empty_when_absent() {
        let repo = Repository::<Event>::new(store());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_events_list_as_empty() {
        let store = store();
        store
            .set_raw("events", "[{\"id\": oops".to_string())
            .await
            .unwrap();

        let repo = Repository::<Event>::new(store);
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_every_collection() {
        assert_round_trip(vec![
            TickerItem::from("Conference this month"),
            TickerItem::from("Join the movement"),
        ])
        .await;
        assert_round_trip(vec![Banner {
            id: "b1".to_string(),
            title: "Victory".to_string(),
            subtitle: "For all".to_string(),
            cta: "Join".to_string(),
            image: "data:image/png;base64,AA==".to_string(),
            accent_color: "#FFD700".to_string(),
        }])
        .await;
        assert_round_trip(vec![
            Event {
                id: "e2".to_string(),
                title: "Rally".to_string(),
                date: "2025-01-10".to_string(),
                location: "Chennai".to_string(),
                event_type: EventType::Rally,
                image: String::new(),
            },
            Event {
                id: "e1".to_string(),
                title: "Conference".to_string(),
                date: "Dec 15, 2024".to_string(),
                location: "Vikravandi".to_string(),
                event_type: EventType::Conference,
                image: "img".to_string(),
            },
        ])
        .await;
        assert_round_trip(vec![ManifestoPoint {
            id: "m1".to_string(),
            title: "Education".to_string(),
            desc: "Digital classrooms".to_string(),
        }])
        .await;
        assert_round_trip(vec![LeadershipMember {
            id: "l1".to_string(),
            name: "Leader".to_string(),
            role: "President".to_string(),
            image: "img".to_string(),
            bio: "Bio".to_string(),
        }])
        .await;
        assert_round_trip(vec![IdeologyPoint {
            id: "i1".to_string(),
            title: "Equality".to_string(),
            description: "All are equal by birth".to_string(),
        }])
        .await;
        assert_round_trip(vec![Achievement {
            id: "a1".to_string(),
            year: "2024".to_string(),
            title: "Founded".to_string(),
            desc: "Party launched".to_string(),
            img: "img".to_string(),
        }])
        .await;
        assert_round_trip(vec![MediaAsset {
            id: "md1".to_string(),
            title: "Poster".to_string(),
            url: "https://example.com/p.jpg".to_string(),
            media_type: MediaType::Video,
            download_count: 7,
        }])
        .await;
        assert_round_trip(vec![ManifestoSuggestion {
            id: "s1".to_string(),
            user: "Arun".to_string(),
            user_id: "u1".to_string(),
            timestamp: Utc::now(),
            suggestion: "More libraries".to_string(),
            status: SuggestionStatus::Responded,
            response: Some("Thank you".to_string()),
        }])
        .await;
        assert_round_trip(vec![VoteOption {
            id: "1".to_string(),
            label: "Education Reform".to_string(),
            votes: 4500,
        }])
        .await;
        assert_round_trip(vec![User {
            id: "u1".to_string(),
            name: "Arun".to_string(),
            email: Some("arun@example.com".to_string()),
            role: UserRole::Member,
            membership_id: Some("TVK-2024-12345".to_string()),
            password_hash: None,
            avatar: None,
            mobile: Some("9876543210".to_string()),
            constituency: Some("Madurai".to_string()),
            joined_at: Utc::now(),
            sso_provider: Some("google".to_string()),
            email_verified: true,
            mobile_verified: false,
        }])
        .await;
    }

    #[tokio::test]
    async fn test_create_appends_with_defaults() {
        let repo = Repository::<Event>::new(store());

        let first = repo
            .create(NewEvent {
                title: "First".to_string(),
                date: "2025-01-01".to_string(),
                location: "Trichy".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let second = repo
            .create(NewEvent {
                title: "Second".to_string(),
                date: "2025-02-01".to_string(),
                location: "Salem".to_string(),
                event_type: EventType::Rally,
                image: None,
            })
            .await
            .unwrap();

        let events = repo.list().await.unwrap();
        assert_eq!(events, vec![first.clone(), second]);
        assert_eq!(first.event_type, EventType::Meeting);
        assert!(!first.image.is_empty());
    }

    #[tokio::test]
    async fn test_create_generates_unique_ids() {
        let repo = Repository::<ManifestoPoint>::new(store());

        for n in 0..1000 {
            repo.create(NewManifestoPoint {
                title: format!("Point {n}"),
                desc: String::new(),
            })
            .await
            .unwrap();
        }

        let ids: HashSet<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids.len(), 1000);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_not_found() {
        let repo = Repository::<Event>::new(store());
        let err = repo.get_by_id("nope").await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_write_failure_propagates() {
        let store: SharedStore = Arc::new(MemoryStore::with_quota(16));
        let repo = Repository::<TickerItem>::new(store);

        let err = repo
            .replace_all(&[TickerItem("a very long ticker line indeed".to_string())])
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }
}
