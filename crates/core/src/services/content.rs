//! Admin-console content service.

use std::collections::HashSet;

use tvk_common::{AppError, AppResult};
use tvk_db::entities::{Entity, NewTransaction, TransactionType, User};
use tvk_db::repositories::{ActivityLog, Repository};
use tvk_db::SharedStore;
use validator::Validate;

use super::reorder::move_item;

/// Who performed a mutation, as recorded in the activity log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// User id, or `anon` / `system`.
    pub user_id: String,
    /// Display name written to the log.
    pub user_name: String,
}

impl Actor {
    /// Actor for actions without a signed-in user.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            user_id: "anon".to_string(),
            user_name: "Verified Voter".to_string(),
        }
    }

    /// Actor for startup tasks.
    #[must_use]
    pub fn system() -> Self {
        Self {
            user_id: "system".to_string(),
            user_name: "System".to_string(),
        }
    }

    pub(crate) fn log(&self, kind: TransactionType, details: impl Into<String>) -> NewTransaction {
        NewTransaction::new(kind, &self.user_id, &self.user_name, details)
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            user_name: user.name.clone(),
        }
    }
}

/// CRUD over one content list, logging every change.
pub struct ContentService<T> {
    repo: Repository<T>,
    log: ActivityLog,
}

impl<T> Clone for ContentService<T> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            log: self.log.clone(),
        }
    }
}

impl<T: Entity> ContentService<T> {
    /// Create a content service over `T::KEY`.
    #[must_use]
    pub fn new(store: SharedStore, log: ActivityLog) -> Self {
        Self {
            repo: Repository::new(store),
            log,
        }
    }

    /// All items in display order.
    pub async fn list(&self) -> AppResult<Vec<T>> {
        self.repo.list().await
    }

    /// Get an item by ID.
    pub async fn get(&self, id: &str) -> AppResult<T> {
        self.repo.get_by_id(id).await
    }

    /// Validate `draft`, append it as a new item and log the change.
    pub async fn create(&self, draft: T::Draft, actor: &Actor) -> AppResult<T> {
        draft.validate()?;

        let item = self.repo.create(draft).await?;
        self.log
            .append(actor.log(
                TransactionType::Content,
                format!("Added {} item {}", T::KEY, item.id()),
            ))
            .await?;

        tracing::info!(key = %T::KEY, id = %item.id(), "Content item created");
        Ok(item)
    }

    /// Replace the item with `id` in place. `replacement` must carry the
    /// same id; a different one is `BadRequest`.
    pub async fn update(&self, id: &str, replacement: T, actor: &Actor) -> AppResult<T> {
        let mut items = self.repo.list().await?;

        let Some(slot) = items.iter_mut().find(|item| item.id() == id) else {
            return Err(AppError::NotFound(format!("{} item not found: {id}", T::KEY)));
        };
        if replacement.id() != id {
            return Err(AppError::BadRequest(format!(
                "Item id {} does not match path id {id}",
                replacement.id()
            )));
        }
        replacement.check_replace(slot)?;
        *slot = replacement.clone();

        self.repo.replace_all(&items).await?;
        self.log
            .append(actor.log(
                TransactionType::Content,
                format!("Updated {} item {id}", T::KEY),
            ))
            .await?;

        Ok(replacement)
    }

    /// Remove the item with `id`.
    pub async fn delete(&self, id: &str, actor: &Actor) -> AppResult<()> {
        let items = self.repo.list().await?;
        let before = items.len();
        let remaining: Vec<T> = items.into_iter().filter(|item| item.id() != id).collect();

        if remaining.len() == before {
            return Err(AppError::NotFound(format!("{} item not found: {id}", T::KEY)));
        }

        self.repo.replace_all(&remaining).await?;
        self.log
            .append(actor.log(
                TransactionType::Content,
                format!("Deleted {} item {id}", T::KEY),
            ))
            .await?;

        tracing::info!(key = %T::KEY, id = %id, "Content item deleted");
        Ok(())
    }

    /// Overwrite the whole list. Ids must be unique, and items that keep a
    /// stored id must pass [`Entity::check_replace`] against it.
    pub async fn replace_all(&self, items: &[T], actor: &Actor) -> AppResult<()> {
        let mut seen = HashSet::new();
        if let Some(dup) = items.iter().find(|item| !seen.insert(item.id())) {
            return Err(AppError::Conflict(format!(
                "Duplicate id in {}: {}",
                T::KEY,
                dup.id()
            )));
        }

        let stored = self.repo.list().await?;
        for item in items {
            if let Some(previous) = stored.iter().find(|s| s.id() == item.id()) {
                item.check_replace(previous)?;
            }
        }

        self.repo.replace_all(items).await?;
        self.log
            .append(actor.log(
                TransactionType::Content,
                format!("Replaced {} ({} items)", T::KEY, items.len()),
            ))
            .await?;

        Ok(())
    }

    /// Move the item at `from` to `to`. Returns whether anything moved.
    pub async fn reorder(&self, from: usize, to: usize, actor: &Actor) -> AppResult<bool> {
        let mut items = self.repo.list().await?;
        if !move_item(&mut items, from, to)? {
            return Ok(false);
        }

        self.repo.replace_all(&items).await?;
        self.log
            .append(actor.log(
                TransactionType::Content,
                format!("Reordered {}: {from} -> {to}", T::KEY),
            ))
            .await?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tvk_db::entities::{Event, EventType, LeadershipMember, MediaAsset, NewEvent};
    use tvk_db::test_utils::{empty_store, seeded_store};

    fn admin() -> Actor {
        Actor {
            user_id: "admin-1".to_string(),
            user_name: "General Secretary".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_validates_and_logs() {
        let store = empty_store();
        let log = ActivityLog::new(store.clone());
        let service = ContentService::<Event>::new(store, log.clone());

        let event = service
            .create(
                NewEvent {
                    title: "Youth Summit".to_string(),
                    date: "2026-11-02".to_string(),
                    location: "Madurai".to_string(),
                    event_type: EventType::Conference,
                    image: None,
                },
                &admin(),
            )
            .await
            .unwrap();

        assert_eq!(service.list().await.unwrap(), vec![event.clone()]);
        let entries = log.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, TransactionType::Content);
        assert_eq!(entries[0].user_id, "admin-1");
        assert!(entries[0].details.contains(&event.id));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let store = empty_store();
        let service = ContentService::<Event>::new(store.clone(), ActivityLog::new(store));

        let err = service
            .create(
                NewEvent {
                    title: String::new(),
                    date: "2026-11-02".to_string(),
                    location: "Madurai".to_string(),
                    ..Default::default()
                },
                &admin(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let store = seeded_store().await;
        let service = ContentService::<LeadershipMember>::new(store.clone(), ActivityLog::new(store));

        let mut leader = service.get("leader-1").await.unwrap();
        leader.bio = "Updated biography".to_string();
        service.update("leader-1", leader.clone(), &admin()).await.unwrap();

        let all = service.list().await.unwrap();
        assert_eq!(all[0], leader);
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = seeded_store().await;
        let service = ContentService::<LeadershipMember>::new(store.clone(), ActivityLog::new(store));

        let mut leader = service.get("leader-1").await.unwrap();
        leader.id = "missing".to_string();

        let err = service.update("missing", leader, &admin()).await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_delete_filters_item() {
        let store = seeded_store().await;
        let service = ContentService::<Event>::new(store.clone(), ActivityLog::new(store));

        service.delete("e2", &admin()).await.unwrap();

        let ids: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["e1", "e3"]);

        let err = service.delete("e2", &admin()).await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_replace_all_rejects_duplicate_ids() {
        let store = seeded_store().await;
        let service = ContentService::<Event>::new(store.clone(), ActivityLog::new(store));

        let mut events = service.list().await.unwrap();
        events[1].id = events[0].id.clone();

        let err = service.replace_all(&events, &admin()).await.unwrap_err();
        assert_eq!(err.error_code(), "CONFLICT");
        assert_eq!(service.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_media_edits_cannot_lower_download_count() {
        let store = seeded_store().await;
        let log = ActivityLog::new(store.clone());
        let service = ContentService::<MediaAsset>::new(store, log.clone());

        let mut poster = service.get("m1").await.unwrap();
        poster.title = "Renamed poster".to_string();
        service.update("m1", poster.clone(), &admin()).await.unwrap();

        poster.download_count = 0;
        let err = service.update("m1", poster, &admin()).await.unwrap_err();
        assert_eq!(err.error_code(), "BAD_REQUEST");

        let mut assets = service.list().await.unwrap();
        assets[1].download_count = 10;
        let err = service.replace_all(&assets, &admin()).await.unwrap_err();
        assert_eq!(err.error_code(), "BAD_REQUEST");

        let stored = service.list().await.unwrap();
        assert_eq!(stored[0].download_count, 1240);
        assert_eq!(stored[0].title, "Renamed poster");
        assert_eq!(stored[1].download_count, 850);
        assert_eq!(log.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reorder_moves_and_logs_once() {
        let store = seeded_store().await;
        let log = ActivityLog::new(store.clone());
        let service = ContentService::<Event>::new(store, log.clone());

        assert!(service.reorder(0, 2, &admin()).await.unwrap());
        assert!(!service.reorder(1, 1, &admin()).await.unwrap());

        let ids: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["e2", "e3", "e1"]);
        assert_eq!(log.list().await.unwrap().len(), 1);
    }
}
