//! Public media downloads.

use tvk_common::{AppError, AppResult};
use tvk_db::entities::MediaAsset;
use tvk_db::repositories::Repository;
use tvk_db::SharedStore;

/// Service for the public media gallery.
#[derive(Clone)]
pub struct MediaService {
    repo: Repository<MediaAsset>,
}

impl MediaService {
    /// Create a new media service.
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self {
            repo: Repository::new(store),
        }
    }

    /// Gallery items in display order.
    pub async fn list(&self) -> AppResult<Vec<MediaAsset>> {
        self.repo.list().await
    }

    /// Count one download of `id` and return the updated asset.
    pub async fn record_download(&self, id: &str) -> AppResult<MediaAsset> {
        let mut items = self.repo.list().await?;

        let Some(asset) = items.iter_mut().find(|a| a.id == id) else {
            return Err(AppError::NotFound(format!("Media asset not found: {id}")));
        };
        asset.download_count = asset.download_count.saturating_add(1);
        let updated = asset.clone();

        self.repo.replace_all(&items).await?;
        tracing::debug!(id = %id, downloads = updated.download_count, "Download recorded");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tvk_db::test_utils::seeded_store;

    #[tokio::test]
    async fn test_record_download_increments() {
        let service = MediaService::new(seeded_store().await);

        let first = service.record_download("m1").await.unwrap();
        let second = service.record_download("m1").await.unwrap();

        assert_eq!(first.download_count, 1241);
        assert_eq!(second.download_count, 1242);
        assert_eq!(service.list().await.unwrap()[0].download_count, 1242);
        assert_eq!(service.list().await.unwrap()[1].download_count, 850);
    }

    #[tokio::test]
    async fn test_record_download_unknown_is_not_found() {
        let service = MediaService::new(seeded_store().await);
        let err = service.record_download("m9").await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }
}
