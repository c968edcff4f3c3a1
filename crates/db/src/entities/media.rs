//! Downloadable media asset entity.

use serde::{Deserialize, Serialize};
use tvk_common::{AppError, AppResult};
use validator::Validate;

use super::{Collection, Entity};
use crate::keys::StoreKey;

/// Asset category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    #[default]
    Poster,
    Wallpaper,
    Video,
}

/// Campaign material offered for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    /// Only ever incremented.
    pub download_count: u64,
}

/// Fields for a new media asset.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewMediaAsset {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub url: String,
    #[serde(default, rename = "type")]
    pub media_type: MediaType,
}

impl Collection for MediaAsset {
    const KEY: StoreKey = StoreKey::Media;
}

impl Entity for MediaAsset {
    type Draft = NewMediaAsset;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewMediaAsset) -> Self {
        Self {
            id,
            title: draft.title,
            url: draft.url,
            media_type: draft.media_type,
            download_count: 0,
        }
    }

    fn check_replace(&self, stored: &Self) -> AppResult<()> {
        if self.download_count < stored.download_count {
            return Err(AppError::BadRequest(format!(
                "Download count for {} cannot decrease ({} -> {})",
                self.id, stored.download_count, self.download_count
            )));
        }
        Ok(())
    }
}
