//! Banner entity.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Collection, Entity};
use crate::keys::StoreKey;

/// Default accent for new carousel slides.
pub const DEFAULT_ACCENT_COLOR: &str = "#D41D24";

/// Home carousel slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    /// Call-to-action label.
    pub cta: String,
    pub image: String,
    pub accent_color: String,
}

/// Fields for a new banner.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBanner {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub cta: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub accent_color: Option<String>,
}

impl Collection for Banner {
    const KEY: StoreKey = StoreKey::Banners;
}

impl Entity for Banner {
    type Draft = NewBanner;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewBanner) -> Self {
        Self {
            id,
            title: draft.title,
            subtitle: draft.subtitle,
            cta: draft.cta,
            image: draft.image,
            accent_color: draft
                .accent_color
                .unwrap_or_else(|| DEFAULT_ACCENT_COLOR.to_string()),
        }
    }
}
