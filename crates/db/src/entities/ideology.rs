//! Ideology entity.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Collection, Entity};
use crate::keys::StoreKey;

/// Core principle shown on the about page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeologyPoint {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Fields for a new ideology point.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewIdeologyPoint {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Collection for IdeologyPoint {
    const KEY: StoreKey = StoreKey::Ideology;
}

impl Entity for IdeologyPoint {
    type Draft = NewIdeologyPoint;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewIdeologyPoint) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
        }
    }
}
