//! Achievement entity.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Collection, Entity};
use crate::keys::StoreKey;

/// Timeline milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub year: String,
    pub title: String,
    pub desc: String,
    pub img: String,
}

/// Fields for a new achievement.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewAchievement {
    #[validate(length(min = 1, max = 16))]
    pub year: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub img: String,
}

impl Collection for Achievement {
    const KEY: StoreKey = StoreKey::Achievements;
}

impl Entity for Achievement {
    type Draft = NewAchievement;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewAchievement) -> Self {
        Self {
            id,
            year: draft.year,
            title: draft.title,
            desc: draft.desc,
            img: draft.img,
        }
    }
}
