//! Leadership profile entity.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Collection, Entity};
use crate::keys::StoreKey;

/// Party office-bearer shown on the leadership page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadershipMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub image: String,
    pub bio: String,
}

/// Fields for a new leadership profile.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewLeadershipMember {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub role: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub bio: String,
}

impl Collection for LeadershipMember {
    const KEY: StoreKey = StoreKey::Leadership;
}

impl Entity for LeadershipMember {
    type Draft = NewLeadershipMember;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewLeadershipMember) -> Self {
        Self {
            id,
            name: draft.name,
            role: draft.role,
            image: draft.image,
            bio: draft.bio,
        }
    }
}
