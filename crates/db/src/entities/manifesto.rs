//! Manifesto points and member suggestions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Collection, Entity};
use crate::keys::StoreKey;

/// One plank of the published manifesto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestoPoint {
    pub id: String,
    pub title: String,
    pub desc: String,
}

/// Fields for a new manifesto point.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewManifestoPoint {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub desc: String,
}

impl Collection for ManifestoPoint {
    const KEY: StoreKey = StoreKey::ManifestoPoints;
}

impl Entity for ManifestoPoint {
    type Draft = NewManifestoPoint;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewManifestoPoint) -> Self {
        Self {
            id,
            title: draft.title,
            desc: draft.desc,
        }
    }
}

/// Review state of a suggestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionStatus {
    #[default]
    Pending,
    Responded,
}

/// Policy idea submitted by a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestoSuggestion {
    pub id: String,
    /// Submitter display name.
    pub user: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub suggestion: String,
    pub status: SuggestionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

/// Fields for a new suggestion.
#[derive(Debug, Clone, Default, Validate)]
pub struct NewSuggestion {
    #[validate(length(min = 1, max = 200))]
    pub user: String,
    pub user_id: String,
    #[validate(length(min = 1, max = 2000))]
    pub suggestion: String,
}

impl Collection for ManifestoSuggestion {
    const KEY: StoreKey = StoreKey::Suggestions;
}

impl Entity for ManifestoSuggestion {
    type Draft = NewSuggestion;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewSuggestion) -> Self {
        Self {
            id,
            user: draft.user,
            user_id: draft.user_id,
            timestamp: Utc::now(),
            suggestion: draft.suggestion,
            status: SuggestionStatus::Pending,
            response: None,
        }
    }
}
