//! Event entity.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Collection, Entity};
use crate::keys::StoreKey;

/// Image used when an admin does not upload one.
pub const DEFAULT_EVENT_IMAGE: &str =
    "https://images.unsplash.com/photo-1540910419892-4a36d2c3266c?auto=format&fit=crop&w=800&q=80";

/// Kind of gathering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    Rally,
    #[default]
    Meeting,
    Conference,
}

/// Scheduled party event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    /// Date as entered by the admin (`2024-12-15` or `Dec 15, 2024`).
    pub date: String,
    pub location: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub image: String,
}

/// Fields for a new event.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 64))]
    pub date: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[serde(default, rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub image: Option<String>,
}

impl Collection for Event {
    const KEY: StoreKey = StoreKey::Events;
}

impl Entity for Event {
    type Draft = NewEvent;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewEvent) -> Self {
        Self {
            id,
            title: draft.title,
            date: draft.date,
            location: draft.location,
            event_type: draft.event_type,
            image: draft
                .image
                .filter(|i| !i.is_empty())
                .unwrap_or_else(|| DEFAULT_EVENT_IMAGE.to_string()),
        }
    }
}
