//! Opinion poll and public vote counters.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Collection, Entity, Record};
use crate::keys::StoreKey;

/// Poll choice with an admin-set percentage. Percentages are curated,
/// not computed from votes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: String,
    pub label: String,
    pub percentage: u8,
}

/// The single poll shown on the home page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollData {
    pub question: String,
    pub options: Vec<PollOption>,
}

impl Record for PollData {
    const KEY: StoreKey = StoreKey::Poll;
}

/// Public vote counter. `votes` only ever goes up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOption {
    pub id: String,
    pub label: String,
    pub votes: u64,
}

/// Fields for a new vote option.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewVoteOption {
    #[validate(length(min = 1, max = 200))]
    pub label: String,
}

impl Collection for VoteOption {
    const KEY: StoreKey = StoreKey::Votes;
}

impl Entity for VoteOption {
    type Draft = NewVoteOption;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewVoteOption) -> Self {
        Self {
            id,
            label: draft.label,
            votes: 0,
        }
    }
}
