//! Stored record types.
//!
//! Each list-valued key holds a JSON array of one of these types; field
//! names are camelCase in storage. Foreign keys (`user_id` and friends) are
//! copied strings and are never checked against the referenced list.

#![allow(missing_docs)]

pub mod achievement;
pub mod banner;
pub mod event;
pub mod ideology;
pub mod leadership;
pub mod manifesto;
pub mod media;
pub mod poll;
pub mod ticker;
pub mod transaction;
pub mod user;

pub use achievement::{Achievement, NewAchievement};
pub use banner::{Banner, NewBanner};
pub use event::{Event, EventType, NewEvent};
pub use ideology::{IdeologyPoint, NewIdeologyPoint};
pub use leadership::{LeadershipMember, NewLeadershipMember};
pub use manifesto::{
    ManifestoPoint, ManifestoSuggestion, NewManifestoPoint, NewSuggestion, SuggestionStatus,
};
pub use media::{MediaAsset, MediaType, NewMediaAsset};
pub use poll::{NewVoteOption, PollData, PollOption, VoteOption};
pub use ticker::TickerItem;
pub use transaction::{NewTransaction, Transaction, TransactionType};
pub use user::{NewUser, User, UserRole};

use serde::{Serialize, de::DeserializeOwned};
use tvk_common::AppResult;
use validator::Validate;

use crate::keys::StoreKey;

/// A type stored as a JSON array under a fixed key.
pub trait Collection: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Key holding the array.
    const KEY: StoreKey;
}

/// A collection member with its own identity.
pub trait Entity: Collection {
    /// Caller-supplied fields for creation.
    type Draft: Send + Validate;

    /// Unique id within the collection.
    fn id(&self) -> &str;

    /// Build a new record from a fresh id and the caller's fields,
    /// filling everything else with defaults.
    fn from_draft(id: String, draft: Self::Draft) -> Self;

    /// Check that `self` may overwrite `stored`, the record with the same id.
    fn check_replace(&self, _stored: &Self) -> AppResult<()> {
        Ok(())
    }
}

/// A type stored as a single JSON object under a fixed key.
pub trait Record: Serialize + DeserializeOwned + Clone + Default + Send + Sync + 'static {
    /// Key holding the object.
    const KEY: StoreKey;
}
