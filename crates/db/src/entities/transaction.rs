//! Activity log record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Collection;
use crate::keys::StoreKey;

/// What kind of action produced the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Registration or profile change.
    Membership,
    /// Manifesto suggestion submitted.
    Suggestion,
    /// Public vote cast.
    Vote,
    /// Admin content edit.
    Content,
    /// Sign-in account linking.
    Auth,
}

/// Audit record. Newest first in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub user_id: String,
    pub user_name: String,
    pub timestamp: DateTime<Utc>,
    pub details: String,
}

/// Fields for a new audit record; id and timestamp are assigned on append.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TransactionType,
    pub user_id: String,
    pub user_name: String,
    pub details: String,
}

impl NewTransaction {
    /// Shorthand constructor.
    pub fn new(
        kind: TransactionType,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            user_id: user_id.into(),
            user_name: user_name.into(),
            details: details.into(),
        }
    }
}

impl Collection for Transaction {
    const KEY: StoreKey = StoreKey::Transactions;
}
