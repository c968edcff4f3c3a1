//! News ticker lines.

use serde::{Deserialize, Serialize};

use super::Collection;
use crate::keys::StoreKey;

/// One ticker line. Stored as a bare JSON string; list order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TickerItem(pub String);

impl Collection for TickerItem {
    const KEY: StoreKey = StoreKey::NewsTicker;
}

impl From<&str> for TickerItem {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}
