//! Spam folder items as seen by the counting pipeline

use serde::{Deserialize, Serialize};

/// Unique identifier for a mailbox item (Gmail message ID)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The minimal per-item fields the pipeline needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemMetadata {
    pub id: ItemId,
    /// Server receive time, epoch milliseconds (UTC). `None` means the item
    /// cannot be dated and is left out of the counts.
    pub timestamp_ms: Option<i64>,
}

impl ItemMetadata {
    pub fn new(id: impl Into<ItemId>, timestamp_ms: Option<i64>) -> Self {
        Self {
            id: id.into(),
            timestamp_ms,
        }
    }
}

/// One page of the spam listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub item_ids: Vec<ItemId>,
    /// Cursor for the following page; absent on the last page
    pub next_cursor: Option<String>,
}

impl ListingPage {
    pub fn new(item_ids: Vec<ItemId>, next_cursor: Option<String>) -> Self {
        Self {
            item_ids,
            next_cursor,
        }
    }

    /// A page with no successor
    pub fn last(item_ids: Vec<ItemId>) -> Self {
        Self::new(item_ids, None)
    }
}
