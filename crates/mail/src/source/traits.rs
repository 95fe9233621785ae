//! Mail source trait definition

use crate::models::{ItemId, ItemMetadata, ListingPage};
use anyhow::Result;

/// Trait for the two remote calls the counter makes
///
/// Implementations are shared across fetch threads, so they must be
/// `Send + Sync`. Errors are not retried by callers.
pub trait MailSource: Send + Sync {
    /// List one page of spam item IDs
    ///
    /// `cursor` is `None` for the first page and the previous page's
    /// `next_cursor` afterwards. `query` is an optional server-side search
    /// filter narrowing the listing.
    fn list_page(
        &self,
        cursor: Option<&str>,
        page_size: usize,
        query: Option<&str>,
    ) -> Result<ListingPage>;

    /// Fetch the minimal metadata (ID and timestamp) for one item
    fn get_item(&self, id: &ItemId) -> Result<ItemMetadata>;
}
