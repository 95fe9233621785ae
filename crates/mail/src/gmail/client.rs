//! Gmail API HTTP client
//!
//! Lists the SPAM label and fetches minimal per-message metadata.
//! Uses synchronous HTTP (ureq) so batches can be fanned out on a thread pool.

use anyhow::{Context, Result};
use log::debug;
use url::Url;

use super::GmailAuth;
use super::api::{ListMessagesResponse, MinimalMessage};
use crate::models::{ItemId, ItemMetadata, ListingPage};
use crate::source::MailSource;

/// Gmail API client bound to one access token
///
/// The token is acquired once up front so concurrent fetches never race
/// each other into the OAuth flow.
pub struct GmailClient {
    access_token: String,
}

impl GmailClient {
    /// Gmail API base URL
    const BASE_URL: &'static str = "https://gmail.googleapis.com/gmail/v1";

    /// Label every listing call is restricted to
    const SPAM_LABEL: &'static str = "SPAM";

    /// Largest page the listing endpoint accepts
    pub const MAX_PAGE_SIZE: usize = 500;

    /// Create a client from an already-acquired access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// Authenticate (refreshing or prompting as needed) and build a client
    pub fn connect(auth: &GmailAuth) -> Result<Self> {
        Ok(Self::new(auth.get_access_token()?))
    }

    /// Build the spam listing URL for one page
    fn list_url(page_size: usize, page_token: Option<&str>, query: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/users/me/messages", Self::BASE_URL))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("labelIds", Self::SPAM_LABEL)
                .append_pair("includeSpamTrash", "true")
                .append_pair(
                    "maxResults",
                    &page_size.clamp(1, Self::MAX_PAGE_SIZE).to_string(),
                );
            if let Some(token) = page_token {
                pairs.append_pair("pageToken", token);
            }
            if let Some(q) = query {
                pairs.append_pair("q", q);
            }
        }
        Ok(url)
    }

    /// Build the minimal-format message URL
    fn message_url(id: &ItemId) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/users/me/messages/", Self::BASE_URL))?
            .join(id.as_str())
            .context("Invalid message ID")?;
        url.query_pairs_mut().append_pair("format", "minimal");
        Ok(url)
    }

    /// List one page of spam message IDs
    pub fn list_spam(
        &self,
        page_size: usize,
        page_token: Option<&str>,
        query: Option<&str>,
    ) -> Result<ListMessagesResponse> {
        let url = Self::list_url(page_size, page_token, query)?;

        let mut response = ureq::get(url.as_str())
            .header("Authorization", &format!("Bearer {}", self.access_token))
            .call()
            .context("Failed to send list messages request")?;

        let list: ListMessagesResponse = response
            .body_mut()
            .read_json()
            .context("Failed to parse list messages response")?;

        Ok(list)
    }

    /// Get a message's ID and internal date
    pub fn get_message_minimal(&self, id: &ItemId) -> Result<MinimalMessage> {
        let url = Self::message_url(id)?;

        let mut response = ureq::get(url.as_str())
            .header("Authorization", &format!("Bearer {}", self.access_token))
            .call()
            .with_context(|| format!("Failed to send get message request for {}", id.as_str()))?;

        let message: MinimalMessage = response
            .body_mut()
            .read_json()
            .context("Failed to parse message response")?;

        Ok(message)
    }
}

impl MailSource for GmailClient {
    fn list_page(
        &self,
        cursor: Option<&str>,
        page_size: usize,
        query: Option<&str>,
    ) -> Result<ListingPage> {
        let response = self.list_spam(page_size, cursor, query)?;
        let item_ids = response
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(|m| ItemId::new(m.id))
            .collect();
        Ok(ListingPage::new(item_ids, response.next_page_token))
    }

    fn get_item(&self, id: &ItemId) -> Result<ItemMetadata> {
        let message = self.get_message_minimal(id)?;
        Ok(to_item_metadata(message))
    }
}

/// Convert a minimal message, treating a missing or garbled date as undated
fn to_item_metadata(message: MinimalMessage) -> ItemMetadata {
    let timestamp_ms = message
        .internal_date
        .as_deref()
        .and_then(|raw| match raw.parse::<i64>() {
            Ok(ms) => Some(ms),
            Err(_) => {
                debug!("Message {} has unparseable internalDate {:?}", message.id, raw);
                None
            }
        });
    ItemMetadata::new(message.id, timestamp_ms)
}
