//! Gmail API integration
//!
//! This module provides:
//! - OAuth2 authentication flow (read-only scope)
//! - A Gmail client implementing [`MailSource`](crate::source::MailSource)
//!   over the SPAM label

mod auth;
mod client;

pub use auth::GmailAuth;
pub use client::GmailClient;

/// Gmail API response types
pub mod api {
    use serde::Deserialize;

    /// Response from listing messages
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ListMessagesResponse {
        pub messages: Option<Vec<MessageRef>>,
        pub next_page_token: Option<String>,
        pub result_size_estimate: Option<u32>,
    }

    /// Reference to a message (just ID and thread ID)
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MessageRef {
        pub id: String,
        pub thread_id: Option<String>,
    }

    /// Message fetched with `format=minimal`
    ///
    /// Only the fields the counter reads are declared; the rest of the
    /// payload is ignored.
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MinimalMessage {
        pub id: String,
        /// Epoch milliseconds, sent as a decimal string
        pub internal_date: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::api::*;

    #[test]
    fn test_parse_list_response() {
        let json = r#"{
            "messages": [
                {"id": "18c1", "threadId": "18c1"},
                {"id": "18c2", "threadId": "18b0"}
            ],
            "nextPageToken": "token-2",
            "resultSizeEstimate": 201
        }"#;

        let list: ListMessagesResponse = serde_json::from_str(json).unwrap();
        let messages = list.messages.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].id, "18c2");
        assert_eq!(list.next_page_token.as_deref(), Some("token-2"));
    }

    #[test]
    fn test_parse_empty_list_response() {
        let list: ListMessagesResponse =
            serde_json::from_str(r#"{"resultSizeEstimate": 0}"#).unwrap();
        assert!(list.messages.is_none());
        assert!(list.next_page_token.is_none());
    }

    #[test]
    fn test_parse_minimal_message() {
        let json = r#"{
            "id": "18c1",
            "threadId": "18c1",
            "labelIds": ["SPAM"],
            "snippet": "",
            "sizeEstimate": 4412,
            "historyId": "99120",
            "internalDate": "1718445600000"
        }"#;

        let msg: MinimalMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, "18c1");
        assert_eq!(msg.internal_date.as_deref(), Some("1718445600000"));
    }
}
