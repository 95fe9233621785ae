//! Mail crate - Spam folder counting
//!
//! This crate provides:
//! - Domain models (ItemId, ItemMetadata, ListingPage, CountTable, RunConfig)
//! - Gmail API client and OAuth authentication
//! - The `MailSource` trait the pipeline reads through
//! - The counting pipeline: paginated listing, batched concurrent fetches,
//!   day-window filtering, per-day aggregation, and a live progress line
//!
//! The crate has no terminal or CLI dependencies; the binary wires it up.

pub mod config;
pub mod count;
pub mod error;
pub mod gmail;
pub mod models;
pub mod source;

pub use config::GmailCredentials;
pub use count::{
    BatchFetcher, CountOptions, ProgressCounter, ProgressReporter, count_spam, count_spam_in,
    render_report, run,
};
pub use error::CountError;
pub use gmail::{GmailAuth, GmailClient};
pub use models::{CalendarDate, CountTable, ItemId, ItemMetadata, ListingPage, RunConfig};
pub use source::{MailSource, StaticMailSource};
