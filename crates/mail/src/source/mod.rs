//! Read-only access to a remote spam folder
//!
//! The counting pipeline only ever talks to a [`MailSource`]. The Gmail
//! client is the production implementation; [`StaticMailSource`] serves a
//! fixed dataset from memory.

mod memory;
mod traits;

pub use memory::StaticMailSource;
pub use traits::MailSource;
