//! Domain models for spam counting

mod count_table;
mod item;
mod run_config;

pub use count_table::{CalendarDate, CountTable};
pub use item::{ItemId, ItemMetadata, ListingPage};
pub use run_config::RunConfig;
