//! Spam counting pipeline
//!
//! Listing pages feed item IDs to a bounded-concurrency fetcher; each
//! settled batch is filtered by the day window, bucketed by local calendar
//! day, and added to the running total shown on the progress line.

mod aggregator;
mod cutoff;
mod fetcher;
mod pipeline;
mod progress;
mod report;
mod timestamp;

#[cfg(test)]
mod test_support;

use std::time::Duration;

pub use aggregator::{Aggregator, ProgressCounter};
pub use cutoff::passes_cutoff;
pub use fetcher::BatchFetcher;
pub use pipeline::{count_spam, count_spam_in, run};
pub use progress::ProgressReporter;
pub use report::{NO_RESULTS, render_report};
pub use timestamp::{calendar_date_in, local_calendar_date};

/// Tuning knobs for a counting run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountOptions {
    /// Maximum fetches in flight, and the batch size
    pub concurrency: usize,
    /// Items requested per listing call
    pub page_size: usize,
    /// How often the progress line is redrawn
    pub progress_interval: Duration,
}

impl CountOptions {
    pub const DEFAULT_CONCURRENCY: usize = 20;
    pub const DEFAULT_PAGE_SIZE: usize = 500;
    pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(100);
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            concurrency: Self::DEFAULT_CONCURRENCY,
            page_size: Self::DEFAULT_PAGE_SIZE,
            progress_interval: Self::DEFAULT_PROGRESS_INTERVAL,
        }
    }
}
