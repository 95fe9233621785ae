//! Pagination driver
//!
//! Walks the spam listing page by page, fetches each page's items through
//! the [`BatchFetcher`], and folds every settled batch into the aggregator.
//! Stops when a page comes back without a cursor; the first error aborts.

use chrono::{Local, TimeZone};
use log::{debug, info};
use std::io::Write;
use std::time::Instant;

use super::CountOptions;
use super::aggregator::{Aggregator, ProgressCounter};
use super::fetcher::BatchFetcher;
use super::progress::ProgressReporter;
use crate::error::CountError;
use crate::models::{CountTable, RunConfig};
use crate::source::MailSource;

/// Count spam per local calendar day, publishing the running total to
/// `counter` after every batch
pub fn count_spam<S: MailSource + ?Sized>(
    source: &S,
    config: &RunConfig,
    options: &CountOptions,
    counter: &ProgressCounter,
) -> Result<CountTable, CountError> {
    count_spam_in(source, config, options, counter, Local)
}

/// Same as [`count_spam`], bucketing by calendar day in `tz`
pub fn count_spam_in<S, Tz>(
    source: &S,
    config: &RunConfig,
    options: &CountOptions,
    counter: &ProgressCounter,
    tz: Tz,
) -> Result<CountTable, CountError>
where
    S: MailSource + ?Sized,
    Tz: TimeZone,
{
    let start = Instant::now();
    let fetcher = BatchFetcher::new(options.concurrency)?;
    let mut aggregator = Aggregator::with_timezone(config.cutoff_ms(), counter.clone(), tz);
    let query = config.query_filter();

    let mut cursor: Option<String> = None;
    let mut pages = 0usize;
    let mut fetched = 0usize;

    loop {
        let page = source
            .list_page(cursor.as_deref(), options.page_size, query.as_deref())
            .map_err(CountError::RemoteCall)?;
        pages += 1;
        fetched += page.item_ids.len();
        debug!(
            "Page {}: {} items, more: {}",
            pages,
            page.item_ids.len(),
            page.next_cursor.is_some()
        );

        fetcher.fetch_all(source, &page.item_ids, |batch| {
            aggregator.absorb(&batch);
        })?;

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    info!(
        "Counted {} of {} spam messages across {} pages in {}ms",
        aggregator.total(),
        fetched,
        pages,
        start.elapsed().as_millis()
    );
    Ok(aggregator.into_table())
}

/// Count spam with a live progress line written to `progress_out`
///
/// The progress thread starts right before the first listing call and is
/// stopped and joined before this returns, whether counting succeeded or not.
pub fn run<S, W>(
    source: &S,
    config: &RunConfig,
    options: &CountOptions,
    progress_out: W,
) -> Result<CountTable, CountError>
where
    S: MailSource + ?Sized,
    W: Write + Send + 'static,
{
    let counter = ProgressCounter::new();
    let reporter =
        ProgressReporter::start(counter.clone(), options.progress_interval, progress_out)
            .map_err(CountError::Progress)?;

    let result = count_spam(source, config, options, &counter);
    reporter.stop();
    result
}
