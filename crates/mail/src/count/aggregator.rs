//! Folding fetched items into per-day counts

use chrono::{Local, TimeZone};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::cutoff::passes_cutoff;
use super::timestamp::calendar_date_in;
use crate::models::{CountTable, ItemMetadata};

/// Running total shared with the progress line
///
/// Only the aggregator writes it; readers may see a value one batch stale.
#[derive(Debug, Clone, Default)]
pub struct ProgressCounter(Arc<AtomicU64>);

impl ProgressCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    fn set(&self, value: u64) {
        self.0.store(value, Ordering::Relaxed);
    }
}

/// Accumulates completed batches into a [`CountTable`]
pub struct Aggregator<Tz: TimeZone = Local> {
    table: CountTable,
    total: u64,
    cutoff_ms: Option<i64>,
    counter: ProgressCounter,
    tz: Tz,
}

impl Aggregator<Local> {
    /// Bucket by this machine's local calendar day
    pub fn new(cutoff_ms: Option<i64>, counter: ProgressCounter) -> Self {
        Self::with_timezone(cutoff_ms, counter, Local)
    }
}

impl<Tz: TimeZone> Aggregator<Tz> {
    /// Bucket by calendar day in `tz`
    pub fn with_timezone(cutoff_ms: Option<i64>, counter: ProgressCounter, tz: Tz) -> Self {
        counter.set(0);
        Self {
            table: CountTable::new(),
            total: 0,
            cutoff_ms,
            counter,
            tz,
        }
    }

    /// Count every item of a settled batch that is dated and inside the window
    ///
    /// Everything else is dropped without creating a bucket. The shared
    /// counter is published once per batch. Returns how many items counted.
    pub fn absorb(&mut self, batch: &[ItemMetadata]) -> u64 {
        let before = self.total;
        for item in batch {
            if !passes_cutoff(item.timestamp_ms, self.cutoff_ms) {
                continue;
            }
            if let Some(date) = calendar_date_in(item.timestamp_ms, &self.tz) {
                self.table.increment(date);
                self.total += 1;
            }
        }
        self.counter.set(self.total);
        self.total - before
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn into_table(self) -> CountTable {
        self.table
    }
}
