//! Per-day message counts

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// A local calendar day with no time component
pub type CalendarDate = NaiveDate;

/// Message counts keyed by local calendar day
///
/// Backed by a `BTreeMap`, so iteration is always in ascending date order
/// regardless of the order in which dates were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountTable {
    counts: BTreeMap<CalendarDate, u64>,
}

impl CountTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one item to a day's bucket, creating it if needed
    pub fn increment(&mut self, date: CalendarDate) {
        *self.counts.entry(date).or_insert(0) += 1;
    }

    /// Count for a day (zero when absent)
    pub fn get(&self, date: &CalendarDate) -> u64 {
        self.counts.get(date).copied().unwrap_or(0)
    }

    /// Sum of all buckets
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct days
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate (date, count) pairs in ascending date order
    pub fn iter(&self) -> impl Iterator<Item = (&CalendarDate, &u64)> {
        self.counts.iter()
    }
}

impl FromIterator<CalendarDate> for CountTable {
    fn from_iter<I: IntoIterator<Item = CalendarDate>>(iter: I) -> Self {
        let mut table = CountTable::new();
        for date in iter {
            table.increment(date);
        }
        table
    }
}
