//! Per-run window settings

use chrono::{DateTime, Duration, Utc};

/// The time window a run counts over
///
/// Computed once at startup and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Number of days to look back, if limited
    pub day_limit: Option<u32>,
    /// Earliest instant that still counts; `None` counts everything
    pub cutoff: Option<DateTime<Utc>>,
}

impl RunConfig {
    /// Build a config relative to the current time
    pub fn new(day_limit: Option<u32>) -> Self {
        Self::at(day_limit, Utc::now())
    }

    /// Build a config relative to a fixed instant
    ///
    /// A day limit of `d` puts the cutoff at exactly `now - d days`, including
    /// `d = 0` (only items received from `now` onwards count). A window
    /// reaching past the earliest representable instant counts everything.
    pub fn at(day_limit: Option<u32>, now: DateTime<Utc>) -> Self {
        let cutoff = day_limit.map(|days| {
            now.checked_sub_signed(Duration::days(i64::from(days)))
                .unwrap_or(DateTime::<Utc>::MIN_UTC)
        });
        Self { day_limit, cutoff }
    }

    /// Config with no cutoff
    pub fn unlimited() -> Self {
        Self {
            day_limit: None,
            cutoff: None,
        }
    }

    /// Cutoff as epoch milliseconds, the unit item timestamps use
    pub fn cutoff_ms(&self) -> Option<i64> {
        self.cutoff.map(|c| c.timestamp_millis())
    }

    /// Server-side search filter narrowing the listing to the window
    ///
    /// Gmail's `after:` operator takes epoch seconds. It only trims the
    /// listing; the exact millisecond cutoff is still applied per item. A
    /// cutoff before the Unix epoch trims nothing, so no filter is sent.
    pub fn query_filter(&self) -> Option<String> {
        self.cutoff
            .map(|c| c.timestamp())
            .filter(|secs| *secs >= 0)
            .map(|secs| format!("after:{}", secs))
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::unlimited()
    }
}
