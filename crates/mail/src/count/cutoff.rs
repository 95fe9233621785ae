//! Day-window filter

/// Decide whether an item falls inside the counting window
///
/// Compared in raw UTC milliseconds, before any local-time conversion.
/// Undated items never pass: they cannot be bucketed.
pub fn passes_cutoff(timestamp_ms: Option<i64>, cutoff_ms: Option<i64>) -> bool {
    match (timestamp_ms, cutoff_ms) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(ts), Some(cutoff)) => ts >= cutoff,
    }
}
