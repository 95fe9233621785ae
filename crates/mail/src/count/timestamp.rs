//! Server timestamp to calendar day conversion

use chrono::{Local, TimeZone, Utc};

use crate::models::CalendarDate;

/// Convert epoch milliseconds to the calendar day in `tz`
///
/// A missing timestamp, or one outside chrono's range, yields `None`.
pub fn calendar_date_in<Tz: TimeZone>(timestamp_ms: Option<i64>, tz: &Tz) -> Option<CalendarDate> {
    let instant = Utc.timestamp_millis_opt(timestamp_ms?).single()?;
    Some(instant.with_timezone(tz).date_naive())
}

/// Convert epoch milliseconds to the calendar day on this machine's clock
pub fn local_calendar_date(timestamp_ms: Option<i64>) -> Option<CalendarDate> {
    calendar_date_in(timestamp_ms, &Local)
}
