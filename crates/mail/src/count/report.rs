//! Final per-day table

use std::io::{self, Write};

use crate::models::CountTable;

/// Line printed instead of a table when nothing was counted
pub const NO_RESULTS: &str = "No results.";

/// Write the table as `<weekday> <date> <count>` lines in date order,
/// followed by the total
pub fn render_report<W: Write>(table: &CountTable, out: &mut W) -> io::Result<()> {
    if table.is_empty() {
        return writeln!(out, "{}", NO_RESULTS);
    }

    for (date, count) in table.iter() {
        writeln!(out, "{} {} {}", date.format("%a"), date.format("%Y-%m-%d"), count)?;
    }
    writeln!(out, "Total: {}", table.total())
}
