//! Month labels for report columns

use chrono::{Datelike, Months, NaiveDate};

/// Label format for period columns, e.g. `Aug-2025`
pub const MONTH_LABEL_FORMAT: &str = "%b-%Y";

/// One `Mon-YYYY` label per period, starting at the month containing `start`
pub fn month_labels(start: NaiveDate, count: u32) -> Vec<String> {
    let first = start.with_day(1).unwrap_or(start);
    (0..count)
        .map(|i| match first.checked_add_months(Months::new(i)) {
            Some(month) => month.format(MONTH_LABEL_FORMAT).to_string(),
            // Past chrono's calendar range; fall back to the index
            None => format!("P{}", i),
        })
        .collect()
}
