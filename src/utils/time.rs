//! Calendar date helpers

use chrono::{Local, NaiveDate};

/// Format used for every persisted date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date in local time as `YYYY-MM-DD`
pub fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Check if `value` is a real calendar date written as `YYYY-MM-DD`
pub fn is_iso_date(value: &str) -> bool {
    value.len() == 10 && NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
}
