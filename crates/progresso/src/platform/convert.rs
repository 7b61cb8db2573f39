use chrono::{DateTime, NaiveDate};

use super::errors::{AdapterError, Result};

/// Convert epoch seconds to the UTC calendar date.
pub fn epoch_seconds_to_date(seconds: i64) -> Result<NaiveDate> {
    DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| AdapterError::parse(format!("timestamp out of range: {seconds}")))
}

/// Uppercase the first character, leaving the rest untouched ("easy" -> "Easy").
pub fn title_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
