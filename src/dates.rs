//! calendar helpers: `MM/DD/YYYY` parsing and whole-month arithmetic

use chrono::{Datelike, Months, NaiveDate};

use crate::errors::{MortgageError, Result};

/// canonical text form for dates at the crate boundary
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// parse a `MM/DD/YYYY` date, rejecting anything else
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|e| MortgageError::InvalidDate {
        input: input.to_string(),
        message: format!("expected MM/DD/YYYY ({e})"),
    })
}

/// render a date in the canonical `MM/DD/YYYY` form
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Whole calendar months from `start` to `end`.
///
/// Only year and month are compared; the day of month is ignored, so
/// 01/31 -> 02/01 counts as one month. A start after `end` yields zero.
pub fn elapsed_months(start: NaiveDate, end: NaiveDate) -> u32 {
    let months = (end.year() - start.year()) as i64 * 12 + end.month() as i64 - start.month() as i64;
    months.max(0) as u32
}

/// `date` plus `months` calendar months, clamped to the end of short months
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| MortgageError::OutOfRange {
            message: format!("{} plus {} months is not a representable date", format_date(date), months),
        })
}

/// serde adapter for `MM/DD/YYYY` date fields
pub mod mdy {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }
}
