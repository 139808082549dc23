//! Input parsing for report queries
//!
//! Everything here runs before any store query is issued, and rejects
//! rather than clamps.

use crate::errors::{StatsError, StatsResult};
use crate::window::{MAX_YEAR, MIN_YEAR};
use chrono::{Datelike, NaiveDate};
use regex_lite::Regex;
use std::sync::OnceLock;

fn iso_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("ISO date pattern is valid"))
}

/// Parse a strict `YYYY-MM-DD` calendar date within the supported years
pub fn parse_iso_date(field: &str, value: &str) -> StatsResult<NaiveDate> {
    if !iso_date_pattern().is_match(value) {
        return Err(StatsError::invalid_range(format!(
            "{} must be formatted as YYYY-MM-DD, got '{}'",
            field, value
        )));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        StatsError::invalid_range(format!("{} is not a calendar date: '{}'", field, value))
    })?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(StatsError::invalid_range(format!(
            "{} must be between years {} and {}, got '{}'",
            field, MIN_YEAR, MAX_YEAR, value
        )));
    }
    Ok(date)
}

/// Parse an optional date query parameter
pub fn parse_optional_date(field: &str, value: Option<&str>) -> StatsResult<Option<NaiveDate>> {
    value.map(|v| parse_iso_date(field, v)).transpose()
}

/// Parse a month number. Range checking happens in window resolution.
pub fn parse_month(value: &str) -> StatsResult<u32> {
    value
        .parse::<u32>()
        .map_err(|_| StatsError::invalid_range(format!("month must be a number, got '{}'", value)))
}

/// Parse a four-digit year
pub fn parse_year(value: &str) -> StatsResult<i32> {
    value
        .parse::<i32>()
        .map_err(|_| StatsError::invalid_range(format!("year must be a number, got '{}'", value)))
}
