// Date utility functions
// Monday-anchored week math and the YYYY-MM-DD storage key format

use chrono::{Datelike, Duration, Local, NaiveDate};
use thiserror::Error;

/// Storage format for dates and week keys.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date key '{value}': expected YYYY-MM-DD")]
pub struct DateKeyError {
    pub value: String,
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The seven dates of the week starting at `week_start`, Monday first.
pub fn week_days(week_start: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|offset| week_start + Duration::days(offset as i64))
}

pub fn next_week(week_start: NaiveDate) -> NaiveDate {
    week_start + Duration::days(7)
}

pub fn previous_week(week_start: NaiveDate) -> NaiveDate {
    week_start - Duration::days(7)
}

/// Human readable range, e.g. `Jan 6 - Jan 12, 2025`.
pub fn format_week_range(week_start: NaiveDate) -> String {
    let week_end = week_start + Duration::days(6);
    format!(
        "{} - {}",
        week_start.format("%b %-d"),
        week_end.format("%b %-d, %Y")
    )
}

pub fn format_date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

pub fn parse_date_key(value: &str) -> Result<NaiveDate, DateKeyError> {
    NaiveDate::parse_from_str(value.trim(), DATE_KEY_FORMAT).map_err(|_| DateKeyError {
        value: value.to_string(),
    })
}

pub fn is_today(date: NaiveDate) -> bool {
    date == Local::now().date_naive()
}
