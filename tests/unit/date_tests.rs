use chrono::NaiveDate;
use spoonful::utils::date::{
    format_date_key, format_week_range, next_week, parse_date_key, previous_week, week_days,
    week_start,
};
use test_case::test_case;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test_case(ymd(2025, 1, 6), ymd(2025, 1, 6); "monday is its own start")]
#[test_case(ymd(2025, 1, 9), ymd(2025, 1, 6); "midweek")]
#[test_case(ymd(2025, 1, 12), ymd(2025, 1, 6); "sunday belongs to the week before")]
#[test_case(ymd(2025, 1, 1), ymd(2024, 12, 30); "across the year boundary")]
fn test_week_start(date: NaiveDate, expected: NaiveDate) {
    assert_eq!(week_start(date), expected);
}

#[test_case(ymd(2025, 1, 6), "Jan 6 - Jan 12, 2025"; "within a month")]
#[test_case(ymd(2025, 1, 27), "Jan 27 - Feb 2, 2025"; "across months")]
fn test_format_week_range(start: NaiveDate, expected: &str) {
    assert_eq!(format_week_range(start), expected);
}

#[test_case("2025-01-06", true; "valid")]
#[test_case("2025-02-30", false; "impossible date")]
#[test_case("06/01/2025", false; "wrong format")]
fn test_parse_date_key(input: &str, valid: bool) {
    assert_eq!(parse_date_key(input).is_ok(), valid);
}

#[test]
fn test_week_navigation() {
    let monday = ymd(2025, 1, 6);
    assert_eq!(next_week(monday), ymd(2025, 1, 13));
    assert_eq!(previous_week(monday), ymd(2024, 12, 30));
    assert_eq!(week_days(monday)[6], ymd(2025, 1, 12));
    assert_eq!(format_date_key(monday), "2025-01-06");
}
