use chrono::NaiveDate;
use spoonful::models::timeslot::{Day, TimeSlot};
use test_case::test_case;

#[test_case(TimeSlot::H06, "06:00", 0; "first slot of the day")]
#[test_case(TimeSlot::H22, "22:00", 8; "last slot before midnight")]
#[test_case(TimeSlot::H00, "00:00", 9; "midnight")]
#[test_case(TimeSlot::H04, "04:00", 11; "last slot")]
fn test_slot_label_and_index(slot: TimeSlot, label: &str, index: usize) {
    assert_eq!(slot.label(), label);
    assert_eq!(slot.index(), index);
    assert_eq!(label.parse::<TimeSlot>().unwrap(), slot);
}

#[test_case(TimeSlot::H22, 1, TimeSlot::H00; "across midnight")]
#[test_case(TimeSlot::H04, 1, TimeSlot::H06; "wraps to start")]
#[test_case(TimeSlot::H06, 12, TimeSlot::H06; "full cycle")]
#[test_case(TimeSlot::H10, 5, TimeSlot::H20; "same day")]
fn test_slot_offset(start: TimeSlot, steps: usize, expected: TimeSlot) {
    assert_eq!(start.offset(steps), expected);
}

#[test_case("05:00"; "between slots")]
#[test_case("6:00"; "missing leading zero")]
#[test_case(""; "empty")]
fn test_slot_parse_rejects(input: &str) {
    assert!(input.parse::<TimeSlot>().is_err());
}

#[test_case(2025, 1, 6, Day::Mon; "monday")]
#[test_case(2025, 1, 11, Day::Sat; "saturday")]
#[test_case(2025, 1, 12, Day::Sun; "sunday")]
#[test_case(2024, 2, 29, Day::Thu; "leap day")]
fn test_day_from_date(year: i32, month: u32, day: u32, expected: Day) {
    let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
    assert_eq!(Day::from_date(date), expected);
}

#[test_case("Mon", Day::Mon)]
#[test_case("sun", Day::Sun)]
#[test_case("WED", Day::Wed)]
fn test_day_parse_case_insensitive(input: &str, expected: Day) {
    assert_eq!(input.parse::<Day>().unwrap(), expected);
}

#[test]
fn test_span_caps_at_full_day() {
    assert_eq!(TimeSlot::span(TimeSlot::H20, 20).len(), 12);
    assert_eq!(
        TimeSlot::span(TimeSlot::H20, 3),
        vec![TimeSlot::H20, TimeSlot::H22, TimeSlot::H00]
    );
}
