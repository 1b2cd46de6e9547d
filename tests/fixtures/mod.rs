// Test fixtures - reusable test data
// Shared weeks, entries and database setup for the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use spoonful::models::entry::TimetableEntry;
use spoonful::models::timeslot::TimeSlot;
use spoonful::services::database::Database;

/// Sample weeks for testing
pub mod weeks {
    use super::*;

    /// Monday Jan 6, 2025
    pub fn jan_6_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    /// Monday Dec 30, 2024, the week before
    pub fn dec_30_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 30).unwrap()
    }

    /// Day `offset` (0 = Monday) of the week of Jan 6, 2025
    pub fn jan_6_week_day(offset: i64) -> NaiveDate {
        jan_6_2025() + chrono::Duration::days(offset)
    }
}

/// Sample entries for testing
pub mod entries {
    use super::*;

    pub fn reading(date: NaiveDate, timeslot: TimeSlot) -> TimetableEntry {
        TimetableEntry::new(date, timeslot, "Reading", 1)
    }

    pub fn gym(date: NaiveDate, timeslot: TimeSlot) -> TimetableEntry {
        TimetableEntry::new(date, timeslot, "Gym/Exercise", 4)
    }

    /// A Monday morning routine for the given week
    pub fn morning_routine(monday: NaiveDate) -> Vec<TimetableEntry> {
        vec![
            TimetableEntry::new(monday, TimeSlot::H06, "Sleep", 0),
            TimetableEntry::new(monday, TimeSlot::H08, "Light Cooking", 2),
            TimetableEntry::new(monday, TimeSlot::H10, "Laptop Work", 3),
        ]
    }
}

/// Open a schema-initialised database in a temporary directory.
pub fn temp_database() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open_path(&dir.path().join("planner.db")).unwrap();
    db.initialize_schema().unwrap();
    (dir, db)
}

/// Route library logging to the test output.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
