//! Timetable entry model.
//!
//! An entry is one activity placed into one `(date, timeslot)` slot of a
//! week. The activity's name and spoon cost are copied at placement time, so
//! later catalog edits never rewrite already placed entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::timeslot::{Day, TimeSlot};
use crate::utils::date::week_start;

/// Address of a slot in the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    pub date: NaiveDate,
    pub timeslot: TimeSlot,
}

impl SlotKey {
    pub fn new(date: NaiveDate, timeslot: TimeSlot) -> Self {
        Self { date, timeslot }
    }
}

/// The `(name, spoons)` pair copied out of an activity when it is placed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityRef {
    pub name: String,
    pub spoons: u8,
}

impl ActivityRef {
    pub fn new(name: impl Into<String>, spoons: u8) -> Self {
        Self {
            name: name.into(),
            spoons,
        }
    }
}

/// One placement in the weekly timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub week_start: NaiveDate,
    pub date: NaiveDate,
    pub day_name: Day,
    pub timeslot: TimeSlot,
    pub activity_name: String,
    pub spoons: u8,
}

impl TimetableEntry {
    /// Create an entry, deriving `week_start` and `day_name` from `date`.
    pub fn new(
        date: NaiveDate,
        timeslot: TimeSlot,
        activity_name: impl Into<String>,
        spoons: u8,
    ) -> Self {
        Self {
            week_start: week_start(date),
            date,
            day_name: Day::from_date(date),
            timeslot,
            activity_name: activity_name.into(),
            spoons,
        }
    }

    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.date, self.timeslot)
    }

    pub fn is_at(&self, date: NaiveDate, timeslot: TimeSlot) -> bool {
        self.date == date && self.timeslot == timeslot
    }

    pub fn activity(&self) -> ActivityRef {
        ActivityRef::new(self.activity_name.clone(), self.spoons)
    }

    /// Re-address the entry, keeping `day_name` and `week_start` consistent
    /// with the new date.
    pub(crate) fn relocate(&mut self, date: NaiveDate, timeslot: TimeSlot) {
        self.date = date;
        self.timeslot = timeslot;
        self.day_name = Day::from_date(date);
        self.week_start = week_start(date);
    }
}
