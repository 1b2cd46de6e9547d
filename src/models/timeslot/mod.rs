//! Fixed weekly time grid.
//!
//! A day is split into twelve two-hour slots starting at 06:00 and wrapping
//! past midnight to 04:00. Slot order is significant: duration-based
//! selections walk the grid forward and wrap modulo 12.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of slots in a planner day.
pub const SLOTS_PER_DAY: usize = 12;

/// Number of days in a planner week.
pub const DAYS_PER_WEEK: usize = 7;

/// One of the twelve fixed two-hour slots of a planner day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "06:00")]
    H06,
    #[serde(rename = "08:00")]
    H08,
    #[serde(rename = "10:00")]
    H10,
    #[serde(rename = "12:00")]
    H12,
    #[serde(rename = "14:00")]
    H14,
    #[serde(rename = "16:00")]
    H16,
    #[serde(rename = "18:00")]
    H18,
    #[serde(rename = "20:00")]
    H20,
    #[serde(rename = "22:00")]
    H22,
    #[serde(rename = "00:00")]
    H00,
    #[serde(rename = "02:00")]
    H02,
    #[serde(rename = "04:00")]
    H04,
}

impl TimeSlot {
    /// All slots in planner order (06:00 first, 04:00 last).
    pub const ALL: [TimeSlot; SLOTS_PER_DAY] = [
        TimeSlot::H06,
        TimeSlot::H08,
        TimeSlot::H10,
        TimeSlot::H12,
        TimeSlot::H14,
        TimeSlot::H16,
        TimeSlot::H18,
        TimeSlot::H20,
        TimeSlot::H22,
        TimeSlot::H00,
        TimeSlot::H02,
        TimeSlot::H04,
    ];

    /// The `HH:MM` label used for storage and display.
    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::H06 => "06:00",
            TimeSlot::H08 => "08:00",
            TimeSlot::H10 => "10:00",
            TimeSlot::H12 => "12:00",
            TimeSlot::H14 => "14:00",
            TimeSlot::H16 => "16:00",
            TimeSlot::H18 => "18:00",
            TimeSlot::H20 => "20:00",
            TimeSlot::H22 => "22:00",
            TimeSlot::H00 => "00:00",
            TimeSlot::H02 => "02:00",
            TimeSlot::H04 => "04:00",
        }
    }

    /// Position of the slot within the planner day (0..12).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Slot at a planner-day position, wrapping modulo 12.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % SLOTS_PER_DAY]
    }

    /// Hour of day the slot starts at.
    pub fn hour(self) -> u32 {
        ((6 + 2 * self.index()) % 24) as u32
    }

    /// The slot `steps` positions later, wrapping past 04:00 back to 06:00.
    pub fn offset(self, steps: usize) -> Self {
        Self::from_index(self.index() + steps)
    }

    /// Consecutive slots starting at `start`, covering `count` slots.
    ///
    /// The walk wraps modulo 12 and never yields the same slot twice.
    pub fn span(start: TimeSlot, count: usize) -> Vec<TimeSlot> {
        (0..count.min(SLOTS_PER_DAY))
            .map(|step| start.offset(step))
            .collect()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time slot '{0}'")]
pub struct TimeSlotParseError(pub String);

impl FromStr for TimeSlot {
    type Err = TimeSlotParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|slot| slot.label() == trimmed)
            .ok_or_else(|| TimeSlotParseError(value.to_string()))
    }
}

/// Day of a Monday-first planner week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub const ALL: [Day; DAYS_PER_WEEK] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    /// Three letter abbreviation ("Mon", "Tue", ...).
    pub fn abbreviation(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }

    /// Offset from Monday (0..7).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        Self::ALL[weekday.num_days_from_monday() as usize]
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_weekday(date.weekday())
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Day::Sat | Day::Sun)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown day name '{0}'")]
pub struct DayParseError(pub String);

impl FromStr for Day {
    type Err = DayParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|day| day.abbreviation().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DayParseError(value.to_string()))
    }
}
