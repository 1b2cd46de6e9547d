use chrono::NaiveDate;

use super::EntrySet;
use crate::models::profile::Profile;
use crate::models::timeslot::{Day, DAYS_PER_WEEK};

/// Spoon usage of one week, compared against a profile's limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergySummary {
    pub daily: [u32; DAYS_PER_WEEK],
}

impl EnergySummary {
    pub fn for_week(entries: &EntrySet, week_start: NaiveDate) -> Self {
        Self {
            daily: entries.daily_totals(week_start),
        }
    }

    pub fn day_total(&self, day: Day) -> u32 {
        self.daily[day.index()]
    }

    /// Monday to Friday.
    pub fn weekday_total(&self) -> u32 {
        Day::ALL
            .iter()
            .filter(|day| !day.is_weekend())
            .map(|day| self.day_total(*day))
            .sum()
    }

    /// Saturday and Sunday.
    pub fn weekend_total(&self) -> u32 {
        Day::ALL
            .iter()
            .filter(|day| day.is_weekend())
            .map(|day| self.day_total(*day))
            .sum()
    }

    pub fn week_total(&self) -> u32 {
        self.daily.iter().sum()
    }

    /// Days whose total exceeds the daily limit.
    pub fn days_over_limit(&self, profile: &Profile) -> Vec<Day> {
        Day::ALL
            .iter()
            .copied()
            .filter(|day| self.day_total(*day) > profile.daily_limit)
            .collect()
    }

    /// Spoons over the weekday budget, if any.
    pub fn weekday_overage(&self, profile: &Profile) -> Option<u32> {
        self.weekday_total()
            .checked_sub(profile.weekday_limit)
            .filter(|over| *over > 0)
    }

    /// Spoons over the weekend budget, if any.
    pub fn weekend_overage(&self, profile: &Profile) -> Option<u32> {
        self.weekend_total()
            .checked_sub(profile.weekend_limit)
            .filter(|over| *over > 0)
    }
}
