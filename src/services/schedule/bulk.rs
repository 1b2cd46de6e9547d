use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use thiserror::Error;

use crate::models::activity::Activity;
use crate::models::timeslot::{Day, TimeSlot};

/// One slot of a bulk placement request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkSlot {
    pub date: NaiveDate,
    pub timeslot: TimeSlot,
    pub activity_name: String,
    pub spoons: u8,
}

impl BulkSlot {
    pub fn new(
        date: NaiveDate,
        timeslot: TimeSlot,
        activity_name: impl Into<String>,
        spoons: u8,
    ) -> Self {
        Self {
            date,
            timeslot,
            activity_name: activity_name.into(),
            spoons,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BulkScheduleError {
    #[error("No slots selected")]
    NothingSelected,
    #[error("Only recharge (0 spoon) activities can be bulk scheduled, '{0}' costs spoons")]
    NotRecharge(String),
}

/// Slots picked in the bulk scheduling grid, addressed by day of week.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkSelection {
    selected: BTreeSet<(Day, TimeSlot)>,
}

impl BulkSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a slot in or out of the selection. Returns whether it is now selected.
    pub fn toggle(&mut self, day: Day, timeslot: TimeSlot) -> bool {
        if self.selected.remove(&(day, timeslot)) {
            false
        } else {
            self.selected.insert((day, timeslot));
            true
        }
    }

    /// Select `count` consecutive slots of `day` starting at `start`.
    ///
    /// Follows the grid order, so a selection starting at 22:00 runs on
    /// into 00:00, 02:00, ... of the same planner day.
    pub fn select_span(&mut self, day: Day, start: TimeSlot, count: usize) {
        for slot in TimeSlot::span(start, count) {
            self.selected.insert((day, slot));
        }
    }

    pub fn is_selected(&self, day: Day, timeslot: TimeSlot) -> bool {
        self.selected.contains(&(day, timeslot))
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Turn the selection into placement requests for the given week.
    pub fn to_slots(
        &self,
        week_start: NaiveDate,
        activity: &Activity,
    ) -> Result<Vec<BulkSlot>, BulkScheduleError> {
        if !activity.is_recharge() {
            return Err(BulkScheduleError::NotRecharge(activity.name.clone()));
        }
        if self.selected.is_empty() {
            return Err(BulkScheduleError::NothingSelected);
        }

        Ok(self
            .selected
            .iter()
            .map(|(day, timeslot)| {
                BulkSlot::new(
                    week_start + Duration::days(day.index() as i64),
                    *timeslot,
                    activity.name.clone(),
                    activity.spoons,
                )
            })
            .collect())
    }
}
