use std::collections::HashSet;

use chrono::{DateTime, Duration, Local, NaiveDate};

use super::{EntrySet, MoveOutcome};
use crate::models::activity::MAX_SPOONS;
use crate::models::entry::{ActivityRef, SlotKey};
use crate::models::timeslot::TimeSlot;

/// How long a drag must be held before it starts duplicating.
pub const DEFAULT_DUPLICATE_HOLD_MS: i64 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverOutcome {
    /// Hover recorded, nothing written
    Tracked,
    /// The hovered slot received a copy of the dragged activity
    Duplicated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// A normal drag: the entry was moved or swapped (or nothing happened)
    Moved(MoveOutcome),
    /// A held drag ended; copies were already written while hovering
    DuplicateFinished { copies: usize },
}

/// State of one drag gesture that started on an occupied slot.
///
/// The per-gesture set of filled slots lives and dies with the gesture, so
/// a new drag always starts with an empty set.
#[derive(Debug, Clone)]
pub struct DragGesture {
    source: SlotKey,
    activity: ActivityRef,
    started_at: DateTime<Local>,
    hold_threshold: Duration,
    hovered: Option<SlotKey>,
    duplicated: HashSet<SlotKey>,
    duplicate_mode_logged: bool,
}

impl DragGesture {
    /// Start dragging the entry at `(date, timeslot)`. `None` if the slot is empty.
    pub fn begin(
        entries: &EntrySet,
        date: NaiveDate,
        timeslot: TimeSlot,
        now: DateTime<Local>,
        hold_threshold: Duration,
    ) -> Option<Self> {
        let entry = entries.get(date, timeslot)?;
        Some(Self {
            source: entry.key(),
            activity: entry.activity(),
            started_at: now,
            hold_threshold,
            hovered: Some(entry.key()),
            duplicated: HashSet::new(),
            duplicate_mode_logged: false,
        })
    }

    pub fn source(&self) -> SlotKey {
        self.source
    }

    pub fn activity(&self) -> &ActivityRef {
        &self.activity
    }

    pub fn hovered(&self) -> Option<SlotKey> {
        self.hovered
    }

    /// Slots filled by this gesture so far.
    pub fn duplicated_slots(&self) -> &HashSet<SlotKey> {
        &self.duplicated
    }

    pub fn is_duplicate_mode(&self, now: DateTime<Local>) -> bool {
        now - self.started_at >= self.hold_threshold
    }

    /// Track the pointer over a slot. In duplicate mode an empty slot that
    /// this gesture has not filled yet receives a copy of the activity.
    pub fn hover(
        &mut self,
        entries: &mut EntrySet,
        date: NaiveDate,
        timeslot: TimeSlot,
        now: DateTime<Local>,
    ) -> HoverOutcome {
        let key = SlotKey::new(date, timeslot);
        self.hovered = Some(key);

        if !self.is_duplicate_mode(now) {
            return HoverOutcome::Tracked;
        }

        if !self.duplicate_mode_logged {
            log::debug!(
                "Long press detected - duplicating \"{}\" from {} {}",
                self.activity.name,
                self.source.date,
                self.source.timeslot
            );
            self.duplicate_mode_logged = true;
        }

        if entries.is_occupied(date, timeslot) || !self.duplicated.insert(key) {
            return HoverOutcome::Tracked;
        }

        entries.place_or_replace(date, timeslot, self.activity.name.clone(), self.activity.spoons);
        HoverOutcome::Duplicated
    }

    /// Release the gesture over a slot.
    pub fn finish(
        self,
        entries: &mut EntrySet,
        date: NaiveDate,
        timeslot: TimeSlot,
        now: DateTime<Local>,
    ) -> DropOutcome {
        if self.is_duplicate_mode(now) {
            return DropOutcome::DuplicateFinished {
                copies: self.duplicated.len(),
            };
        }

        DropOutcome::Moved(entries.move_or_swap(
            self.source.date,
            self.source.timeslot,
            date,
            timeslot,
        ))
    }

    /// Abandon the gesture (drag ended outside the grid). Returns the number
    /// of copies it made.
    pub fn cancel(self) -> usize {
        self.duplicated.len()
    }
}

/// Decode an activity dragged in from the catalog panel.
///
/// Payloads are JSON `{"name": ..., "spoons": ...}`; anything malformed is
/// treated as no payload at all.
pub fn parse_drag_payload(data: &str) -> Option<ActivityRef> {
    match serde_json::from_str::<ActivityRef>(data) {
        Ok(activity) if activity.spoons <= MAX_SPOONS && !activity.name.trim().is_empty() => {
            Some(activity)
        }
        Ok(activity) => {
            log::warn!("Ignoring drag payload with invalid activity: {:?}", activity);
            None
        }
        Err(err) => {
            log::warn!("Error parsing activity drag payload: {}", err);
            None
        }
    }
}
