//! Entry set and slot mutation engine.
//!
//! `EntrySet` is the in-memory timetable of the visible week. Every
//! operation here is synchronous and leaves the set in a state that is safe
//! to hand to the persistence layer. Apart from `bulk_place`, every mutation
//! keeps at most one entry per `(date, timeslot)`.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::entry::{SlotKey, TimetableEntry};
use crate::models::timeslot::{TimeSlot, DAYS_PER_WEEK};

pub mod bulk;
pub mod drag;
pub mod energy;

pub use bulk::{BulkScheduleError, BulkSelection, BulkSlot};
pub use drag::{parse_drag_payload, DragGesture, DropOutcome, HoverOutcome};
pub use energy::EnergySummary;

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing is placed at the source slot
    MissingSource,
    /// Source and destination are the same slot
    Unchanged,
    /// The entry now sits at the (previously empty) destination
    Moved,
    /// Source and destination entries exchanged slots
    Swapped,
}

impl MoveOutcome {
    pub fn changed(self) -> bool {
        matches!(self, MoveOutcome::Moved | MoveOutcome::Swapped)
    }
}

/// Result of merging the previous week's entries into the current week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// This many entries were appended
    Merged(usize),
    /// The previous week had nothing planned
    SourceEmpty,
    /// Every slot the previous week used is already taken
    AllOccupied,
}

impl MergeOutcome {
    pub fn merged_count(self) -> usize {
        match self {
            MergeOutcome::Merged(count) => count,
            MergeOutcome::SourceEmpty | MergeOutcome::AllOccupied => 0,
        }
    }
}

/// Placements for the visible week.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntrySet {
    entries: Vec<TimetableEntry>,
}

impl EntrySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<TimetableEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[TimetableEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TimetableEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, date: NaiveDate, timeslot: TimeSlot) -> Option<&TimetableEntry> {
        self.entries.iter().find(|e| e.is_at(date, timeslot))
    }

    pub fn is_occupied(&self, date: NaiveDate, timeslot: TimeSlot) -> bool {
        self.get(date, timeslot).is_some()
    }

    pub fn occupied_keys(&self) -> HashSet<SlotKey> {
        self.entries.iter().map(TimetableEntry::key).collect()
    }

    fn position(&self, date: NaiveDate, timeslot: TimeSlot) -> Option<usize> {
        self.entries.iter().position(|e| e.is_at(date, timeslot))
    }

    /// Put an activity into a slot, replacing whatever was there.
    ///
    /// Afterwards exactly one entry exists for the slot, even if a bulk
    /// placement had left several behind.
    pub fn place_or_replace(
        &mut self,
        date: NaiveDate,
        timeslot: TimeSlot,
        activity_name: impl Into<String>,
        spoons: u8,
    ) {
        let activity_name = activity_name.into();

        match self.position(date, timeslot) {
            Some(index) => {
                let entry = &mut self.entries[index];
                entry.activity_name = activity_name;
                entry.spoons = spoons;

                let mut seen = false;
                self.entries.retain(|e| {
                    if !e.is_at(date, timeslot) {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => self
                .entries
                .push(TimetableEntry::new(date, timeslot, activity_name, spoons)),
        }
    }

    /// Clear a slot. Returns whether anything was removed.
    pub fn remove(&mut self, date: NaiveDate, timeslot: TimeSlot) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !e.is_at(date, timeslot));
        self.entries.len() != before
    }

    /// Move the entry at the source slot, swapping with the destination entry
    /// when the destination is occupied.
    pub fn move_or_swap(
        &mut self,
        from_date: NaiveDate,
        from_time: TimeSlot,
        to_date: NaiveDate,
        to_time: TimeSlot,
    ) -> MoveOutcome {
        let Some(source) = self.position(from_date, from_time) else {
            return MoveOutcome::MissingSource;
        };

        if from_date == to_date && from_time == to_time {
            return MoveOutcome::Unchanged;
        }

        match self.position(to_date, to_time) {
            Some(destination) => {
                self.entries[source].relocate(to_date, to_time);
                self.entries[destination].relocate(from_date, from_time);
                MoveOutcome::Swapped
            }
            None => {
                self.entries[source].relocate(to_date, to_time);
                MoveOutcome::Moved
            }
        }
    }

    /// Append one entry per slot without checking for occupied slots.
    ///
    /// Duplicate keys are settled by the store on save (last one wins).
    pub fn bulk_place(&mut self, slots: &[BulkSlot]) -> usize {
        self.entries.extend(slots.iter().map(|slot| {
            TimetableEntry::new(
                slot.date,
                slot.timeslot,
                slot.activity_name.clone(),
                slot.spoons,
            )
        }));
        slots.len()
    }

    /// Append the candidates whose slot is currently empty.
    ///
    /// Existing entries are never touched.
    pub fn merge_from_previous_week(&mut self, candidates: Vec<TimetableEntry>) -> MergeOutcome {
        if candidates.is_empty() {
            return MergeOutcome::SourceEmpty;
        }

        let occupied = self.occupied_keys();
        let free: Vec<TimetableEntry> = candidates
            .into_iter()
            .filter(|candidate| !occupied.contains(&candidate.key()))
            .collect();

        if free.is_empty() {
            return MergeOutcome::AllOccupied;
        }

        let merged = free.len();
        self.entries.extend(free);
        MergeOutcome::Merged(merged)
    }

    /// Remove every entry. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    /// Spoons spent per day of the week starting at `week_start`, Monday first.
    ///
    /// Entries outside that week are ignored.
    pub fn daily_totals(&self, week_start: NaiveDate) -> [u32; DAYS_PER_WEEK] {
        let mut totals = [0u32; DAYS_PER_WEEK];
        for entry in &self.entries {
            let offset = (entry.date - week_start).num_days();
            if (0..DAYS_PER_WEEK as i64).contains(&offset) {
                totals[offset as usize] += u32::from(entry.spoons);
            }
        }
        totals
    }
}
