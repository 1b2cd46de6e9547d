//! Planner session for one user and one week.
//!
//! Owns the live entry set and ties the pieces together: every committed
//! change is snapshotted into the week's history, bumps the revision counter
//! and restarts the auto-save quiet period. Saving goes through an injected
//! [`TimetableStore`].

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Local, NaiveDate};

use crate::config::PlannerConfig;
use crate::models::activity::Activity;
use crate::models::entry::TimetableEntry;
use crate::models::timeslot::{TimeSlot, DAYS_PER_WEEK};
use crate::services::autosave::{AutoSaveScheduler, AutoSaveTickResult};
use crate::services::history::HistoryManager;
use crate::services::schedule::{
    parse_drag_payload, BulkScheduleError, BulkSelection, BulkSlot, DragGesture, DropOutcome,
    EnergySummary, EntrySet, HoverOutcome, MergeOutcome, MoveOutcome,
};
use crate::services::storage::KeyValueStore;
use crate::services::timetable::TimetableStore;
use crate::utils::date;

pub struct PlannerSession<S: KeyValueStore> {
    user_id: String,
    week_start: NaiveDate,
    entries: EntrySet,
    history: HistoryManager<S>,
    autosave: AutoSaveScheduler,
    duplicate_hold: Duration,
    drag: Option<DragGesture>,
    revision: u64,
}

impl<S: KeyValueStore> PlannerSession<S> {
    /// Load the week containing `week_of` and record the loaded entries as
    /// the newest history state.
    pub fn open<T: TimetableStore>(
        user_id: impl Into<String>,
        week_of: NaiveDate,
        timetable: &T,
        history_store: S,
        config: &PlannerConfig,
    ) -> Self {
        let week_start = date::week_start(week_of);
        let entries = timetable.load(week_start);

        let mut history =
            HistoryManager::with_capacity(history_store, week_start, config.history_capacity);
        history.push_state(&entries);

        let user_id = user_id.into();
        log::info!(
            "Opened week {} for {} with {} entries",
            date::format_date_key(week_start),
            user_id,
            entries.len()
        );

        Self {
            user_id,
            week_start,
            entries: EntrySet::from_entries(entries),
            history,
            autosave: AutoSaveScheduler::with_quiet_period(config.autosave_quiet_period()),
            duplicate_hold: config.duplicate_hold(),
            drag: None,
            revision: 0,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    pub fn entries(&self) -> &[TimetableEntry] {
        self.entries.entries()
    }

    pub fn entry_at(&self, date: NaiveDate, timeslot: TimeSlot) -> Option<&TimetableEntry> {
        self.entries.get(date, timeslot)
    }

    /// Increases on every change to the entries, including undo and redo.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn daily_totals(&self) -> [u32; DAYS_PER_WEEK] {
        self.entries.daily_totals(self.week_start)
    }

    pub fn energy_summary(&self) -> EnergySummary {
        EnergySummary::for_week(&self.entries, self.week_start)
    }

    fn touch(&mut self, now: DateTime<Local>) {
        self.revision += 1;
        self.autosave.note_change(now);
    }

    fn commit_at(&mut self, now: DateTime<Local>) {
        self.history.push_state(self.entries.entries());
        self.touch(now);
    }

    fn commit(&mut self) {
        self.commit_at(Local::now());
    }

    /// Put an activity into a slot, replacing any occupant.
    pub fn place(
        &mut self,
        date: NaiveDate,
        timeslot: TimeSlot,
        activity_name: impl Into<String>,
        spoons: u8,
    ) {
        self.entries
            .place_or_replace(date, timeslot, activity_name, spoons);
        self.commit();
    }

    /// Place an activity dropped from the catalog panel. Malformed payloads
    /// are ignored.
    pub fn drop_payload(&mut self, date: NaiveDate, timeslot: TimeSlot, payload: &str) -> bool {
        let Some(activity) = parse_drag_payload(payload) else {
            return false;
        };
        self.place(date, timeslot, activity.name, activity.spoons);
        true
    }

    pub fn remove(&mut self, date: NaiveDate, timeslot: TimeSlot) -> bool {
        let removed = self.entries.remove(date, timeslot);
        if removed {
            self.commit();
        }
        removed
    }

    pub fn move_entry(
        &mut self,
        from_date: NaiveDate,
        from_time: TimeSlot,
        to_date: NaiveDate,
        to_time: TimeSlot,
    ) -> MoveOutcome {
        let outcome = self
            .entries
            .move_or_swap(from_date, from_time, to_date, to_time);
        if outcome.changed() {
            self.commit();
        }
        outcome
    }

    pub fn bulk_place(&mut self, slots: &[BulkSlot]) -> usize {
        let placed = self.entries.bulk_place(slots);
        if placed > 0 {
            self.commit();
        }
        placed
    }

    /// Fill every selected slot of this week with a recharge activity.
    pub fn bulk_schedule(
        &mut self,
        selection: &BulkSelection,
        activity: &Activity,
    ) -> Result<usize, BulkScheduleError> {
        let slots = selection.to_slots(self.week_start, activity)?;
        Ok(self.bulk_place(&slots))
    }

    /// Copy last week's plan into the empty slots of this week.
    pub fn load_previous_week<T: TimetableStore>(&mut self, timetable: &T) -> MergeOutcome {
        let candidates = timetable.load_previous_week(self.week_start);
        let outcome = self.entries.merge_from_previous_week(candidates);
        match outcome {
            MergeOutcome::Merged(count) => {
                log::info!("Loaded {} activities from the previous week", count);
                self.commit();
            }
            MergeOutcome::SourceEmpty => log::info!("No previous week data to load"),
            MergeOutcome::AllOccupied => log::info!("All previous week slots already filled"),
        }
        outcome
    }

    /// Empty the whole week as a single undoable step.
    pub fn clear_week(&mut self) -> usize {
        let removed = self.entries.clear();
        if removed > 0 {
            self.commit();
        }
        removed
    }

    /// Start dragging the entry in a slot. Returns false for an empty slot.
    pub fn begin_drag(&mut self, date: NaiveDate, timeslot: TimeSlot, now: DateTime<Local>) -> bool {
        self.drag = DragGesture::begin(&self.entries, date, timeslot, now, self.duplicate_hold);
        self.drag.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn hover_drag(
        &mut self,
        date: NaiveDate,
        timeslot: TimeSlot,
        now: DateTime<Local>,
    ) -> Option<HoverOutcome> {
        let gesture = self.drag.as_mut()?;
        let outcome = gesture.hover(&mut self.entries, date, timeslot, now);
        if outcome == HoverOutcome::Duplicated {
            self.commit_at(now);
        }
        Some(outcome)
    }

    /// Release the current drag over a slot. `None` when no drag is active.
    pub fn finish_drag(
        &mut self,
        date: NaiveDate,
        timeslot: TimeSlot,
        now: DateTime<Local>,
    ) -> Option<DropOutcome> {
        let gesture = self.drag.take()?;
        let outcome = gesture.finish(&mut self.entries, date, timeslot, now);
        if let DropOutcome::Moved(moved) = outcome {
            if moved.changed() {
                self.commit_at(now);
            }
        }
        Some(outcome)
    }

    /// Abandon the current drag. Copies already made stay in place.
    pub fn cancel_drag(&mut self) -> usize {
        self.drag.take().map_or(0, DragGesture::cancel)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(entries) => {
                self.entries = EntrySet::from_entries(entries);
                self.touch(Local::now());
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(entries) => {
                self.entries = EntrySet::from_entries(entries);
                self.touch(Local::now());
                true
            }
            None => false,
        }
    }

    pub fn has_pending_save(&self) -> bool {
        self.autosave.is_pending()
    }

    /// Save immediately, reporting failure to the caller. A pending
    /// auto-save is only dropped once the save has gone through.
    pub fn save_now<T: TimetableStore>(&mut self, timetable: &T) -> Result<()> {
        timetable
            .save(self.week_start, self.entries.entries())
            .with_context(|| {
                format!(
                    "Failed to save week {}",
                    date::format_date_key(self.week_start)
                )
            })?;
        self.autosave.cancel();
        Ok(())
    }

    /// Run the debounced save if it is due. Failures are logged only.
    pub fn tick_autosave_at<T: TimetableStore>(
        &mut self,
        now: DateTime<Local>,
        timetable: &T,
    ) -> AutoSaveTickResult {
        let week_start = self.week_start;
        let entries = self.entries.entries();
        self.autosave
            .tick_with_saver_at(now, || timetable.save(week_start, entries))
    }

    /// Tear the session down. A pending auto-save is dropped; returns whether
    /// one was pending.
    pub fn close(mut self) -> bool {
        let pending = self.autosave.is_pending();
        self.autosave.cancel();
        pending
    }
}
