//! Per-week undo/redo history.
//!
//! Snapshot based: every committed change pushes a full copy of the week's
//! entries, and undo/redo hand back a copy of a neighbouring snapshot. The
//! stack and cursor are written to a [`KeyValueStore`] after each change so
//! history survives a restart. Each week has its own stack.

use std::collections::VecDeque;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::entry::TimetableEntry;
use crate::services::storage::KeyValueStore;
use crate::utils::date::format_date_key;

/// Maximum number of snapshots kept per week.
pub const MAX_HISTORY_STEPS: usize = 35;

/// One snapshot of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    pub entries: Vec<TimetableEntry>,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// Stored record shape: `{history: HistoryState[], currentIndex: number}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredHistory {
    history: VecDeque<HistoryState>,
    current_index: i64,
}

/// Bounded undo/redo stack for one week.
pub struct HistoryManager<S: KeyValueStore> {
    store: S,
    week_key: String,
    history: VecDeque<HistoryState>,
    /// Position of the state currently shown; `None` while empty
    current: Option<usize>,
    capacity: usize,
}

impl<S: KeyValueStore> HistoryManager<S> {
    /// Open the history of the week starting at `week_start`, restoring
    /// whatever the store holds for it.
    pub fn new(store: S, week_start: NaiveDate) -> Self {
        Self::with_capacity(store, week_start, MAX_HISTORY_STEPS)
    }

    pub fn with_capacity(store: S, week_start: NaiveDate, capacity: usize) -> Self {
        let mut manager = Self {
            store,
            week_key: format_date_key(week_start),
            history: VecDeque::new(),
            current: None,
            capacity: capacity.max(1),
        };
        manager.load_history();
        manager
    }

    pub fn storage_key(&self) -> String {
        format!("history_{}", self.week_key)
    }

    pub fn week_key(&self) -> &str {
        &self.week_key
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    fn load_history(&mut self) {
        let key = self.storage_key();
        let stored = match self.store.get(&key) {
            Ok(Some(text)) => text,
            Ok(None) => return,
            Err(err) => {
                log::error!("Failed to load history for week {}: {:#}", self.week_key, err);
                return;
            }
        };

        let record: StoredHistory = match serde_json::from_str(&stored) {
            Ok(record) => record,
            Err(err) => {
                log::warn!("Discarding unreadable history for week {}: {}", self.week_key, err);
                return;
            }
        };

        let mut history = record.history;
        let mut current = record.current_index;

        while history.len() > self.capacity {
            history.pop_front();
            current -= 1;
        }

        self.current = if history.is_empty() {
            None
        } else if current < 0 || current as usize >= history.len() {
            log::warn!(
                "Stored history cursor {} out of range for week {}, resetting to latest",
                record.current_index,
                self.week_key
            );
            Some(history.len() - 1)
        } else {
            Some(current as usize)
        };
        self.history = history;
    }

    fn save_history(&self) {
        let record = StoredHistory {
            history: self.history.clone(),
            current_index: self.current.map_or(-1, |index| index as i64),
        };

        let result = serde_json::to_string(&record)
            .map_err(anyhow::Error::from)
            .and_then(|text| self.store.set(&self.storage_key(), &text));

        if let Err(err) = result {
            log::error!("Failed to save history for week {}: {:#}", self.week_key, err);
        }
    }

    /// Record a new state. Any redo branch is discarded; once the stack is
    /// full the oldest state is evicted. The cursor always ends on the state
    /// just pushed.
    pub fn push_state(&mut self, entries: &[TimetableEntry]) {
        match self.current {
            Some(index) => self.history.truncate(index + 1),
            None => self.history.clear(),
        }

        self.history.push_back(HistoryState {
            entries: entries.to_vec(),
            timestamp: Utc::now().timestamp_millis(),
        });

        while self.history.len() > self.capacity {
            self.history.pop_front();
        }
        self.current = Some(self.history.len() - 1);

        self.save_history();
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.current, Some(index) if index > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.current, Some(index) if index + 1 < self.history.len())
    }

    /// Step back one state. `None` at the start of history.
    pub fn undo(&mut self) -> Option<Vec<TimetableEntry>> {
        let index = self.current.filter(|index| *index > 0)? - 1;
        self.current = Some(index);
        self.save_history();
        Some(self.history[index].entries.clone())
    }

    /// Step forward one state. `None` at the end of history.
    pub fn redo(&mut self) -> Option<Vec<TimetableEntry>> {
        let index = self
            .current
            .filter(|index| index + 1 < self.history.len())?
            + 1;
        self.current = Some(index);
        self.save_history();
        Some(self.history[index].entries.clone())
    }

    pub fn current_state(&self) -> Option<Vec<TimetableEntry>> {
        self.current
            .and_then(|index| self.history.get(index))
            .map(|state| state.entries.clone())
    }

    /// Forget this week's history, in memory and in the store.
    pub fn clear(&mut self) {
        self.history.clear();
        self.current = None;
        if let Err(err) = self.store.delete(&self.storage_key()) {
            log::error!("Failed to clear history for week {}: {:#}", self.week_key, err);
        }
    }
}
