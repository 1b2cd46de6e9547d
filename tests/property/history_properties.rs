// Properties of the bounded undo/redo history

use chrono::NaiveDate;
use proptest::prelude::*;
use spoonful::models::entry::TimetableEntry;
use spoonful::models::timeslot::TimeSlot;
use spoonful::services::history::{HistoryManager, MAX_HISTORY_STEPS};
use spoonful::services::storage::MemoryStore;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

fn state(n: usize) -> Vec<TimetableEntry> {
    (0..n % 13)
        .map(|i| TimetableEntry::new(monday(), TimeSlot::from_index(i), format!("S{}", n), 1))
        .collect()
}

proptest! {
    /// Property: the stack never exceeds capacity and `len - 1` undos walk
    /// back to the oldest retained state
    #[test]
    fn prop_history_stays_bounded(pushes in 1..80usize) {
        let store = MemoryStore::new();
        let mut history = HistoryManager::new(&store, monday());
        for n in 0..pushes {
            history.push_state(&state(n));
            prop_assert!(history.len() <= MAX_HISTORY_STEPS);
        }

        let kept = history.len();
        prop_assert_eq!(kept, pushes.min(MAX_HISTORY_STEPS));

        let mut undos = 0;
        while history.undo().is_some() {
            undos += 1;
        }
        prop_assert_eq!(undos, kept - 1);
        prop_assert_eq!(history.current_state(), Some(state(pushes - kept)));
    }

    /// Property: redo after undo returns the state that was current
    #[test]
    fn prop_undo_redo_inverse(pushes in 2..50usize, back in 1..40usize) {
        let store = MemoryStore::new();
        let mut history = HistoryManager::new(&store, monday());
        for n in 0..pushes {
            history.push_state(&state(n));
        }

        for _ in 0..back {
            let current = history.current_state();
            if history.undo().is_none() {
                break;
            }
            prop_assert_eq!(history.redo(), current);
            history.undo();
        }
    }

    /// Property: a reloaded manager resumes at the same cursor
    #[test]
    fn prop_reload_is_lossless(pushes in 1..45usize, back in 0..10usize) {
        let store = MemoryStore::new();
        let (len, cursor, current) = {
            let mut history = HistoryManager::new(&store, monday());
            for n in 0..pushes {
                history.push_state(&state(n));
            }
            for _ in 0..back {
                history.undo();
            }
            (history.len(), history.current_index(), history.current_state())
        };

        let reloaded = HistoryManager::new(&store, monday());
        prop_assert_eq!(reloaded.len(), len);
        prop_assert_eq!(reloaded.current_index(), cursor);
        prop_assert_eq!(reloaded.current_state(), current);
    }
}
