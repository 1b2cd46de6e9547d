// Properties of the entry set mutations under random operation sequences

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use spoonful::models::entry::TimetableEntry;
use spoonful::models::timeslot::TimeSlot;
use spoonful::services::schedule::{EntrySet, MergeOutcome, MoveOutcome};

#[derive(Debug, Clone)]
enum Op {
    Place(usize, usize, u8),
    Remove(usize, usize),
    Move(usize, usize, usize, usize),
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

fn date(day: usize) -> NaiveDate {
    monday() + Duration::days(day as i64)
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..7usize, 0..12usize, 0..=5u8).prop_map(|(d, s, sp)| Op::Place(d, s, sp)),
        (0..7usize, 0..12usize).prop_map(|(d, s)| Op::Remove(d, s)),
        (0..7usize, 0..12usize, 0..7usize, 0..12usize).prop_map(|(a, b, c, d)| Op::Move(a, b, c, d)),
    ]
}

fn apply(set: &mut EntrySet, op: &Op) {
    match *op {
        Op::Place(d, s, spoons) => {
            set.place_or_replace(date(d), TimeSlot::from_index(s), format!("A{}", spoons), spoons)
        }
        Op::Remove(d, s) => {
            set.remove(date(d), TimeSlot::from_index(s));
        }
        Op::Move(a, b, c, d) => {
            set.move_or_swap(
                date(a),
                TimeSlot::from_index(b),
                date(c),
                TimeSlot::from_index(d),
            );
        }
    }
}

proptest! {
    /// Property: place, remove and move never leave two entries in one slot
    #[test]
    fn prop_mutations_keep_slots_unique(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut set = EntrySet::new();
        for op in &ops {
            apply(&mut set, op);
        }

        let keys: HashSet<_> = set.entries().iter().map(|e| e.key()).collect();
        prop_assert_eq!(keys.len(), set.len());
    }

    /// Property: moving never changes the week's spoon total
    #[test]
    fn prop_move_preserves_totals(
        ops in prop::collection::vec(op_strategy(), 0..30),
        from in (0..7usize, 0..12usize),
        to in (0..7usize, 0..12usize),
    ) {
        let mut set = EntrySet::new();
        for op in &ops {
            apply(&mut set, op);
        }
        let before: u32 = set.daily_totals(monday()).iter().sum();
        let count = set.len();

        set.move_or_swap(
            date(from.0),
            TimeSlot::from_index(from.1),
            date(to.0),
            TimeSlot::from_index(to.1),
        );

        prop_assert_eq!(set.daily_totals(monday()).iter().sum::<u32>(), before);
        prop_assert_eq!(set.len(), count);
    }

    /// Property: a swap exchanges exactly the two activities
    #[test]
    fn prop_swap_exchanges_activities(
        a in (0..7usize, 0..12usize),
        b in (0..7usize, 0..12usize),
    ) {
        prop_assume!(a != b);
        let mut set = EntrySet::new();
        set.place_or_replace(date(a.0), TimeSlot::from_index(a.1), "First", 1);
        set.place_or_replace(date(b.0), TimeSlot::from_index(b.1), "Second", 2);

        let outcome = set.move_or_swap(
            date(a.0),
            TimeSlot::from_index(a.1),
            date(b.0),
            TimeSlot::from_index(b.1),
        );

        prop_assert_eq!(outcome, MoveOutcome::Swapped);
        let at_a = set.get(date(a.0), TimeSlot::from_index(a.1)).unwrap();
        let at_b = set.get(date(b.0), TimeSlot::from_index(b.1)).unwrap();
        prop_assert_eq!(at_a.activity_name.as_str(), "Second");
        prop_assert_eq!(at_b.activity_name.as_str(), "First");
        prop_assert_eq!(at_a.day_name, spoonful::models::timeslot::Day::from_date(date(a.0)));
    }

    /// Property: merging adds exactly the candidates for empty slots and
    /// leaves every existing entry untouched
    #[test]
    fn prop_merge_is_non_destructive(
        existing in prop::collection::hash_set((0..7usize, 0..12usize), 0..20),
        candidates in prop::collection::hash_set((0..7usize, 0..12usize), 0..20),
    ) {
        let mut set = EntrySet::new();
        for (d, s) in &existing {
            set.place_or_replace(date(*d), TimeSlot::from_index(*s), "Mine", 3);
        }
        let before = set.clone();

        let incoming: Vec<TimetableEntry> = candidates
            .iter()
            .map(|(d, s)| TimetableEntry::new(date(*d), TimeSlot::from_index(*s), "Theirs", 1))
            .collect();
        let expected = candidates.difference(&existing).count();

        let outcome = set.merge_from_previous_week(incoming);

        match outcome {
            MergeOutcome::Merged(n) => prop_assert_eq!(n, expected),
            MergeOutcome::SourceEmpty => prop_assert!(candidates.is_empty()),
            MergeOutcome::AllOccupied => prop_assert_eq!(expected, 0),
        }
        prop_assert_eq!(set.len(), before.len() + expected);
        for entry in before.entries() {
            prop_assert_eq!(set.get(entry.date, entry.timeslot), Some(entry));
        }
    }
}
