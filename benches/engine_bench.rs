// Benchmark for the scheduling engine
// Measures slot mutations on a full week and history pushes at capacity

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spoonful::models::entry::TimetableEntry;
use spoonful::models::timeslot::{TimeSlot, DAYS_PER_WEEK, SLOTS_PER_DAY};
use spoonful::services::history::HistoryManager;
use spoonful::services::schedule::EntrySet;
use spoonful::services::storage::MemoryStore;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

fn week_with(count: usize) -> EntrySet {
    let mut set = EntrySet::new();
    for i in 0..count {
        let date = monday() + Duration::days((i / SLOTS_PER_DAY) as i64);
        set.place_or_replace(date, TimeSlot::from_index(i), "Reading", (i % 6) as u8);
    }
    set
}

fn bench_mutations(c: &mut Criterion) {
    let mut group = c.benchmark_group("entry_set");
    let full = DAYS_PER_WEEK * SLOTS_PER_DAY;

    for count in [12, 42, full] {
        group.bench_with_input(BenchmarkId::new("move_or_swap", count), &count, |b, &count| {
            let mut set = week_with(count);
            b.iter(|| {
                set.move_or_swap(
                    black_box(monday()),
                    TimeSlot::H06,
                    black_box(monday() + Duration::days(1)),
                    TimeSlot::H08,
                )
            });
        });

        group.bench_with_input(BenchmarkId::new("daily_totals", count), &count, |b, &count| {
            let set = week_with(count);
            b.iter(|| black_box(set.daily_totals(monday())));
        });
    }

    group.finish();
}

fn bench_history(c: &mut Criterion) {
    let entries: Vec<TimetableEntry> = week_with(DAYS_PER_WEEK * SLOTS_PER_DAY).into_entries();

    c.bench_function("history_push_full_week", |b| {
        let store = MemoryStore::new();
        let mut history = HistoryManager::new(&store, monday());
        b.iter(|| history.push_state(black_box(&entries)));
    });
}

criterion_group!(benches, bench_mutations, bench_history);
criterion_main!(benches);
