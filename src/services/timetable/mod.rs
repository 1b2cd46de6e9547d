//! Timetable persistence.
//!
//! The session never issues per-entry CRUD. It hands the whole week to
//! [`TimetableStore::save`], and the store reconciles by `(date, timeslot)`:
//! upsert everything given (the last entry wins when a key repeats) and
//! delete stored slots of that week that are no longer present.

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use rusqlite::{params, types::Type, Connection, Row};

use crate::models::entry::{SlotKey, TimetableEntry};
use crate::models::timeslot::{Day, TimeSlot};
use crate::utils::date::{format_date_key, parse_date_key, previous_week};

/// Storage the planner session loads from and saves to.
#[cfg_attr(test, mockall::automock)]
pub trait TimetableStore {
    /// Entries of the week starting at `week_start`; empty on any failure.
    fn load(&self, week_start: NaiveDate) -> Vec<TimetableEntry>;

    /// Make the stored week match `entries`.
    fn save(&self, week_start: NaiveDate, entries: &[TimetableEntry]) -> Result<()>;

    /// The previous week's entries moved forward seven days into the week
    /// starting at `current_week_start`; empty on any failure.
    fn load_previous_week(&self, current_week_start: NaiveDate) -> Vec<TimetableEntry>;
}

/// Collapse repeated slot keys, keeping the last entry for each key at the
/// position where the key first appeared.
pub fn dedupe_last_wins(entries: &[TimetableEntry]) -> Vec<&TimetableEntry> {
    let mut positions: HashMap<SlotKey, usize> = HashMap::new();
    let mut unique: Vec<&TimetableEntry> = Vec::with_capacity(entries.len());

    for entry in entries {
        match positions.get(&entry.key()) {
            Some(&index) => unique[index] = entry,
            None => {
                positions.insert(entry.key(), unique.len());
                unique.push(entry);
            }
        }
    }

    unique
}

/// SQLite-backed timetable for one user.
pub struct TimetableService<'a> {
    conn: &'a Connection,
    user_id: &'a str,
}

impl<'a> TimetableService<'a> {
    pub fn new(conn: &'a Connection, user_id: &'a str) -> Self {
        Self { conn, user_id }
    }

    /// Entries of one week ordered by date, then timeslot.
    pub fn try_load(&self, week_start: NaiveDate) -> Result<Vec<TimetableEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT week_start, date, day_name, timeslot, activity_name, spoons
             FROM timetable_entries
             WHERE user_id = ?1 AND week_start = ?2
             ORDER BY date ASC, timeslot ASC",
        )?;

        let rows = stmt.query_map(params![self.user_id, format_date_key(week_start)], row_to_entry)?;

        rows.collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to load timetable entries for week {}", week_start))
    }

    /// Reconcile the stored week with `entries` inside one transaction.
    pub fn try_save(&self, week_start: NaiveDate, entries: &[TimetableEntry]) -> Result<()> {
        let unique = dedupe_last_wins(entries);
        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to start timetable transaction")?;

        for entry in &unique {
            tx.execute(
                "INSERT INTO timetable_entries
                    (user_id, week_start, date, day_name, timeslot, activity_name, spoons)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(user_id, date, timeslot) DO UPDATE SET
                    week_start = excluded.week_start,
                    day_name = excluded.day_name,
                    activity_name = excluded.activity_name,
                    spoons = excluded.spoons,
                    updated_at = CURRENT_TIMESTAMP",
                params![
                    self.user_id,
                    format_date_key(entry.week_start),
                    format_date_key(entry.date),
                    entry.day_name.abbreviation(),
                    entry.timeslot.label(),
                    entry.activity_name,
                    entry.spoons,
                ],
            )
            .with_context(|| {
                format!(
                    "Failed to upsert timetable entry {} {}",
                    entry.date, entry.timeslot
                )
            })?;
        }

        let keep: HashSet<(String, String)> = unique
            .iter()
            .map(|e| (format_date_key(e.date), e.timeslot.label().to_string()))
            .collect();

        let stored: Vec<(i64, String, String)> = {
            let mut stmt = tx.prepare(
                "SELECT id, date, timeslot FROM timetable_entries
                 WHERE user_id = ?1 AND week_start = ?2",
            )?;
            let rows = stmt.query_map(params![self.user_id, format_date_key(week_start)], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?;
            rows.collect::<Result<Vec<_>, _>>()
                .context("Failed to list stored timetable entries")?
        };

        let mut deleted = 0;
        for (id, date, timeslot) in stored {
            if !keep.contains(&(date, timeslot)) {
                tx.execute("DELETE FROM timetable_entries WHERE id = ?1", params![id])
                    .context("Failed to delete stale timetable entry")?;
                deleted += 1;
            }
        }

        tx.commit().context("Failed to commit timetable save")?;

        log::info!(
            "Saved week {} for {}: {} entries, {} removed",
            week_start,
            self.user_id,
            unique.len(),
            deleted
        );
        Ok(())
    }

    pub fn try_load_previous_week(&self, current_week_start: NaiveDate) -> Result<Vec<TimetableEntry>> {
        let previous = self.try_load(previous_week(current_week_start))?;

        Ok(previous
            .into_iter()
            .map(|entry| {
                let mut shifted = TimetableEntry::new(
                    entry.date + Duration::days(7),
                    entry.timeslot,
                    entry.activity_name,
                    entry.spoons,
                );
                shifted.week_start = current_week_start;
                shifted
            })
            .collect())
    }
}

impl<'a> TimetableStore for TimetableService<'a> {
    fn load(&self, week_start: NaiveDate) -> Vec<TimetableEntry> {
        self.try_load(week_start).unwrap_or_else(|err| {
            log::error!("Failed to load timetable entries: {:#}", err);
            Vec::new()
        })
    }

    fn save(&self, week_start: NaiveDate, entries: &[TimetableEntry]) -> Result<()> {
        self.try_save(week_start, entries)
    }

    fn load_previous_week(&self, current_week_start: NaiveDate) -> Vec<TimetableEntry> {
        self.try_load_previous_week(current_week_start)
            .unwrap_or_else(|err| {
                log::error!("Failed to load previous week entries: {:#}", err);
                Vec::new()
            })
    }
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<TimetableEntry> {
    Ok(TimetableEntry {
        week_start: parse_column(row, 0, |v| parse_date_key(v).map_err(Into::into))?,
        date: parse_column(row, 1, |v| parse_date_key(v).map_err(Into::into))?,
        day_name: parse_column(row, 2, |v| v.parse::<Day>().map_err(Into::into))?,
        timeslot: parse_column(row, 3, |v| v.parse::<TimeSlot>().map_err(Into::into))?,
        activity_name: row.get(4)?,
        spoons: row.get(5)?,
    })
}

fn parse_column<T>(
    row: &Row<'_>,
    index: usize,
    parse: impl FnOnce(&str) -> Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> rusqlite::Result<T> {
    let value: String = row.get(index)?;
    parse(&value).map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, e))
}
