use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_profiles_table(conn)?;
    create_activities_table(conn)?;
    run_activity_migrations(conn)?;
    create_timetable_entries_table(conn)?;
    create_local_history_table(conn)?;
    Ok(())
}

fn create_profiles_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS profiles (
            user_id TEXT PRIMARY KEY,
            display_name TEXT NOT NULL DEFAULT '',
            daily_limit INTEGER NOT NULL DEFAULT 12,
            weekday_limit INTEGER NOT NULL DEFAULT 60,
            weekend_limit INTEGER NOT NULL DEFAULT 24,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create profiles table")?;

    Ok(())
}

fn create_activities_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS activities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            spoons INTEGER NOT NULL CHECK (spoons BETWEEN 0 AND 5),
            category TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (user_id, name)
        )",
        [],
    )
    .context("Failed to create activities table")?;

    Ok(())
}

fn run_activity_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "activities",
        "description",
        "ALTER TABLE activities ADD COLUMN description TEXT",
    )?;

    migrations::ensure_column(
        conn,
        "activities",
        "is_default",
        "ALTER TABLE activities ADD COLUMN is_default INTEGER NOT NULL DEFAULT 0",
    )?;

    Ok(())
}

fn create_timetable_entries_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS timetable_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            week_start TEXT NOT NULL,
            date TEXT NOT NULL,
            day_name TEXT NOT NULL,
            timeslot TEXT NOT NULL,
            activity_name TEXT NOT NULL,
            spoons INTEGER NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (user_id, date, timeslot)
        )",
        [],
    )
    .context("Failed to create timetable_entries table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_timetable_entries_week
         ON timetable_entries (user_id, week_start)",
        [],
    )
    .context("Failed to create timetable_entries week index")?;

    Ok(())
}

fn create_local_history_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS local_history (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create local_history table")?;

    Ok(())
}
