//! Activity catalog service.
//!
//! Each user owns a catalog of named activities. The defaults are seeded on
//! first use; user-created activities can be added and removed freely while
//! seeded ones are kept.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};

use crate::models::activity::{default_activities, Activity};

const ACTIVITY_COLUMNS: &str = "id, name, spoons, category, description, is_default";

/// Service for one user's activity catalog.
pub struct ActivityService<'a> {
    conn: &'a Connection,
    user_id: &'a str,
}

impl<'a> ActivityService<'a> {
    pub fn new(conn: &'a Connection, user_id: &'a str) -> Self {
        Self { conn, user_id }
    }

    /// Insert whichever default activities the catalog is missing, matched
    /// by name. Returns how many were added.
    pub fn seed_defaults(&self) -> Result<usize> {
        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to begin activity seeding")?;

        let mut inserted = 0;
        for activity in default_activities() {
            inserted += tx
                .execute(
                    "INSERT INTO activities
                        (user_id, name, spoons, category, description, is_default)
                     VALUES (?1, ?2, ?3, ?4, ?5, 1)
                     ON CONFLICT(user_id, name) DO NOTHING",
                    params![
                        self.user_id,
                        activity.name,
                        activity.spoons,
                        activity.category,
                        activity.description,
                    ],
                )
                .with_context(|| format!("Failed to seed activity '{}'", activity.name))?;
        }

        tx.commit().context("Failed to commit activity seeding")?;

        if inserted > 0 {
            log::info!("Seeded {} default activities for {}", inserted, self.user_id);
        }
        Ok(inserted)
    }

    /// Add a user activity. Names must be unique within the catalog.
    pub fn create(&self, activity: Activity) -> Result<Activity> {
        activity.validate().map_err(|e| anyhow::anyhow!("{}", e))?;

        let name = activity.name.trim();
        if self.get_by_name(name)?.is_some() {
            return Err(anyhow::anyhow!("An activity named '{}' already exists", name));
        }

        self.conn
            .execute(
                "INSERT INTO activities
                    (user_id, name, spoons, category, description, is_default)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    self.user_id,
                    name,
                    activity.spoons,
                    activity.category,
                    activity.description,
                    activity.is_default as i32,
                ],
            )
            .context("Failed to insert activity")?;

        Ok(Activity {
            id: Some(self.conn.last_insert_rowid()),
            name: name.to_string(),
            ..activity
        })
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<Activity>> {
        let result = self.conn.query_row(
            &format!(
                "SELECT {} FROM activities WHERE user_id = ?1 AND name = ?2",
                ACTIVITY_COLUMNS
            ),
            params![self.user_id, name],
            row_to_activity,
        );

        match result {
            Ok(activity) => Ok(Some(activity)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Whole catalog, most demanding first, then by name.
    pub fn list(&self) -> Result<Vec<Activity>> {
        self.query_list(&format!(
            "SELECT {} FROM activities WHERE user_id = ?1 ORDER BY spoons DESC, name ASC",
            ACTIVITY_COLUMNS
        ))
    }

    /// Zero-spoon activities, the ones bulk scheduling offers.
    pub fn list_recharge(&self) -> Result<Vec<Activity>> {
        self.query_list(&format!(
            "SELECT {} FROM activities WHERE user_id = ?1 AND spoons = 0 ORDER BY name ASC",
            ACTIVITY_COLUMNS
        ))
    }

    fn query_list(&self, sql: &str) -> Result<Vec<Activity>> {
        let mut stmt = self.conn.prepare(sql)?;
        let activities = stmt.query_map(params![self.user_id], row_to_activity)?;
        activities
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to fetch activities")
    }

    /// Delete a user activity. Returns false when no such activity exists.
    /// Default activities cannot be deleted.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let existing = self.conn.query_row(
            &format!(
                "SELECT {} FROM activities WHERE user_id = ?1 AND id = ?2",
                ACTIVITY_COLUMNS
            ),
            params![self.user_id, id],
            row_to_activity,
        );

        let activity = match existing {
            Ok(activity) => activity,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        if activity.is_default {
            return Err(anyhow::anyhow!(
                "Cannot delete default activity '{}'",
                activity.name
            ));
        }

        self.conn
            .execute(
                "DELETE FROM activities WHERE user_id = ?1 AND id = ?2",
                params![self.user_id, id],
            )
            .context("Failed to delete activity")?;

        Ok(true)
    }
}

fn row_to_activity(row: &Row) -> rusqlite::Result<Activity> {
    Ok(Activity {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        spoons: row.get(2)?,
        category: row.get(3)?,
        description: row.get(4)?,
        is_default: row.get::<_, i32>(5)? != 0,
    })
}
