// Profile service module
// Reads and writes per-user spoon budgets

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::models::profile::Profile;

pub struct ProfileService<'a> {
    conn: &'a Connection,
}

impl<'a> ProfileService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self, user_id: &str) -> Result<Option<Profile>> {
        let result = self.conn.query_row(
            "SELECT user_id, display_name, daily_limit, weekday_limit, weekend_limit
             FROM profiles WHERE user_id = ?1",
            params![user_id],
            |row| {
                Ok(Profile {
                    user_id: row.get(0)?,
                    display_name: row.get(1)?,
                    daily_limit: row.get(2)?,
                    weekday_limit: row.get(3)?,
                    weekend_limit: row.get(4)?,
                })
            },
        );

        match result {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e).context("Failed to load profile"),
        }
    }

    /// Return the user's profile, creating one with default limits if the
    /// user has none yet.
    pub fn ensure(&self, user_id: &str, display_name: &str) -> Result<Profile> {
        if let Some(profile) = self.get(user_id)? {
            return Ok(profile);
        }

        let profile = Profile::new(user_id, display_name);
        self.update(&profile)?;
        log::info!("Created profile for {}", user_id);
        Ok(profile)
    }

    /// Store the profile, raising weekday and weekend budgets to cover the
    /// daily limit first. Returns what was stored.
    pub fn update(&self, profile: &Profile) -> Result<Profile> {
        let profile = profile.clone().normalized();
        profile.validate().map_err(|e| anyhow::anyhow!("{}", e))?;

        self.conn
            .execute(
                "INSERT INTO profiles
                    (user_id, display_name, daily_limit, weekday_limit, weekend_limit)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(user_id) DO UPDATE SET
                    display_name = excluded.display_name,
                    daily_limit = excluded.daily_limit,
                    weekday_limit = excluded.weekday_limit,
                    weekend_limit = excluded.weekend_limit,
                    updated_at = CURRENT_TIMESTAMP",
                params![
                    profile.user_id,
                    profile.display_name,
                    profile.daily_limit,
                    profile.weekday_limit,
                    profile.weekend_limit,
                ],
            )
            .context("Failed to save profile")?;

        Ok(profile)
    }
}
