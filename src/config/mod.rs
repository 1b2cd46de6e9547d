//! Planner configuration.
//!
//! Read from `config.toml` in the platform config directory, or from the
//! file named by `SPOONFUL_CONFIG`. Every field is optional in the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Duration;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::services::autosave::DEFAULT_QUIET_PERIOD_MS;
use crate::services::history::MAX_HISTORY_STEPS;
use crate::services::schedule::drag::DEFAULT_DUPLICATE_HOLD_MS;

pub const CONFIG_ENV_VAR: &str = "SPOONFUL_CONFIG";
const CONFIG_FILE_NAME: &str = "config.toml";
const DATABASE_FILE_NAME: &str = "spoonful.db";

/// Longest accepted auto-save quiet period or drag hold, one hour.
pub const MAX_DELAY_MS: u64 = 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Snapshots kept per week
    pub history_capacity: usize,
    pub autosave_quiet_period_ms: u64,
    /// How long a drag must be held before it starts copying
    pub duplicate_hold_ms: u64,
    /// Timetable, profile and activity database
    pub database_path: Option<PathBuf>,
    /// Undo history database; shares the main database when unset
    pub history_database_path: Option<PathBuf>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            history_capacity: MAX_HISTORY_STEPS,
            autosave_quiet_period_ms: DEFAULT_QUIET_PERIOD_MS,
            duplicate_hold_ms: DEFAULT_DUPLICATE_HOLD_MS as u64,
            database_path: None,
            history_database_path: None,
        }
    }
}

impl PlannerConfig {
    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("No config directory available, using default settings");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }
        let text = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("autosave_quiet_period_ms", self.autosave_quiet_period_ms),
            ("duplicate_hold_ms", self.duplicate_hold_ms),
        ] {
            if value > MAX_DELAY_MS {
                anyhow::bail!("{} must be at most {} (got {})", name, MAX_DELAY_MS, value);
            }
        }
        Ok(())
    }

    /// Quiet period before an auto-save, capped at [`MAX_DELAY_MS`].
    pub fn autosave_quiet_period(&self) -> Duration {
        bounded_millis(self.autosave_quiet_period_ms)
    }

    /// Hold time before a drag starts copying, capped at [`MAX_DELAY_MS`].
    pub fn duplicate_hold(&self) -> Duration {
        bounded_millis(self.duplicate_hold_ms)
    }

    /// Configured database location, falling back to the platform data dir.
    pub fn resolved_database_path(&self) -> Option<PathBuf> {
        self.database_path.clone().or_else(default_database_path)
    }

    pub fn resolved_history_database_path(&self) -> Option<PathBuf> {
        self.history_database_path
            .clone()
            .or_else(|| self.resolved_database_path())
    }
}

fn bounded_millis(value: u64) -> Duration {
    // MAX_DELAY_MS always fits in both i64 and a TimeDelta
    Duration::milliseconds(value.min(MAX_DELAY_MS) as i64)
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "Spoonful", "Spoonful")
}

/// `SPOONFUL_CONFIG` if set, otherwise `config.toml` in the config dir.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

pub fn default_database_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
}
