//! Debounced auto-save.
//!
//! Clock-driven: the owner reports each change with [`AutoSaveScheduler::note_change`]
//! and polls [`AutoSaveScheduler::tick_with_saver_at`] from its event loop.
//! A save runs once the quiet period has passed without further changes.

use std::time::Duration as StdDuration;

use anyhow::Result;
use chrono::{DateTime, Duration, Local};

pub const DEFAULT_QUIET_PERIOD_MS: u64 = 2000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoSaveTickResult {
    /// A save was due and the saver ran
    pub attempted: bool,
    pub error: Option<String>,
    /// Time left before the pending save is due
    pub next_due_in: Option<StdDuration>,
}

impl AutoSaveTickResult {
    pub fn saved(&self) -> bool {
        self.attempted && self.error.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct AutoSaveScheduler {
    quiet_period: Duration,
    due_at: Option<DateTime<Local>>,
}

impl Default for AutoSaveScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoSaveScheduler {
    pub fn new() -> Self {
        Self::with_quiet_period(Duration::milliseconds(DEFAULT_QUIET_PERIOD_MS as i64))
    }

    pub fn with_quiet_period(quiet_period: Duration) -> Self {
        Self {
            quiet_period: quiet_period.max(Duration::zero()),
            due_at: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Restart the quiet period. A deadline past the representable range
    /// saves on the next tick instead.
    pub fn note_change(&mut self, now: DateTime<Local>) {
        let due_at = now.checked_add_signed(self.quiet_period).unwrap_or_else(|| {
            log::warn!("Auto-save quiet period out of range, saving on next tick");
            now
        });
        self.due_at = Some(due_at);
    }

    pub fn is_pending(&self) -> bool {
        self.due_at.is_some()
    }

    pub fn is_due(&self, now: DateTime<Local>) -> bool {
        self.due_at.is_some_and(|due_at| now >= due_at)
    }

    /// Drop a pending save, e.g. when the week is closed or saved manually.
    pub fn cancel(&mut self) {
        self.due_at = None;
    }

    /// Run `saver` if a save is due. Failures are logged and not retried
    /// until the next change.
    pub fn tick_with_saver_at<F>(&mut self, now: DateTime<Local>, saver: F) -> AutoSaveTickResult
    where
        F: FnOnce() -> Result<()>,
    {
        let Some(due_at) = self.due_at else {
            return AutoSaveTickResult::default();
        };

        if now < due_at {
            return AutoSaveTickResult {
                next_due_in: Some((due_at - now).to_std().unwrap_or(StdDuration::ZERO)),
                ..AutoSaveTickResult::default()
            };
        }

        self.due_at = None;
        match saver() {
            Ok(()) => {
                log::debug!("Auto-save completed");
                AutoSaveTickResult {
                    attempted: true,
                    ..AutoSaveTickResult::default()
                }
            }
            Err(err) => {
                log::error!("Auto-save failed: {:#}", err);
                AutoSaveTickResult {
                    attempted: true,
                    error: Some(err.to_string()),
                    next_due_in: None,
                }
            }
        }
    }
}
