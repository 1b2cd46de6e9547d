// Profile module
// Per-user display name and spoon limits

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_DAILY_LIMIT: u32 = 12;

/// Spoon budget settings for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub display_name: String,
    pub daily_limit: u32,
    /// Budget for Monday to Friday combined
    pub weekday_limit: u32,
    /// Budget for Saturday and Sunday combined
    pub weekend_limit: u32,
}

impl Profile {
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            daily_limit: DEFAULT_DAILY_LIMIT,
            weekday_limit: DEFAULT_DAILY_LIMIT * 5,
            weekend_limit: DEFAULT_DAILY_LIMIT * 2,
        }
    }

    pub fn min_weekday_limit(&self) -> u32 {
        self.daily_limit.saturating_mul(5)
    }

    pub fn min_weekend_limit(&self) -> u32 {
        self.daily_limit.saturating_mul(2)
    }

    /// Raise the weekday and weekend budgets so they cover the daily limit
    /// on every day they span.
    pub fn normalized(mut self) -> Self {
        self.weekday_limit = self.weekday_limit.max(self.min_weekday_limit());
        self.weekend_limit = self.weekend_limit.max(self.min_weekend_limit());
        self
    }

    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        if self.user_id.trim().is_empty() {
            return Err(ProfileValidationError::MissingUser);
        }
        if self.display_name.chars().count() > 100 {
            return Err(ProfileValidationError::DisplayNameTooLong);
        }
        if self.weekday_limit < self.min_weekday_limit() {
            return Err(ProfileValidationError::WeekdayLimitTooLow {
                minimum: self.min_weekday_limit(),
            });
        }
        if self.weekend_limit < self.min_weekend_limit() {
            return Err(ProfileValidationError::WeekendLimitTooLow {
                minimum: self.min_weekend_limit(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileValidationError {
    #[error("Profile must belong to a user")]
    MissingUser,
    #[error("Display name must be 100 characters or less")]
    DisplayNameTooLong,
    #[error("Weekday limit must be at least {minimum} spoons")]
    WeekdayLimitTooLow { minimum: u32 },
    #[error("Weekend limit must be at least {minimum} spoons")]
    WeekendLimitTooLow { minimum: u32 },
}
