//! Activity model for the planner catalog.
//!
//! Activities carry an energy cost in spoons (0-5). The scheduling engine
//! never holds on to an activity; it copies the name and cost into each
//! placed entry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::entry::ActivityRef;

/// Highest spoon cost an activity may carry.
pub const MAX_SPOONS: u8 = 5;

/// An activity in a user's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier (database primary key)
    pub id: Option<i64>,
    /// Display name, unique per user
    pub name: String,
    /// Energy cost, 0..=5
    pub spoons: u8,
    /// Grouping label, normally the energy level name
    pub category: String,
    pub description: Option<String>,
    /// Seeded default activities cannot be deleted
    pub is_default: bool,
}

impl Activity {
    /// Create a user activity filed under its energy level.
    pub fn new(name: impl Into<String>, spoons: u8) -> Self {
        Self {
            id: None,
            name: name.into(),
            spoons,
            category: EnergyLevel::from_spoons(spoons)
                .map(|level| level.label().to_string())
                .unwrap_or_default(),
            description: None,
            is_default: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn default_entry(name: &str, spoons: u8, description: &str) -> Self {
        Self {
            is_default: true,
            ..Self::new(name, spoons).with_description(description)
        }
    }

    pub fn validate(&self) -> Result<(), ActivityValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ActivityValidationError::EmptyName);
        }
        if name.chars().count() > 100 {
            return Err(ActivityValidationError::NameTooLong);
        }
        if self.spoons > MAX_SPOONS {
            return Err(ActivityValidationError::SpoonsOutOfRange(self.spoons));
        }
        Ok(())
    }

    /// Recharge activities cost nothing and are the only ones offered for
    /// bulk scheduling.
    pub fn is_recharge(&self) -> bool {
        self.spoons == 0
    }

    pub fn placement(&self) -> ActivityRef {
        ActivityRef::new(self.name.clone(), self.spoons)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivityValidationError {
    #[error("Activity name cannot be empty")]
    EmptyName,
    #[error("Activity name must be 100 characters or less")]
    NameTooLong,
    #[error("Spoons must be between 0 and 5 (got {0})")]
    SpoonsOutOfRange(u8),
}

/// Energy band an activity falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergyLevel {
    Recharging,
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl EnergyLevel {
    pub fn from_spoons(spoons: u8) -> Option<Self> {
        match spoons {
            0 => Some(Self::Recharging),
            1 => Some(Self::VeryLow),
            2 => Some(Self::Low),
            3 => Some(Self::Medium),
            4 => Some(Self::High),
            5 => Some(Self::VeryHigh),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Recharging => "Recharging",
            Self::VeryLow => "Very Low Energy",
            Self::Low => "Low Energy",
            Self::Medium => "Medium Energy",
            Self::High => "High Energy",
            Self::VeryHigh => "Very High Energy",
        }
    }
}

/// "1 Spoon", "3 Spoons", ...
pub fn spoon_label(spoons: u8) -> String {
    if spoons == 1 {
        "1 Spoon".to_string()
    } else {
        format!("{} Spoons", spoons)
    }
}

/// Activities seeded into every new catalog.
pub fn default_activities() -> Vec<Activity> {
    vec![
        // Very High Energy
        Activity::default_entry("Running Long Distance", 5, "Marathon or long-distance running"),
        Activity::default_entry("Power Gym Session", 5, "Intense weightlifting or HIIT"),
        Activity::default_entry("Sports Match", 5, "Competitive sports or team games"),
        Activity::default_entry(
            "Long Distance Driving",
            5,
            "Extended driving requiring extreme concentration",
        ),
        // High Energy
        Activity::default_entry("Gym/Exercise", 4, "Intense physical activity"),
        Activity::default_entry(
            "Heavy Socialising",
            4,
            "Large gatherings or extended social events",
        ),
        Activity::default_entry(
            "Driving Long Distance",
            4,
            "Extended driving requiring high concentration",
        ),
        Activity::default_entry("Dancing", 4, "Active dancing or dance classes"),
        Activity::default_entry("Hiking", 4, "Outdoor hiking or trekking"),
        // Medium Energy
        Activity::default_entry("Laptop Work", 3, "Focused computer work"),
        Activity::default_entry(
            "Conversations/Meetings",
            3,
            "Business meetings or important conversations",
        ),
        Activity::default_entry("Shopping", 3, "Grocery or retail shopping"),
        Activity::default_entry("Cooking Meal", 3, "Preparing a full meal"),
        Activity::default_entry("Cleaning House", 3, "Deep cleaning or housework"),
        // Low Energy
        Activity::default_entry("House Chores", 2, "Light household tasks"),
        Activity::default_entry("Light Cooking", 2, "Simple meal preparation"),
        Activity::default_entry("Relaxing/TV", 2, "Watching TV or relaxing"),
        Activity::default_entry("Rest in Car", 2, "Resting while in vehicle"),
        Activity::default_entry("Light Socialising", 2, "Brief social interactions"),
        // Very Low Energy
        Activity::default_entry("Reading", 1, "Reading books or articles"),
        Activity::default_entry("Short Phone Call", 1, "Brief phone conversations"),
        Activity::default_entry("Quiet Social Interaction", 1, "Calm one-on-one time"),
        Activity::default_entry("Gentle Stretching", 1, "Light stretching exercises"),
        Activity::default_entry("Listening to Music", 1, "Passive music listening"),
        // Recharging
        Activity::default_entry("Sleep", 0, "Nighttime sleep"),
        Activity::default_entry("Rest in Bed", 0, "Resting or napping in bed"),
        Activity::default_entry("Meditation", 0, "Meditation or mindfulness practice"),
        Activity::default_entry("Deep Rest", 0, "Complete rest and recovery"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_activity_new_files_under_energy_level() {
        let activity = Activity::new("Yoga", 2);
        assert_eq!(activity.category, "Low Energy");
        assert!(!activity.is_default);
        assert!(activity.id.is_none());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let activity = Activity::new("   ", 1);
        assert_eq!(activity.validate(), Err(ActivityValidationError::EmptyName));
    }

    #[test]
    fn test_validate_rejects_spoons_above_five() {
        let activity = Activity::new("Triathlon", 6);
        assert_eq!(
            activity.validate(),
            Err(ActivityValidationError::SpoonsOutOfRange(6))
        );
    }

    #[test]
    fn test_validate_rejects_long_name() {
        let activity = Activity::new("x".repeat(101), 1);
        assert_eq!(activity.validate(), Err(ActivityValidationError::NameTooLong));
    }

    #[test]
    fn test_spoon_label() {
        assert_eq!(spoon_label(0), "0 Spoons");
        assert_eq!(spoon_label(1), "1 Spoon");
        assert_eq!(spoon_label(4), "4 Spoons");
    }

    #[test]
    fn test_energy_level_bounds() {
        assert_eq!(EnergyLevel::from_spoons(0), Some(EnergyLevel::Recharging));
        assert_eq!(EnergyLevel::from_spoons(5).map(EnergyLevel::label), Some("Very High Energy"));
        assert_eq!(EnergyLevel::from_spoons(6), None);
    }

    #[test]
    fn test_default_activities_are_valid_and_unique() {
        let defaults = default_activities();
        assert_eq!(defaults.len(), 28);

        let names: HashSet<&str> = defaults.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names.len(), defaults.len());

        for activity in &defaults {
            assert!(activity.validate().is_ok(), "{} should be valid", activity.name);
            assert!(activity.is_default);
        }

        let recharge = defaults.iter().filter(|a| a.is_recharge()).count();
        assert_eq!(recharge, 4);
    }
}
