//! Sprint presets and the configuration record handed to the calculator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Hours in one working day.
pub const HOURS_PER_DAY: f64 = 8.0;

/// A named sprint length: how far ahead to look and how many hours it holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SprintPreset {
    /// Thirteen lookahead days.
    TwoWeeks,
    /// Twenty lookahead days.
    #[default]
    ThreeWeeks,
}

impl SprintPreset {
    /// Number of calendar days to look ahead from now.
    pub const fn lookahead_days(self) -> u32 {
        match self {
            Self::TwoWeeks => 14 - 1,
            Self::ThreeWeeks => 21 - 1,
        }
    }

    /// Work-hour budget for the sprint.
    pub const fn work_hours(self) -> u32 {
        match self {
            Self::TwoWeeks => 13 * 8,
            Self::ThreeWeeks => (15 - 1) * 8,
        }
    }

    /// Returns the configuration key for this preset.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TwoWeeks => "two_weeks",
            Self::ThreeWeeks => "three_weeks",
        }
    }
}

impl fmt::Display for SprintPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SprintPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "two_weeks" => Ok(Self::TwoWeeks),
            "three_weeks" => Ok(Self::ThreeWeeks),
            other => Err(format!(
                "unknown sprint preset '{}' (expected two_weeks or three_weeks)",
                other
            )),
        }
    }
}

/// Immutable sprint parameters, chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SprintConfig {
    /// The preset these values came from.
    pub preset: SprintPreset,
    /// Lookahead window in days.
    pub days: u32,
    /// Work-hour budget.
    pub work_hours: u32,
}

impl SprintConfig {
    /// Builds the configuration for a preset.
    pub const fn from_preset(preset: SprintPreset) -> Self {
        Self {
            preset,
            days: preset.lookahead_days(),
            work_hours: preset.work_hours(),
        }
    }
}

impl Default for SprintConfig {
    fn default() -> Self {
        Self::from_preset(SprintPreset::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_constants() {
        assert_eq!(SprintPreset::TwoWeeks.lookahead_days(), 13);
        assert_eq!(SprintPreset::TwoWeeks.work_hours(), 104);
        assert_eq!(SprintPreset::ThreeWeeks.lookahead_days(), 20);
        assert_eq!(SprintPreset::ThreeWeeks.work_hours(), 112);
    }

    #[test]
    fn default_is_three_weeks() {
        let config = SprintConfig::default();
        assert_eq!(config.preset, SprintPreset::ThreeWeeks);
        assert_eq!(config.days, 20);
        assert_eq!(config.work_hours, 112);
    }

    #[test]
    fn parse_preset() {
        assert_eq!("two_weeks".parse::<SprintPreset>(), Ok(SprintPreset::TwoWeeks));
        assert_eq!("Three-Weeks".parse::<SprintPreset>(), Ok(SprintPreset::ThreeWeeks));
        assert!("four_weeks".parse::<SprintPreset>().is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&SprintPreset::TwoWeeks).unwrap();
        assert_eq!(json, "\"two_weeks\"");
        let parsed: SprintPreset = serde_json::from_str("\"three_weeks\"").unwrap();
        assert_eq!(parsed, SprintPreset::ThreeWeeks);
    }
}
