use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Id, NEW_ID};
use crate::errors::ScoreboardError;

/// How the game clock is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockFormat {
    /// `MM:SS`
    #[serde(rename = "MM:SS")]
    MinutesSeconds,
    /// Whole minutes, as in football
    #[serde(rename = "Minuten")]
    Minutes,
}

impl ClockFormat {
    /// Stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockFormat::MinutesSeconds => "MM:SS",
            ClockFormat::Minutes => "Minuten",
        }
    }
}

impl fmt::Display for ClockFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClockFormat {
    type Err = ScoreboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MM:SS" => Ok(ClockFormat::MinutesSeconds),
            "Minuten" => Ok(ClockFormat::Minutes),
            other => Err(ScoreboardError::UnknownClockFormat {
                value: other.to_string(),
            }),
        }
    }
}

/// Whether the game clock counts up or down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockDirection {
    Up,
    Down,
}

impl ClockDirection {
    /// Stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockDirection::Up => "Up",
            ClockDirection::Down => "Down",
        }
    }
}

impl fmt::Display for ClockDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClockDirection {
    type Err = ScoreboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Up" => Ok(ClockDirection::Up),
            "Down" => Ok(ClockDirection::Down),
            other => Err(ScoreboardError::UnknownClockDirection {
                value: other.to_string(),
            }),
        }
    }
}

/// Default period and clock rules for one sport
///
/// The name is unique across all definitions and is what teams, templates
/// and matches refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportDefinition {
    pub id: Id,
    pub name: String,
    pub period_label: String,
    pub period_count: i64,
    /// Minutes per period
    pub period_duration: i64,
    pub clock_format: ClockFormat,
    pub clock_direction: ClockDirection,
}

impl SportDefinition {
    /// Create an unsaved definition
    pub fn new(
        name: impl Into<String>,
        period_label: impl Into<String>,
        period_count: i64,
        period_duration: i64,
        clock_format: ClockFormat,
        clock_direction: ClockDirection,
    ) -> Self {
        Self {
            id: NEW_ID,
            name: name.into(),
            period_label: period_label.into(),
            period_count,
            period_duration,
            clock_format,
            clock_direction,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == NEW_ID
    }
}

/// The definitions seeded into a fresh database
pub fn default_sports() -> Vec<SportDefinition> {
    vec![
        SportDefinition::new(
            "American Football",
            "Halbzeit",
            2,
            15,
            ClockFormat::MinutesSeconds,
            ClockDirection::Up,
        ),
        SportDefinition::new(
            "Fußball",
            "Halbzeit",
            2,
            45,
            ClockFormat::Minutes,
            ClockDirection::Up,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_format_round_trips_storage_string() {
        for format in [ClockFormat::MinutesSeconds, ClockFormat::Minutes] {
            assert_eq!(format.as_str().parse::<ClockFormat>().unwrap(), format);
        }
        assert!("Sekunden".parse::<ClockFormat>().is_err());
    }

    #[test]
    fn test_clock_direction_is_case_sensitive() {
        assert_eq!("Down".parse::<ClockDirection>().unwrap(), ClockDirection::Down);
        assert!("down".parse::<ClockDirection>().is_err());
    }

    #[test]
    fn test_default_sports_have_unique_names() {
        let sports = default_sports();
        assert_eq!(sports.len(), 2);
        assert_ne!(sports[0].name, sports[1].name);
        assert!(sports.iter().all(SportDefinition::is_new));
    }

    #[test]
    fn test_serde_uses_storage_strings() {
        let json = serde_json::to_value(&default_sports()[1]).unwrap();
        assert_eq!(json["clock_format"], "Minuten");
        assert_eq!(json["clock_direction"], "Up");
    }
}
