use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::{Id, Team, TemplateSettings, NEW_ID};
use crate::errors::ScoreboardError;

/// Display format for start times in tables
pub const START_TIME_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A scheduled match as stored: foreign ids only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: Id,
    /// Denormalized copy of the sport name, not derived from the teams
    pub sport: String,
    pub home_team_id: Id,
    pub away_team_id: Id,
    pub template_id: Id,
    pub start_time: DateTime<FixedOffset>,
}

impl Match {
    pub fn new(
        sport: impl Into<String>,
        home_team_id: Id,
        away_team_id: Id,
        template_id: Id,
        start_time: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id: NEW_ID,
            sport: sport.into(),
            home_team_id,
            away_team_id,
            template_id,
            start_time,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == NEW_ID
    }
}

/// Bulk-list shape: ids plus the display names of the joined rows
///
/// Names are `None` when the referenced team or template has been deleted;
/// deletes do not cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub id: Id,
    pub sport: String,
    pub home_team_id: Id,
    pub home_team_name: Option<String>,
    pub away_team_id: Id,
    pub away_team_name: Option<String>,
    pub template_id: Id,
    pub template_name: Option<String>,
    pub start_time: DateTime<FixedOffset>,
}

impl MatchSummary {
    /// The stored record behind this summary
    pub fn to_match(&self) -> Match {
        Match {
            id: self.id,
            sport: self.sport.clone(),
            home_team_id: self.home_team_id,
            away_team_id: self.away_team_id,
            template_id: self.template_id,
            start_time: self.start_time,
        }
    }
}

/// Single-lookup shape: everything needed to render without further queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HydratedMatch {
    pub id: Id,
    pub sport: String,
    pub home: Team,
    pub away: Team,
    pub template: TemplateSettings,
    pub start_time: DateTime<FixedOffset>,
}

/// Storage form of a start time: RFC 3339 in UTC, whole seconds, `Z` suffix
///
/// Every stored value has the same offset and width, so text order is
/// time order.
pub fn format_start_time(t: &DateTime<FixedOffset>) -> String {
    t.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a stored start time
///
/// Accepts RFC 3339 and, for rows written by SQLite itself, the bare
/// `YYYY-MM-DD HH:MM:SS` form, read as UTC.
///
/// # Errors
///
/// Returns `ScoreboardError::InvalidTimestamp` for anything else.
pub fn parse_start_time(s: &str) -> Result<DateTime<FixedOffset>, ScoreboardError> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t);
    }
    NaiveDateTime::parse_from_str(s, START_TIME_DISPLAY_FORMAT)
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|_| ScoreboardError::InvalidTimestamp {
            value: s.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_time_storage_format() {
        let t = parse_start_time("2025-08-30T15:30:00+02:00").unwrap();
        assert_eq!(format_start_time(&t), "2025-08-30T13:30:00Z");

        let utc = parse_start_time("2025-08-30T13:30:00Z").unwrap();
        assert_eq!(format_start_time(&utc), "2025-08-30T13:30:00Z");
        assert_eq!(t, utc);
    }

    #[test]
    fn test_parse_sqlite_datetime_as_utc() {
        let t = parse_start_time("2025-08-30 13:30:00").unwrap();
        assert_eq!(format_start_time(&t), "2025-08-30T13:30:00Z");
    }

    #[test]
    fn test_storage_text_sorts_in_time_order() {
        let earlier = parse_start_time("2025-08-02T18:30:00+02:00").unwrap();
        let later = parse_start_time("2025-08-02T17:00:00Z").unwrap();
        assert!(earlier < later);
        assert!(format_start_time(&earlier) < format_start_time(&later));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_start_time("Samstag").unwrap_err();
        assert!(matches!(err, ScoreboardError::InvalidTimestamp { .. }));
    }
}
