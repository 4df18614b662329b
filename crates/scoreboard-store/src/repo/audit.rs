//! Reference drift audit
//!
//! Rows written before write-time checks existed (or edited outside this
//! crate) can name a sport, team or template that is gone. The audit finds
//! them without changing anything, along with matches whose start time
//! cannot be read and are therefore left out of the match list.

use super::instrument;
use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use scoreboard_core::model::{parse_start_time, Id};
use serde::Serialize;
use std::fmt;

/// One row whose reference does not resolve
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DriftFinding {
    /// A team, template or match names a sport with no definition
    UnknownSport {
        entity: String,
        id: Id,
        sport: String,
    },
    /// A match names a team id that does not exist
    MissingTeam { match_id: Id, team_id: Id },
    /// A match names a template id that does not exist
    MissingTemplate { match_id: Id, template_id: Id },
    /// A match whose start time is NULL or not a timestamp
    UnreadableStartTime { match_id: Id, value: Option<String> },
}

impl fmt::Display for DriftFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriftFinding::UnknownSport { entity, id, sport } => {
                write!(f, "{entity} {id}: unknown sport {sport:?}")
            }
            DriftFinding::MissingTeam { match_id, team_id } => {
                write!(f, "match {match_id}: missing team {team_id}")
            }
            DriftFinding::MissingTemplate {
                match_id,
                template_id,
            } => write!(f, "match {match_id}: missing template {template_id}"),
            DriftFinding::UnreadableStartTime { match_id, value } => match value {
                Some(v) => write!(f, "match {match_id}: unreadable start time {v:?}"),
                None => write!(f, "match {match_id}: no start time"),
            },
        }
    }
}

const UNKNOWN_SPORT_SQL: &str = "
    SELECT 'team', id, sportart FROM teams
        WHERE sportart NOT IN (SELECT sportart FROM sports)
    UNION ALL
    SELECT 'template', id, COALESCE(sport, '') FROM template_settings
        WHERE COALESCE(sport, '') NOT IN (SELECT sportart FROM sports)
    UNION ALL
    SELECT 'match', id, sportart FROM matches
        WHERE sportart NOT IN (SELECT sportart FROM sports)";

const MISSING_TEAM_SQL: &str = "
    SELECT id, team_home FROM matches WHERE team_home NOT IN (SELECT id FROM teams)
    UNION ALL
    SELECT id, team_away FROM matches WHERE team_away NOT IN (SELECT id FROM teams)
    ORDER BY 1, 2";

const MISSING_TEMPLATE_SQL: &str = "
    SELECT id, template_id FROM matches
        WHERE template_id NOT IN (SELECT id FROM template_settings)
    ORDER BY id";

fn query_findings<F>(conn: &Connection, sql: &str, map: F) -> Result<Vec<DriftFinding>>
where
    F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<DriftFinding>,
{
    let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
    let findings = stmt
        .query_map([], map)
        .map_err(from_rusqlite)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(from_rusqlite)?;
    Ok(findings)
}

/// Every unresolved reference: unknown sports first, then missing teams,
/// then missing templates, then unreadable start times
pub fn find_reference_drift(conn: &Connection) -> Result<Vec<DriftFinding>> {
    instrument("schema.audit", None, || {
        let mut findings = query_findings(conn, UNKNOWN_SPORT_SQL, |row| {
            Ok(DriftFinding::UnknownSport {
                entity: row.get(0)?,
                id: row.get(1)?,
                sport: row.get(2)?,
            })
        })?;
        findings.extend(query_findings(conn, MISSING_TEAM_SQL, |row| {
            Ok(DriftFinding::MissingTeam {
                match_id: row.get(0)?,
                team_id: row.get(1)?,
            })
        })?);
        findings.extend(query_findings(conn, MISSING_TEMPLATE_SQL, |row| {
            Ok(DriftFinding::MissingTemplate {
                match_id: row.get(0)?,
                template_id: row.get(1)?,
            })
        })?);

        let mut stmt = conn
            .prepare("SELECT id, start_time FROM matches ORDER BY id")
            .map_err(from_rusqlite)?;
        let start_times = stmt
            .query_map([], |row| Ok((row.get::<_, Id>(0)?, row.get::<_, Option<String>>(1)?)))
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(from_rusqlite)?;
        findings.extend(
            start_times
                .into_iter()
                .filter(|(_, value)| value.as_deref().map_or(true, |v| parse_start_time(v).is_err()))
                .map(|(match_id, value)| DriftFinding::UnreadableStartTime { match_id, value }),
        );

        tracing::debug!(findings = findings.len(), "reference audit complete");
        Ok(findings)
    })
}
