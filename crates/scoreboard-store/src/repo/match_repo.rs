use super::refs::{require_sport, require_team, require_template};
use super::{instrument, or_default, Repository};
use crate::errors::{from_rusqlite, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use scoreboard_core::errors::{ExError, ScoreboardError};
use scoreboard_core::model::{format_start_time, parse_start_time, Id, Match, MatchSummary};
use scoreboard_core::rules::validate_match;

const SELECT_MATCH: &str =
    "SELECT id, sportart, team_home, team_away, template_id, start_time FROM matches";

/// Bulk list: explicit columns, names from the joined rows
///
/// Left joins keep matches whose team or template was deleted; their names
/// read as NULL. Ordering goes through `julianday` so rows written with
/// other offsets or the bare `YYYY-MM-DD HH:MM:SS` form still sort by time.
const SELECT_SUMMARIES: &str = "SELECT m.id, m.sportart, m.team_home, m.team_away, \
     m.template_id, m.start_time, t1.name, t2.name, ts.name \
     FROM matches m \
     LEFT JOIN teams t1 ON m.team_home = t1.id \
     LEFT JOIN teams t2 ON m.team_away = t2.id \
     LEFT JOIN template_settings ts ON m.template_id = ts.id \
     ORDER BY julianday(m.start_time) DESC, m.id DESC";

/// Parse the stored start time text, tagging failures with the match id
pub(crate) fn start_time_of(id: Id, raw: &str) -> Result<chrono::DateTime<chrono::FixedOffset>> {
    parse_start_time(raw).map_err(|e| {
        ExError::from(e)
            .with_entity(MatchRepo::ENTITY)
            .with_entity_id(id)
    })
}

/// Match columns as read, before the start time is parsed
struct MatchRow {
    id: Id,
    sport: String,
    home_team_id: Id,
    away_team_id: Id,
    template_id: Id,
    start_time: String,
}

impl MatchRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            sport: row.get(1)?,
            home_team_id: row.get(2)?,
            away_team_id: row.get(3)?,
            template_id: row.get(4)?,
            start_time: or_default(row, 5)?,
        })
    }

    fn into_match(self) -> Result<Match> {
        Ok(Match {
            start_time: start_time_of(self.id, &self.start_time)?,
            id: self.id,
            sport: self.sport,
            home_team_id: self.home_team_id,
            away_team_id: self.away_team_id,
            template_id: self.template_id,
        })
    }
}

fn read_summary(row: &Row<'_>) -> rusqlite::Result<(MatchRow, [Option<String>; 3])> {
    Ok((
        MatchRow::read(row)?,
        [row.get(6)?, row.get(7)?, row.get(8)?],
    ))
}

/// Scheduled matches
pub struct MatchRepo;

impl Repository for MatchRepo {
    type Entity = Match;
    type Row = MatchSummary;

    const ENTITY: &'static str = "match";

    /// Summaries with team and template names, latest start first
    ///
    /// Rows whose start time cannot be read are left out and logged;
    /// `find_reference_drift` lists them.
    fn load_all(conn: &Connection) -> Result<Vec<MatchSummary>> {
        instrument("match.load_all", None, || {
            let mut stmt = conn.prepare(SELECT_SUMMARIES).map_err(from_rusqlite)?;
            let rows = stmt
                .query_map([], read_summary)
                .map_err(from_rusqlite)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(from_rusqlite)?;

            let summaries = rows
                .into_iter()
                .filter_map(|(m, [home, away, template])| {
                    let start_time = match parse_start_time(&m.start_time) {
                        Ok(t) => t,
                        Err(e) => {
                            tracing::warn!(match_id = m.id, error = %e, "skipping match");
                            return None;
                        }
                    };
                    Some(MatchSummary {
                        start_time,
                        id: m.id,
                        sport: m.sport,
                        home_team_id: m.home_team_id,
                        home_team_name: home,
                        away_team_id: m.away_team_id,
                        away_team_name: away,
                        template_id: m.template_id,
                        template_name: template,
                    })
                })
                .collect();
            Ok(summaries)
        })
    }

    fn find_by_id(conn: &Connection, id: Id) -> Result<Option<Match>> {
        instrument("match.find_by_id", Some(id), || {
            conn.query_row(
                &format!("{SELECT_MATCH} WHERE id = ?1"),
                params![id],
                MatchRow::read,
            )
            .optional()
            .map_err(from_rusqlite)?
            .map(MatchRow::into_match)
            .transpose()
        })
    }

    /// Insert or update; the sport, both teams and the template must exist
    fn save(conn: &Connection, m: &mut Match) -> Result<Id> {
        instrument("match.save", Some(m.id), || {
            validate_match(m)?;
            require_sport(conn, Self::ENTITY, &m.sport)?;
            require_team(conn, Self::ENTITY, m.home_team_id)?;
            require_team(conn, Self::ENTITY, m.away_team_id)?;
            require_template(conn, Self::ENTITY, m.template_id)?;

            let start_time = format_start_time(&m.start_time);

            if m.is_new() {
                conn.execute(
                    "INSERT INTO matches (sportart, team_home, team_away, template_id, start_time) \
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![m.sport, m.home_team_id, m.away_team_id, m.template_id, start_time],
                )
                .map_err(from_rusqlite)?;
                m.id = conn.last_insert_rowid();
                return Ok(m.id);
            }

            let changed = conn
                .execute(
                    "UPDATE matches SET sportart = ?1, team_home = ?2, team_away = ?3, \
                     template_id = ?4, start_time = ?5 WHERE id = ?6",
                    params![
                        m.sport,
                        m.home_team_id,
                        m.away_team_id,
                        m.template_id,
                        start_time,
                        m.id,
                    ],
                )
                .map_err(from_rusqlite)?;
            if changed == 0 {
                return Err(ScoreboardError::MatchNotFound { id: m.id }.into());
            }
            Ok(m.id)
        })
    }

    fn delete(conn: &Connection, id: Id) -> Result<()> {
        instrument("match.delete", Some(id), || {
            let changed = conn
                .execute("DELETE FROM matches WHERE id = ?1", params![id])
                .map_err(from_rusqlite)?;
            if changed == 0 {
                return Err(ScoreboardError::MatchNotFound { id }.into());
            }
            Ok(())
        })
    }
}
