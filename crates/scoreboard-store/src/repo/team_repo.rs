use super::refs::require_sport;
use super::{instrument, Repository};
use crate::errors::{from_rusqlite, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use scoreboard_core::errors::ScoreboardError;
use scoreboard_core::model::{Id, Team};
use scoreboard_core::rules::validate_team;

/// Read a team from `id, name, sportart, logo_data` starting at `offset`
pub(crate) fn team_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        sport: row.get(offset + 2)?,
        logo: row.get(offset + 3)?,
    })
}

fn read_team(row: &Row<'_>) -> rusqlite::Result<Team> {
    team_from_row(row, 0)
}

/// Teams, each tied to a sport by name
pub struct TeamRepo;

impl Repository for TeamRepo {
    type Entity = Team;
    type Row = Team;

    const ENTITY: &'static str = "team";

    fn load_all(conn: &Connection) -> Result<Vec<Team>> {
        instrument("team.load_all", None, || {
            let mut stmt = conn
                .prepare("SELECT id, name, sportart, logo_data FROM teams ORDER BY id")
                .map_err(from_rusqlite)?;
            let teams = stmt
                .query_map([], read_team)
                .map_err(from_rusqlite)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(from_rusqlite)?;
            Ok(teams)
        })
    }

    fn find_by_id(conn: &Connection, id: Id) -> Result<Option<Team>> {
        instrument("team.find_by_id", Some(id), || {
            conn.query_row(
                "SELECT id, name, sportart, logo_data FROM teams WHERE id = ?1",
                params![id],
                read_team,
            )
            .optional()
            .map_err(from_rusqlite)
        })
    }

    /// Insert or update; the logo is written as-is, `None` clears it
    fn save(conn: &Connection, team: &mut Team) -> Result<Id> {
        instrument("team.save", Some(team.id), || {
            validate_team(team)?;
            require_sport(conn, Self::ENTITY, &team.sport)?;

            if team.is_new() {
                conn.execute(
                    "INSERT INTO teams (name, sportart, logo_data) VALUES (?1, ?2, ?3)",
                    params![team.name, team.sport, team.logo],
                )
                .map_err(from_rusqlite)?;
                team.id = conn.last_insert_rowid();
                return Ok(team.id);
            }

            let changed = conn
                .execute(
                    "UPDATE teams SET name = ?1, sportart = ?2, logo_data = ?3 WHERE id = ?4",
                    params![team.name, team.sport, team.logo, team.id],
                )
                .map_err(from_rusqlite)?;
            if changed == 0 {
                return Err(ScoreboardError::TeamNotFound { id: team.id }.into());
            }
            Ok(team.id)
        })
    }

    /// Matches naming this team are left in place
    fn delete(conn: &Connection, id: Id) -> Result<()> {
        instrument("team.delete", Some(id), || {
            let changed = conn
                .execute("DELETE FROM teams WHERE id = ?1", params![id])
                .map_err(from_rusqlite)?;
            if changed == 0 {
                return Err(ScoreboardError::TeamNotFound { id }.into());
            }
            Ok(())
        })
    }
}
