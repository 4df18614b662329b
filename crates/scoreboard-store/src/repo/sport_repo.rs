use super::refs::sport_reference_count;
use super::{instrument, or_default, Repository};
use crate::errors::{from_rusqlite, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use scoreboard_core::errors::{ExError, ScoreboardError};
use scoreboard_core::model::{Id, SportDefinition};
use scoreboard_core::rules::validate_sport;

const SELECT_SPORT: &str = "SELECT id, sportart, period_label, periods_count, period_duration, \
     clock_format, clock_direction FROM sports";

/// Sport definition as read, before the clock enums are parsed
struct SportRow {
    id: Id,
    name: String,
    period_label: String,
    period_count: i64,
    period_duration: i64,
    clock_format: String,
    clock_direction: String,
}

impl SportRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            period_label: or_default(row, 2)?,
            period_count: or_default(row, 3)?,
            period_duration: or_default(row, 4)?,
            clock_format: or_default(row, 5)?,
            clock_direction: or_default(row, 6)?,
        })
    }

    fn into_definition(self) -> Result<SportDefinition> {
        let clock_format = self
            .clock_format
            .parse()
            .map_err(|e: ScoreboardError| ExError::from(e).with_entity_id(self.id))?;
        let clock_direction = self
            .clock_direction
            .parse()
            .map_err(|e: ScoreboardError| ExError::from(e).with_entity_id(self.id))?;
        Ok(SportDefinition {
            id: self.id,
            name: self.name,
            period_label: self.period_label,
            period_count: self.period_count,
            period_duration: self.period_duration,
            clock_format,
            clock_direction,
        })
    }
}

/// Sport definitions, keyed by id and unique by name
pub struct SportRepo;

impl SportRepo {
    /// Look a definition up by its unique name
    pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<SportDefinition>> {
        instrument("sport.find_by_name", None, || {
            conn.query_row(
                &format!("{SELECT_SPORT} WHERE sportart = ?1"),
                params![name],
                SportRow::read,
            )
            .optional()
            .map_err(from_rusqlite)?
            .map(SportRow::into_definition)
            .transpose()
        })
    }

    /// Every sport name, for pick lists
    pub fn sport_names(conn: &Connection) -> Result<Vec<String>> {
        instrument("sport.names", None, || {
            let mut stmt = conn
                .prepare("SELECT sportart FROM sports ORDER BY id")
                .map_err(from_rusqlite)?;
            let names = stmt
                .query_map([], |row| row.get(0))
                .map_err(from_rusqlite)?
                .collect::<rusqlite::Result<Vec<String>>>()
                .map_err(from_rusqlite)?;
            Ok(names)
        })
    }

    fn load_name(conn: &Connection, id: Id) -> Result<String> {
        conn.query_row(
            "SELECT sportart FROM sports WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?
        .ok_or_else(|| ScoreboardError::SportIdNotFound { id }.into())
    }
}

impl Repository for SportRepo {
    type Entity = SportDefinition;
    type Row = SportDefinition;

    const ENTITY: &'static str = "sport";

    fn load_all(conn: &Connection) -> Result<Vec<SportDefinition>> {
        instrument("sport.load_all", None, || {
            let mut stmt = conn
                .prepare(&format!("{SELECT_SPORT} ORDER BY id"))
                .map_err(from_rusqlite)?;
            let rows = stmt
                .query_map([], SportRow::read)
                .map_err(from_rusqlite)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(from_rusqlite)?;
            rows.into_iter().map(SportRow::into_definition).collect()
        })
    }

    fn find_by_id(conn: &Connection, id: Id) -> Result<Option<SportDefinition>> {
        instrument("sport.find_by_id", Some(id), || {
            conn.query_row(
                &format!("{SELECT_SPORT} WHERE id = ?1"),
                params![id],
                SportRow::read,
            )
            .optional()
            .map_err(from_rusqlite)?
            .map(SportRow::into_definition)
            .transpose()
        })
    }

    /// Insert or update; a duplicate name is `AlreadyExists`
    ///
    /// Renaming a sport that teams, templates or matches still name is
    /// refused, since those rows hold the name rather than the id.
    fn save(conn: &Connection, sport: &mut SportDefinition) -> Result<Id> {
        instrument("sport.save", Some(sport.id), || {
            validate_sport(sport)?;

            if sport.is_new() {
                conn.execute(
                    "INSERT INTO sports (sportart, period_label, periods_count, period_duration, \
                     clock_format, clock_direction) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        sport.name,
                        sport.period_label,
                        sport.period_count,
                        sport.period_duration,
                        sport.clock_format.as_str(),
                        sport.clock_direction.as_str(),
                    ],
                )
                .map_err(|e| from_rusqlite(e).with_entity(Self::ENTITY))?;
                sport.id = conn.last_insert_rowid();
                return Ok(sport.id);
            }

            let current = Self::load_name(conn, sport.id)?;
            if current != sport.name {
                let references = sport_reference_count(conn, &current)?;
                if references > 0 {
                    return Err(ScoreboardError::SportInUse {
                        name: current,
                        references,
                    }
                    .into());
                }
            }

            conn.execute(
                "UPDATE sports SET sportart = ?1, period_label = ?2, periods_count = ?3, \
                 period_duration = ?4, clock_format = ?5, clock_direction = ?6 WHERE id = ?7",
                params![
                    sport.name,
                    sport.period_label,
                    sport.period_count,
                    sport.period_duration,
                    sport.clock_format.as_str(),
                    sport.clock_direction.as_str(),
                    sport.id,
                ],
            )
            .map_err(|e| from_rusqlite(e).with_entity(Self::ENTITY))?;
            Ok(sport.id)
        })
    }

    /// Delete a definition nothing refers to any more
    fn delete(conn: &Connection, id: Id) -> Result<()> {
        instrument("sport.delete", Some(id), || {
            let name = Self::load_name(conn, id)?;
            let references = sport_reference_count(conn, &name)?;
            if references > 0 {
                return Err(ScoreboardError::SportInUse { name, references }.into());
            }
            conn.execute("DELETE FROM sports WHERE id = ?1", params![id])
                .map_err(from_rusqlite)?;
            Ok(())
        })
    }
}
