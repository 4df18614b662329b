//! Write-time reference checks
//!
//! The schema declares no foreign keys, so repositories verify references
//! themselves before writing.

use crate::errors::{from_rusqlite, Result};
use rusqlite::{params, Connection, OptionalExtension};
use scoreboard_core::errors::{ExError, ExErrorKind};
use scoreboard_core::model::Id;

fn exists(conn: &Connection, sql: &str, param: &dyn rusqlite::ToSql) -> Result<bool> {
    conn.query_row(sql, [param], |_| Ok(()))
        .optional()
        .map(|row| row.is_some())
        .map_err(from_rusqlite)
}

fn missing(entity: &str, what: String) -> ExError {
    ExError::new(ExErrorKind::ConstraintViolation)
        .with_entity(entity)
        .with_message(format!("{entity} references missing {what}"))
}

/// Fails with `ConstraintViolation` unless a sport definition has this name
pub(crate) fn require_sport(conn: &Connection, entity: &str, name: &str) -> Result<()> {
    if exists(conn, "SELECT 1 FROM sports WHERE sportart = ?1", &name)? {
        Ok(())
    } else {
        Err(missing(entity, format!("sport {name:?}")))
    }
}

pub(crate) fn require_team(conn: &Connection, entity: &str, id: Id) -> Result<()> {
    if exists(conn, "SELECT 1 FROM teams WHERE id = ?1", &id)? {
        Ok(())
    } else {
        Err(missing(entity, format!("team {id}")))
    }
}

pub(crate) fn require_template(conn: &Connection, entity: &str, id: Id) -> Result<()> {
    if exists(conn, "SELECT 1 FROM template_settings WHERE id = ?1", &id)? {
        Ok(())
    } else {
        Err(missing(entity, format!("template {id}")))
    }
}

/// Teams, templates and matches naming this sport
pub(crate) fn sport_reference_count(conn: &Connection, name: &str) -> Result<i64> {
    conn.query_row(
        "SELECT (SELECT COUNT(*) FROM teams WHERE sportart = ?1)
              + (SELECT COUNT(*) FROM template_settings WHERE sport = ?1)
              + (SELECT COUNT(*) FROM matches WHERE sportart = ?1)",
        params![name],
        |row| row.get(0),
    )
    .map_err(from_rusqlite)
}
