//! Column introspection via `PRAGMA table_info`
//!
//! Used as a safety check around the versioned migrations: additive steps
//! skip columns that already exist, and `verify_schema` confirms the
//! catalog is fully present afterwards.

use std::collections::BTreeSet;

use crate::errors::{from_rusqlite, schema_drift, Result};
use crate::migrations::catalog::{required_columns, TABLES};
use rusqlite::{Connection, OptionalExtension};
use scoreboard_core::errors::{ExError, ExErrorKind};

/// One row of `PRAGMA table_info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub decl_type: String,
    pub not_null: bool,
    pub default_value: Option<String>,
    pub primary_key: bool,
}

fn check_identifier(table: &str) -> Result<()> {
    let valid = !table.is_empty()
        && table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("table_info")
            .with_message(format!("Not a plain table identifier: {:?}", table)));
    }
    Ok(())
}

/// Columns of `table` in declaration order; empty when the table is absent
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<ColumnInfo>> {
    check_identifier(table)?;

    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({})", table))
        .map_err(from_rusqlite)?;

    let columns = stmt
        .query_map([], |row| {
            Ok(ColumnInfo {
                name: row.get(1)?,
                decl_type: row.get(2)?,
                not_null: row.get::<_, i64>(3)? != 0,
                default_value: row.get(4)?,
                primary_key: row.get::<_, i64>(5)? != 0,
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    Ok(columns)
}

/// Names of the columns `table` currently has
pub fn existing_columns(conn: &Connection, table: &str) -> Result<BTreeSet<String>> {
    Ok(table_columns(conn, table)?
        .into_iter()
        .map(|c| c.name)
        .collect())
}

/// Whether `table` was declared with an `AUTOINCREMENT` primary key
///
/// False when the table does not exist.
pub fn uses_autoincrement(conn: &Connection, table: &str) -> Result<bool> {
    check_identifier(table)?;

    let sql: Option<String> = conn
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?
        .flatten();

    Ok(sql.is_some_and(|sql| sql.to_ascii_uppercase().contains("AUTOINCREMENT")))
}

/// Fail with `SchemaDrift` unless every catalog column exists
pub fn verify_schema(conn: &Connection) -> Result<()> {
    let mut missing = Vec::new();
    for table in TABLES {
        let existing = existing_columns(conn, table.name)?;
        for column in required_columns(table.name) {
            if !existing.contains(column) {
                missing.push(format!("{}.{}", table.name, column));
            }
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(schema_drift(&missing))
    }
}
