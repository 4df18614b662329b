//! Applies versioned migrations and records them in `schema_version`
//!
//! Each entry is checksummed so an edited migration is caught. Additive
//! steps consult introspection first, so databases created before the
//! ledger existed converge without duplicate-column failures.

use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};
use crate::migrations::checksums::compute_checksum;
use crate::migrations::catalog::{required_columns, TableRebuild};
use crate::migrations::embedded::{get_migrations, Migration, Step};
use crate::migrations::introspect::{existing_columns, uses_autoincrement};
use rusqlite::{Connection, OptionalExtension, Transaction};
use scoreboard_core::{log_op_end, log_op_start};

/// A row of the `schema_version` ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    pub migration_id: String,
    pub applied_at: i64,
    pub checksum: String,
}

/// What one run of the runner changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationOutcome {
    /// Migration ids recorded during this run
    pub applied: Vec<String>,
    /// `table.column` pairs added during this run
    pub columns_added: Vec<String>,
    /// Tables recreated during this run
    pub tables_rebuilt: Vec<String>,
}

/// Bring the database up to the latest migration
pub fn apply_migrations(conn: &mut Connection) -> Result<MigrationOutcome> {
    create_schema_version_table(conn)?;

    let mut outcome = MigrationOutcome::default();
    for migration in get_migrations() {
        apply_migration(conn, &migration, &mut outcome)?;
    }

    Ok(outcome)
}

/// Read the ledger in application order
pub fn applied_migrations(conn: &Connection) -> Result<Vec<AppliedMigration>> {
    create_schema_version_table(conn)?;

    let mut stmt = conn
        .prepare("SELECT migration_id, applied_at, checksum FROM schema_version ORDER BY id")
        .map_err(from_rusqlite)?;

    let rows = stmt
        .query_map([], |row| {
            Ok(AppliedMigration {
                migration_id: row.get(0)?,
                applied_at: row.get(1)?,
                checksum: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    Ok(rows)
}

/// Ledger of applied migrations with their checksums
fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL,
            checksum TEXT
        )",
        [],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

/// Run one migration in its own transaction unless the ledger already has it
fn apply_migration(
    conn: &mut Connection,
    migration: &Migration,
    outcome: &mut MigrationOutcome,
) -> Result<()> {
    let checksum = compute_checksum(&migration.canonical_text());

    let recorded: Option<Option<String>> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?1",
            [migration.id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    if let Some(recorded) = recorded {
        return match recorded {
            Some(expected) if expected != checksum => {
                Err(checksum_mismatch(migration.id, &expected, &checksum))
            }
            _ => Ok(()),
        };
    }

    log_op_start!("migration.apply", migration_id = migration.id);
    let start = std::time::Instant::now();

    let tx = conn.transaction().map_err(from_rusqlite)?;

    let mut rebuilt = None;
    let added = match &migration.step {
        Step::CreateTables(tables) => {
            for table in tables.iter() {
                tx.execute_batch(table.create_sql)
                    .map_err(|e| migration_error(migration.id, &e.to_string()))?;
            }
            Vec::new()
        }
        Step::AddColumns(_) => add_missing_columns(&tx, migration)?,
        Step::RebuildWithAutoincrement(rebuild) => {
            if rebuild_table(&tx, migration.id, rebuild)? {
                rebuilt = Some(rebuild.table.to_string());
            }
            Vec::new()
        }
    };

    let now = chrono::Utc::now().timestamp();
    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?1, ?2, ?3)",
        rusqlite::params![migration.id, now, checksum],
    )
    .map_err(from_rusqlite)?;

    tx.commit().map_err(from_rusqlite)?;

    log_op_end!(
        "migration.apply",
        duration_ms = start.elapsed().as_millis() as u64,
        migration_id = migration.id,
        columns_added = added.len()
    );

    outcome.applied.push(migration.id.to_string());
    outcome.columns_added.extend(added);
    outcome.tables_rebuilt.extend(rebuilt);
    Ok(())
}

/// Swap `rebuild.table` for a copy under the new definition
///
/// Returns false when the table already uses `AUTOINCREMENT` or is absent.
/// Explicit ids are copied, so `sqlite_sequence` starts at the highest one.
fn rebuild_table(tx: &Transaction<'_>, migration_id: &str, rebuild: &TableRebuild) -> Result<bool> {
    if existing_columns(tx, rebuild.table)?.is_empty() || uses_autoincrement(tx, rebuild.table)? {
        return Ok(false);
    }

    let columns = required_columns(rebuild.table).join(", ");
    let sql = format!(
        "{create}
         INSERT INTO {staging} ({columns}) SELECT {columns} FROM {table};
         DROP TABLE {table};
         ALTER TABLE {staging} RENAME TO {table};",
        create = rebuild.create_sql,
        staging = rebuild.staging,
        table = rebuild.table,
    );
    tx.execute_batch(&sql)
        .map_err(|e| migration_error(migration_id, &e.to_string()))?;

    tracing::debug!(migration_id, table = rebuild.table, "rebuilt table");
    Ok(true)
}

fn add_missing_columns(tx: &Transaction<'_>, migration: &Migration) -> Result<Vec<String>> {
    let Step::AddColumns(columns) = &migration.step else {
        return Ok(Vec::new());
    };

    let mut added = Vec::new();
    for spec in columns.iter() {
        if existing_columns(tx, spec.table)?.contains(spec.column) {
            continue;
        }

        let sql = format!(
            "ALTER TABLE {} ADD COLUMN {} {}",
            spec.table, spec.column, spec.definition
        );
        tx.execute_batch(&sql)
            .map_err(|e| migration_error(migration.id, &e.to_string()))?;

        tracing::debug!(
            migration_id = migration.id,
            table = spec.table,
            column = spec.column,
            "added column"
        );
        added.push(format!("{}.{}", spec.table, spec.column));
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_migrations() {
        let mut conn = Connection::open_in_memory().unwrap();
        let outcome = apply_migrations(&mut conn).unwrap();
        assert_eq!(outcome.applied.len(), 4);
        // fresh tables: only the template styling columns are missing
        assert_eq!(outcome.columns_added.len(), 15);
        assert_eq!(outcome.tables_rebuilt, vec!["template_settings"]);
        assert!(uses_autoincrement(&conn, "template_settings").unwrap());
    }

    #[test]
    fn test_rebuild_keeps_rows_and_ids() {
        // Given: A legacy template table holding rows with a gap in the ids
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE template_settings (
                id INTEGER PRIMARY KEY, width INTEGER, height INTEGER, x INTEGER, y INTEGER,
                sport TEXT, period_label TEXT, period_count INTEGER, period_duration INTEGER,
                gameclock_mode TEXT, show_period BOOLEAN, show_gameclock BOOLEAN, show_clock BOOLEAN
            );
            INSERT INTO template_settings (id, width, sport) VALUES (1, 800, 'Fußball');
            INSERT INTO template_settings (id, width, sport) VALUES (5, 1280, 'Fußball');",
        )
        .unwrap();

        // When: Migrating
        apply_migrations(&mut conn).unwrap();

        // Then: Rows and ids survive and the next id continues past the highest
        let widths: Vec<(i64, i64)> = conn
            .prepare("SELECT id, width FROM template_settings ORDER BY id")
            .unwrap()
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(widths, vec![(1, 800), (5, 1280)]);

        conn.execute("DELETE FROM template_settings WHERE id = 5", [])
            .unwrap();
        conn.execute("INSERT INTO template_settings (sport) VALUES ('Fußball')", [])
            .unwrap();
        assert_eq!(conn.last_insert_rowid(), 6);
    }

    #[test]
    fn test_idempotency() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        let outcome = apply_migrations(&mut conn).unwrap();
        assert_eq!(outcome, MigrationOutcome::default());
    }

    #[test]
    fn test_edited_migration_is_detected() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        conn.execute(
            "UPDATE schema_version SET checksum = 'stale' WHERE migration_id = '003_team_logo'",
            [],
        )
        .unwrap();

        let err = apply_migrations(&mut conn).unwrap_err();
        assert_eq!(err.kind(), scoreboard_core::ExErrorKind::Migration);
        assert!(err.message().contains("003_team_logo"));
    }
}
