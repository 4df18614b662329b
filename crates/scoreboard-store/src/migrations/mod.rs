//! Schema manager
//!
//! Provides:
//! - A declarative catalog of tables and additive columns
//! - A versioned migration runner with checksums and idempotency
//! - Column introspection as a post-migration safety check
//! - Default sport seeding
//!
//! `converge` is the single startup entry point. Running it any number of
//! times yields the same schema as running it once.

pub mod catalog;
mod checksums;
mod embedded;
pub mod introspect;
mod runner;
mod seed;

pub use introspect::{
    existing_columns, table_columns, uses_autoincrement, verify_schema, ColumnInfo,
};
pub use runner::{applied_migrations, apply_migrations, AppliedMigration, MigrationOutcome};
pub use seed::seed_default_sports;

use crate::errors::{setup_failure, Result};
use rusqlite::Connection;
use scoreboard_core::{log_op_end, log_op_error, log_op_start};

/// What a convergence run changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvergeReport {
    pub migrations: MigrationOutcome,
    pub sports_seeded: usize,
}

impl ConvergeReport {
    /// True when the run changed nothing
    pub fn is_noop(&self) -> bool {
        self.migrations.applied.is_empty()
            && self.migrations.columns_added.is_empty()
            && self.migrations.tables_rebuilt.is_empty()
            && self.sports_seeded == 0
    }
}

/// Bring the schema to the catalog and seed default sports
///
/// Any failure is a setup failure (`Setup`, `Migration` or `SchemaDrift`);
/// callers abort startup on error.
pub fn converge(conn: &mut Connection) -> Result<ConvergeReport> {
    log_op_start!("schema.converge");
    let start = std::time::Instant::now();

    let result = converge_impl(conn).map_err(setup_failure).map_err(|e| {
        log_op_error!(
            "schema.converge",
            e,
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "schema.converge",
        duration_ms = start.elapsed().as_millis() as u64,
        migrations_applied = result.migrations.applied.len(),
        sports_seeded = result.sports_seeded
    );

    Ok(result)
}

fn converge_impl(conn: &mut Connection) -> Result<ConvergeReport> {
    let migrations = apply_migrations(conn)?;
    verify_schema(conn)?;
    let sports_seeded = seed_default_sports(conn)?;

    Ok(ConvergeReport {
        migrations,
        sports_seeded,
    })
}
