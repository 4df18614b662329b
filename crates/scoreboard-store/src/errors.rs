//! Error handling for scoreboard-store
//!
//! Wraps the core `ExError` facility with store-specific helpers

use rusqlite::ErrorCode;
use scoreboard_core::errors::{ExError, ExErrorKind};

/// Store result; every failure is an `ExError`
pub type Result<T> = std::result::Result<T, ExError>;

/// A migration statement failed
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Migration)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error for an already-applied migration
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Migration)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: recorded {}, embedded {}",
            migration_id, expected, actual
        ))
}

/// Create a schema drift error listing missing `table.column` pairs
pub fn schema_drift(missing: &[String]) -> ExError {
    ExError::new(ExErrorKind::SchemaDrift)
        .with_op("verify_schema")
        .with_message(format!("Missing columns after migration: {}", missing.join(", ")))
}

/// Classify a driver error
///
/// Unique-constraint violations become `AlreadyExists`; a query that
/// expected a row and found none becomes `NotFound`.
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    match &err {
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.code == ErrorCode::ConstraintViolation
                && inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            ExError::new(ExErrorKind::AlreadyExists)
                .with_op("sqlite")
                .with_message(err.to_string())
        }
        rusqlite::Error::QueryReturnedNoRows => ExError::new(ExErrorKind::NotFound)
            .with_op("sqlite")
            .with_message(err.to_string()),
        _ => ExError::new(ExErrorKind::Persistence)
            .with_op("sqlite")
            .with_message(err.to_string()),
    }
}

/// Mark a failure during open or convergence as fatal
///
/// Migration and drift errors keep their kind; anything an operation could
/// otherwise recover from becomes `Setup`.
pub fn setup_failure(err: ExError) -> ExError {
    if err.kind().is_recoverable() {
        err.with_kind(ExErrorKind::Setup)
    } else {
        err
    }
}

/// A file read or write failed
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_unique_violation_maps_to_already_exists() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();
        let err = conn
            .execute("INSERT INTO t VALUES ('a')", [])
            .map_err(from_rusqlite)
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
    }

    #[test]
    fn test_no_rows_maps_to_not_found() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn
            .query_row("SELECT 1 WHERE 0", [], |row| row.get::<_, i64>(0))
            .map_err(from_rusqlite)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_setup_failure_keeps_fatal_kinds() {
        let io = io_error("create_db_dir", std::io::Error::other("read-only"));
        assert_eq!(setup_failure(io).kind(), ExErrorKind::Setup);

        let drift = schema_drift(&["teams.logo_data".to_string()]);
        assert_eq!(setup_failure(drift).kind(), ExErrorKind::SchemaDrift);
    }

    #[test]
    fn test_syntax_error_is_persistence() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn
            .execute("SELEKT", [])
            .map_err(from_rusqlite)
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Persistence);
    }
}
