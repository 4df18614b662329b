//! Database connection management
//!
//! `Database` owns the single connection a process uses. It is constructed
//! once at startup (which also converges the schema) and handed down to
//! repository calls; dropping it closes the connection.

use crate::errors::{from_rusqlite, io_error, setup_failure, Result};
use crate::migrations::{converge, ConvergeReport};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Database file used when no path is configured
pub const DEFAULT_DB_FILE: &str = "settings.db";

/// Open a SQLite database at the given path, creating the file if absent
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Configure a connection for single-user desktop use
pub fn configure(conn: &Connection) -> Result<()> {
    conn.busy_timeout(Duration::from_secs(5))
        .map_err(from_rusqlite)?;
    Ok(())
}

/// The process-lifetime persistence handle
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
    startup: ConvergeReport,
}

impl Database {
    /// Open (or create) the database file and converge its schema
    ///
    /// # Errors
    /// Any open, migration or seeding failure, always with a non-recoverable
    /// kind. Startup should abort on error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        Self::open_file(path).map_err(setup_failure)
    }

    fn open_file(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| io_error("create_db_dir", e))?;
        }

        let conn = open(path)?;
        Self::from_connection(conn, Some(path.to_path_buf()))
    }

    /// In-memory database with a converged schema
    pub fn open_in_memory() -> Result<Self> {
        open_in_memory()
            .and_then(|conn| Self::from_connection(conn, None))
            .map_err(setup_failure)
    }

    fn from_connection(mut conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        configure(&conn)?;
        let startup = converge(&mut conn)?;
        tracing::info!(
            path = ?path,
            noop = startup.is_noop(),
            "database ready"
        );
        Ok(Self {
            conn,
            path,
            startup,
        })
    }

    /// Connection for repository calls
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Mutable connection, needed to run migrations again
    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// File path, `None` for in-memory databases
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// What convergence changed when this handle was opened
    pub fn startup_report(&self) -> &ConvergeReport {
        &self.startup
    }

    /// Close explicitly, surfacing any close error instead of ignoring it on drop
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| from_rusqlite(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoreboard_core::errors::ExErrorKind;

    #[test]
    fn test_in_memory_is_converged() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.path().is_none());
        assert_eq!(db.startup_report().sports_seeded, 2);
        crate::migrations::verify_schema(db.conn()).unwrap();
    }

    #[test]
    fn test_open_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(DEFAULT_DB_FILE);
        assert!(!path.exists());

        let db = Database::open(&path).unwrap();
        assert_eq!(db.path(), Some(path.as_path()));
        db.close().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_directory_path_is_setup_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = Database::open(dir.path()).err().unwrap();
        assert_eq!(err.kind(), ExErrorKind::Setup);
        assert!(!err.kind().is_recoverable());
    }

    #[test]
    fn test_failed_seeding_is_setup_failure() {
        // A sports table with an extra NOT NULL column rejects the seed rows
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_DB_FILE);
        Connection::open(&path)
            .unwrap()
            .execute_batch(
                "CREATE TABLE sports (
                    id INTEGER PRIMARY KEY AUTOINCREMENT, sportart TEXT NOT NULL UNIQUE,
                    period_label TEXT, periods_count INTEGER, period_duration INTEGER,
                    clock_format TEXT, clock_direction TEXT, owner TEXT NOT NULL
                );",
            )
            .unwrap();

        let err = Database::open(&path).err().unwrap();
        assert_eq!(err.kind(), ExErrorKind::Setup);
    }

    #[test]
    fn test_reopen_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_DB_FILE);

        Database::open(&path).unwrap().close().unwrap();
        let db = Database::open(&path).unwrap();
        assert!(db.startup_report().is_noop());
    }
}
