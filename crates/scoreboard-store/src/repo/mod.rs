//! Repository layer mapping domain records to parameterized statements
//!
//! Every entity kind follows upsert-by-id: a zero id inserts and receives
//! the generated id, any other id updates the row in place. Callers pass the
//! connection explicitly; there is no ambient handle.

pub mod audit;
pub mod hydration;
pub mod match_repo;
mod refs;
pub mod sport_repo;
pub mod team_repo;
pub mod template_repo;

pub use audit::{find_reference_drift, DriftFinding};
pub use hydration::load_hydrated_match;
pub use match_repo::MatchRepo;
pub use sport_repo::SportRepo;
pub use team_repo::TeamRepo;
pub use template_repo::TemplateRepo;

use crate::errors::Result;
use rusqlite::types::FromSql;
use rusqlite::{Connection, Row};
use scoreboard_core::model::Id;
use scoreboard_core::{log_op_end, log_op_error, log_op_start};

/// CRUD surface shared by the four entity kinds
pub trait Repository {
    /// The record `save` and `find_by_id` work with
    type Entity;
    /// The shape `load_all` returns (a joined summary for matches)
    type Row;

    /// Entity name used in logs and errors
    const ENTITY: &'static str;

    /// Load every row
    fn load_all(conn: &Connection) -> Result<Vec<Self::Row>>;

    /// Load one record, `None` when the id does not exist
    fn find_by_id(conn: &Connection, id: Id) -> Result<Option<Self::Entity>>;

    /// Insert (id 0) or update (any other id); returns the record's id
    ///
    /// On insert the generated id is written back into `entity`. On failure
    /// `entity` is left unchanged.
    fn save(conn: &Connection, entity: &mut Self::Entity) -> Result<Id>;

    /// Delete by id; `NotFound` when no row has that id
    fn delete(conn: &Connection, id: Id) -> Result<()>;
}

/// Run a repository operation between start/end log events
pub(crate) fn instrument<T>(
    op: &str,
    id: Option<Id>,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    log_op_start!(op, entity_id = ?id);
    let start = std::time::Instant::now();

    let result = f().map_err(|e| {
        log_op_error!(
            op,
            e,
            duration_ms = start.elapsed().as_millis() as u64,
            entity_id = ?id
        );
        e
    })?;

    log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
    Ok(result)
}

/// Read a nullable column, substituting the type's default for NULL
pub(crate) fn or_default<T: FromSql + Default>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    Ok(row.get::<_, Option<T>>(idx)?.unwrap_or_default())
}
