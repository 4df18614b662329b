//! Default sport definitions
//!
//! Seeding runs on every convergence and relies on the unique sport name:
//! an existing row with the same name is never overwritten or duplicated.

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use scoreboard_core::model::default_sports;

/// Insert the default sports that are missing; returns how many were inserted
pub fn seed_default_sports(conn: &Connection) -> Result<usize> {
    let mut stmt = conn
        .prepare(
            "INSERT OR IGNORE INTO sports (sportart, period_label, periods_count, period_duration, clock_format, clock_direction)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .map_err(from_rusqlite)?;

    let mut inserted = 0;
    for sport in default_sports() {
        inserted += stmt
            .execute(rusqlite::params![
                sport.name,
                sport.period_label,
                sport.period_count,
                sport.period_duration,
                sport.clock_format.as_str(),
                sport.clock_direction.as_str(),
            ])
            .map_err(from_rusqlite)?;
    }

    Ok(inserted)
}
