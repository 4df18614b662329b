//! Hydration layer - loads a fully resolved match in one query
//!
//! The single-match shape carries both teams (with logos) and the complete
//! template, so a render path needs no follow-up lookups.

use super::match_repo::{start_time_of, MatchRepo};
use super::team_repo::team_from_row;
use super::template_repo::{template_from_row, template_select_list};
use super::{instrument, or_default, Repository};
use crate::errors::{from_rusqlite, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use scoreboard_core::errors::ScoreboardError;
use scoreboard_core::model::{HydratedMatch, Id, Team, TemplateSettings};

const HOME_OFFSET: usize = 6;
const AWAY_OFFSET: usize = 10;
const TEMPLATE_OFFSET: usize = 14;

fn hydrate_sql() -> String {
    format!(
        "SELECT m.id, m.sportart, m.team_home, m.team_away, m.template_id, m.start_time, \
         t1.id, t1.name, t1.sportart, t1.logo_data, \
         t2.id, t2.name, t2.sportart, t2.logo_data, \
         {} \
         FROM matches m \
         LEFT JOIN teams t1 ON m.team_home = t1.id \
         LEFT JOIN teams t2 ON m.team_away = t2.id \
         LEFT JOIN template_settings ts ON m.template_id = ts.id \
         WHERE m.id = ?1",
        template_select_list("ts")
    )
}

/// Joined row before dangling references are checked
struct JoinedRow {
    id: Id,
    sport: String,
    home_team_id: Id,
    away_team_id: Id,
    template_id: Id,
    start_time: String,
    home: Option<Team>,
    away: Option<Team>,
    template: Option<TemplateSettings>,
}

/// A left-joined side is present when its id column is non-NULL
fn joined<T>(
    row: &Row<'_>,
    offset: usize,
    read: fn(&Row<'_>, usize) -> rusqlite::Result<T>,
) -> rusqlite::Result<Option<T>> {
    match row.get::<_, Option<Id>>(offset)? {
        Some(_) => read(row, offset).map(Some),
        None => Ok(None),
    }
}

fn read_joined(row: &Row<'_>) -> rusqlite::Result<JoinedRow> {
    Ok(JoinedRow {
        id: row.get(0)?,
        sport: row.get(1)?,
        home_team_id: row.get(2)?,
        away_team_id: row.get(3)?,
        template_id: row.get(4)?,
        start_time: or_default(row, 5)?,
        home: joined(row, HOME_OFFSET, team_from_row)?,
        away: joined(row, AWAY_OFFSET, team_from_row)?,
        template: joined(row, TEMPLATE_OFFSET, template_from_row)?,
    })
}

fn dangling(id: Id, target: &str, target_id: Id) -> ScoreboardError {
    ScoreboardError::DanglingReference {
        entity: MatchRepo::ENTITY.to_string(),
        id,
        target: target.to_string(),
        target_id,
    }
}

/// Load one match with both teams and its template resolved
///
/// # Errors
/// `NotFound` when no match has this id; `ConstraintViolation` when the
/// match names a team or template that no longer exists.
pub fn load_hydrated_match(conn: &Connection, id: Id) -> Result<HydratedMatch> {
    instrument("match.load_hydrated", Some(id), || {
        let row = conn
            .query_row(&hydrate_sql(), params![id], read_joined)
            .optional()
            .map_err(from_rusqlite)?
            .ok_or(ScoreboardError::MatchNotFound { id })?;

        let home = row
            .home
            .ok_or_else(|| dangling(row.id, "team", row.home_team_id))?;
        let away = row
            .away
            .ok_or_else(|| dangling(row.id, "team", row.away_team_id))?;
        let template = row
            .template
            .ok_or_else(|| dangling(row.id, "template", row.template_id))?;

        Ok(HydratedMatch {
            start_time: start_time_of(row.id, &row.start_time)?,
            id: row.id,
            sport: row.sport,
            home,
            away,
            template,
        })
    })
}

impl MatchRepo {
    /// See [`load_hydrated_match`]
    pub fn load_hydrated(conn: &Connection, id: Id) -> Result<HydratedMatch> {
        load_hydrated_match(conn, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, MatchRepo, TeamRepo, TemplateRepo};
    use scoreboard_core::errors::ExErrorKind;
    use scoreboard_core::model::{parse_start_time, FontStyle, Match};

    #[test]
    fn test_hydrates_logos_and_full_template() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.conn();

        let mut home = Team::new("Lions", "Fußball").with_logo(vec![1, 2, 3]);
        let mut away = Team::new("Bears", "Fußball");
        TeamRepo::save(conn, &mut home).unwrap();
        TeamRepo::save(conn, &mut away).unwrap();

        let mut template = TemplateSettings::new("Stadion", "Fußball");
        template.period_count = 2;
        template.show_gameclock = true;
        template.separator_font = FontStyle::new("Arial", 30, "#CCCCCC");
        template.background_color = "#112233".to_string();
        TemplateRepo::save(conn, &mut template).unwrap();

        let start = parse_start_time("2025-08-30T15:30:00+02:00").unwrap();
        let mut m = Match::new("Fußball", home.id, away.id, template.id, start);
        MatchRepo::save(conn, &mut m).unwrap();

        let hydrated = MatchRepo::load_hydrated(conn, m.id).unwrap();
        assert_eq!(hydrated.home, home);
        assert_eq!(hydrated.away, away);
        assert_eq!(hydrated.template, template);
        assert_eq!(hydrated.start_time, start);
        assert_eq!(hydrated.home.logo.as_deref(), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn test_missing_match_not_found() {
        let db = Database::open_in_memory().unwrap();
        let err = load_hydrated_match(db.conn(), 5).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_deleted_template_is_dangling() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.conn();
        let home = TeamRepo::save(conn, &mut Team::new("Lions", "Fußball")).unwrap();
        let away = TeamRepo::save(conn, &mut Team::new("Bears", "Fußball")).unwrap();
        let template =
            TemplateRepo::save(conn, &mut TemplateSettings::new("Stadion", "Fußball")).unwrap();
        let start = parse_start_time("2025-08-30T15:30:00Z").unwrap();
        let mut m = Match::new("Fußball", home, away, template, start);
        MatchRepo::save(conn, &mut m).unwrap();

        TemplateRepo::delete(conn, template).unwrap();

        let err = load_hydrated_match(conn, m.id).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
        assert!(err.message().contains("template"));
    }
}
