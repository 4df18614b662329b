use super::refs::require_sport;
use super::{instrument, or_default, Repository};
use crate::errors::{from_rusqlite, Result};
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};
use scoreboard_core::errors::ScoreboardError;
use scoreboard_core::model::{FontStyle, Id, TemplateSettings};
use scoreboard_core::rules::validate_template;

/// Every `template_settings` column, in the order `template_from_row` reads them
pub(crate) const TEMPLATE_COLUMNS: [&str; 28] = [
    "id",
    "name",
    "width",
    "height",
    "x",
    "y",
    "sport",
    "period_label",
    "period_count",
    "period_duration",
    "gameclock_mode",
    "show_period",
    "show_gameclock",
    "show_clock",
    "clock_font_family",
    "clock_font_size",
    "clock_font_color",
    "period_font_family",
    "period_font_size",
    "period_font_color",
    "score_font_family",
    "score_font_size",
    "score_font_color",
    "separator_font_family",
    "separator_font_size",
    "separator_font_color",
    "extra_time_font_color",
    "background_font_color",
];

/// Comma-separated column list, each column qualified with `alias.`
pub(crate) fn template_select_list(alias: &str) -> String {
    TEMPLATE_COLUMNS
        .iter()
        .map(|c| format!("{alias}.{c}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn font_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<FontStyle> {
    Ok(FontStyle {
        family: or_default(row, offset)?,
        size: or_default(row, offset + 1)?,
        color: or_default(row, offset + 2)?,
    })
}

/// Read a template whose `TEMPLATE_COLUMNS` start at `offset`
///
/// Columns left NULL by older writers read as empty text, zero or false.
pub(crate) fn template_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<TemplateSettings> {
    let at = |i: usize| offset + i;
    Ok(TemplateSettings {
        id: row.get(at(0))?,
        name: or_default(row, at(1))?,
        width: or_default(row, at(2))?,
        height: or_default(row, at(3))?,
        x: or_default(row, at(4))?,
        y: or_default(row, at(5))?,
        sport: or_default(row, at(6))?,
        period_label: or_default(row, at(7))?,
        period_count: or_default(row, at(8))?,
        period_duration: or_default(row, at(9))?,
        gameclock_mode: or_default(row, at(10))?,
        show_period: or_default(row, at(11))?,
        show_gameclock: or_default(row, at(12))?,
        show_clock: or_default(row, at(13))?,
        clock_font: font_from_row(row, at(14))?,
        period_font: font_from_row(row, at(17))?,
        score_font: font_from_row(row, at(20))?,
        separator_font: font_from_row(row, at(23))?,
        extra_time_color: or_default(row, at(26))?,
        background_color: or_default(row, at(27))?,
    })
}

fn read_template(row: &Row<'_>) -> rusqlite::Result<TemplateSettings> {
    template_from_row(row, 0)
}

/// Values for every column but `id`, in `TEMPLATE_COLUMNS` order
fn template_values(t: &TemplateSettings) -> Vec<&dyn ToSql> {
    vec![
        &t.name as &dyn ToSql,
        &t.width,
        &t.height,
        &t.x,
        &t.y,
        &t.sport,
        &t.period_label,
        &t.period_count,
        &t.period_duration,
        &t.gameclock_mode,
        &t.show_period,
        &t.show_gameclock,
        &t.show_clock,
        &t.clock_font.family,
        &t.clock_font.size,
        &t.clock_font.color,
        &t.period_font.family,
        &t.period_font.size,
        &t.period_font.color,
        &t.score_font.family,
        &t.score_font.size,
        &t.score_font.color,
        &t.separator_font.family,
        &t.separator_font.size,
        &t.separator_font.color,
        &t.extra_time_color,
        &t.background_color,
    ]
}

fn insert_sql() -> String {
    let columns = &TEMPLATE_COLUMNS[1..];
    let placeholders = (1..=columns.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO template_settings ({}) VALUES ({placeholders})",
        columns.join(", ")
    )
}

fn update_sql() -> String {
    let columns = &TEMPLATE_COLUMNS[1..];
    let assignments = columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{c} = ?{}", i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE template_settings SET {assignments} WHERE id = ?{}",
        columns.len() + 1
    )
}

/// Display templates: layout, fonts, colors and toggles
pub struct TemplateRepo;

impl Repository for TemplateRepo {
    type Entity = TemplateSettings;
    type Row = TemplateSettings;

    const ENTITY: &'static str = "template";

    fn load_all(conn: &Connection) -> Result<Vec<TemplateSettings>> {
        instrument("template.load_all", None, || {
            let sql = format!(
                "SELECT {} FROM template_settings t ORDER BY t.id",
                template_select_list("t")
            );
            let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
            let templates = stmt
                .query_map([], read_template)
                .map_err(from_rusqlite)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(from_rusqlite)?;
            Ok(templates)
        })
    }

    fn find_by_id(conn: &Connection, id: Id) -> Result<Option<TemplateSettings>> {
        instrument("template.find_by_id", Some(id), || {
            let sql = format!(
                "SELECT {} FROM template_settings t WHERE t.id = ?1",
                template_select_list("t")
            );
            conn.query_row(&sql, params![id], read_template)
                .optional()
                .map_err(from_rusqlite)
        })
    }

    /// Insert or update every field; colors are stored exactly as given
    fn save(conn: &Connection, template: &mut TemplateSettings) -> Result<Id> {
        instrument("template.save", Some(template.id), || {
            validate_template(template)?;
            require_sport(conn, Self::ENTITY, &template.sport)?;

            if template.is_new() {
                conn.execute(&insert_sql(), template_values(template).as_slice())
                    .map_err(from_rusqlite)?;
                template.id = conn.last_insert_rowid();
                return Ok(template.id);
            }

            let mut values = template_values(template);
            values.push(&template.id);
            let changed = conn
                .execute(&update_sql(), values.as_slice())
                .map_err(from_rusqlite)?;
            if changed == 0 {
                return Err(ScoreboardError::TemplateNotFound { id: template.id }.into());
            }
            Ok(template.id)
        })
    }

    /// Matches naming this template are left in place
    fn delete(conn: &Connection, id: Id) -> Result<()> {
        instrument("template.delete", Some(id), || {
            let changed = conn
                .execute("DELETE FROM template_settings WHERE id = ?1", params![id])
                .map_err(from_rusqlite)?;
            if changed == 0 {
                return Err(ScoreboardError::TemplateNotFound { id }.into());
            }
            Ok(())
        })
    }
}
