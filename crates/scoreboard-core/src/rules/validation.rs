use crate::color::parse_hex;
use crate::errors::{Result, ScoreboardError};
use crate::model::{Match, SportDefinition, Team, TemplateSettings};

fn require_text(entity: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScoreboardError::EmptyField {
            entity: entity.to_string(),
            field: field.to_string(),
        }
        .into());
    }
    Ok(())
}

fn require_min(entity: &str, field: &str, value: i64, min: i64) -> Result<()> {
    if value < min {
        return Err(ScoreboardError::OutOfRange {
            entity: entity.to_string(),
            field: field.to_string(),
            value,
        }
        .into());
    }
    Ok(())
}

/// Empty colors are allowed and resolve to a default at render time
fn optional_color(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    parse_hex(value).map_err(|_| ScoreboardError::InvalidColor {
        field: field.to_string(),
        value: value.to_string(),
    })?;
    Ok(())
}

/// Validate a sport definition before save
///
/// # Errors
/// `InvalidInput` for an empty name or negative period fields.
pub fn validate_sport(sport: &SportDefinition) -> Result<()> {
    require_text("sport", "name", &sport.name)?;
    require_min("sport", "period_count", sport.period_count, 0)?;
    require_min("sport", "period_duration", sport.period_duration, 0)?;
    Ok(())
}

/// Validate a team before save
///
/// # Errors
/// `InvalidInput` for an empty name or sport.
pub fn validate_team(team: &Team) -> Result<()> {
    require_text("team", "name", &team.name)?;
    require_text("team", "sport", &team.sport)?;
    Ok(())
}

/// Validate a template before save
///
/// # Errors
/// `InvalidInput` for empty names, negative geometry or period fields,
/// non-positive font sizes; `InvalidColor` for malformed non-empty colors.
pub fn validate_template(t: &TemplateSettings) -> Result<()> {
    require_text("template", "name", &t.name)?;
    require_text("template", "sport", &t.sport)?;

    for (field, value) in [
        ("width", t.width),
        ("height", t.height),
        ("x", t.x),
        ("y", t.y),
        ("period_count", t.period_count),
        ("period_duration", t.period_duration),
    ] {
        require_min("template", field, value, 0)?;
    }

    for (element, font) in [
        ("clock", &t.clock_font),
        ("period", &t.period_font),
        ("score", &t.score_font),
        ("separator", &t.separator_font),
    ] {
        require_min("template", &format!("{element}_font_size"), font.size, 1)?;
        optional_color(&format!("{element}_font_color"), &font.color)?;
    }

    optional_color("extra_time_font_color", &t.extra_time_color)?;
    optional_color("background_font_color", &t.background_color)?;
    Ok(())
}

/// Validate a match before save
///
/// # Errors
/// `InvalidInput` for an empty sport or the same team on both sides.
pub fn validate_match(m: &Match) -> Result<()> {
    require_text("match", "sport", &m.sport)?;
    if m.home_team_id == m.away_team_id {
        return Err(ScoreboardError::SameTeamTwice {
            id: m.id,
            team_id: m.home_team_id,
        }
        .into());
    }
    Ok(())
}
