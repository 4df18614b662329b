use serde::{Deserialize, Serialize};

use super::{Id, SportDefinition, NEW_ID};
use crate::color::{resolve_or, Rgb};

pub const DEFAULT_FONT_FAMILY: &str = "Segoe UI";
pub const DEFAULT_TEMPLATE_NAME: &str = "Standard";

/// Font family, point size and `#RRGGBB` color for one display element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontStyle {
    pub family: String,
    pub size: i64,
    pub color: String,
}

impl FontStyle {
    pub fn new(family: impl Into<String>, size: i64, color: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            size,
            color: color.into(),
        }
    }
}

/// A named bundle of layout, fonts, colors and display toggles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSettings {
    pub id: Id,
    pub name: String,
    pub width: i64,
    pub height: i64,
    pub x: i64,
    pub y: i64,
    /// Sport definition name
    pub sport: String,
    /// Overrides the sport's default period label
    pub period_label: String,
    pub period_count: i64,
    pub period_duration: i64,
    pub gameclock_mode: String,
    pub show_period: bool,
    pub show_gameclock: bool,
    pub show_clock: bool,
    pub clock_font: FontStyle,
    pub period_font: FontStyle,
    pub score_font: FontStyle,
    pub separator_font: FontStyle,
    pub extra_time_color: String,
    pub background_color: String,
}

/// Render-ready colors with per-element fallbacks applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedColors {
    pub clock: Rgb,
    pub period: Rgb,
    pub score: Rgb,
    pub separator: Rgb,
    pub extra_time: Rgb,
    pub background: Rgb,
}

impl Default for TemplateSettings {
    /// Mirrors the column defaults the schema manager declares
    fn default() -> Self {
        Self {
            id: NEW_ID,
            name: DEFAULT_TEMPLATE_NAME.to_string(),
            width: 0,
            height: 0,
            x: 0,
            y: 0,
            sport: String::new(),
            period_label: String::new(),
            period_count: 0,
            period_duration: 0,
            gameclock_mode: String::new(),
            show_period: false,
            show_gameclock: false,
            show_clock: false,
            clock_font: FontStyle::new(DEFAULT_FONT_FAMILY, 32, "#FFFFFF"),
            period_font: FontStyle::new(DEFAULT_FONT_FAMILY, 20, "#FFFFFF"),
            score_font: FontStyle::new(DEFAULT_FONT_FAMILY, 32, "#FFFFFF"),
            separator_font: FontStyle::new(DEFAULT_FONT_FAMILY, 28, "#FFFFFF"),
            extra_time_color: "#FF0000".to_string(),
            background_color: "#000000".to_string(),
        }
    }
}

impl TemplateSettings {
    /// Create an unsaved template with default styling
    pub fn new(name: impl Into<String>, sport: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sport: sport.into(),
            ..Self::default()
        }
    }

    /// Create an unsaved template pre-populated with a sport's period rules
    pub fn for_sport(name: impl Into<String>, sport: &SportDefinition) -> Self {
        Self {
            period_label: sport.period_label.clone(),
            period_count: sport.period_count,
            period_duration: sport.period_duration,
            ..Self::new(name, sport.name.clone())
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == NEW_ID
    }

    /// The clock element is drawn when either clock toggle is on
    pub fn shows_any_clock(&self) -> bool {
        self.show_gameclock || self.show_clock
    }

    /// Colors for rendering; empty or malformed values fall back per element
    pub fn resolved_colors(&self) -> ResolvedColors {
        ResolvedColors {
            clock: resolve_or(&self.clock_font.color, Rgb::WHITE),
            period: resolve_or(&self.period_font.color, Rgb::WHITE),
            score: resolve_or(&self.score_font.color, Rgb::WHITE),
            separator: resolve_or(&self.separator_font.color, Rgb::WHITE),
            extra_time: resolve_or(&self.extra_time_color, Rgb::RED),
            background: resolve_or(&self.background_color, Rgb::BLACK),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_sports;

    #[test]
    fn test_for_sport_copies_period_rules() {
        let football = &default_sports()[1];
        let t = TemplateSettings::for_sport("Stadion", football);
        assert_eq!(t.sport, "Fußball");
        assert_eq!(t.period_label, "Halbzeit");
        assert_eq!(t.period_count, 2);
        assert_eq!(t.period_duration, 45);
        assert!(t.is_new());
    }

    #[test]
    fn test_resolved_colors_fall_back_per_element() {
        let mut t = TemplateSettings::new("Broken", "Fußball");
        t.clock_font.color = "#12345".to_string();
        t.extra_time_color = String::new();
        t.background_color = "blue".to_string();
        t.score_font.color = "#00ff00".to_string();

        let c = t.resolved_colors();
        assert_eq!(c.clock, Rgb::WHITE);
        assert_eq!(c.extra_time, Rgb::RED);
        assert_eq!(c.background, Rgb::BLACK);
        assert_eq!(c.score, Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_shows_any_clock() {
        let mut t = TemplateSettings::default();
        assert!(!t.shows_any_clock());
        t.show_clock = true;
        assert!(t.shows_any_clock());
    }
}
