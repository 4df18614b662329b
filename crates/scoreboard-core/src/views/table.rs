use super::sort::SortKey;
use crate::model::matches::START_TIME_DISPLAY_FORMAT;
use crate::model::{MatchSummary, SportDefinition, Team, TemplateSettings};

/// A record that can be shown as one table row
pub trait TableRow {
    /// Sport name used for filtering and as the secondary sort key
    fn sport(&self) -> &str;

    /// Primary sort key (name, or id for matches)
    fn primary_key(&self) -> SortKey<'_>;

    /// Column headers, matching `cells`
    fn headers() -> &'static [&'static str]
    where
        Self: Sized;

    /// Display strings, one per column
    fn cells(&self) -> Vec<String>;
}

impl TableRow for Team {
    fn sport(&self) -> &str {
        &self.sport
    }

    fn primary_key(&self) -> SortKey<'_> {
        SortKey::Text(&self.name)
    }

    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Sportart"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), self.sport.clone()]
    }
}

impl TableRow for TemplateSettings {
    fn sport(&self) -> &str {
        &self.sport
    }

    fn primary_key(&self) -> SortKey<'_> {
        SortKey::Text(&self.name)
    }

    fn headers() -> &'static [&'static str] {
        &["Name", "Sportart"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.sport.clone()]
    }
}

impl TableRow for SportDefinition {
    fn sport(&self) -> &str {
        &self.name
    }

    fn primary_key(&self) -> SortKey<'_> {
        SortKey::Text(&self.name)
    }

    fn headers() -> &'static [&'static str] {
        &["ID", "Sportart", "Periode", "Anzahl", "Dauer", "Uhr", "Richtung"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.period_label.clone(),
            self.period_count.to_string(),
            self.period_duration.to_string(),
            self.clock_format.to_string(),
            self.clock_direction.to_string(),
        ]
    }
}

impl TableRow for MatchSummary {
    fn sport(&self) -> &str {
        &self.sport
    }

    fn primary_key(&self) -> SortKey<'_> {
        SortKey::Id(self.id)
    }

    fn headers() -> &'static [&'static str] {
        &["ID", "Heim", "Sportart", "Gast", "Anstoß"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.home_team_name.clone().unwrap_or_default(),
            self.sport.clone(),
            self.away_team_name.clone().unwrap_or_default(),
            self.start_time
                .format(START_TIME_DISPLAY_FORMAT)
                .to_string(),
        ]
    }
}
