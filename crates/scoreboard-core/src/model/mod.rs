pub mod matches;
pub mod sport;
pub mod team;
pub mod template;

pub use matches::{
    format_start_time, parse_start_time, HydratedMatch, Match, MatchSummary,
    START_TIME_DISPLAY_FORMAT,
};
pub use sport::{default_sports, ClockDirection, ClockFormat, SportDefinition};
pub use team::Team;
pub use template::{FontStyle, ResolvedColors, TemplateSettings};

/// Row identity; `0` marks a record that has not been persisted yet
pub type Id = i64;

/// Identity value of an unsaved record
pub const NEW_ID: Id = 0;
