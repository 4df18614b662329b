//! Scoreboard Core - domain models and shared facilities
//!
//! This crate provides the in-memory side of the scoreboard manager:
//! - Sport definition, team, template and match models
//! - `#RRGGBB` color parsing with render-time fallbacks
//! - Write-boundary validation
//! - Filtered/sorted list adapters for a presentation layer
//! - The canonical error facility and the structured logging facility

pub mod color;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;
pub mod views;

// Used by the logging macros
#[doc(hidden)]
pub use scoreboard_core_types as core_types;

// Re-export commonly used types
pub use color::Rgb;
pub use errors::{ExError, ExErrorKind, Result, ScoreboardError};
pub use model::{
    HydratedMatch, Id, Match, MatchSummary, SportDefinition, Team, TemplateSettings, NEW_ID,
};
pub use views::{FilteredList, SortColumn, SortOrder, SportFilter};
