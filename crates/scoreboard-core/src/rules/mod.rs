//! Write-boundary rules applied before a record is persisted

pub mod validation;

pub use validation::{validate_match, validate_sport, validate_team, validate_template};
