//! Admin tool configuration
//!
//! Layered lowest to highest: built-in defaults, `scoreboard.toml` in the
//! working directory, `SCOREBOARD_*` environment variables, command-line flags.

use config::{Config, Environment, File};
use scoreboard_core::errors::{ExError, ExErrorKind};
use scoreboard_core::logging_facility::Profile;
use scoreboard_store::DEFAULT_DB_FILE;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn profile(self) -> Profile {
        match self {
            LogFormat::Pretty => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub db_path: PathBuf,
    pub log_format: LogFormat,
    /// Used when `RUST_LOG` is unset
    pub log_filter: String,
}

/// Command-line values that override every other layer
#[derive(Debug, Default)]
pub struct Overrides<'a> {
    pub db_path: Option<&'a Path>,
    pub log_json: bool,
}

fn config_error(err: config::ConfigError) -> ExError {
    ExError::new(ExErrorKind::Config)
        .with_op("load_config")
        .with_message(err.to_string())
}

/// Load the layered configuration
///
/// # Errors
/// `Config` when a source cannot be read or a value has the wrong type.
pub fn load(overrides: &Overrides<'_>) -> Result<AdminConfig, ExError> {
    let db_override = overrides
        .db_path
        .map(|p| p.to_string_lossy().into_owned());
    let format_override = overrides.log_json.then_some("json");

    Config::builder()
        .set_default("db_path", DEFAULT_DB_FILE)
        .and_then(|b| b.set_default("log_format", "pretty"))
        .and_then(|b| b.set_default("log_filter", "scoreboard=warn"))
        .map_err(config_error)?
        .add_source(File::with_name("scoreboard").required(false))
        .add_source(Environment::with_prefix("SCOREBOARD"))
        .set_override_option("db_path", db_override)
        .and_then(|b| b.set_override_option("log_format", format_override))
        .map_err(config_error)?
        .build()
        .map_err(config_error)?
        .try_deserialize()
        .map_err(config_error)
}
