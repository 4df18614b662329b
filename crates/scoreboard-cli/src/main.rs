//! Scoreboard admin CLI
//!
//! Command-line access to the scoreboard manager's settings database

use clap::{Parser, Subcommand};
use scoreboard_core::errors::ExError;
use scoreboard_core::logging_facility;
use scoreboard_store::Database;
use std::path::PathBuf;

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "scoreboard-admin")]
#[command(about = "Scoreboard manager - settings database administration", long_about = None)]
struct Cli {
    /// Database file (default: settings.db in the working directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Emit JSON logs on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Schema convergence, status and reference audit
    Schema(commands::schema::SchemaArgs),
    /// Sport definitions
    Sports(commands::sports::SportsArgs),
    /// Teams
    Teams(commands::teams::TeamsArgs),
    /// Display templates
    Templates(commands::templates::TemplatesArgs),
    /// Scheduled matches
    Matches(commands::matches::MatchesArgs),
}

fn run(cli: Cli) -> Result<(), ExError> {
    let config = config::load(&config::Overrides {
        db_path: cli.db.as_deref(),
        log_json: cli.log_json,
    })?;
    logging_facility::init_with_filter(config.log_format.profile(), &config.log_filter);

    let mut db = Database::open(&config.db_path)?;
    tracing::debug!(db = %config.db_path.display(), "opened settings database");

    match cli.command {
        Commands::Schema(args) => commands::schema::execute(&mut db, args),
        Commands::Sports(args) => commands::sports::execute(&db, args),
        Commands::Teams(args) => commands::teams::execute(&db, args),
        Commands::Templates(args) => commands::templates::execute(&db, args),
        Commands::Matches(args) => commands::matches::execute(&db, args),
    }?;

    db.close()
}

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        // 2 when the database or configuration could not be set up
        let code = if e.kind().is_recoverable() { 1 } else { 2 };
        std::process::exit(code);
    }
}
