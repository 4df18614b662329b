//! Sport definition commands

use clap::{Args, Subcommand};
use scoreboard_core::errors::ExError;
use scoreboard_core::model::{ClockDirection, ClockFormat, Id, SportDefinition, NEW_ID};
use scoreboard_store::{Database, Repository, SportRepo};

use super::{print_table, render_rows};

#[derive(Debug, Args)]
pub struct SportsArgs {
    #[command(subcommand)]
    pub command: SportsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SportsCommand {
    /// List sport definitions
    List,
    /// Create a definition, or update one with --id
    Save(SaveArgs),
    /// Delete a definition no team, template or match refers to
    Delete { id: Id },
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    /// Existing definition to update; omit to create
    #[arg(long, default_value_t = NEW_ID)]
    pub id: Id,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub period_label: Option<String>,

    #[arg(long)]
    pub periods: Option<i64>,

    /// Minutes per period
    #[arg(long)]
    pub duration: Option<i64>,

    /// `MM:SS` or `Minuten`
    #[arg(long)]
    pub clock_format: Option<ClockFormat>,

    /// `Up` or `Down`
    #[arg(long)]
    pub clock_direction: Option<ClockDirection>,
}

pub fn execute(db: &Database, args: SportsArgs) -> Result<(), ExError> {
    match args.command {
        SportsCommand::List => {
            let sports = SportRepo::load_all(db.conn())?;
            print_table(render_rows(&sports));
            Ok(())
        }
        SportsCommand::Save(save) => execute_save(db, save),
        SportsCommand::Delete { id } => {
            SportRepo::delete(db.conn(), id)?;
            println!("Deleted sport {}", id);
            Ok(())
        }
    }
}

fn execute_save(db: &Database, args: SaveArgs) -> Result<(), ExError> {
    let conn = db.conn();
    let mut sport = if args.id == NEW_ID {
        SportDefinition::new(
            "",
            "",
            0,
            0,
            ClockFormat::MinutesSeconds,
            ClockDirection::Up,
        )
    } else {
        SportRepo::find_by_id(conn, args.id)?
            .ok_or(scoreboard_core::ScoreboardError::SportIdNotFound { id: args.id })?
    };

    if let Some(name) = args.name {
        sport.name = name;
    }
    if let Some(label) = args.period_label {
        sport.period_label = label;
    }
    if let Some(periods) = args.periods {
        sport.period_count = periods;
    }
    if let Some(duration) = args.duration {
        sport.period_duration = duration;
    }
    if let Some(format) = args.clock_format {
        sport.clock_format = format;
    }
    if let Some(direction) = args.clock_direction {
        sport.clock_direction = direction;
    }

    let id = SportRepo::save(conn, &mut sport)?;
    println!("Saved sport {} ({})", id, sport.name);
    Ok(())
}
