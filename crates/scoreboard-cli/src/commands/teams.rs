//! Team commands

use clap::{Args, Subcommand};
use scoreboard_core::errors::{ExError, ScoreboardError};
use scoreboard_core::model::{Id, Team, NEW_ID};
use scoreboard_core::views::{FilteredList, SortColumn, SortOrder, SportFilter};
use scoreboard_store::errors::io_error;
use scoreboard_store::{Database, Repository, TeamRepo};
use std::path::PathBuf;

use super::{print_table, render_rows};

#[derive(Debug, Args)]
pub struct TeamsArgs {
    #[command(subcommand)]
    pub command: TeamsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TeamsCommand {
    /// List teams, optionally for one sport
    List(ListArgs),
    /// Create a team, or update one with --id
    Save(SaveArgs),
    /// Delete a team; matches naming it are kept
    Delete { id: Id },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Sport name; `Alle` lists every sport
    #[arg(long)]
    pub sport: Option<String>,

    /// `name` or `sport`
    #[arg(long)]
    pub sort: Option<SortColumn>,

    #[arg(long)]
    pub desc: bool,
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    #[arg(long, default_value_t = NEW_ID)]
    pub id: Id,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub sport: Option<String>,

    /// Image file to store as the team logo
    #[arg(long, conflicts_with = "clear_logo")]
    pub logo: Option<PathBuf>,

    #[arg(long)]
    pub clear_logo: bool,
}

pub fn execute(db: &Database, args: TeamsArgs) -> Result<(), ExError> {
    match args.command {
        TeamsCommand::List(list) => execute_list(db, list),
        TeamsCommand::Save(save) => execute_save(db, save),
        TeamsCommand::Delete { id } => {
            TeamRepo::delete(db.conn(), id)?;
            println!("Deleted team {}", id);
            Ok(())
        }
    }
}

fn execute_list(db: &Database, args: ListArgs) -> Result<(), ExError> {
    let mut list = FilteredList::new(TeamRepo::load_all(db.conn())?);
    list.apply_filter(SportFilter::from(args.sport.as_deref()));
    if let Some(column) = args.sort {
        let order = if args.desc {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        list.sort(column, order);
    }

    print_table(render_rows(list.iter()));
    Ok(())
}

fn execute_save(db: &Database, args: SaveArgs) -> Result<(), ExError> {
    let conn = db.conn();
    let mut team = if args.id == NEW_ID {
        Team::new("", "")
    } else {
        TeamRepo::find_by_id(conn, args.id)?
            .ok_or(ScoreboardError::TeamNotFound { id: args.id })?
    };

    if let Some(name) = args.name {
        team.name = name;
    }
    if let Some(sport) = args.sport {
        team.sport = sport;
    }
    if let Some(path) = args.logo {
        team.logo = Some(std::fs::read(&path).map_err(|e| io_error("read_logo", e))?);
    }
    if args.clear_logo {
        team.logo = None;
    }

    let id = TeamRepo::save(conn, &mut team)?;
    println!("Saved team {} ({})", id, team.name);
    Ok(())
}
