//! Match commands

use chrono::{DateTime, FixedOffset};
use clap::{Args, Subcommand};
use scoreboard_core::errors::{ExError, ScoreboardError};
use scoreboard_core::model::{format_start_time, parse_start_time, Id, Match, Team, NEW_ID};
use scoreboard_core::views::{FilteredList, SortColumn, SortOrder, SportFilter};
use scoreboard_store::{Database, MatchRepo, Repository, TeamRepo};

use super::templates::print_template;
use super::{invalid_input, print_json, print_table, render_rows};

#[derive(Debug, Args)]
pub struct MatchesArgs {
    #[command(subcommand)]
    pub command: MatchesCommand,
}

#[derive(Debug, Subcommand)]
pub enum MatchesCommand {
    /// List matches, latest start first
    List {
        #[arg(long)]
        sport: Option<String>,
        /// Order by id instead of start time
        #[arg(long)]
        by_id: bool,
    },
    /// Print a match with both teams and its template resolved
    Show {
        id: Id,
        #[arg(long)]
        json: bool,
    },
    /// Schedule a match, or update one with --id
    Save(SaveArgs),
    Delete { id: Id },
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    #[arg(long, default_value_t = NEW_ID)]
    pub id: Id,

    /// Defaults to the home team's sport
    #[arg(long)]
    pub sport: Option<String>,

    #[arg(long)]
    pub home: Option<Id>,

    #[arg(long)]
    pub away: Option<Id>,

    #[arg(long)]
    pub template: Option<Id>,

    /// RFC 3339, or `YYYY-MM-DD HH:MM:SS` read as UTC
    #[arg(long, value_parser = parse_start)]
    pub start: Option<DateTime<FixedOffset>>,
}

fn parse_start(s: &str) -> Result<DateTime<FixedOffset>, ScoreboardError> {
    parse_start_time(s)
}

pub fn execute(db: &Database, args: MatchesArgs) -> Result<(), ExError> {
    match args.command {
        MatchesCommand::List { sport, by_id } => {
            let mut list = FilteredList::new(MatchRepo::load_all(db.conn())?);
            list.apply_filter(SportFilter::from(sport.as_deref()));
            if by_id {
                list.sort(SortColumn::Primary, SortOrder::Ascending);
            }
            print_table(render_rows(list.iter()));
            Ok(())
        }
        MatchesCommand::Show { id, json } => execute_show(db, id, json),
        MatchesCommand::Save(save) => execute_save(db, save),
        MatchesCommand::Delete { id } => {
            MatchRepo::delete(db.conn(), id)?;
            println!("Deleted match {}", id);
            Ok(())
        }
    }
}

fn describe_team(side: &str, team: &Team) {
    let logo = match &team.logo {
        Some(bytes) if !bytes.is_empty() => format!("logo {} bytes", bytes.len()),
        _ => "no logo".to_string(),
    };
    println!("  {:<6} {} (id {}, {})", side, team.name, team.id, logo);
}

fn execute_show(db: &Database, id: Id, json: bool) -> Result<(), ExError> {
    let hydrated = MatchRepo::load_hydrated(db.conn(), id)?;
    if json {
        return print_json(&hydrated);
    }

    println!("Match {} ({})", hydrated.id, hydrated.sport);
    println!("  start  {}", format_start_time(&hydrated.start_time));
    describe_team("home", &hydrated.home);
    describe_team("away", &hydrated.away);
    print_template(&hydrated.template);
    Ok(())
}

fn execute_save(db: &Database, args: SaveArgs) -> Result<(), ExError> {
    let conn = db.conn();

    let mut m = if args.id == NEW_ID {
        let (Some(home), Some(away), Some(template), Some(start)) =
            (args.home, args.away, args.template, args.start)
        else {
            return Err(invalid_input(
                "match.save",
                "new matches need --home, --away, --template and --start",
            ));
        };
        Match::new(String::new(), home, away, template, start)
    } else {
        MatchRepo::find_by_id(conn, args.id)?
            .ok_or(ScoreboardError::MatchNotFound { id: args.id })?
    };

    if let Some(home) = args.home {
        m.home_team_id = home;
    }
    if let Some(away) = args.away {
        m.away_team_id = away;
    }
    if let Some(template) = args.template {
        m.template_id = template;
    }
    if let Some(start) = args.start {
        m.start_time = start;
    }
    match args.sport {
        Some(sport) => m.sport = sport,
        None if m.sport.is_empty() => {
            if let Some(team) = TeamRepo::find_by_id(conn, m.home_team_id)? {
                m.sport = team.sport;
            }
        }
        None => {}
    }

    let id = MatchRepo::save(conn, &mut m)?;
    println!("Saved match {}", id);
    Ok(())
}
