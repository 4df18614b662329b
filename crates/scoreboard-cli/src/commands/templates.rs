//! Template commands

use clap::{Args, Subcommand};
use scoreboard_core::errors::{ExError, ScoreboardError};
use scoreboard_core::model::{Id, TemplateSettings, NEW_ID};
use scoreboard_core::views::{FilteredList, SportFilter};
use scoreboard_store::{Database, Repository, SportRepo, TemplateRepo};
use tabled::Tabled;

use super::{print_json, print_tabled};

#[derive(Debug, Args)]
pub struct TemplatesArgs {
    #[command(subcommand)]
    pub command: TemplatesCommand,
}

#[derive(Debug, Subcommand)]
pub enum TemplatesCommand {
    /// List templates, optionally for one sport
    List {
        #[arg(long)]
        sport: Option<String>,
    },
    /// Print every field of one template with its render colors
    Show {
        id: Id,
        #[arg(long)]
        json: bool,
    },
    /// Create a template, or update one with --id
    Save(SaveArgs),
    /// Delete a template; matches naming it are kept
    Delete { id: Id },
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    #[arg(long, default_value_t = NEW_ID)]
    pub id: Id,

    #[arg(long)]
    pub name: Option<String>,

    /// New templates take their period rules from this sport's definition
    #[arg(long)]
    pub sport: Option<String>,

    #[arg(long)]
    pub width: Option<i64>,
    #[arg(long)]
    pub height: Option<i64>,
    #[arg(long)]
    pub x: Option<i64>,
    #[arg(long)]
    pub y: Option<i64>,

    #[arg(long)]
    pub period_label: Option<String>,
    #[arg(long)]
    pub periods: Option<i64>,
    #[arg(long)]
    pub duration: Option<i64>,
    #[arg(long)]
    pub gameclock_mode: Option<String>,

    #[arg(long)]
    pub show_period: Option<bool>,
    #[arg(long)]
    pub show_gameclock: Option<bool>,
    #[arg(long)]
    pub show_clock: Option<bool>,

    /// Font family for every element
    #[arg(long)]
    pub font: Option<String>,

    #[arg(long)]
    pub clock_color: Option<String>,
    #[arg(long)]
    pub period_color: Option<String>,
    #[arg(long)]
    pub score_color: Option<String>,
    #[arg(long)]
    pub separator_color: Option<String>,
    #[arg(long)]
    pub extra_time_color: Option<String>,
    #[arg(long)]
    pub background_color: Option<String>,
}

#[derive(Tabled)]
struct TemplateLine {
    #[tabled(rename = "ID")]
    id: Id,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Sportart")]
    sport: String,
    #[tabled(rename = "Größe")]
    size: String,
}

pub fn execute(db: &Database, args: TemplatesArgs) -> Result<(), ExError> {
    match args.command {
        TemplatesCommand::List { sport } => {
            let mut list = FilteredList::new(TemplateRepo::load_all(db.conn())?);
            list.apply_filter(SportFilter::from(sport.as_deref()));
            print_tabled(list.iter().map(|t| TemplateLine {
                id: t.id,
                name: t.name.clone(),
                sport: t.sport.clone(),
                size: format!("{}x{}", t.width, t.height),
            }));
            Ok(())
        }
        TemplatesCommand::Show { id, json } => execute_show(db, id, json),
        TemplatesCommand::Save(save) => execute_save(db, save),
        TemplatesCommand::Delete { id } => {
            TemplateRepo::delete(db.conn(), id)?;
            println!("Deleted template {}", id);
            Ok(())
        }
    }
}

fn execute_show(db: &Database, id: Id, json: bool) -> Result<(), ExError> {
    let template = TemplateRepo::find_by_id(db.conn(), id)?
        .ok_or(ScoreboardError::TemplateNotFound { id })?;
    if json {
        return print_json(&template);
    }
    print_template(&template);
    Ok(())
}

/// Shared with `matches show`
pub fn print_template(t: &TemplateSettings) {
    let colors = t.resolved_colors();
    println!("Template {} ({})", t.id, t.name);
    println!("  sport:      {}", t.sport);
    println!("  geometry:   {}x{} at {},{}", t.width, t.height, t.x, t.y);
    println!(
        "  periods:    {} x {} min ({})",
        t.period_count, t.period_duration, t.period_label
    );
    println!(
        "  show:       period={} gameclock={} clock={}",
        t.show_period, t.show_gameclock, t.show_clock
    );
    for (label, font, color) in [
        ("clock", &t.clock_font, colors.clock),
        ("period", &t.period_font, colors.period),
        ("score", &t.score_font, colors.score),
        ("separator", &t.separator_font, colors.separator),
    ] {
        println!(
            "  {:<11} {} {}pt {}",
            format!("{}:", label),
            font.family,
            font.size,
            color
        );
    }
    println!("  extra time: {}", colors.extra_time);
    println!("  background: {}", colors.background);
}

fn execute_save(db: &Database, args: SaveArgs) -> Result<(), ExError> {
    let conn = db.conn();
    let mut template = if args.id == NEW_ID {
        let name = args.name.clone().unwrap_or_default();
        let sport = args.sport.clone().unwrap_or_default();
        match SportRepo::find_by_name(conn, &sport)? {
            Some(definition) => TemplateSettings::for_sport(name, &definition),
            None => TemplateSettings::new(name, sport),
        }
    } else {
        TemplateRepo::find_by_id(conn, args.id)?
            .ok_or(ScoreboardError::TemplateNotFound { id: args.id })?
    };

    apply(&mut template, args);

    let id = TemplateRepo::save(conn, &mut template)?;
    println!("Saved template {} ({})", id, template.name);
    Ok(())
}

fn apply(t: &mut TemplateSettings, args: SaveArgs) {
    fn set<T>(field: &mut T, value: Option<T>) {
        if let Some(v) = value {
            *field = v;
        }
    }

    set(&mut t.name, args.name);
    set(&mut t.sport, args.sport);
    set(&mut t.width, args.width);
    set(&mut t.height, args.height);
    set(&mut t.x, args.x);
    set(&mut t.y, args.y);
    set(&mut t.period_label, args.period_label);
    set(&mut t.period_count, args.periods);
    set(&mut t.period_duration, args.duration);
    set(&mut t.gameclock_mode, args.gameclock_mode);
    set(&mut t.show_period, args.show_period);
    set(&mut t.show_gameclock, args.show_gameclock);
    set(&mut t.show_clock, args.show_clock);
    if let Some(family) = args.font {
        for font in [
            &mut t.clock_font,
            &mut t.period_font,
            &mut t.score_font,
            &mut t.separator_font,
        ] {
            font.family = family.clone();
        }
    }
    set(&mut t.clock_font.color, args.clock_color);
    set(&mut t.period_font.color, args.period_color);
    set(&mut t.score_font.color, args.score_color);
    set(&mut t.separator_font.color, args.separator_color);
    set(&mut t.extra_time_color, args.extra_time_color);
    set(&mut t.background_color, args.background_color);
}
