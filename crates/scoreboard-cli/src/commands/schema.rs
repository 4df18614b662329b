//! Schema inspection and convergence commands

use clap::{Args, Subcommand};
use scoreboard_core::errors::ExError;
use scoreboard_store::migrations::catalog::TABLES;
use scoreboard_store::migrations::{applied_migrations, table_columns};
use scoreboard_store::{converge, find_reference_drift, ConvergeReport, Database};
use tabled::Tabled;

use super::{print_json, print_tabled};

#[derive(Debug, Args)]
pub struct SchemaArgs {
    #[command(subcommand)]
    pub command: SchemaCommand,
}

#[derive(Debug, Subcommand)]
pub enum SchemaCommand {
    /// Converge the schema and report what changed
    Migrate,
    /// List applied migrations and the columns of every table
    Status,
    /// Report rows whose sport, team or template reference does not resolve
    Audit {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Tabled)]
struct MigrationLine {
    #[tabled(rename = "Migration")]
    id: String,
    #[tabled(rename = "Applied")]
    applied_at: String,
    #[tabled(rename = "Checksum")]
    checksum: String,
}

#[derive(Tabled)]
struct ColumnLine {
    #[tabled(rename = "Column")]
    name: String,
    #[tabled(rename = "Type")]
    decl_type: String,
    #[tabled(rename = "Default")]
    default_value: String,
}

pub fn execute(db: &mut Database, args: SchemaArgs) -> Result<(), ExError> {
    match args.command {
        SchemaCommand::Migrate => execute_migrate(db),
        SchemaCommand::Status => execute_status(db),
        SchemaCommand::Audit { json } => execute_audit(db, json),
    }
}

fn print_report(report: &ConvergeReport) {
    for id in &report.migrations.applied {
        println!("Applied {}", id);
    }
    for column in &report.migrations.columns_added {
        println!("  added column {}", column);
    }
    for table in &report.migrations.tables_rebuilt {
        println!("  rebuilt table {}", table);
    }
    if report.sports_seeded > 0 {
        println!("Seeded {} default sports", report.sports_seeded);
    }
}

/// Opening the database already converged it; this reports that run and
/// confirms a second run is a no-op
fn execute_migrate(db: &mut Database) -> Result<(), ExError> {
    print_report(db.startup_report());

    let again = converge(db.conn_mut())?;
    print_report(&again);
    if again.is_noop() {
        println!("Schema is up to date");
    }
    Ok(())
}

fn execute_status(db: &Database) -> Result<(), ExError> {
    let conn = db.conn();

    let migrations = applied_migrations(conn)?.into_iter().map(|m| MigrationLine {
        id: m.migration_id,
        applied_at: chrono::DateTime::from_timestamp(m.applied_at, 0)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
        checksum: m.checksum.chars().take(12).collect(),
    });
    println!("Migrations:");
    print_tabled(migrations.collect::<Vec<_>>());

    for table in TABLES {
        let columns = table_columns(conn, table.name)?
            .into_iter()
            .map(|c| ColumnLine {
                name: c.name,
                decl_type: c.decl_type,
                default_value: c.default_value.unwrap_or_default(),
            })
            .collect::<Vec<_>>();
        println!();
        println!("{}:", table.name);
        print_tabled(columns);
    }
    Ok(())
}

fn execute_audit(db: &Database, json: bool) -> Result<(), ExError> {
    let findings = find_reference_drift(db.conn())?;
    if json {
        return print_json(&findings);
    }

    if findings.is_empty() {
        println!("No reference drift found");
        return Ok(());
    }
    println!("{} unresolved references:", findings.len());
    for finding in &findings {
        println!("  {}", finding);
    }
    Ok(())
}
