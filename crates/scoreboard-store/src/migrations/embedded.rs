//! Versioned migration list
//!
//! Order matters: ids are applied in the order returned here and recorded
//! in `schema_version`.

use super::catalog::{
    ColumnSpec, TableRebuild, TableSpec, TABLES, TEAM_LOGO_COLUMNS,
    TEMPLATE_SETTINGS_AUTOINCREMENT, TEMPLATE_STYLING_COLUMNS,
};

/// What a migration does
pub enum Step {
    /// `CREATE TABLE IF NOT EXISTS` for each table
    CreateTables(&'static [TableSpec]),
    /// Add each column unless introspection shows it already exists
    AddColumns(&'static [ColumnSpec]),
    /// Recreate a table and copy its rows, unless it already uses `AUTOINCREMENT`
    RebuildWithAutoincrement(&'static TableRebuild),
}

/// Migration metadata
pub struct Migration {
    pub id: &'static str,
    pub step: Step,
}

impl Migration {
    /// Text the checksum is computed over
    pub fn canonical_text(&self) -> String {
        match &self.step {
            Step::CreateTables(tables) => tables
                .iter()
                .map(|t| t.create_sql)
                .collect::<Vec<_>>()
                .join("\n"),
            Step::AddColumns(columns) => columns
                .iter()
                .map(|c| format!("{}.{} {}", c.table, c.column, c.definition))
                .collect::<Vec<_>>()
                .join("\n"),
            Step::RebuildWithAutoincrement(rebuild) => {
                format!("{} <- {}", rebuild.table, rebuild.create_sql)
            }
        }
    }
}

/// Get all migrations in order
pub fn get_migrations() -> Vec<Migration> {
    vec![
        Migration {
            id: "001_base_tables",
            step: Step::CreateTables(TABLES),
        },
        Migration {
            id: "002_template_styling",
            step: Step::AddColumns(TEMPLATE_STYLING_COLUMNS),
        },
        Migration {
            id: "003_team_logo",
            step: Step::AddColumns(TEAM_LOGO_COLUMNS),
        },
        Migration {
            id: "004_template_autoincrement",
            step: Step::RebuildWithAutoincrement(&TEMPLATE_SETTINGS_AUTOINCREMENT),
        },
    ]
}
