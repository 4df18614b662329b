//! Declarative table and column catalog
//!
//! The schema manager owns table existence and column presence. Base tables
//! are created with their first-release column set; later columns are listed as
//! additive specs so older databases can be brought forward in place.

/// A table the schema manager creates if absent
pub struct TableSpec {
    pub name: &'static str,
    pub create_sql: &'static str,
    /// Columns every version of this table has had
    pub base_columns: &'static [&'static str],
}

/// A column added to an existing table when missing
pub struct ColumnSpec {
    pub table: &'static str,
    pub column: &'static str,
    /// Type and default, appended verbatim to `ALTER TABLE ... ADD COLUMN`
    pub definition: &'static str,
}

pub const TEMPLATE_SETTINGS: &str = "template_settings";
pub const SPORTS: &str = "sports";
pub const TEAMS: &str = "teams";
pub const MATCHES: &str = "matches";

pub const TABLES: &[TableSpec] = &[
    TableSpec {
        name: TEMPLATE_SETTINGS,
        create_sql: "CREATE TABLE IF NOT EXISTS template_settings (
            id INTEGER PRIMARY KEY,
            width INTEGER,
            height INTEGER,
            x INTEGER,
            y INTEGER,
            sport TEXT,
            period_label TEXT,
            period_count INTEGER,
            period_duration INTEGER,
            gameclock_mode TEXT,
            show_period BOOLEAN,
            show_gameclock BOOLEAN,
            show_clock BOOLEAN
        );",
        base_columns: &[
            "id",
            "width",
            "height",
            "x",
            "y",
            "sport",
            "period_label",
            "period_count",
            "period_duration",
            "gameclock_mode",
            "show_period",
            "show_gameclock",
            "show_clock",
        ],
    },
    TableSpec {
        name: SPORTS,
        create_sql: "CREATE TABLE IF NOT EXISTS sports (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sportart TEXT NOT NULL UNIQUE,
            period_label TEXT,
            periods_count INTEGER,
            period_duration INTEGER,
            clock_format TEXT,
            clock_direction TEXT
        );",
        base_columns: &[
            "id",
            "sportart",
            "period_label",
            "periods_count",
            "period_duration",
            "clock_format",
            "clock_direction",
        ],
    },
    TableSpec {
        name: TEAMS,
        create_sql: "CREATE TABLE IF NOT EXISTS teams (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            sportart TEXT NOT NULL,
            logo_data BLOB
        );",
        base_columns: &["id", "name", "sportart"],
    },
    TableSpec {
        name: MATCHES,
        create_sql: "CREATE TABLE IF NOT EXISTS matches (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sportart TEXT NOT NULL,
            team_home INTEGER NOT NULL,
            team_away INTEGER NOT NULL,
            template_id INTEGER NOT NULL,
            start_time DATETIME
        );",
        base_columns: &[
            "id",
            "sportart",
            "team_home",
            "team_away",
            "template_id",
            "start_time",
        ],
    },
];

/// Styling columns added to `template_settings` after the first release
pub const TEMPLATE_STYLING_COLUMNS: &[ColumnSpec] = &[
    col(TEMPLATE_SETTINGS, "clock_font_family", "TEXT DEFAULT 'Segoe UI'"),
    col(TEMPLATE_SETTINGS, "clock_font_size", "INTEGER DEFAULT 32"),
    col(TEMPLATE_SETTINGS, "clock_font_color", "TEXT DEFAULT '#FFFFFF'"),
    col(TEMPLATE_SETTINGS, "period_font_family", "TEXT DEFAULT 'Segoe UI'"),
    col(TEMPLATE_SETTINGS, "period_font_size", "INTEGER DEFAULT 20"),
    col(TEMPLATE_SETTINGS, "period_font_color", "TEXT DEFAULT '#FFFFFF'"),
    col(TEMPLATE_SETTINGS, "score_font_family", "TEXT DEFAULT 'Segoe UI'"),
    col(TEMPLATE_SETTINGS, "score_font_size", "INTEGER DEFAULT 32"),
    col(TEMPLATE_SETTINGS, "score_font_color", "TEXT DEFAULT '#FFFFFF'"),
    col(TEMPLATE_SETTINGS, "separator_font_family", "TEXT DEFAULT 'Segoe UI'"),
    col(TEMPLATE_SETTINGS, "separator_font_size", "INTEGER DEFAULT 28"),
    col(TEMPLATE_SETTINGS, "separator_font_color", "TEXT DEFAULT '#FFFFFF'"),
    col(TEMPLATE_SETTINGS, "extra_time_font_color", "TEXT DEFAULT '#FF0000'"),
    col(TEMPLATE_SETTINGS, "name", "TEXT DEFAULT 'Standard'"),
    col(TEMPLATE_SETTINGS, "background_font_color", "TEXT DEFAULT '#000000'"),
];

/// Logo payload, missing from the earliest `teams` tables
pub const TEAM_LOGO_COLUMNS: &[ColumnSpec] = &[col(TEAMS, "logo_data", "BLOB")];

/// A table recreated under a new definition, rows copied across
pub struct TableRebuild {
    pub table: &'static str,
    /// Name the new table is created under before the swap
    pub staging: &'static str,
    /// Full definition of the staging table, every catalog column included
    pub create_sql: &'static str,
}

/// `template_settings` was first created without `AUTOINCREMENT`; after the
/// rebuild the id of a deleted template is never handed out again.
pub const TEMPLATE_SETTINGS_AUTOINCREMENT: TableRebuild = TableRebuild {
    table: TEMPLATE_SETTINGS,
    staging: "template_settings_rebuild",
    create_sql: "CREATE TABLE template_settings_rebuild (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            width INTEGER,
            height INTEGER,
            x INTEGER,
            y INTEGER,
            sport TEXT,
            period_label TEXT,
            period_count INTEGER,
            period_duration INTEGER,
            gameclock_mode TEXT,
            show_period BOOLEAN,
            show_gameclock BOOLEAN,
            show_clock BOOLEAN,
            clock_font_family TEXT DEFAULT 'Segoe UI',
            clock_font_size INTEGER DEFAULT 32,
            clock_font_color TEXT DEFAULT '#FFFFFF',
            period_font_family TEXT DEFAULT 'Segoe UI',
            period_font_size INTEGER DEFAULT 20,
            period_font_color TEXT DEFAULT '#FFFFFF',
            score_font_family TEXT DEFAULT 'Segoe UI',
            score_font_size INTEGER DEFAULT 32,
            score_font_color TEXT DEFAULT '#FFFFFF',
            separator_font_family TEXT DEFAULT 'Segoe UI',
            separator_font_size INTEGER DEFAULT 28,
            separator_font_color TEXT DEFAULT '#FFFFFF',
            extra_time_font_color TEXT DEFAULT '#FF0000',
            name TEXT DEFAULT 'Standard',
            background_font_color TEXT DEFAULT '#000000'
        );",
};

const fn col(table: &'static str, column: &'static str, definition: &'static str) -> ColumnSpec {
    ColumnSpec {
        table,
        column,
        definition,
    }
}

/// Every column the catalog requires on `table`, base columns first
pub fn required_columns(table: &str) -> Vec<&'static str> {
    let base = TABLES
        .iter()
        .filter(|t| t.name == table)
        .flat_map(|t| t.base_columns.iter().copied());
    let additive = TEMPLATE_STYLING_COLUMNS
        .iter()
        .chain(TEAM_LOGO_COLUMNS)
        .filter(|c| c.table == table)
        .map(|c| c.column);
    let mut columns: Vec<&'static str> = base.chain(additive).collect();
    columns.dedup();
    columns
}

/// True when `name` is one of the catalog's tables
pub fn is_catalog_table(name: &str) -> bool {
    TABLES.iter().any(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_columns_include_additive_specs() {
        let cols = required_columns(TEMPLATE_SETTINGS);
        assert_eq!(cols.len(), 13 + 15);
        assert!(cols.contains(&"name"));
        assert!(cols.contains(&"background_font_color"));

        assert_eq!(required_columns(TEAMS), vec!["id", "name", "sportart", "logo_data"]);
    }

    #[test]
    fn test_additive_columns_target_catalog_tables() {
        for c in TEMPLATE_STYLING_COLUMNS.iter().chain(TEAM_LOGO_COLUMNS) {
            assert!(is_catalog_table(c.table), "unknown table {}", c.table);
        }
    }

    #[test]
    fn test_rebuild_declares_every_required_column() {
        let sql = TEMPLATE_SETTINGS_AUTOINCREMENT.create_sql;
        assert!(sql.contains("id INTEGER PRIMARY KEY AUTOINCREMENT"));
        for column in required_columns(TEMPLATE_SETTINGS) {
            assert!(sql.contains(&format!("{column} ")), "missing {column}");
        }
        for c in TEMPLATE_STYLING_COLUMNS {
            assert!(
                sql.contains(&format!("{} {}", c.column, c.definition)),
                "definition of {} differs",
                c.column
            );
        }
    }

    #[test]
    fn test_unknown_table_has_no_required_columns() {
        assert!(required_columns("scores").is_empty());
        assert!(!is_catalog_table("scores"));
    }
}
