// Integration tests for schema convergence
// Covers fresh databases, repeated startups and databases created by earlier releases

use rusqlite::Connection;
use scoreboard_store::migrations::catalog::{TABLES, TEMPLATE_STYLING_COLUMNS};
use scoreboard_store::migrations::{
    applied_migrations, existing_columns, table_columns, uses_autoincrement,
};
use scoreboard_store::{converge, Database, SportRepo};
use tempfile::TempDir;

fn setup_test_db() -> (TempDir, Connection) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("settings.db");
    let conn = Connection::open(&db_path).unwrap();
    (temp_dir, conn)
}

fn column_snapshot(conn: &Connection) -> Vec<(String, Vec<String>)> {
    TABLES
        .iter()
        .map(|t| {
            let cols = table_columns(conn, t.name)
                .unwrap()
                .into_iter()
                .map(|c| format!("{} {} {:?}", c.name, c.decl_type, c.default_value))
                .collect();
            (t.name.to_string(), cols)
        })
        .collect()
}

/// Schema as the first release of the tool created it: base tables only,
/// no styling columns, no logo column, no ledger
const FIRST_RELEASE_SCHEMA: &str = "
    CREATE TABLE template_settings (
        id INTEGER PRIMARY KEY, width INTEGER, height INTEGER, x INTEGER, y INTEGER,
        sport TEXT, period_label TEXT, period_count INTEGER, period_duration INTEGER,
        gameclock_mode TEXT, show_period BOOLEAN, show_gameclock BOOLEAN, show_clock BOOLEAN
    );
    CREATE TABLE sports (
        id INTEGER PRIMARY KEY AUTOINCREMENT, sportart TEXT NOT NULL UNIQUE,
        period_label TEXT, periods_count INTEGER, period_duration INTEGER,
        clock_format TEXT, clock_direction TEXT
    );
    CREATE TABLE teams (
        id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL, sportart TEXT NOT NULL
    );
    CREATE TABLE matches (
        id INTEGER PRIMARY KEY AUTOINCREMENT, sportart TEXT NOT NULL,
        team_home INTEGER NOT NULL, team_away INTEGER NOT NULL,
        template_id INTEGER NOT NULL, start_time DATETIME
    );
    INSERT INTO template_settings (id, width, height, sport, show_clock)
        VALUES (1, 1280, 120, 'Fußball', 1);
    INSERT INTO teams (id, name, sportart) VALUES (1, 'Lions', 'Fußball');
";

#[test]
fn test_fresh_database_converges() {
    // Given: An empty database file
    let (_dir, mut conn) = setup_test_db();

    // When: Converging
    let report = converge(&mut conn).unwrap();

    // Then: All migrations apply, in order
    assert_eq!(
        report.migrations.applied,
        vec![
            "001_base_tables",
            "002_template_styling",
            "003_team_logo",
            "004_template_autoincrement"
        ]
    );
    assert_eq!(report.sports_seeded, 2);

    // And: The ledger records each with a checksum
    let ledger = applied_migrations(&conn).unwrap();
    assert_eq!(ledger.len(), 4);
    assert!(ledger.iter().all(|m| m.checksum.len() == 64));
}

#[test]
fn test_converge_is_a_fixed_point() {
    // Given: A converged database
    let (_dir, mut conn) = setup_test_db();
    converge(&mut conn).unwrap();
    let first = column_snapshot(&conn);

    // When: Converging twice more
    let second_report = converge(&mut conn).unwrap();
    converge(&mut conn).unwrap();

    // Then: Nothing changes
    assert!(second_report.is_noop());
    assert_eq!(column_snapshot(&conn), first);
    assert_eq!(applied_migrations(&conn).unwrap().len(), 4);
    assert_eq!(SportRepo::sport_names(&conn).unwrap().len(), 2);
}

#[test]
fn test_first_release_database_is_brought_forward() {
    // Given: A database from the first release with data in it
    let (_dir, mut conn) = setup_test_db();
    conn.execute_batch(FIRST_RELEASE_SCHEMA).unwrap();

    // When: Converging
    let report = converge(&mut conn).unwrap();

    // Then: Every styling column plus the logo column is added
    assert_eq!(
        report.migrations.columns_added.len(),
        TEMPLATE_STYLING_COLUMNS.len() + 1
    );
    assert!(report
        .migrations
        .columns_added
        .contains(&"teams.logo_data".to_string()));

    // And: Existing rows read the column defaults
    let (name, clock_size, bg): (String, i64, String) = conn
        .query_row(
            "SELECT name, clock_font_size, background_font_color FROM template_settings WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!(name, "Standard");
    assert_eq!(clock_size, 32);
    assert_eq!(bg, "#000000");

    // And: The template table now never reuses ids
    assert!(uses_autoincrement(&conn, "template_settings").unwrap());
    assert_eq!(report.migrations.tables_rebuilt, vec!["template_settings"]);

    // And: Team data is untouched
    assert!(existing_columns(&conn, "teams").unwrap().contains("logo_data"));
    let team: String = conn
        .query_row("SELECT name FROM teams WHERE id = 1", [], |row| row.get(0))
        .unwrap();
    assert_eq!(team, "Lions");
}

#[test]
fn test_current_release_database_without_ledger() {
    // Given: A database whose columns are all present but which has no ledger
    let (_dir, mut conn) = setup_test_db();
    converge(&mut conn).unwrap();
    let before = column_snapshot(&conn);
    conn.execute_batch("DROP TABLE schema_version;").unwrap();

    // When: Converging
    let report = converge(&mut conn).unwrap();

    // Then: The ledger is rebuilt without altering any table
    assert_eq!(report.migrations.applied.len(), 4);
    assert!(report.migrations.columns_added.is_empty());
    assert!(report.migrations.tables_rebuilt.is_empty());
    assert_eq!(column_snapshot(&conn), before);
}

#[test]
fn test_deleted_default_sport_reappears_on_startup() {
    // Given: A database where a default sport was deleted
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.db");
    {
        let db = Database::open(&path).unwrap();
        db.conn()
            .execute("DELETE FROM sports WHERE sportart = 'Fußball'", [])
            .unwrap();
        db.close().unwrap();
    }

    // When: Reopening
    let db = Database::open(&path).unwrap();

    // Then: Seeding restores it, once
    assert_eq!(db.startup_report().sports_seeded, 1);
    assert_eq!(
        SportRepo::sport_names(db.conn()).unwrap(),
        vec!["American Football", "Fußball"]
    );
}

#[test]
fn test_user_sport_survives_restart() {
    // Given: A user-edited default sport
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.db");
    {
        let db = Database::open(&path).unwrap();
        db.conn()
            .execute(
                "UPDATE sports SET period_duration = 40 WHERE sportart = 'Fußball'",
                [],
            )
            .unwrap();
        db.close().unwrap();
    }

    // When: Reopening
    let db = Database::open(&path).unwrap();

    // Then: Insert-or-ignore kept the edit
    let football = SportRepo::find_by_name(db.conn(), "Fußball")
        .unwrap()
        .unwrap();
    assert_eq!(football.period_duration, 40);
}
