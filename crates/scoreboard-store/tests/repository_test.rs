// Integration tests for the entity repositories against a file-backed database
// Covers upsert-by-id, delete, load ordering and the reference audit

use scoreboard_core::errors::ExErrorKind;
use scoreboard_core::model::{
    parse_start_time, ClockDirection, ClockFormat, Match, SportDefinition, Team, TemplateSettings,
};
use scoreboard_core::views::{FilteredList, SortColumn, SortOrder, SportFilter};
use scoreboard_store::{
    find_reference_drift, Database, DriftFinding, MatchRepo, Repository, SportRepo, TeamRepo,
    TemplateRepo,
};
use tempfile::TempDir;

fn setup_test_db() -> (TempDir, Database) {
    let temp_dir = TempDir::new().unwrap();
    let db = Database::open(temp_dir.path().join("settings.db")).unwrap();
    (temp_dir, db)
}

#[test]
fn test_saved_records_survive_reopen() {
    // Given: A database with one record of each kind
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.db");
    let (team_id, template_id, match_id) = {
        let db = Database::open(&path).unwrap();
        let conn = db.conn();
        let mut home = Team::new("Lions", "Fußball").with_logo(vec![7; 64]);
        let mut away = Team::new("Bears", "Fußball");
        TeamRepo::save(conn, &mut home).unwrap();
        TeamRepo::save(conn, &mut away).unwrap();
        let mut template = TemplateSettings::new("Stadion", "Fußball");
        TemplateRepo::save(conn, &mut template).unwrap();
        let mut m = Match::new(
            "Fußball",
            home.id,
            away.id,
            template.id,
            parse_start_time("2025-08-30T15:30:00Z").unwrap(),
        );
        MatchRepo::save(conn, &mut m).unwrap();
        db.close().unwrap();
        (home.id, template.id, m.id)
    };

    // When: Reopening the file
    let db = Database::open(&path).unwrap();
    let conn = db.conn();

    // Then: Everything loads back
    let team = TeamRepo::find_by_id(conn, team_id).unwrap().unwrap();
    assert_eq!(team.logo.as_ref().map(Vec::len), Some(64));
    assert_eq!(
        TemplateRepo::find_by_id(conn, template_id).unwrap().unwrap().name,
        "Stadion"
    );
    let hydrated = MatchRepo::load_hydrated(conn, match_id).unwrap();
    assert_eq!(hydrated.home.name, "Lions");
    assert_eq!(hydrated.away.name, "Bears");
}

#[test]
fn test_upsert_by_id_for_every_kind() {
    // Given: An empty (seeded) database
    let (_dir, db) = setup_test_db();
    let conn = db.conn();

    // When: Saving new records, then saving them again after an edit
    let mut sport = SportDefinition::new(
        "Handball",
        "Halbzeit",
        2,
        30,
        ClockFormat::MinutesSeconds,
        ClockDirection::Up,
    );
    let sport_id = SportRepo::save(conn, &mut sport).unwrap();
    sport.period_duration = 25;
    assert_eq!(SportRepo::save(conn, &mut sport).unwrap(), sport_id);

    let mut team = Team::new("Füchse", "Handball");
    let team_id = TeamRepo::save(conn, &mut team).unwrap();
    team.name = "Füchse Berlin".to_string();
    assert_eq!(TeamRepo::save(conn, &mut team).unwrap(), team_id);

    let mut template = TemplateSettings::for_sport("Halle", &sport);
    let template_id = TemplateRepo::save(conn, &mut template).unwrap();
    template.width = 1024;
    assert_eq!(TemplateRepo::save(conn, &mut template).unwrap(), template_id);

    // Then: Each kind has exactly the rows saved, carrying the edits
    assert_eq!(SportRepo::load_all(conn).unwrap().len(), 3);
    assert_eq!(
        SportRepo::find_by_id(conn, sport_id)
            .unwrap()
            .unwrap()
            .period_duration,
        25
    );
    let teams = TeamRepo::load_all(conn).unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].name, "Füchse Berlin");
    let templates = TemplateRepo::load_all(conn).unwrap();
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].width, 1024);
    assert_eq!(templates[0].period_duration, 25);
}

#[test]
fn test_deleted_highest_id_is_never_reused() {
    // Given: Two records of every kind, the newest of each then deleted
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.db");
    let (sport_gone, team_gone, template_gone, match_gone, kept_match, home_id, away_id) = {
        let db = Database::open(&path).unwrap();
        let conn = db.conn();

        let mut sport = SportDefinition::new(
            "Handball",
            "Halbzeit",
            2,
            30,
            ClockFormat::MinutesSeconds,
            ClockDirection::Up,
        );
        SportRepo::save(conn, &mut sport).unwrap();

        let mut home = Team::new("Lions", "Fußball");
        let mut away = Team::new("Bears", "Fußball");
        TeamRepo::save(conn, &mut home).unwrap();
        TeamRepo::save(conn, &mut away).unwrap();
        let mut spare = Team::new("Eagles", "Fußball");
        TeamRepo::save(conn, &mut spare).unwrap();

        let mut first = TemplateSettings::new("Stadion", "Fußball");
        let mut second = TemplateSettings::new("Halle", "Fußball");
        TemplateRepo::save(conn, &mut first).unwrap();
        TemplateRepo::save(conn, &mut second).unwrap();

        let start = parse_start_time("2025-08-30T15:30:00Z").unwrap();
        let mut kept = Match::new("Fußball", home.id, away.id, second.id, start);
        let mut newest = Match::new("Fußball", away.id, home.id, first.id, start);
        MatchRepo::save(conn, &mut kept).unwrap();
        MatchRepo::save(conn, &mut newest).unwrap();

        SportRepo::delete(conn, sport.id).unwrap();
        TeamRepo::delete(conn, spare.id).unwrap();
        TemplateRepo::delete(conn, second.id).unwrap();
        MatchRepo::delete(conn, newest.id).unwrap();
        db.close().unwrap();
        (
            sport.id, spare.id, second.id, newest.id, kept.id, home.id, away.id,
        )
    };

    // When: Inserting one new record of every kind after a restart
    let db = Database::open(&path).unwrap();
    let conn = db.conn();
    let mut sport = SportDefinition::new(
        "Eishockey",
        "Drittel",
        3,
        20,
        ClockFormat::MinutesSeconds,
        ClockDirection::Down,
    );
    SportRepo::save(conn, &mut sport).unwrap();
    let mut team = Team::new("Pucks", "Fußball");
    TeamRepo::save(conn, &mut team).unwrap();
    let mut template = TemplateSettings::new("Neu", "Fußball");
    TemplateRepo::save(conn, &mut template).unwrap();
    let mut m = Match::new(
        "Fußball",
        home_id,
        away_id,
        template.id,
        parse_start_time("2025-09-06T15:30:00Z").unwrap(),
    );
    MatchRepo::save(conn, &mut m).unwrap();

    // Then: Every new id is past the deleted one
    assert!(sport.id > sport_gone);
    assert!(team.id > team_gone);
    assert!(template.id > template_gone);
    assert!(m.id > match_gone);

    // And: The match that named the deleted template still dangles
    assert!(find_reference_drift(conn)
        .unwrap()
        .contains(&DriftFinding::MissingTemplate {
            match_id: kept_match,
            template_id: template_gone,
        }));
}

#[test]
fn test_team_list_filter_and_sort() {
    // Given: Teams across two sports
    let (_dir, db) = setup_test_db();
    let conn = db.conn();
    for (name, sport) in [
        ("Lions", "Fußball"),
        ("Bears", "American Football"),
        ("Eagles", "Fußball"),
        ("Adler", "American Football"),
    ] {
        TeamRepo::save(conn, &mut Team::new(name, sport)).unwrap();
    }

    // When: Loading into a filtered list and narrowing to one sport
    let mut list = FilteredList::new(TeamRepo::load_all(conn).unwrap());
    list.apply_filter(SportFilter::parse("Fußball"));
    list.sort(SortColumn::Primary, SortOrder::Ascending);

    // Then: Only that sport's teams are visible, sorted by name
    let names: Vec<&str> = list.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Eagles", "Lions"]);

    // And: A reload after a delete replaces the set wholesale
    let eagles = list.get(0).map(|t| t.id).unwrap();
    TeamRepo::delete(conn, eagles).unwrap();
    list.reload(TeamRepo::load_all(conn).unwrap());
    assert_eq!(list.len(), 1);
    assert_eq!(list.all().len(), 3);
}

#[test]
fn test_delete_leaves_matches_in_place_and_audit_reports_them() {
    // Given: A match between two teams
    let (_dir, db) = setup_test_db();
    let conn = db.conn();
    let home = TeamRepo::save(conn, &mut Team::new("Lions", "Fußball")).unwrap();
    let away = TeamRepo::save(conn, &mut Team::new("Bears", "Fußball")).unwrap();
    let template =
        TemplateRepo::save(conn, &mut TemplateSettings::new("Stadion", "Fußball")).unwrap();
    let mut m = Match::new(
        "Fußball",
        home,
        away,
        template,
        parse_start_time("2025-08-30T15:30:00Z").unwrap(),
    );
    MatchRepo::save(conn, &mut m).unwrap();

    // When: Deleting the away team
    TeamRepo::delete(conn, away).unwrap();

    // Then: The match remains, hydration reports the dangling team
    assert_eq!(MatchRepo::load_all(conn).unwrap().len(), 1);
    let err = MatchRepo::load_hydrated(conn, m.id).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);

    // And: The audit lists it
    assert_eq!(
        find_reference_drift(conn).unwrap(),
        vec![DriftFinding::MissingTeam {
            match_id: m.id,
            team_id: away,
        }]
    );
}

#[test]
fn test_sport_with_references_cannot_be_deleted() {
    // Given: A team in a user-defined sport
    let (_dir, db) = setup_test_db();
    let conn = db.conn();
    let mut sport = SportDefinition::new(
        "Eishockey",
        "Drittel",
        3,
        20,
        ClockFormat::MinutesSeconds,
        ClockDirection::Down,
    );
    SportRepo::save(conn, &mut sport).unwrap();
    let team = TeamRepo::save(conn, &mut Team::new("Eisbären", "Eishockey")).unwrap();

    // When: Deleting the sport
    let err = SportRepo::delete(conn, sport.id).unwrap_err();

    // Then: It is refused until the team is gone
    assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
    TeamRepo::delete(conn, team).unwrap();
    SportRepo::delete(conn, sport.id).unwrap();
    assert!(SportRepo::find_by_name(conn, "Eishockey").unwrap().is_none());
}
