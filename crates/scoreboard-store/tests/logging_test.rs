// Repository calls emit start/end events, and end_error with the error code on failure

use scoreboard_core::logging_facility::init_test_capture;
use scoreboard_core::model::Team;
use scoreboard_store::{Database, Repository, SportRepo, TeamRepo};

#[test]
fn test_repository_operations_log_outcome() {
    let capture = init_test_capture();
    let db = Database::open_in_memory().unwrap();
    let conn = db.conn();

    // Given: A successful lookup
    SportRepo::sport_names(conn).unwrap();

    // Then: It logged a start followed by an end
    capture.assert_op_completed("sport.names");

    // When: Saving a team whose sport does not exist
    let mut team = Team::new("Lions", "Curling");
    assert!(TeamRepo::save(conn, &mut team).is_err());

    // Then: The failure is logged with its stable code and the entity id
    assert_eq!(
        capture.error_codes_for_op("team.save"),
        vec!["ERR_CONSTRAINT_VIOLATION"]
    );
    let failed = capture
        .events_for_op("team.save")
        .into_iter()
        .find(|e| e.err_code().is_some())
        .unwrap();
    assert_eq!(failed.entity_id(), Some("Some(0)"));
}
