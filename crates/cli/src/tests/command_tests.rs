// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::fs;
use std::path::PathBuf;

use time::Duration;
use time::macros::datetime;
use tour_planner_domain::{ChangeTracking, Identifiable, LogEntry, Tour, TourId};

use crate::commands::find_tour;
use crate::tests::helpers::{TestSession, create_test_session, run_command, try_run_command};

fn add_tour(session: &mut TestSession, name: &str, from: &str, to: &str) -> TourId {
    run_command(
        &mut session.manager,
        &["add-tour", name, "--from", from, "--to", to],
    );
    find_tour(&session.manager, name).unwrap().id()
}

fn log_notes(tour: &Tour) -> Vec<String> {
    tour.log()
        .iter()
        .map(|entry| entry.notes().to_string())
        .collect()
}

#[test]
fn test_list_without_tours() {
    let mut session: TestSession = create_test_session();

    assert_eq!(run_command(&mut session.manager, &["list"]), "No tours\n");
}

#[test]
fn test_add_tour_creates_pending_tour_with_map() {
    let mut session: TestSession = create_test_session();

    let output: String = run_command(
        &mut session.manager,
        &[
            "add-tour",
            "Vineyards",
            "--from",
            "Graz",
            "--to",
            "Leibnitz",
            "-d",
            "Wine route",
        ],
    );

    let tour: &Tour = find_tour(&session.manager, "vineyards").unwrap();
    assert_eq!(output, format!("Created tour {}\n", tour.id()));
    assert_eq!(tour.description(), "Wine route");
    assert_eq!(tour.route().start_location, "Graz");
    let image: PathBuf = PathBuf::from(tour.image_path().unwrap());
    assert!(image.exists());
    assert!(session.manager.has_pending_changes());
}

#[test]
fn test_add_tour_to_same_place_fails() {
    let mut session: TestSession = create_test_session();

    let result = try_run_command(
        &mut session.manager,
        &["add", "Loop", "--from", "Graz", "--to", "Graz"],
    );

    assert!(result.is_err());
    assert_eq!(session.manager.tours().count(), 0);
}

#[test]
fn test_list_sorts_by_name_and_marks_changes() {
    let mut session: TestSession = create_test_session();
    add_tour(&mut session, "vineyards", "Graz", "Leibnitz");
    add_tour(&mut session, "Alps", "Innsbruck", "Bregenz");

    let output: String = run_command(&mut session.manager, &["ls"]);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("* "));
    assert!(lines[0].contains("Alps  Innsbruck -> Bregenz"));
    assert!(lines[1].contains("vineyards  Graz -> Leibnitz"));
    assert!(lines[1].ends_with("0 trips"));

    run_command(&mut session.manager, &["sync"]);
    let output: String = run_command(&mut session.manager, &["list"]);
    assert!(output.lines().all(|line| line.starts_with("  ")));
}

#[test]
fn test_find_tour_by_id_and_name() {
    let mut session: TestSession = create_test_session();
    let id: TourId = add_tour(&mut session, "Alps", "Innsbruck", "Bregenz");

    assert_eq!(find_tour(&session.manager, &id.to_string()).unwrap().id(), id);
    assert_eq!(find_tour(&session.manager, " ALPS ").unwrap().id(), id);
    assert!(find_tour(&session.manager, "Lakes").is_err());
    assert!(find_tour(&session.manager, &TourId::new().to_string()).is_err());
}

#[test]
fn test_find_tour_with_ambiguous_name_fails() {
    let mut session: TestSession = create_test_session();
    add_tour(&mut session, "Alps", "Innsbruck", "Bregenz");
    run_command(
        &mut session.manager,
        &["add-tour", "alps", "--from", "Lienz", "--to", "Villach"],
    );

    let err = find_tour(&session.manager, "Alps").unwrap_err();

    assert!(err.to_string().contains("More than one tour"));
}

#[test]
fn test_show_renders_tour() {
    let mut session: TestSession = create_test_session();
    add_tour(&mut session, "Alps", "Innsbruck", "Bregenz");

    let output: String = run_command(&mut session.manager, &["show", "alps"]);

    assert!(output.starts_with("Alps\n====\n"));
    assert!(output.contains("Route: Innsbruck -> Bregenz"));
    assert!(output.contains("Travel from Innsbruck to Bregenz"));
}

#[test]
fn test_edit_tour_reports_whether_anything_changed() {
    let mut session: TestSession = create_test_session();
    let id: TourId = add_tour(&mut session, "Alps", "Innsbruck", "Bregenz");
    run_command(&mut session.manager, &["sync"]);

    let unchanged: String =
        run_command(&mut session.manager, &["edit-tour", "Alps", "--name", "Alps"]);
    let updated: String = run_command(
        &mut session.manager,
        &["edit-tour", "Alps", "--name", "High Alps", "-d", "Passes"],
    );

    assert_eq!(unchanged, format!("Tour {id} unchanged\n"));
    assert_eq!(updated, format!("Updated tour {id}\n"));
    let tour: &Tour = session.manager.tour(id).unwrap();
    assert_eq!(tour.name(), "High Alps");
    assert_eq!(tour.description(), "Passes");
    assert!(tour.is_changed());
}

#[test]
fn test_edit_tour_rejects_empty_name() {
    let mut session: TestSession = create_test_session();
    let id: TourId = add_tour(&mut session, "Alps", "Innsbruck", "Bregenz");

    let result = try_run_command(&mut session.manager, &["edit-tour", "Alps", "--name", ""]);

    assert!(result.is_err());
    assert_eq!(session.manager.tour(id).unwrap().name(), "Alps");
}

#[test]
fn test_remove_tour() {
    let mut session: TestSession = create_test_session();
    let id: TourId = add_tour(&mut session, "Alps", "Innsbruck", "Bregenz");

    let output: String = run_command(&mut session.manager, &["rm", "Alps"]);

    assert_eq!(output, format!("Removed tour {id}\n"));
    assert!(session.manager.tour(id).is_none());
}

#[test]
fn test_add_log_appends_and_inserts() {
    let mut session: TestSession = create_test_session();
    let id: TourId = add_tour(&mut session, "Alps", "Innsbruck", "Bregenz");

    let output: String = run_command(
        &mut session.manager,
        &[
            "add-log",
            "Alps",
            "--date",
            "2026-05-01T08:30:00Z",
            "--duration",
            "2:30",
            "--distance",
            "72",
            "--rating",
            "0.8",
            "--participants",
            "2",
            "--vehicle",
            "Bicycle",
            "--notes",
            "second",
        ],
    );
    run_command(
        &mut session.manager,
        &[
            "add-log", "Alps", "--duration", "45", "--distance", "0.5", "--notes", "third",
        ],
    );
    run_command(
        &mut session.manager,
        &[
            "add-log",
            "Alps",
            "--duration",
            "10",
            "--distance",
            "1",
            "--notes",
            "first",
            "--position",
            "1",
        ],
    );

    assert_eq!(output, "Logged 02:30:00 over 72.00 km on 'Alps'\n");
    let tour: &Tour = session.manager.tour(id).unwrap();
    assert_eq!(log_notes(tour), vec!["first", "second", "third"]);

    let entry: &LogEntry = tour.log().get(1).unwrap();
    assert_eq!(entry.date(), datetime!(2026-05-01 08:30 UTC));
    assert_eq!(entry.duration(), Duration::minutes(150));
    assert!((entry.rating() - 0.8).abs() < f32::EPSILON);
    assert_eq!(entry.participant_count(), 2);
    assert_eq!(entry.break_count(), 0);
    assert_eq!(entry.vehicle(), "Bicycle");
}

#[test]
fn test_add_log_with_invalid_rating_fails() {
    let mut session: TestSession = create_test_session();
    let id: TourId = add_tour(&mut session, "Alps", "Innsbruck", "Bregenz");

    let result = try_run_command(
        &mut session.manager,
        &[
            "add-log",
            "Alps",
            "--duration",
            "10",
            "--distance",
            "1",
            "--rating",
            "1.5",
        ],
    );

    assert!(result.is_err());
    assert!(session.manager.tour(id).unwrap().log().is_empty());
}

#[test]
fn test_add_log_past_the_end_fails() {
    let mut session: TestSession = create_test_session();
    let id: TourId = add_tour(&mut session, "Alps", "Innsbruck", "Bregenz");

    let result = try_run_command(
        &mut session.manager,
        &[
            "add-log",
            "Alps",
            "--duration",
            "10",
            "--distance",
            "1",
            "--position",
            "3",
        ],
    );

    assert!(result.is_err());
    assert!(session.manager.tour(id).unwrap().log().is_empty());
}

#[test]
fn test_add_log_at_position_zero_fails() {
    let mut session: TestSession = create_test_session();
    let id: TourId = add_tour(&mut session, "Alps", "Innsbruck", "Bregenz");

    let result = try_run_command(
        &mut session.manager,
        &[
            "add-log",
            "Alps",
            "--duration",
            "10",
            "--distance",
            "1",
            "--position",
            "0",
        ],
    );

    assert_eq!(result.unwrap_err().to_string(), "Log positions start at 1");
    assert!(session.manager.tour(id).unwrap().log().is_empty());
}

#[test]
fn test_remove_log_by_position() {
    let mut session: TestSession = create_test_session();
    let id: TourId = add_tour(&mut session, "Alps", "Innsbruck", "Bregenz");
    for notes in ["first", "second"] {
        run_command(
            &mut session.manager,
            &[
                "add-log", "Alps", "--duration", "10", "--distance", "1", "--notes", notes,
            ],
        );
    }

    let output: String = run_command(&mut session.manager, &["remove-log", "Alps", "1"]);

    assert_eq!(output, "Removed trip 1 from 'Alps'\n");
    assert_eq!(log_notes(session.manager.tour(id).unwrap()), vec!["second"]);
    assert!(try_run_command(&mut session.manager, &["remove-log", "Alps", "0"]).is_err());
    assert!(try_run_command(&mut session.manager, &["remove-log", "Alps", "2"]).is_err());
}

#[test]
fn test_sync_saves_and_discard_reloads() {
    let mut session: TestSession = create_test_session();
    add_tour(&mut session, "Alps", "Innsbruck", "Bregenz");

    assert_eq!(run_command(&mut session.manager, &["sync"]), "Changes saved\n");
    assert_eq!(run_command(&mut session.manager, &["sync"]), "Nothing to save\n");

    add_tour(&mut session, "Lakes", "Salzburg", "Hallstatt");
    assert_eq!(
        run_command(&mut session.manager, &["status"]),
        "2 tours, unsaved changes (Ready)\n"
    );

    assert_eq!(run_command(&mut session.manager, &["discard"]), "Reloaded 1 tours\n");
    assert_eq!(
        run_command(&mut session.manager, &["status"]),
        "1 tours, no unsaved changes (Ready)\n"
    );
    assert!(find_tour(&session.manager, "Alps").is_ok());
    assert!(find_tour(&session.manager, "Lakes").is_err());
}

#[test]
fn test_log_survives_sync_and_reload() {
    let mut session: TestSession = create_test_session();
    let id: TourId = add_tour(&mut session, "Alps", "Innsbruck", "Bregenz");
    run_command(
        &mut session.manager,
        &[
            "add-log",
            "Alps",
            "--date",
            "2026-07-04",
            "--duration",
            "1:05:30",
            "--distance",
            "12.5",
            "--notes",
            "Sunny",
        ],
    );

    run_command(&mut session.manager, &["sync"]);
    run_command(&mut session.manager, &["discard"]);

    let tour: &Tour = session.manager.tour(id).unwrap();
    let entry: &LogEntry = tour.log().get(0).unwrap();
    assert_eq!(entry.date(), datetime!(2026-07-04 00:00 UTC));
    assert_eq!(
        entry.duration(),
        Duration::hours(1) + Duration::minutes(5) + Duration::seconds(30)
    );
    assert_eq!(entry.notes(), "Sunny");
    assert!(!tour.is_changed());
}

#[test]
fn test_export_then_import_adds_copies() {
    let mut session: TestSession = create_test_session();
    add_tour(&mut session, "Alps", "Innsbruck", "Bregenz");
    run_command(
        &mut session.manager,
        &["add-log", "Alps", "--duration", "10", "--distance", "1"],
    );
    let path: PathBuf = session.dir.path().join("tours.json");
    let path_arg: String = path.display().to_string();

    let exported: String = run_command(&mut session.manager, &["export", &path_arg]);
    let imported: String = run_command(&mut session.manager, &["import", &path_arg]);

    assert_eq!(exported, format!("Exported 1 tours to {path_arg}\n"));
    assert_eq!(imported, "Imported 1 tours\n");
    let tours: Vec<&Tour> = session.manager.tours().collect();
    assert_eq!(tours.len(), 2);
    assert_ne!(tours[0].id(), tours[1].id());
    assert!(tours.iter().all(|tour| tour.log().len() == 1));
}

#[test]
fn test_import_with_replace_drops_current_tours() {
    let mut session: TestSession = create_test_session();
    add_tour(&mut session, "Alps", "Innsbruck", "Bregenz");
    let path: PathBuf = session.dir.path().join("tours.json");
    let path_arg: String = path.display().to_string();
    run_command(&mut session.manager, &["export", &path_arg]);
    add_tour(&mut session, "Lakes", "Salzburg", "Hallstatt");

    run_command(&mut session.manager, &["import", "--replace", &path_arg]);

    let names: Vec<&str> = session.manager.tours().map(Tour::name).collect();
    assert_eq!(names, vec!["Alps"]);
}

#[test]
fn test_import_of_missing_file_fails() {
    let mut session: TestSession = create_test_session();
    let path: PathBuf = session.dir.path().join("missing.json");

    let result = try_run_command(&mut session.manager, &["import", &path.display().to_string()]);

    assert!(result.is_err());
}

#[test]
fn test_reports_are_written() {
    let mut session: TestSession = create_test_session();
    add_tour(&mut session, "Alps", "Innsbruck", "Bregenz");
    let report: PathBuf = session.dir.path().join("alps.txt");
    let summary: PathBuf = session.dir.path().join("summary.txt");

    run_command(
        &mut session.manager,
        &["report", "Alps", &report.display().to_string()],
    );
    run_command(
        &mut session.manager,
        &["summary", &summary.display().to_string()],
    );

    assert!(fs::read_to_string(report).unwrap().starts_with("Alps\n"));
    assert!(fs::read_to_string(summary).unwrap().contains("Tours: 1"));
}

#[test]
fn test_clean_cache_removes_images_of_removed_tours() {
    let mut session: TestSession = create_test_session();
    let kept: TourId = add_tour(&mut session, "Alps", "Innsbruck", "Bregenz");
    let dropped: TourId = add_tour(&mut session, "Lakes", "Salzburg", "Hallstatt");
    let kept_image: PathBuf =
        PathBuf::from(session.manager.tour(kept).unwrap().image_path().unwrap());
    let dropped_image: PathBuf =
        PathBuf::from(session.manager.tour(dropped).unwrap().image_path().unwrap());

    run_command(&mut session.manager, &["rm", "Lakes"]);
    let output: String = run_command(&mut session.manager, &["clean-cache"]);

    assert_eq!(output, "Cache cleaned\n");
    assert!(kept_image.exists());
    assert!(!dropped_image.exists());
}
