// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::datetime;
use time::{Duration, OffsetDateTime};
use tour_planner_domain::{
    ChangeTracking, ChangeTrackingCollection, LogEntry, LogEntryFields, Route, Step, Tour,
};

use crate::Persistence;

pub fn create_test_entry(date: OffsetDateTime, notes: &str) -> LogEntry {
    let mut fields: LogEntryFields = LogEntryFields::on(date);
    fields.duration = Duration::minutes(95) + Duration::nanoseconds(100);
    fields.distance = 12.5;
    fields.rating = 0.77;
    fields.participant_count = 3;
    fields.break_count = 1;
    fields.energy_used = 640.0;
    fields.vehicle = String::from("Bicycle");
    fields.weather = String::from("Sunny");
    fields.notes = notes.to_string();
    LogEntry::new(fields).unwrap()
}

pub fn create_test_route(route_id: &str) -> Route {
    let mut route: Route = Route::new(route_id, "Vienna", "Linz");
    route.steps.push(Step::new(0.4, "Head west on Mariahilfer Strasse"));
    let mut highway: Step = Step::new(182.1, "Take A1 towards Linz");
    highway.icon_path = Some(String::from("icons/highway.png"));
    route.steps.push(highway);
    route.steps.push(Step::new(2.5, "Arrive at destination"));
    route
}

/// A tour with three route steps and two log entries, first "morning" then
/// "evening".
pub fn create_test_tour(name: &str) -> Tour {
    let mut tour: Tour = Tour::new(
        name,
        "A day trip",
        create_test_route(&format!("route-{name}")),
        Some(format!("cache/route-{name}.png")),
    )
    .unwrap();
    tour.log_mut()
        .push(create_test_entry(datetime!(2026-05-01 08:00 UTC), "morning"))
        .unwrap();
    tour.log_mut()
        .push(create_test_entry(datetime!(2026-05-01 18:30 +02:00), "evening"))
        .unwrap();
    tour
}

/// Opens an in-memory store holding `tours`, and returns it with the tours
/// loaded back as a clean baseline.
pub fn create_stored_tours(tours: Vec<Tour>) -> (Persistence, ChangeTrackingCollection<Tour>) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut collection: ChangeTrackingCollection<Tour> = ChangeTrackingCollection::new();
    collection.extend_new(tours).unwrap();
    persistence.synchronize_tours(&collection).unwrap();

    let loaded: Vec<Tour> = persistence.list_tours().unwrap();
    let baseline: ChangeTrackingCollection<Tour> = ChangeTrackingCollection::from_baseline(loaded);
    assert!(!baseline.is_changed());
    (persistence, baseline)
}

pub fn log_notes(tour: &Tour) -> Vec<String> {
    tour.log()
        .iter()
        .map(|entry| entry.notes().to_string())
        .collect()
}
