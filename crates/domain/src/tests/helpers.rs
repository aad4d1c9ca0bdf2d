// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::datetime;

use crate::{LogEntry, LogEntryFields, Route, Step, Tour};

pub fn create_test_fields() -> LogEntryFields {
    let mut fields: LogEntryFields = LogEntryFields::on(datetime!(2026-05-01 08:00 UTC));
    fields.duration = time::Duration::minutes(95);
    fields.distance = 12.5;
    fields.rating = 0.8;
    fields.participant_count = 2;
    fields.break_count = 1;
    fields.energy_used = 640.0;
    fields.vehicle = String::from("Bicycle");
    fields.weather = String::from("Sunny");
    fields.notes = String::from("Headwind on the way back");
    fields
}

pub fn create_test_entry() -> LogEntry {
    LogEntry::new(create_test_fields()).unwrap()
}

pub fn create_test_route() -> Route {
    let mut route: Route = Route::new("route-1", "Vienna", "Linz");
    route.steps.push(Step::new(0.4, "Head west on Mariahilfer Strasse"));
    route.steps.push(Step::new(182.1, "Take A1 towards Linz"));
    route.steps.push(Step::new(2.5, "Arrive at destination"));
    route
}

pub fn create_test_tour(name: &str) -> Tour {
    Tour::new(name, "A day trip", create_test_route(), None).unwrap()
}

pub fn create_route_with_distance(route_id: &str, distance: f64, steps: usize) -> Route {
    let mut route: Route = Route::new(route_id, "A", "B");
    for index in 0..steps {
        route.steps.push(Step::new(0.0, &format!("Step {index}")));
    }
    route.total_distance = Some(distance);
    route
}
