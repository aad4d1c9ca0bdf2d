// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::Parser;
use tempfile::TempDir;
use time::Duration;
use time::macros::datetime;
use tour_planner::{ApiClientConfig, Config, DataManager, DbClientConfig};
use tour_planner_domain::{LogEntry, LogEntryFields, Route, Step, Tour};

use crate::build_manager;
use crate::commands::Command;
use crate::providers::OFFLINE_ENDPOINT;

/// A ready manager on an in-memory store. The directory holds map images
/// and any files a test writes, and is removed on drop.
pub struct TestSession {
    pub manager: DataManager,
    pub dir: TempDir,
}

pub fn create_test_config() -> Config {
    Config {
        directions_api: ApiClientConfig::new(OFFLINE_ENDPOINT),
        map_image_api: ApiClientConfig::new(OFFLINE_ENDPOINT),
        database: DbClientConfig::new(":memory:"),
    }
}

pub fn create_test_session() -> TestSession {
    let dir: TempDir = tempfile::tempdir().unwrap();
    let manager: DataManager =
        build_manager(create_test_config(), &dir.path().join("images")).unwrap();
    TestSession { manager, dir }
}

#[derive(Debug, Parser)]
#[command(no_binary_name = true)]
struct TestLine {
    #[command(subcommand)]
    command: Command,
}

/// Parses `words` the way the shell does.
pub fn parse_command(words: &[&str]) -> Command {
    TestLine::try_parse_from(words).unwrap().command
}

/// Parses and runs one command, returning what it printed.
pub fn run_command(manager: &mut DataManager, words: &[&str]) -> String {
    try_run_command(manager, words).unwrap()
}

pub fn try_run_command(manager: &mut DataManager, words: &[&str]) -> color_eyre::Result<String> {
    let mut out: Vec<u8> = Vec::new();
    parse_command(words).run(manager, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

pub fn create_test_route(route_id: &str) -> Route {
    let mut route: Route = Route::new(route_id, "Salzburg", "Hallstatt");
    route.steps.push(Step::new(0.6, "Leave the old town"));
    route.steps.push(Step::new(71.4, "Follow B158 along the lakes"));
    route
}

pub fn create_test_tour(name: &str) -> Tour {
    let mut tour: Tour = Tour::new(
        name,
        "Lakes and mountains",
        create_test_route("route-1"),
        Some(String::from("images/route-1.svg")),
    )
    .unwrap();

    let mut fields: LogEntryFields = LogEntryFields::on(datetime!(2026-05-01 08:30 UTC));
    fields.duration = Duration::minutes(150);
    fields.distance = 72.0;
    fields.rating = 0.75;
    fields.notes = String::from("Windy at the pass");
    tour.log_mut().push(LogEntry::new(fields).unwrap()).unwrap();

    let mut fields: LogEntryFields = LogEntryFields::on(datetime!(2026-06-12 07:00 UTC));
    fields.duration = Duration::minutes(130);
    fields.distance = 70.5;
    fields.rating = 0.25;
    tour.log_mut().push(LogEntry::new(fields).unwrap()).unwrap();

    tour
}
