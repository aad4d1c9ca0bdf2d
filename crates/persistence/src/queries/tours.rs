// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tour queries.

use std::collections::HashMap;

use diesel::SqliteConnection;
use diesel::prelude::*;
use tour_planner_domain::{LogEntry, Step, Tour};
use tracing::debug;

use crate::data_models::{LogEntryRow, StepRow, TourRow};
use crate::diesel_schema::{log_entries, steps, tours};
use crate::error::PersistenceError;

/// Loads every tour with its route steps and its log in stored order.
///
/// Tours come back ordered by name, then identity.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be turned
/// back into a tour.
pub fn list_tours(conn: &mut SqliteConnection) -> Result<Vec<Tour>, PersistenceError> {
    let tour_rows: Vec<TourRow> = tours::table
        .select(TourRow::as_select())
        .order((tours::name.asc(), tours::tour_id.asc()))
        .load(conn)?;

    let step_rows: Vec<StepRow> = steps::table
        .select(StepRow::as_select())
        .order((steps::tour_id.asc(), steps::position.asc()))
        .load(conn)?;

    let log_rows: Vec<LogEntryRow> = log_entries::table
        .select(LogEntryRow::as_select())
        .order((log_entries::tour_id.asc(), log_entries::position.asc()))
        .load(conn)?;

    debug!(
        "Loaded {} tours, {} steps, {} log entries",
        tour_rows.len(),
        step_rows.len(),
        log_rows.len()
    );

    let mut steps_by_tour: HashMap<String, Vec<Step>> = HashMap::new();
    for row in step_rows {
        steps_by_tour
            .entry(row.tour_id.clone())
            .or_default()
            .push(row.into_step());
    }

    let mut log_by_tour: HashMap<String, Vec<LogEntry>> = HashMap::new();
    for row in log_rows {
        let tour_id: String = row.tour_id.clone();
        log_by_tour.entry(tour_id).or_default().push(row.into_entry()?);
    }

    tour_rows
        .into_iter()
        .map(|row| {
            let tour_steps: Vec<Step> = steps_by_tour.remove(&row.tour_id).unwrap_or_default();
            let tour_log: Vec<LogEntry> = log_by_tour.remove(&row.tour_id).unwrap_or_default();
            row.into_tour(tour_steps, tour_log)
        })
        .collect()
}

/// Returns whether a tour with the given identity is stored.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn tour_exists(conn: &mut SqliteConnection, tour_id: &str) -> Result<bool, PersistenceError> {
    let count: i64 = tours::table
        .filter(tours::tour_id.eq(tour_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Counts stored tours.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_tours(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(tours::table.count().get_result(conn)?)
}

/// Counts stored route steps across all tours.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_steps(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(steps::table.count().get_result(conn)?)
}

/// Counts stored log entries across all tours.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_log_entries(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(log_entries::table.count().get_result(conn)?)
}
