// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tour mutations.
//!
//! None of these functions open a transaction. [`synchronize_tours`] wraps
//! them in one so a batch is applied completely or not at all.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tour_planner_domain::{ChangeTracking, ChangeTrackingCollection, Identifiable, Tour};
use tracing::{debug, info};

use crate::data_models::{NewLogEntry, NewStep, NewTour};
use crate::diesel_schema::{log_entries, steps, tours};
use crate::error::PersistenceError;

/// Row counts applied by one [`synchronize_tours`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Tours inserted.
    pub inserted: usize,
    /// Tours deleted, together with their steps and log entries.
    pub deleted: usize,
    /// Tours updated in place.
    pub updated: usize,
}

/// Inserts a tour with its route steps and its log.
///
/// # Errors
///
/// Returns an error if any insert fails.
pub fn insert_tour(conn: &mut SqliteConnection, tour: &Tour) -> Result<(), PersistenceError> {
    let new_tour: NewTour<'_> = NewTour::from_tour(tour);
    debug!("Inserting tour {} ({})", new_tour.tour_id, new_tour.name);

    diesel::insert_into(tours::table)
        .values(&new_tour)
        .execute(conn)?;

    let new_steps: Vec<NewStep<'_>> = tour
        .route()
        .steps
        .iter()
        .enumerate()
        .map(|(position, step)| NewStep::from_step(&new_tour.tour_id, position, step))
        .collect::<Result<_, _>>()?;

    if !new_steps.is_empty() {
        diesel::insert_into(steps::table)
            .values(&new_steps)
            .execute(conn)?;
    }

    insert_log_entries(conn, &new_tour.tour_id, tour)
}

/// Updates the editable fields of a stored tour and rewrites its log.
///
/// The route is immutable once a tour exists, so steps are left alone.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the tour is not stored, or an
/// error if any statement fails.
pub fn update_tour(conn: &mut SqliteConnection, tour: &Tour) -> Result<(), PersistenceError> {
    update_tour_fields(conn, tour)?;
    if tour.log().is_changed() {
        let tour_id: String = tour.id().to_string();
        clear_log_entries(conn, &tour_id)?;
        insert_log_entries(conn, &tour_id, tour)?;
    }
    Ok(())
}

/// Deletes a tour. Steps and log entries follow through `ON DELETE CASCADE`.
///
/// Deleting a tour that is not stored is not an error.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_tour(conn: &mut SqliteConnection, tour: &Tour) -> Result<(), PersistenceError> {
    let tour_id: String = tour.id().to_string();
    debug!("Deleting tour {}", tour_id);

    diesel::delete(tours::table.filter(tours::tour_id.eq(&tour_id))).execute(conn)?;
    Ok(())
}

/// Applies the pending delta of `collection` in a single transaction.
///
/// Removed tours are deleted first, then new tours inserted, then changed
/// tours updated. On error the transaction is rolled back.
///
/// # Errors
///
/// Returns the first error raised by any statement.
pub fn synchronize_tours(
    conn: &mut SqliteConnection,
    collection: &ChangeTrackingCollection<Tour>,
) -> Result<SyncSummary, PersistenceError> {
    let summary: SyncSummary = conn.transaction::<_, PersistenceError, _>(|conn| {
        let mut summary: SyncSummary = SyncSummary::default();

        for tour in collection.removed_items() {
            delete_tour(conn, tour)?;
            summary.deleted += 1;
        }

        // One tour at a time: each tour's log references the tour row.
        for tour in collection.new_items() {
            insert_tour(conn, tour)?;
            summary.inserted += 1;
        }

        // Clear every rewritten log before re-inserting any, so an entry
        // moved between tours never collides with its old row.
        let mut rewritten_logs: Vec<&Tour> = Vec::new();
        for tour in collection.changed_items() {
            update_tour_fields(conn, tour)?;
            if tour.log().is_changed() {
                clear_log_entries(conn, &tour.id().to_string())?;
                rewritten_logs.push(tour);
            }
            summary.updated += 1;
        }
        for tour in rewritten_logs {
            insert_log_entries(conn, &tour.id().to_string(), tour)?;
        }

        Ok(summary)
    })?;

    info!(
        inserted = summary.inserted,
        deleted = summary.deleted,
        updated = summary.updated,
        "Synchronized tours"
    );
    Ok(summary)
}

fn update_tour_fields(conn: &mut SqliteConnection, tour: &Tour) -> Result<(), PersistenceError> {
    let tour_id: String = tour.id().to_string();
    debug!("Updating tour {}", tour_id);

    let updated: usize = diesel::update(tours::table.filter(tours::tour_id.eq(&tour_id)))
        .set((
            tours::name.eq(tour.name()),
            tours::description.eq(tour.description()),
            tours::image_path.eq(tour.image_path()),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("tour {tour_id}")));
    }
    Ok(())
}

fn clear_log_entries(conn: &mut SqliteConnection, tour_id: &str) -> Result<(), PersistenceError> {
    diesel::delete(log_entries::table.filter(log_entries::tour_id.eq(tour_id))).execute(conn)?;
    Ok(())
}

fn insert_log_entries(
    conn: &mut SqliteConnection,
    tour_id: &str,
    tour: &Tour,
) -> Result<(), PersistenceError> {
    let new_entries: Vec<NewLogEntry<'_>> = tour
        .log()
        .iter()
        .enumerate()
        .map(|(position, entry)| NewLogEntry::from_entry(tour_id, position, entry))
        .collect::<Result<_, _>>()?;

    if new_entries.is_empty() {
        return Ok(());
    }

    debug!("Inserting {} log entries for tour {}", new_entries.len(), tour_id);
    diesel::insert_into(log_entries::table)
        .values(&new_entries)
        .execute(conn)?;
    Ok(())
}
