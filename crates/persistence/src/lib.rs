// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Tour Planner.
//!
//! This crate stores tours, their route steps and their trip logs in
//! `SQLite` through Diesel, and implements the store contract of the data
//! manager on top of it.
//!
//! ## Layout
//!
//! - `tours` holds the editable tour fields and the route header
//! - `steps` holds route maneuvers in order
//! - `log_entries` holds the trip log in order
//!
//! Both child tables reference `tours` with `ON DELETE CASCADE`, so deleting
//! a tour row removes everything it owns.
//!
//! ## Testing
//!
//! Every call to [`Persistence::new_in_memory`] gets its own shared-cache
//! in-memory database, so tests never see each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tour_planner::IN_MEMORY_CONNECTION;
use tour_planner_domain::{ChangeTrackingCollection, Tour, TourId};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::SyncSummary;
pub use store::{SqliteDatabaseClient, SqliteDatabaseFactory};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for tours.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_tours_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Opens the database named by a connection string.
    ///
    /// `":memory:"` selects a fresh in-memory database; anything else is a
    /// file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open(connection_string: &str) -> Result<Self, PersistenceError> {
        if connection_string == IN_MEMORY_CONNECTION {
            Self::new_in_memory()
        } else if connection_string.trim().is_empty() {
            Err(PersistenceError::InitializationError(
                "Empty connection string".to_string(),
            ))
        } else {
            Self::new_with_file(connection_string)
        }
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Tours
    // ========================================================================

    /// Loads every stored tour with its steps and ordered log.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is invalid.
    pub fn list_tours(&mut self) -> Result<Vec<Tour>, PersistenceError> {
        queries::list_tours(&mut self.conn)
    }

    /// Returns whether a tour is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn tour_exists(&mut self, tour_id: TourId) -> Result<bool, PersistenceError> {
        queries::tour_exists(&mut self.conn, &tour_id.to_string())
    }

    /// Inserts a single tour outside any batch.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails.
    pub fn insert_tour(&mut self, tour: &Tour) -> Result<(), PersistenceError> {
        mutations::insert_tour(&mut self.conn, tour)
    }

    /// Updates a single stored tour outside any batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the tour is not stored or a statement fails.
    pub fn update_tour(&mut self, tour: &Tour) -> Result<(), PersistenceError> {
        mutations::update_tour(&mut self.conn, tour)
    }

    /// Deletes a single tour outside any batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_tour(&mut self, tour: &Tour) -> Result<(), PersistenceError> {
        mutations::delete_tour(&mut self.conn, tour)
    }

    /// Applies the pending delta of `collection` in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; nothing is committed then.
    pub fn synchronize_tours(
        &mut self,
        collection: &ChangeTrackingCollection<Tour>,
    ) -> Result<SyncSummary, PersistenceError> {
        mutations::synchronize_tours(&mut self.conn, collection)
    }

    // ========================================================================
    // Counts
    // ========================================================================

    /// Counts stored tours.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_tours(&mut self) -> Result<i64, PersistenceError> {
        queries::count_tours(&mut self.conn)
    }

    /// Counts stored route steps.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_steps(&mut self) -> Result<i64, PersistenceError> {
        queries::count_steps(&mut self.conn)
    }

    /// Counts stored log entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_log_entries(&mut self) -> Result<i64, PersistenceError> {
        queries::count_log_entries(&mut self.conn)
    }
}
