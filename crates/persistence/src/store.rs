// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The data manager's store contract, backed by [`Persistence`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tour_planner::{DatabaseClient, DatabaseClientFactory, DbClientConfig, StoreError};
use tour_planner_domain::{ChangeTrackingCollection, Tour};
use tracing::{debug, info};

use crate::Persistence;

/// A [`DatabaseClient`] sharing one [`Persistence`] with every other client
/// created for the same connection string.
#[derive(Debug, Clone)]
pub struct SqliteDatabaseClient {
    persistence: Arc<Mutex<Persistence>>,
}

impl SqliteDatabaseClient {
    #[must_use]
    pub const fn new(persistence: Arc<Mutex<Persistence>>) -> Self {
        Self { persistence }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Persistence>, StoreError> {
        self.persistence
            .lock()
            .map_err(|_| StoreError::Connection("store connection lock poisoned".to_string()))
    }
}

impl DatabaseClient for SqliteDatabaseClient {
    fn query_tours(&mut self) -> Result<Vec<Tour>, StoreError> {
        let tours: Vec<Tour> = self.lock()?.list_tours()?;
        debug!("Queried {} tours", tours.len());
        Ok(tours)
    }

    fn batch_synchronize(
        &mut self,
        tours: &ChangeTrackingCollection<Tour>,
    ) -> Result<(), StoreError> {
        self.lock()?
            .synchronize_tours(tours)
            .map_err(crate::PersistenceError::into_write_error)?;
        Ok(())
    }
}

/// Creates [`SqliteDatabaseClient`]s, opening each connection string once.
///
/// Reinitializing the data manager with an unchanged configuration reuses
/// the open database, which keeps `":memory:"` stores alive across
/// reinitialization.
#[derive(Debug, Default)]
pub struct SqliteDatabaseFactory {
    open: HashMap<DbClientConfig, Arc<Mutex<Persistence>>>,
}

impl SqliteDatabaseFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct databases opened so far.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.open.len()
    }
}

impl DatabaseClientFactory for SqliteDatabaseFactory {
    fn create_database_client(
        &mut self,
        config: &DbClientConfig,
    ) -> Result<Box<dyn DatabaseClient>, StoreError> {
        if let Some(persistence) = self.open.get(config) {
            debug!("Reusing store for {}", config.connection_string);
            return Ok(Box::new(SqliteDatabaseClient::new(Arc::clone(persistence))));
        }

        info!("Opening store for {}", config.connection_string);
        let persistence: Arc<Mutex<Persistence>> =
            Arc::new(Mutex::new(Persistence::open(&config.connection_string)?));
        self.open.insert(config.clone(), Arc::clone(&persistence));

        Ok(Box::new(SqliteDatabaseClient::new(persistence)))
    }
}
