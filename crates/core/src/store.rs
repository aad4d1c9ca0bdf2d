// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tour_planner_domain::{ChangeTrackingCollection, Tour};

use crate::config::DbClientConfig;
use crate::error::StoreError;

/// Contract of a backing store for tours.
pub trait DatabaseClient {
    /// Loads every stored tour with its route and ordered log.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read.
    fn query_tours(&mut self) -> Result<Vec<Tour>, StoreError>;

    /// Applies the pending delta of `tours` in one transaction.
    ///
    /// New items are inserted, removed items deleted and changed items
    /// updated. Either every partition is applied or none is. The collection
    /// itself is not modified; accepting the changes is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the transaction was rolled back.
    fn batch_synchronize(&mut self, tours: &ChangeTrackingCollection<Tour>)
    -> Result<(), StoreError>;
}

/// Creates [`DatabaseClient`]s from configuration.
pub trait DatabaseClientFactory {
    /// Returns a client for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be opened.
    fn create_database_client(
        &mut self,
        config: &DbClientConfig,
    ) -> Result<Box<dyn DatabaseClient>, StoreError>;
}
