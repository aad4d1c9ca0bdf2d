// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::PathBuf;

use tour_planner_domain::{Route, Tour};

use crate::config::ApiClientConfig;
use crate::error::ProviderError;

/// Looks up routes between two locations.
pub trait DirectionsProvider {
    /// Returns the route from `from` to `to`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the provider could not answer.
    fn get_route(&mut self, from: &str, to: &str) -> Result<Option<Route>, ProviderError>;

    /// Evicts cached data not referenced by any of `tours`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the cache could not be cleaned.
    fn clean_cache(&mut self, tours: &[&Tour]) -> Result<(), ProviderError>;
}

/// Renders map images for routes.
pub trait MapImageProvider {
    /// Returns the path of an image showing `route`, producing it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the image could not be produced.
    fn get_image(&mut self, route: &Route) -> Result<PathBuf, ProviderError>;

    /// Deletes cached images whose route is not used by any of `tours`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the cache could not be cleaned.
    fn clean_cache(&mut self, tours: &[&Tour]) -> Result<(), ProviderError>;
}

/// Creates providers from configuration.
pub trait DataProviderFactory {
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the configuration cannot be used.
    fn create_directions_provider(
        &mut self,
        config: &ApiClientConfig,
    ) -> Result<Box<dyn DirectionsProvider>, ProviderError>;

    /// # Errors
    ///
    /// Returns [`ProviderError`] if the configuration cannot be used.
    fn create_map_image_provider(
        &mut self,
        config: &ApiClientConfig,
    ) -> Result<Box<dyn MapImageProvider>, ProviderError>;

    /// Drops cached connections so the next create call builds fresh ones.
    fn reset_connection(&mut self);
}

/// Cache of connection objects keyed by the configuration that built them.
///
/// Owned by a factory. Values are handed out by clone, so `V` is usually a
/// shared handle such as `Arc<...>`.
#[derive(Debug)]
pub struct ProviderCache<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> Default for ProviderCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V: Clone> ProviderCache<K, V> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, building it with `create` on a miss.
    ///
    /// A failed build caches nothing.
    ///
    /// # Errors
    ///
    /// Returns whatever `create` returns on failure.
    pub fn get_or_try_insert_with<E, F>(&mut self, key: &K, create: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.entries.get(key) {
            return Ok(value.clone());
        }

        let value: V = create()?;
        self.entries.insert(key.clone(), value.clone());
        Ok(value)
    }

    /// Returns whether a value is cached for `key`.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every cached value.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }
}
