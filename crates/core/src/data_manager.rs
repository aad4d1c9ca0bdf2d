// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::io::{Read, Write};
use std::path::Path;

use tour_planner_domain::{
    ChangeTracking, ChangeTrackingCollection, Identifiable, MAX_LABEL_LENGTH, MAX_NOTES_LENGTH,
    Route, Tour, TourId, validate_length, validate_required,
};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::converter::DataConverter;
use crate::error::{CoreError, StoreError};
use crate::provider::{DataProviderFactory, DirectionsProvider, MapImageProvider};
use crate::report::ReportGenerator;
use crate::store::{DatabaseClient, DatabaseClientFactory};

/// Lifecycle state of a [`DataManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagerState {
    /// Constructed, no successful load yet.
    Uninitialized,
    /// Loaded and accepting operations.
    Ready,
    /// A collaborator call is in flight.
    Busy,
    /// Terminal. Every operation fails.
    Disposed,
}

impl std::fmt::Display for ManagerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &str = match self {
            Self::Uninitialized => "Uninitialized",
            Self::Ready => "Ready",
            Self::Busy => "Busy",
            Self::Disposed => "Disposed",
        };
        write!(f, "{name}")
    }
}

/// Collaborators built from one configuration. Replaced as a whole.
struct Session {
    config: Config,
    directions: Box<dyn DirectionsProvider>,
    map_images: Box<dyn MapImageProvider>,
    database: Box<dyn DatabaseClient>,
}

/// Owns the working set of tours and mediates between it and the
/// collaborators.
///
/// All tours live in one [`ChangeTrackingCollection`]. Edits accumulate
/// there until [`synchronize_tours`](Self::synchronize_tours) hands the
/// delta to the store and, on success, accepts it as the new baseline.
pub struct DataManager {
    provider_factory: Box<dyn DataProviderFactory>,
    database_factory: Box<dyn DatabaseClientFactory>,
    report_generator: Box<dyn ReportGenerator>,
    data_converter: Box<dyn DataConverter>,
    session: Option<Session>,
    tours: ChangeTrackingCollection<Tour>,
    state: ManagerState,
}

impl std::fmt::Debug for DataManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataManager")
            .field("state", &self.state)
            .field("tours", &self.tours.len())
            .field("pending_changes", &self.tours.is_changed())
            .finish_non_exhaustive()
    }
}

impl DataManager {
    /// Creates an uninitialized manager.
    #[must_use]
    pub fn new(
        provider_factory: Box<dyn DataProviderFactory>,
        database_factory: Box<dyn DatabaseClientFactory>,
        report_generator: Box<dyn ReportGenerator>,
        data_converter: Box<dyn DataConverter>,
    ) -> Self {
        Self {
            provider_factory,
            database_factory,
            report_generator,
            data_converter,
            session: None,
            tours: ChangeTrackingCollection::new(),
            state: ManagerState::Uninitialized,
        }
    }

    /// Creates a manager and performs the initial load.
    ///
    /// # Errors
    ///
    /// Returns the error of [`initialize`](Self::initialize).
    pub fn create(
        config: Config,
        provider_factory: Box<dyn DataProviderFactory>,
        database_factory: Box<dyn DatabaseClientFactory>,
        report_generator: Box<dyn ReportGenerator>,
        data_converter: Box<dyn DataConverter>,
    ) -> Result<Self, CoreError> {
        let mut manager: Self = Self::new(
            provider_factory,
            database_factory,
            report_generator,
            data_converter,
        );
        manager.initialize(config)?;
        Ok(manager)
    }

    #[must_use]
    pub const fn state(&self) -> ManagerState {
        self.state
    }

    /// Returns the configuration of the last successful initialization.
    #[must_use]
    pub fn config(&self) -> Option<&Config> {
        self.session.as_ref().map(|session| &session.config)
    }

    /// Returns whether any tour was added, removed or edited since the last
    /// load or synchronize.
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        self.tours.is_changed()
    }

    /// Returns the data converter used for import and export.
    #[must_use]
    pub fn data_converter(&self) -> &dyn DataConverter {
        self.data_converter.as_ref()
    }

    /// Builds collaborators from `config` and loads all tours from the store.
    ///
    /// Any pending changes are discarded. On failure the manager keeps its
    /// previous collaborators, tours and state.
    ///
    /// # Errors
    ///
    /// * [`CoreError::ProviderInitialization`] if a provider cannot be built
    /// * [`CoreError::Store`] if the store cannot be opened or queried
    /// * [`CoreError::Busy`] or [`CoreError::Disposed`] in those states
    pub fn initialize(&mut self, config: Config) -> Result<(), CoreError> {
        self.check_available()?;

        let previous: ManagerState = self.state;
        self.state = ManagerState::Busy;
        let result: Result<(Session, Vec<Tour>), CoreError> = self.build_session(config);

        match result {
            Ok((session, tours)) => {
                info!(tours = tours.len(), "Data manager initialized");
                self.tours = ChangeTrackingCollection::from_baseline(tours);
                self.session = Some(session);
                self.state = ManagerState::Ready;
                Ok(())
            }
            Err(err) => {
                warn!("Initialization failed: {}", err);
                self.state = previous;
                Err(err)
            }
        }
    }

    /// Rebuilds collaborators and reloads all tours.
    ///
    /// With `None` the last configuration is reused. Cached provider
    /// connections are reset first so that changed credentials take effect.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotInitialized`] for `None` before any successful
    /// initialization, otherwise the errors of [`initialize`](Self::initialize).
    pub fn reinitialize(&mut self, config: Option<Config>) -> Result<(), CoreError> {
        self.check_available()?;

        let config: Config = match config {
            Some(config) => config,
            None => self.config().cloned().ok_or(CoreError::NotInitialized)?,
        };

        debug!("Resetting provider connections before reinitialization");
        self.provider_factory.reset_connection();
        self.initialize(config)
    }

    /// Pushes pending changes to the store and accepts them.
    ///
    /// Does nothing, without touching the store, if nothing changed. On
    /// failure every pending change is kept, so a retry sends the same delta.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Store`] if the store rejected the batch.
    pub fn synchronize_tours(&mut self) -> Result<(), CoreError> {
        self.check_ready()?;

        if !self.tours.is_changed() {
            debug!("No pending changes, skipping synchronization");
            return Ok(());
        }

        let Some(session) = self.session.as_mut() else {
            return Err(CoreError::NotInitialized);
        };

        info!(
            new = self.tours.new_items().count(),
            removed = self.tours.removed_items().count(),
            changed = self.tours.changed_items().count(),
            "Synchronizing tours"
        );

        self.state = ManagerState::Busy;
        let result: Result<(), StoreError> = session.database.batch_synchronize(&self.tours);
        self.state = ManagerState::Ready;

        result.map_err(|source| CoreError::Store {
            operation: "synchronize tours",
            source,
        })?;

        self.tours.accept_changes();
        Ok(())
    }

    /// Asks both providers to evict cached data no live tour refers to.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Provider`] if either provider fails.
    pub fn clean_cache(&mut self) -> Result<(), CoreError> {
        self.check_ready()?;
        let Some(session) = self.session.as_mut() else {
            return Err(CoreError::NotInitialized);
        };

        let tours: Vec<&Tour> = self.tours.iter().collect();
        debug!("Cleaning provider caches for {} tours", tours.len());

        self.state = ManagerState::Busy;
        let result: Result<(), CoreError> = session
            .directions
            .clean_cache(&tours)
            .map_err(|source| CoreError::Provider {
                operation: "clean directions cache",
                source,
            })
            .and_then(|()| {
                session
                    .map_images
                    .clean_cache(&tours)
                    .map_err(|source| CoreError::Provider {
                        operation: "clean map image cache",
                        source,
                    })
            });
        self.state = ManagerState::Ready;
        result
    }

    /// Creates a tour between two locations and adds it as a new item.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name of the tour
    /// * `description` - Free-text description
    /// * `from` - Start location passed to the directions provider
    /// * `to` - End location passed to the directions provider
    ///
    /// # Returns
    ///
    /// The identity of the new tour. The tour has no image if the map image
    /// provider failed; that failure is only logged.
    ///
    /// # Errors
    ///
    /// * [`CoreError::DomainViolation`] if a field is empty or too long
    /// * [`CoreError::Provider`] if the directions provider fails
    /// * [`CoreError::RouteNotFound`] if there is no route
    pub fn create_tour(
        &mut self,
        name: &str,
        description: &str,
        from: &str,
        to: &str,
    ) -> Result<TourId, CoreError> {
        self.check_ready()?;
        validate_required("name", name, MAX_LABEL_LENGTH)?;
        validate_length("description", description, MAX_NOTES_LENGTH)?;
        validate_required("from", from, MAX_NOTES_LENGTH)?;
        validate_required("to", to, MAX_NOTES_LENGTH)?;

        let Some(session) = self.session.as_mut() else {
            return Err(CoreError::NotInitialized);
        };

        self.state = ManagerState::Busy;
        let route: Result<Option<Route>, CoreError> = session
            .directions
            .get_route(from, to)
            .map_err(|source| CoreError::Provider {
                operation: "get route",
                source,
            });
        let route: Route = match route {
            Ok(Some(route)) => route,
            Ok(None) => {
                self.state = ManagerState::Ready;
                return Err(CoreError::RouteNotFound {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
            Err(err) => {
                self.state = ManagerState::Ready;
                return Err(err);
            }
        };

        let image_path: Option<String> = match session.map_images.get_image(&route) {
            Ok(path) => Some(path_to_string(&path)),
            Err(err) => {
                warn!(route_id = %route.route_id, "Could not get map image: {}", err);
                None
            }
        };
        self.state = ManagerState::Ready;

        let tour: Tour = Tour::new(name, description, route, image_path)?;
        let id: TourId = tour.id();
        self.tours.add(tour)?;
        info!(tour_id = %id, "Created tour '{}'", name);
        Ok(id)
    }

    /// Removes a tour from the working set.
    ///
    /// # Returns
    ///
    /// `false` if no live tour has this identity.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Busy`] or [`CoreError::Disposed`] in those states.
    pub fn remove_tour(&mut self, id: TourId) -> Result<bool, CoreError> {
        self.check_ready()?;
        let removed: bool = self.tours.remove(id);
        if removed {
            debug!(tour_id = %id, "Removed tour");
        }
        Ok(removed)
    }

    /// Returns the live tour with the given identity.
    #[must_use]
    pub fn tour(&self, id: TourId) -> Option<&Tour> {
        self.tours.get(id)
    }

    /// Returns the live tour with the given identity for editing.
    ///
    /// Edits are tracked and sent to the store on the next synchronize.
    pub fn tour_mut(&mut self, id: TourId) -> Option<&mut Tour> {
        self.tours.get_mut(id)
    }

    /// Iterates over all live tours.
    pub fn tours(&self) -> impl Iterator<Item = &Tour> {
        self.tours.iter()
    }

    /// Reads tours through the data converter and adds them as new items.
    ///
    /// Imported tours get fresh identities. With `replace` every current
    /// tour is removed first.
    ///
    /// # Returns
    ///
    /// The number of imported tours.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Conversion`] if the input is invalid; the working
    /// set is unchanged in that case.
    pub fn import_tours(
        &mut self,
        reader: &mut dyn Read,
        replace: bool,
    ) -> Result<usize, CoreError> {
        self.check_ready()?;

        let imported: Vec<Tour> = self.data_converter.read_tours(reader)?;
        let count: usize = imported.len();

        if replace {
            self.tours.clear();
        }
        self.tours.extend_new(imported)?;

        info!(count, replace, "Imported tours");
        Ok(count)
    }

    /// Writes all live tours through the data converter.
    ///
    /// # Returns
    ///
    /// The number of exported tours.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Conversion`] if writing fails.
    pub fn export_tours(&self, writer: &mut dyn Write) -> Result<usize, CoreError> {
        self.check_ready()?;

        let tours: Vec<&Tour> = self.tours.iter().collect();
        self.data_converter.write_tours(writer, &tours)?;

        info!(count = tours.len(), "Exported tours");
        Ok(tours.len())
    }

    /// Renders a report for one tour.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TourNotFound`] or [`CoreError::Report`].
    pub fn generate_tour_report(&self, id: TourId, path: &Path) -> Result<(), CoreError> {
        self.check_ready()?;

        let tour: &Tour = self.tours.get(id).ok_or(CoreError::TourNotFound(id))?;
        debug!(tour_id = %id, "Generating tour report at {}", path.display());
        self.report_generator.generate_tour_report(tour, path)?;
        Ok(())
    }

    /// Renders a summary report over all live tours.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Report`] if rendering fails.
    pub fn generate_summary_report(&self, path: &Path) -> Result<(), CoreError> {
        self.check_ready()?;

        let tours: Vec<&Tour> = self.tours.iter().collect();
        debug!(
            "Generating summary report for {} tours at {}",
            tours.len(),
            path.display()
        );
        self.report_generator.generate_summary_report(&tours, path)?;
        Ok(())
    }

    /// Releases collaborators and tours. Pending changes are lost.
    ///
    /// Disposing twice is allowed.
    pub fn dispose(&mut self) {
        if self.state == ManagerState::Disposed {
            return;
        }
        if self.tours.is_changed() {
            warn!("Disposing data manager with unsynchronized changes");
        }

        self.session = None;
        self.tours = ChangeTrackingCollection::new();
        self.state = ManagerState::Disposed;
        info!("Data manager disposed");
    }

    /// Builds a full session and the initial tour list without touching `self`'s state.
    fn build_session(&mut self, config: Config) -> Result<(Session, Vec<Tour>), CoreError> {
        let directions: Box<dyn DirectionsProvider> = self
            .provider_factory
            .create_directions_provider(&config.directions_api)
            .map_err(CoreError::ProviderInitialization)?;
        let map_images: Box<dyn MapImageProvider> = self
            .provider_factory
            .create_map_image_provider(&config.map_image_api)
            .map_err(CoreError::ProviderInitialization)?;
        let mut database: Box<dyn DatabaseClient> = self
            .database_factory
            .create_database_client(&config.database)
            .map_err(|source| CoreError::Store {
                operation: "open database",
                source,
            })?;

        let tours: Vec<Tour> = database.query_tours().map_err(|source| CoreError::Store {
            operation: "query tours",
            source,
        })?;

        Ok((
            Session {
                config,
                directions,
                map_images,
                database,
            },
            tours,
        ))
    }

    /// Fails for states in which no operation may start.
    const fn check_available(&self) -> Result<(), CoreError> {
        match self.state {
            ManagerState::Busy => Err(CoreError::Busy),
            ManagerState::Disposed => Err(CoreError::Disposed),
            ManagerState::Uninitialized | ManagerState::Ready => Ok(()),
        }
    }

    /// Fails unless the manager is `Ready`.
    const fn check_ready(&self) -> Result<(), CoreError> {
        match self.state {
            ManagerState::Ready => Ok(()),
            ManagerState::Uninitialized => Err(CoreError::NotInitialized),
            ManagerState::Busy => Err(CoreError::Busy),
            ManagerState::Disposed => Err(CoreError::Disposed),
        }
    }
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
