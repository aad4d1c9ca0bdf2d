// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::change_tracker::ChangeTracker;
use crate::error::DomainError;
use crate::list::ChangeTrackingList;
use crate::log_entry::LogEntry;
use crate::tracking::{ChangeTracking, Identifiable, TrackedEntity};
use crate::types::{Route, TourId};
use crate::validation::{MAX_LABEL_LENGTH, MAX_NOTES_LENGTH, validate_length, validate_required};

/// A route plus the log of trips taken along it.
///
/// `name` and `description` are tracked; identity, route and image path are
/// fixed at construction. The log is an ordered [`ChangeTrackingList`] whose
/// changes count as changes of the tour.
///
/// Equality and hashing consider the identity only.
#[derive(Debug, Clone)]
pub struct Tour {
    id: TourId,
    name: String,
    description: String,
    image_path: Option<String>,
    route: Route,
    log: ChangeTrackingList<LogEntry>,
    tracker: ChangeTracker,
}

impl PartialEq for Tour {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Tour {}

impl std::hash::Hash for Tour {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Tour {
    /// Creates a new tour with a fresh identity and an empty log.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name, required, at most 64 characters
    /// * `description` - Free text, at most 2048 characters
    /// * `route` - The route returned by a directions provider
    /// * `image_path` - Cached map image for the route, if one was produced
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the name is empty or a text field is too long.
    pub fn new(
        name: &str,
        description: &str,
        route: Route,
        image_path: Option<String>,
    ) -> Result<Self, DomainError> {
        Self::from_parts(
            TourId::new(),
            name,
            description,
            image_path,
            route,
            Vec::new(),
        )
    }

    /// Rebuilds a tour from stored or imported parts.
    ///
    /// The tour and all its log entries come back as an accepted baseline, so
    /// loading never registers as a change.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the name is empty or a text field is too long.
    pub fn from_parts(
        id: TourId,
        name: &str,
        description: &str,
        image_path: Option<String>,
        route: Route,
        log_entries: Vec<LogEntry>,
    ) -> Result<Self, DomainError> {
        validate_required("name", name, MAX_LABEL_LENGTH)?;
        validate_length("description", description, MAX_NOTES_LENGTH)?;

        Ok(Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            image_path,
            route,
            log: ChangeTrackingList::from_baseline(log_entries),
            tracker: ChangeTracker::new(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn image_path(&self) -> Option<&str> {
        self.image_path.as_deref()
    }

    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    /// Returns the trip log.
    #[must_use]
    pub const fn log(&self) -> &ChangeTrackingList<LogEntry> {
        &self.log
    }

    /// Returns the trip log for adding, removing and editing entries.
    pub const fn log_mut(&mut self) -> &mut ChangeTrackingList<LogEntry> {
        &mut self.log
    }

    /// Renames the tour.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyField`] or [`DomainError::FieldTooLong`];
    /// the previous name is kept.
    pub fn set_name(&mut self, value: &str) -> Result<bool, DomainError> {
        validate_required("name", value, MAX_LABEL_LENGTH)?;
        Ok(self.tracker.set_property(&mut self.name, value.to_string()))
    }

    /// Replaces the description.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::FieldTooLong`]; the previous description is kept.
    pub fn set_description(&mut self, value: &str) -> Result<bool, DomainError> {
        validate_length("description", value, MAX_NOTES_LENGTH)?;
        Ok(self
            .tracker
            .set_property(&mut self.description, value.to_string()))
    }

    /// Returns whether the tour's own fields changed, ignoring its log.
    #[must_use]
    pub const fn fields_changed(&self) -> bool {
        self.tracker.is_changed()
    }
}

impl Identifiable for Tour {
    type Id = TourId;

    fn id(&self) -> TourId {
        self.id
    }
}

impl ChangeTracking for Tour {
    fn is_changed(&self) -> bool {
        self.tracker.is_changed() || self.log.is_changed()
    }

    fn accept_changes(&mut self) {
        self.tracker.accept_changes();
        self.log.accept_changes();
    }
}

impl TrackedEntity for Tour {
    /// Compares fields, route and the live log entries in order.
    fn same_content(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.image_path == other.image_path
            && self.route == other.route
            && self.log.len() == other.log.len()
            && self
                .log
                .iter()
                .zip(other.log.iter())
                .all(|(mine, theirs)| mine.id() == theirs.id() && mine.same_content(theirs))
    }

    /// Marks the fields and the whole log, so both are written again.
    fn mark_changed(&mut self) {
        self.tracker.mark_changed();
        self.log.mark_order_changed();
    }
}
