// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Duration, OffsetDateTime};

use crate::change_tracker::ChangeTracker;
use crate::error::DomainError;
use crate::tracking::{ChangeTracking, Identifiable, TrackedEntity};
use crate::types::LogId;
use crate::validation::{
    MAX_LABEL_LENGTH, MAX_NOTES_LENGTH, validate_length, validate_non_negative, validate_rating,
};

/// Plain field values of a [`LogEntry`], without identity or tracking.
///
/// Used to build entries from user input, storage rows and imported
/// documents, and to read all fields back out at once.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntryFields {
    /// When the trip took place (UTC).
    pub date: OffsetDateTime,
    /// Time spent travelling.
    pub duration: Duration,
    /// Distance travelled, in kilometers.
    pub distance: f64,
    /// Rating between 0 and 1.
    pub rating: f32,
    /// Number of people on the trip.
    pub participant_count: u32,
    /// Number of breaks taken.
    pub break_count: u32,
    /// Energy used, in kilocalories.
    pub energy_used: f64,
    /// Means of transport.
    pub vehicle: String,
    /// Weather during the trip.
    pub weather: String,
    /// Free-form notes.
    pub notes: String,
}

impl LogEntryFields {
    /// Creates field values for a trip on `date` with every other field zeroed.
    #[must_use]
    pub const fn on(date: OffsetDateTime) -> Self {
        Self {
            date,
            duration: Duration::ZERO,
            distance: 0.0,
            rating: 0.0,
            participant_count: 0,
            break_count: 0,
            energy_used: 0.0,
            vehicle: String::new(),
            weather: String::new(),
            notes: String::new(),
        }
    }

    /// Validates every field against the limits enforced by the setters.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_duration(self.duration)?;
        validate_non_negative("distance", self.distance)?;
        validate_rating(self.rating)?;
        validate_non_negative("energy_used", self.energy_used)?;
        validate_length("vehicle", &self.vehicle, MAX_LABEL_LENGTH)?;
        validate_length("weather", &self.weather, MAX_LABEL_LENGTH)?;
        validate_length("notes", &self.notes, MAX_NOTES_LENGTH)?;
        Ok(())
    }
}

/// One recorded trip along a tour.
///
/// Every field is written through the entry's own [`ChangeTracker`]. Setters
/// that validate leave the previous value in place on error.
///
/// Equality and hashing consider the identity only.
#[derive(Debug, Clone)]
pub struct LogEntry {
    id: LogId,
    fields: LogEntryFields,
    tracker: ChangeTracker,
}

impl PartialEq for LogEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LogEntry {}

impl std::hash::Hash for LogEntry {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl LogEntry {
    /// Creates a new entry with a fresh identity.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if any field violates its limits.
    pub fn new(fields: LogEntryFields) -> Result<Self, DomainError> {
        Self::from_fields(LogId::new(), fields)
    }

    /// Rebuilds an entry with a known identity, e.g. from storage.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if any field violates its limits.
    pub fn from_fields(id: LogId, fields: LogEntryFields) -> Result<Self, DomainError> {
        fields.validate()?;
        Ok(Self {
            id,
            fields,
            tracker: ChangeTracker::new(),
        })
    }

    /// Returns a copy of all field values.
    #[must_use]
    pub fn fields(&self) -> LogEntryFields {
        self.fields.clone()
    }

    #[must_use]
    pub const fn date(&self) -> OffsetDateTime {
        self.fields.date
    }

    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.fields.duration
    }

    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.fields.distance
    }

    #[must_use]
    pub const fn rating(&self) -> f32 {
        self.fields.rating
    }

    #[must_use]
    pub const fn participant_count(&self) -> u32 {
        self.fields.participant_count
    }

    #[must_use]
    pub const fn break_count(&self) -> u32 {
        self.fields.break_count
    }

    #[must_use]
    pub const fn energy_used(&self) -> f64 {
        self.fields.energy_used
    }

    #[must_use]
    pub fn vehicle(&self) -> &str {
        &self.fields.vehicle
    }

    #[must_use]
    pub fn weather(&self) -> &str {
        &self.fields.weather
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.fields.notes
    }

    /// Sets the trip date. Returns whether the value changed.
    pub fn set_date(&mut self, value: OffsetDateTime) -> bool {
        self.tracker.set_property(&mut self.fields.date, value)
    }

    /// Sets the trip duration.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ValueOutOfRange`] for a negative duration.
    pub fn set_duration(&mut self, value: Duration) -> Result<bool, DomainError> {
        validate_duration(value)?;
        Ok(self.tracker.set_property(&mut self.fields.duration, value))
    }

    /// Sets the travelled distance.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ValueOutOfRange`] for negative or non-finite values.
    pub fn set_distance(&mut self, value: f64) -> Result<bool, DomainError> {
        validate_non_negative("distance", value)?;
        Ok(self.tracker.set_property(&mut self.fields.distance, value))
    }

    /// Sets the rating.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ValueOutOfRange`] outside `0.0..=1.0`.
    pub fn set_rating(&mut self, value: f32) -> Result<bool, DomainError> {
        validate_rating(value)?;
        Ok(self.tracker.set_property(&mut self.fields.rating, value))
    }

    /// Sets the participant count. Returns whether the value changed.
    pub fn set_participant_count(&mut self, value: u32) -> bool {
        self.tracker
            .set_property(&mut self.fields.participant_count, value)
    }

    /// Sets the break count. Returns whether the value changed.
    pub fn set_break_count(&mut self, value: u32) -> bool {
        self.tracker.set_property(&mut self.fields.break_count, value)
    }

    /// Sets the energy used.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ValueOutOfRange`] for negative or non-finite values.
    pub fn set_energy_used(&mut self, value: f64) -> Result<bool, DomainError> {
        validate_non_negative("energy_used", value)?;
        Ok(self.tracker.set_property(&mut self.fields.energy_used, value))
    }

    /// Sets the vehicle label.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::FieldTooLong`] beyond 64 characters.
    pub fn set_vehicle(&mut self, value: &str) -> Result<bool, DomainError> {
        validate_length("vehicle", value, MAX_LABEL_LENGTH)?;
        Ok(self
            .tracker
            .set_property(&mut self.fields.vehicle, value.to_string()))
    }

    /// Sets the weather label.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::FieldTooLong`] beyond 64 characters.
    pub fn set_weather(&mut self, value: &str) -> Result<bool, DomainError> {
        validate_length("weather", value, MAX_LABEL_LENGTH)?;
        Ok(self
            .tracker
            .set_property(&mut self.fields.weather, value.to_string()))
    }

    /// Sets the notes.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::FieldTooLong`] beyond 2048 characters.
    pub fn set_notes(&mut self, value: &str) -> Result<bool, DomainError> {
        validate_length("notes", value, MAX_NOTES_LENGTH)?;
        Ok(self
            .tracker
            .set_property(&mut self.fields.notes, value.to_string()))
    }
}

impl Identifiable for LogEntry {
    type Id = LogId;

    fn id(&self) -> LogId {
        self.id
    }
}

impl ChangeTracking for LogEntry {
    fn is_changed(&self) -> bool {
        self.tracker.is_changed()
    }

    fn accept_changes(&mut self) {
        self.tracker.accept_changes();
    }
}

impl TrackedEntity for LogEntry {
    fn same_content(&self, other: &Self) -> bool {
        self.fields == other.fields
    }

    fn mark_changed(&mut self) {
        self.tracker.mark_changed();
    }
}

fn validate_duration(value: Duration) -> Result<(), DomainError> {
    if value.is_negative() {
        return Err(DomainError::ValueOutOfRange {
            field: "duration",
            expected: "zero or positive",
        });
    }
    Ok(())
}
