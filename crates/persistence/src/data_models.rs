// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row representations of tours, steps and log entries.
//!
//! Identifiers are stored as hyphenated UUID text, dates as RFC 3339 text
//! and durations as whole nanoseconds.

use diesel::prelude::*;
use num_traits::ToPrimitive;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use tour_planner_domain::{
    Identifiable, LogEntry, LogEntryFields, LogId, Route, Step, Tour, TourId,
};
use uuid::Uuid;

use crate::diesel_schema::{log_entries, steps, tours};
use crate::error::PersistenceError;

/// Diesel Queryable struct for tour rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = tours)]
pub struct TourRow {
    pub tour_id: String,
    pub name: String,
    pub description: String,
    pub image_path: Option<String>,
    pub route_id: String,
    pub start_location: String,
    pub end_location: String,
    pub total_distance: Option<f64>,
}

/// Diesel Queryable struct for step rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = steps)]
pub struct StepRow {
    pub tour_id: String,
    pub position: i32,
    pub distance: f64,
    pub description: String,
    pub icon_path: Option<String>,
}

/// Diesel Queryable struct for log entry rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = log_entries)]
pub struct LogEntryRow {
    pub log_id: String,
    pub tour_id: String,
    pub position: i32,
    pub log_date: String,
    pub duration_ns: i64,
    pub distance: f64,
    pub rating: f64,
    pub participant_count: i32,
    pub break_count: i32,
    pub energy_used: f64,
    pub vehicle: String,
    pub weather: String,
    pub notes: String,
}

#[derive(Insertable)]
#[diesel(table_name = tours, treat_none_as_default_value = false)]
pub struct NewTour<'a> {
    pub tour_id: String,
    pub name: &'a str,
    pub description: &'a str,
    pub image_path: Option<&'a str>,
    pub route_id: &'a str,
    pub start_location: &'a str,
    pub end_location: &'a str,
    pub total_distance: Option<f64>,
}

#[derive(Insertable)]
#[diesel(table_name = steps, treat_none_as_default_value = false)]
pub struct NewStep<'a> {
    pub tour_id: &'a str,
    pub position: i32,
    pub distance: f64,
    pub description: &'a str,
    pub icon_path: Option<&'a str>,
}

#[derive(Insertable)]
#[diesel(table_name = log_entries)]
pub struct NewLogEntry<'a> {
    pub log_id: String,
    pub tour_id: &'a str,
    pub position: i32,
    pub log_date: String,
    pub duration_ns: i64,
    pub distance: f64,
    pub rating: f64,
    pub participant_count: i32,
    pub break_count: i32,
    pub energy_used: f64,
    pub vehicle: &'a str,
    pub weather: &'a str,
    pub notes: &'a str,
}

impl<'a> NewTour<'a> {
    #[must_use]
    pub fn from_tour(tour: &'a Tour) -> Self {
        let route: &Route = tour.route();
        Self {
            tour_id: tour.id().to_string(),
            name: tour.name(),
            description: tour.description(),
            image_path: tour.image_path(),
            route_id: &route.route_id,
            start_location: &route.start_location,
            end_location: &route.end_location,
            total_distance: route.total_distance,
        }
    }
}

impl<'a> NewStep<'a> {
    /// # Errors
    ///
    /// Returns an error if `position` does not fit the column.
    pub fn from_step(
        tour_id: &'a str,
        position: usize,
        step: &'a Step,
    ) -> Result<Self, PersistenceError> {
        Ok(Self {
            tour_id,
            position: position_to_column(position)?,
            distance: step.distance,
            description: &step.description,
            icon_path: step.icon_path.as_deref(),
        })
    }
}

impl<'a> NewLogEntry<'a> {
    /// # Errors
    ///
    /// Returns an error if the date, duration or a count does not fit its column.
    pub fn from_entry(
        tour_id: &'a str,
        position: usize,
        entry: &'a LogEntry,
    ) -> Result<Self, PersistenceError> {
        let log_date: String = entry.date().format(&Rfc3339).map_err(|e| {
            PersistenceError::SerializationError(format!("log entry {}: {e}", entry.id()))
        })?;
        let duration_ns: i64 = i64::try_from(entry.duration().whole_nanoseconds()).map_err(|_| {
            PersistenceError::SerializationError(format!(
                "log entry {}: duration out of range",
                entry.id()
            ))
        })?;

        Ok(Self {
            log_id: entry.id().to_string(),
            tour_id,
            position: position_to_column(position)?,
            log_date,
            duration_ns,
            distance: entry.distance(),
            rating: f64::from(entry.rating()),
            participant_count: count_to_column("participant_count", entry.participant_count())?,
            break_count: count_to_column("break_count", entry.break_count())?,
            energy_used: entry.energy_used(),
            vehicle: entry.vehicle(),
            weather: entry.weather(),
            notes: entry.notes(),
        })
    }
}

impl StepRow {
    #[must_use]
    pub fn into_step(self) -> Step {
        Step {
            distance: self.distance,
            description: self.description,
            icon_path: self.icon_path,
        }
    }
}

impl LogEntryRow {
    /// Rebuilds the domain entry. The result starts out unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if a column holds a value the domain does not accept.
    pub fn into_entry(self) -> Result<LogEntry, PersistenceError> {
        let id: LogId = LogId::from_uuid(parse_uuid(&self.log_id)?);
        let date: OffsetDateTime = OffsetDateTime::parse(&self.log_date, &Rfc3339).map_err(|e| {
            PersistenceError::ReconstructionError(format!("log entry {id}: invalid date: {e}"))
        })?;
        let rating: f32 = self.rating.to_f32().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!("log entry {id}: invalid rating"))
        })?;

        let fields: LogEntryFields = LogEntryFields {
            date,
            duration: Duration::nanoseconds(self.duration_ns),
            distance: self.distance,
            rating,
            participant_count: count_from_column(id, self.participant_count)?,
            break_count: count_from_column(id, self.break_count)?,
            energy_used: self.energy_used,
            vehicle: self.vehicle,
            weather: self.weather,
            notes: self.notes,
        };

        LogEntry::from_fields(id, fields)
            .map_err(|e| PersistenceError::ReconstructionError(format!("log entry {id}: {e}")))
    }
}

impl TourRow {
    /// Rebuilds the domain tour from its row, steps and ordered log.
    ///
    /// # Errors
    ///
    /// Returns an error if a column holds a value the domain does not accept.
    pub fn into_tour(
        self,
        steps: Vec<Step>,
        log: Vec<LogEntry>,
    ) -> Result<Tour, PersistenceError> {
        let id: TourId = TourId::from_uuid(parse_uuid(&self.tour_id)?);
        let route: Route = Route {
            route_id: self.route_id,
            start_location: self.start_location,
            end_location: self.end_location,
            steps,
            total_distance: self.total_distance,
        };

        Tour::from_parts(
            id,
            &self.name,
            &self.description,
            self.image_path,
            route,
            log,
        )
        .map_err(|e| PersistenceError::ReconstructionError(format!("tour {id}: {e}")))
    }
}

fn parse_uuid(text: &str) -> Result<Uuid, PersistenceError> {
    Uuid::parse_str(text)
        .map_err(|e| PersistenceError::ReconstructionError(format!("invalid id '{text}': {e}")))
}

fn position_to_column(position: usize) -> Result<i32, PersistenceError> {
    i32::try_from(position)
        .map_err(|_| PersistenceError::SerializationError(format!("position {position} too large")))
}

fn count_to_column(field: &str, value: u32) -> Result<i32, PersistenceError> {
    i32::try_from(value)
        .map_err(|_| PersistenceError::SerializationError(format!("{field} {value} too large")))
}

fn count_from_column(id: LogId, value: i32) -> Result<u32, PersistenceError> {
    u32::try_from(value).map_err(|_| {
        PersistenceError::ReconstructionError(format!("log entry {id}: negative count {value}"))
    })
}
