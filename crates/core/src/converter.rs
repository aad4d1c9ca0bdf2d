// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Import and export of tours.
//!
//! The JSON format is an array of tour documents. Dates are RFC 3339
//! strings and durations are `[d.]hh:mm:ss[.fffffff]` strings. Identities
//! are written on export but regenerated on import, so importing the same
//! file twice yields two distinct sets of tours.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tour_planner_domain::{
    Identifiable, LogEntry, LogEntryFields, LogId, Route, Tour, TourId, format_duration,
};
use tracing::debug;

use crate::error::ConversionError;

/// Reads and writes tours in an exchange format.
pub trait DataConverter {
    /// File extension, without the dot, for files in this format.
    fn preferred_file_extension(&self) -> &'static str;

    /// Human-readable name of the format.
    fn display_name(&self) -> &'static str;

    /// Reads tours from `reader`. Every returned tour has a fresh identity.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] if the input is unreadable or invalid.
    fn read_tours(&self, reader: &mut dyn Read) -> Result<Vec<Tour>, ConversionError>;

    /// Writes `tours` to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] if the output cannot be written.
    fn write_tours(&self, writer: &mut dyn Write, tours: &[&Tour]) -> Result<(), ConversionError>;
}

/// JSON implementation of [`DataConverter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConverter;

impl JsonConverter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TourDocument {
    #[serde(default)]
    tour_id: TourId,
    name: String,
    #[serde(default)]
    image_path: Option<String>,
    #[serde(default)]
    custom_description: String,
    route: Route,
    #[serde(default)]
    log: Vec<LogEntryDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LogEntryDocument {
    #[serde(default)]
    log_id: LogId,
    date: String,
    duration: String,
    distance: f64,
    rating: f32,
    #[serde(default)]
    participant_count: u32,
    #[serde(default)]
    break_count: u32,
    #[serde(default)]
    energy_used: f64,
    #[serde(default)]
    vehicle: String,
    #[serde(default)]
    weather: String,
    #[serde(default)]
    notes: String,
}

impl TourDocument {
    fn from_tour(tour: &Tour) -> Result<Self, ConversionError> {
        let log: Vec<LogEntryDocument> = tour
            .log()
            .iter()
            .map(LogEntryDocument::from_entry)
            .collect::<Result<_, _>>()?;

        Ok(Self {
            tour_id: tour.id(),
            name: tour.name().to_string(),
            image_path: tour.image_path().map(str::to_string),
            custom_description: tour.description().to_string(),
            route: tour.route().clone(),
            log,
        })
    }

    fn into_tour(self) -> Result<Tour, ConversionError> {
        let entries: Vec<LogEntry> = self
            .log
            .into_iter()
            .map(LogEntryDocument::into_entry)
            .collect::<Result<_, _>>()?;

        Ok(Tour::from_parts(
            TourId::new(),
            &self.name,
            &self.custom_description,
            self.image_path,
            self.route,
            entries,
        )?)
    }
}

impl LogEntryDocument {
    fn from_entry(entry: &LogEntry) -> Result<Self, ConversionError> {
        let fields: LogEntryFields = entry.fields();
        let date: String = fields
            .date
            .format(&time::format_description::well_known::Rfc3339)
            .map_err(|err| ConversionError::InvalidValue {
                field: "Date",
                value: err.to_string(),
            })?;

        Ok(Self {
            log_id: entry.id(),
            date,
            duration: format_duration(fields.duration),
            distance: fields.distance,
            rating: fields.rating,
            participant_count: fields.participant_count,
            break_count: fields.break_count,
            energy_used: fields.energy_used,
            vehicle: fields.vehicle,
            weather: fields.weather,
            notes: fields.notes,
        })
    }

    fn into_entry(self) -> Result<LogEntry, ConversionError> {
        let date: OffsetDateTime =
            OffsetDateTime::parse(&self.date, &time::format_description::well_known::Rfc3339)
                .map_err(|_| ConversionError::InvalidValue {
                    field: "Date",
                    value: self.date.clone(),
                })?;
        let duration: Duration =
            parse_duration(&self.duration).ok_or_else(|| ConversionError::InvalidValue {
                field: "Duration",
                value: self.duration.clone(),
            })?;

        let fields: LogEntryFields = LogEntryFields {
            date,
            duration,
            distance: self.distance,
            rating: self.rating,
            participant_count: self.participant_count,
            break_count: self.break_count,
            energy_used: self.energy_used,
            vehicle: self.vehicle,
            weather: self.weather,
            notes: self.notes,
        };

        Ok(LogEntry::new(fields)?)
    }
}

/// Parses `[d.]hh:mm:ss[.fffffff]`.
fn parse_duration(text: &str) -> Option<Duration> {
    let mut parts = text.trim().splitn(3, ':');
    let head: &str = parts.next()?;
    let minutes: i64 = parts.next()?.parse().ok()?;
    let seconds_part: &str = parts.next()?;

    let (days, hours): (i64, i64) = match head.split_once('.') {
        Some((days, hours)) => (days.parse().ok()?, hours.parse().ok()?),
        None => (0, head.parse().ok()?),
    };

    let (whole, fraction): (&str, &str) =
        seconds_part.split_once('.').unwrap_or((seconds_part, ""));
    let seconds: i64 = whole.parse().ok()?;
    let nanoseconds: i64 = parse_fraction(fraction)?;

    if days < 0
        || !(0..24).contains(&hours)
        || !(0..60).contains(&minutes)
        || !(0..60).contains(&seconds)
    {
        return None;
    }

    let total: i64 = days
        .checked_mul(86_400)?
        .checked_add(hours * 3600 + minutes * 60 + seconds)?;
    Duration::seconds(total).checked_add(Duration::nanoseconds(nanoseconds))
}

/// Interprets up to nine fractional-second digits as nanoseconds.
fn parse_fraction(fraction: &str) -> Option<i64> {
    if fraction.is_empty() {
        return Some(0);
    }
    if !fraction.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    let digits: String = fraction.chars().take(9).collect();
    let scale: usize = 9 - digits.len();
    let value: i64 = digits.parse().ok()?;
    Some(value * 10_i64.pow(u32::try_from(scale).ok()?))
}

impl DataConverter for JsonConverter {
    fn preferred_file_extension(&self) -> &'static str {
        "json"
    }

    fn display_name(&self) -> &'static str {
        "JSON document"
    }

    fn read_tours(&self, reader: &mut dyn Read) -> Result<Vec<Tour>, ConversionError> {
        let documents: Vec<TourDocument> = serde_json::from_reader(reader)?;
        debug!("Read {} tour documents", documents.len());

        documents.into_iter().map(TourDocument::into_tour).collect()
    }

    fn write_tours(&self, writer: &mut dyn Write, tours: &[&Tour]) -> Result<(), ConversionError> {
        let documents: Vec<TourDocument> = tours
            .iter()
            .map(|tour| TourDocument::from_tour(tour))
            .collect::<Result<_, _>>()?;

        serde_json::to_writer_pretty(&mut *writer, &documents)?;
        writer.flush()?;
        debug!("Wrote {} tour documents", documents.len());
        Ok(())
    }
}
