// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod change_tracker;
mod collection;
mod error;
mod list;
mod log_entry;
mod statistics;
mod tour;
mod tracking;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use change_tracker::ChangeTracker;
pub use collection::ChangeTrackingCollection;
pub use error::DomainError;
pub use list::{ChangeState, ChangeTrackingList};
pub use log_entry::{LogEntry, LogEntryFields};
pub use statistics::{SummaryStatistics, TourStatistics, format_distance, format_duration};
pub use tour::Tour;
pub use tracking::{ChangeTracking, Identifiable, TrackedEntity};
pub use types::{LogId, Route, Step, TourId};
pub use validation::{
    MAX_LABEL_LENGTH, MAX_NOTES_LENGTH, validate_length, validate_non_negative, validate_rating,
    validate_required,
};
