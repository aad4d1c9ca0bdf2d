// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a [`Tour`](crate::Tour).
///
/// A random UUID v4 assigned when the tour is created and never reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TourId(Uuid);

impl TourId {
    /// Generates a fresh random identity.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an identity read back from storage.
    #[must_use]
    pub const fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TourId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TourId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TourId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Identity of a [`LogEntry`](crate::LogEntry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogId(Uuid);

impl LogId {
    /// Generates a fresh random identity.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an identity read back from storage.
    #[must_use]
    pub const fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for LogId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LogId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// One maneuver along a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Step {
    /// Distance covered by this step, in kilometers.
    pub distance: f64,
    /// Human-readable instruction.
    pub description: String,
    /// Optional icon reference supplied by the directions provider.
    #[serde(default)]
    pub icon_path: Option<String>,
}

impl Step {
    /// Creates a step without an icon.
    #[must_use]
    pub fn new(distance: f64, description: &str) -> Self {
        Self {
            distance,
            description: description.to_string(),
            icon_path: None,
        }
    }
}

/// A route as returned by a directions provider.
///
/// Routes are values: a tour's route never changes after the tour is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Route {
    /// Provider-assigned identifier, also used to name cached map images.
    pub route_id: String,
    /// Where the route starts.
    pub start_location: String,
    /// Where the route ends.
    pub end_location: String,
    /// Maneuvers in travel order.
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Distance reported by the provider, when it differs from the step sum.
    #[serde(default)]
    pub total_distance: Option<f64>,
}

impl Route {
    /// Creates a route with no steps.
    #[must_use]
    pub fn new(route_id: &str, start_location: &str, end_location: &str) -> Self {
        Self {
            route_id: route_id.to_string(),
            start_location: start_location.to_string(),
            end_location: end_location.to_string(),
            steps: Vec::new(),
            total_distance: None,
        }
    }

    /// Returns the provider-reported distance, or the sum of step distances.
    #[must_use]
    pub fn total_distance(&self) -> f64 {
        self.total_distance
            .unwrap_or_else(|| self.steps.iter().map(|step| step.distance).sum())
    }

    /// Returns the number of maneuvers.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}
