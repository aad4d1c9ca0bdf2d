// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use num_traits::ToPrimitive;
use time::Duration;

use crate::tour::Tour;

/// Aggregate figures over a set of tours, as shown in a summary report.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStatistics {
    /// Number of tours summarized.
    pub tour_count: usize,
    /// Sum of route steps over all tours.
    pub total_steps: usize,
    /// Mean number of route steps per tour. Zero when there are no tours.
    pub mean_steps: f64,
    /// Name of the tour with the shortest route.
    pub shortest_tour: Option<String>,
    /// Name of the tour with the longest route.
    pub longest_tour: Option<String>,
    /// Sum of route distances, in kilometers.
    pub total_distance: f64,
}

impl SummaryStatistics {
    /// Computes summary figures for `tours`.
    ///
    /// Ties for shortest and longest resolve to the first tour encountered.
    #[must_use]
    pub fn from_tours(tours: &[&Tour]) -> Self {
        let tour_count: usize = tours.len();
        let total_steps: usize = tours.iter().map(|tour| tour.route().step_count()).sum();
        let total_distance: f64 = tours.iter().map(|tour| tour.route().total_distance()).sum();

        let mean_steps: f64 = if tour_count == 0 {
            0.0
        } else {
            total_steps.to_f64().unwrap_or(0.0) / tour_count.to_f64().unwrap_or(1.0)
        };

        let mut shortest: Option<&Tour> = None;
        let mut longest: Option<&Tour> = None;
        for &tour in tours {
            let distance: f64 = tour.route().total_distance();
            if shortest.is_none_or(|best| distance < best.route().total_distance()) {
                shortest = Some(tour);
            }
            if longest.is_none_or(|best| distance > best.route().total_distance()) {
                longest = Some(tour);
            }
        }

        Self {
            tour_count,
            total_steps,
            mean_steps,
            shortest_tour: shortest.map(|tour| tour.name().to_string()),
            longest_tour: longest.map(|tour| tour.name().to_string()),
            total_distance,
        }
    }
}

/// Figures derived from one tour's trip log.
#[derive(Debug, Clone, PartialEq)]
pub struct TourStatistics {
    /// Number of live log entries.
    pub trip_count: usize,
    /// Sum of logged distances, in kilometers.
    pub logged_distance: f64,
    /// Sum of logged durations.
    pub logged_duration: Duration,
    /// Mean rating over all trips, if any were logged.
    pub mean_rating: Option<f64>,
}

impl TourStatistics {
    /// Computes log figures for `tour`.
    #[must_use]
    pub fn from_tour(tour: &Tour) -> Self {
        let trip_count: usize = tour.log().len();
        let logged_distance: f64 = tour.log().iter().map(crate::LogEntry::distance).sum();
        let logged_duration: Duration = tour
            .log()
            .iter()
            .fold(Duration::ZERO, |total, entry| total + entry.duration());

        let mean_rating: Option<f64> = if trip_count == 0 {
            None
        } else {
            let rating_sum: f64 = tour
                .log()
                .iter()
                .map(|entry| f64::from(entry.rating()))
                .sum();
            Some(rating_sum / trip_count.to_f64().unwrap_or(1.0))
        };

        Self {
            trip_count,
            logged_distance,
            logged_duration,
            mean_rating,
        }
    }
}

/// Formats a distance in kilometers for display.
///
/// Distances below one kilometer are shown in whole meters (`"850 m"`),
/// everything else with two decimals (`"12.35 km"`).
#[must_use]
pub fn format_distance(kilometers: f64) -> String {
    if kilometers < 1.0 {
        format!("{:.0} m", kilometers * 1000.0)
    } else {
        format!("{kilometers:.2} km")
    }
}

/// Formats a duration as `HH:MM:SS`, prefixed by `D.` when it spans days.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let days: i64 = duration.whole_days();
    let hours: i64 = duration.whole_hours() % 24;
    let minutes: i64 = duration.whole_minutes() % 60;
    let seconds: i64 = duration.whole_seconds() % 60;

    if days == 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{days}.{hours:02}:{minutes:02}:{seconds:02}")
    }
}
