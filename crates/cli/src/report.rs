// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text reports.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tour_planner::{ReportError, ReportGenerator};
use tour_planner_domain::{
    Identifiable, Route, SummaryStatistics, Tour, TourStatistics, format_distance,
    format_duration,
};
use tracing::info;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

/// Writes reports as UTF-8 text files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReportGenerator;

impl TextReportGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders the report for one tour.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Render`] if a log date cannot be formatted.
    pub fn render_tour(tour: &Tour) -> Result<String, ReportError> {
        let mut out: String = String::new();
        let route: &Route = tour.route();

        push_line(&mut out, format_args!("{}", tour.name()))?;
        push_line(&mut out, format_args!("{}", "=".repeat(tour.name().chars().count())))?;
        push_line(&mut out, format_args!("TourId: {}", tour.id()))?;
        push_line(&mut out, format_args!("RouteId: {}", route.route_id))?;
        push_line(
            &mut out,
            format_args!("Route: {} -> {}", route.start_location, route.end_location),
        )?;
        push_line(
            &mut out,
            format_args!("Distance: {}", format_distance(route.total_distance())),
        )?;
        if let Some(image) = tour.image_path() {
            push_line(&mut out, format_args!("Map: {image}"))?;
        }

        if !tour.description().is_empty() {
            push_line(&mut out, format_args!("\nDescription\n{}", tour.description()))?;
        }

        push_line(&mut out, format_args!("\nSteps"))?;
        for (index, step) in route.steps.iter().enumerate() {
            push_line(
                &mut out,
                format_args!(
                    "{:>3}. {} ({})",
                    index + 1,
                    step.description,
                    format_distance(step.distance)
                ),
            )?;
        }

        let stats: TourStatistics = TourStatistics::from_tour(tour);
        push_line(
            &mut out,
            format_args!(
                "\nLog: {} trips, {}, {}",
                stats.trip_count,
                format_distance(stats.logged_distance),
                format_duration(stats.logged_duration)
            ),
        )?;
        if let Some(rating) = stats.mean_rating {
            push_line(&mut out, format_args!("Mean rating: {:.0}%", rating * 100.0))?;
        }
        for entry in tour.log().iter() {
            let date: String = entry
                .date()
                .format(DATE_FORMAT)
                .map_err(|e| ReportError::Render(e.to_string()))?;
            push_line(
                &mut out,
                format_args!(
                    "  {date}  {}  {}  {:.0}%  {}",
                    format_duration(entry.duration()),
                    format_distance(entry.distance()),
                    f64::from(entry.rating()) * 100.0,
                    entry.notes()
                ),
            )?;
        }

        Ok(out)
    }

    /// Renders the summary over `tours`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Render`] if the text cannot be assembled.
    pub fn render_summary(tours: &[&Tour]) -> Result<String, ReportError> {
        let stats: SummaryStatistics = SummaryStatistics::from_tours(tours);
        let mut out: String = String::new();

        push_line(&mut out, format_args!("Tour Summary"))?;
        push_line(&mut out, format_args!("============"))?;
        push_line(&mut out, format_args!("Tours: {}", stats.tour_count))?;
        push_line(&mut out, format_args!("Total steps: {}", stats.total_steps))?;
        push_line(&mut out, format_args!("Mean steps per tour: {:.2}", stats.mean_steps))?;
        push_line(
            &mut out,
            format_args!("Total distance: {}", format_distance(stats.total_distance)),
        )?;
        if let Some(name) = &stats.shortest_tour {
            push_line(&mut out, format_args!("Shortest tour: {name}"))?;
        }
        if let Some(name) = &stats.longest_tour {
            push_line(&mut out, format_args!("Longest tour: {name}"))?;
        }

        if !tours.is_empty() {
            push_line(&mut out, format_args!("\nTours"))?;
        }
        for tour in tours {
            push_line(
                &mut out,
                format_args!(
                    "  {}  {} -> {}  {}  {} trips",
                    tour.name(),
                    tour.route().start_location,
                    tour.route().end_location,
                    format_distance(tour.route().total_distance()),
                    tour.log().len()
                ),
            )?;
        }

        Ok(out)
    }
}

fn push_line(out: &mut String, line: std::fmt::Arguments<'_>) -> Result<(), ReportError> {
    out.write_fmt(line)
        .and_then(|()| out.write_char('\n'))
        .map_err(|e| ReportError::Render(e.to_string()))
}

impl ReportGenerator for TextReportGenerator {
    fn generate_tour_report(&self, tour: &Tour, path: &Path) -> Result<(), ReportError> {
        fs::write(path, Self::render_tour(tour)?)?;
        info!(tour_id = %tour.id(), "Wrote tour report to {}", path.display());
        Ok(())
    }

    fn generate_summary_report(&self, tours: &[&Tour], path: &Path) -> Result<(), ReportError> {
        fs::write(path, Self::render_summary(tours)?)?;
        info!(tours = tours.len(), "Wrote summary report to {}", path.display());
        Ok(())
    }
}
