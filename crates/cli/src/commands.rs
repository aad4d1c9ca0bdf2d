// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tour commands shared by one-shot invocations and the interactive shell.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;
use color_eyre::Result;
use color_eyre::eyre::{Context, bail, eyre};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};
use tour_planner::DataManager;
use tour_planner_domain::{
    ChangeTracking, Identifiable, LogEntry, LogEntryFields, Tour, TourId, format_distance,
    format_duration,
};
use tracing::debug;

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// List all tours
    #[command(visible_alias = "ls")]
    List,

    /// Show a tour with its route and log
    Show {
        /// Tour id or name
        tour: String,
    },

    /// Create a tour between two locations
    #[command(visible_alias = "add")]
    AddTour {
        /// Name of the new tour
        name: String,
        /// Start location
        #[arg(long)]
        from: String,
        /// End location
        #[arg(long)]
        to: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Rename a tour or change its description
    EditTour {
        /// Tour id or name
        tour: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Remove a tour
    #[command(visible_alias = "rm")]
    RemoveTour {
        /// Tour id or name
        tour: String,
    },

    /// Record a trip on a tour
    AddLog {
        /// Tour id or name
        tour: String,
        /// When the trip started: RFC 3339 or YYYY-MM-DD (defaults to now)
        #[arg(long, value_parser = parse_date)]
        date: Option<OffsetDateTime>,
        /// Trip duration: hh:mm[:ss] or whole minutes
        #[arg(long, value_parser = parse_duration)]
        duration: Duration,
        /// Distance in kilometers
        #[arg(long)]
        distance: f64,
        /// Rating between 0 and 1
        #[arg(long, default_value_t = 0.5)]
        rating: f32,
        #[arg(long, default_value_t = 1)]
        participants: u32,
        #[arg(long, default_value_t = 0)]
        breaks: u32,
        /// Energy used in kilocalories
        #[arg(long, default_value_t = 0.0)]
        energy: f64,
        #[arg(long, default_value = "")]
        vehicle: String,
        #[arg(long, default_value = "")]
        weather: String,
        #[arg(long, default_value = "")]
        notes: String,
        /// Insert at this log position, starting at 1, instead of appending
        #[arg(long)]
        position: Option<usize>,
    },

    /// Remove a trip from a tour's log
    RemoveLog {
        /// Tour id or name
        tour: String,
        /// Position in the log, starting at 1
        position: usize,
    },

    /// Import tours from a JSON file
    Import {
        path: PathBuf,
        /// Remove all current tours first
        #[arg(long)]
        replace: bool,
    },

    /// Export all tours to a JSON file
    Export { path: PathBuf },

    /// Write a report for one tour
    Report {
        /// Tour id or name
        tour: String,
        path: PathBuf,
    },

    /// Write a summary report over all tours
    Summary { path: PathBuf },

    /// Delete cached routes and map images no tour uses
    CleanCache,

    /// Write pending changes to the store
    Sync,

    /// Show whether there are unsaved changes
    Status,

    /// Drop pending changes and reload tours from the store
    Discard,
}

impl Command {
    /// Runs the command against `manager`, writing user-facing output to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tour is unknown, the input is invalid or a
    /// data manager operation fails.
    #[allow(clippy::too_many_lines)]
    pub fn run(self, manager: &mut DataManager, out: &mut dyn Write) -> Result<()> {
        debug!("Running {:?}", self);
        match self {
            Self::List => list_tours(manager, out),
            Self::Show { tour } => {
                let tour: &Tour = find_tour(manager, &tour)?;
                show_tour(tour, out)
            }
            Self::AddTour {
                name,
                from,
                to,
                description,
            } => {
                let id: TourId = manager.create_tour(&name, &description, &from, &to)?;
                writeln!(out, "Created tour {id}")?;
                Ok(())
            }
            Self::EditTour {
                tour,
                name,
                description,
            } => edit_tour(manager, &tour, name.as_deref(), description.as_deref(), out),
            Self::RemoveTour { tour } => {
                let id: TourId = find_tour(manager, &tour)?.id();
                manager.remove_tour(id)?;
                writeln!(out, "Removed tour {id}")?;
                Ok(())
            }
            Self::AddLog {
                tour,
                date,
                duration,
                distance,
                rating,
                participants,
                breaks,
                energy,
                vehicle,
                weather,
                notes,
                position,
            } => {
                let fields: LogEntryFields = LogEntryFields {
                    date: date.unwrap_or_else(OffsetDateTime::now_utc),
                    duration,
                    distance,
                    rating,
                    participant_count: participants,
                    break_count: breaks,
                    energy_used: energy,
                    vehicle,
                    weather,
                    notes,
                };
                add_log(manager, &tour, fields, position, out)
            }
            Self::RemoveLog { tour, position } => remove_log(manager, &tour, position, out),
            Self::Import { path, replace } => {
                let file: File = File::open(&path)
                    .wrap_err_with(|| format!("Failed to open {}", path.display()))?;
                let count: usize = manager.import_tours(&mut BufReader::new(file), replace)?;
                writeln!(out, "Imported {count} tours")?;
                Ok(())
            }
            Self::Export { path } => {
                let file: File = File::create(&path)
                    .wrap_err_with(|| format!("Failed to create {}", path.display()))?;
                let mut writer: BufWriter<File> = BufWriter::new(file);
                let count: usize = manager.export_tours(&mut writer)?;
                writer
                    .flush()
                    .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
                writeln!(out, "Exported {count} tours to {}", path.display())?;
                Ok(())
            }
            Self::Report { tour, path } => {
                let id: TourId = find_tour(manager, &tour)?.id();
                manager.generate_tour_report(id, &path)?;
                writeln!(out, "Wrote report to {}", path.display())?;
                Ok(())
            }
            Self::Summary { path } => {
                manager.generate_summary_report(&path)?;
                writeln!(out, "Wrote summary to {}", path.display())?;
                Ok(())
            }
            Self::CleanCache => {
                manager.clean_cache()?;
                writeln!(out, "Cache cleaned")?;
                Ok(())
            }
            Self::Sync => {
                let pending: bool = manager.has_pending_changes();
                manager.synchronize_tours()?;
                if pending {
                    writeln!(out, "Changes saved")?;
                } else {
                    writeln!(out, "Nothing to save")?;
                }
                Ok(())
            }
            Self::Status => {
                let count: usize = manager.tours().count();
                let pending: &str = if manager.has_pending_changes() {
                    "unsaved changes"
                } else {
                    "no unsaved changes"
                };
                writeln!(out, "{count} tours, {pending} ({})", manager.state())?;
                Ok(())
            }
            Self::Discard => {
                manager.reinitialize(None)?;
                writeln!(out, "Reloaded {} tours", manager.tours().count())?;
                Ok(())
            }
        }
    }
}

/// Resolves a tour by id, or by name ignoring case.
///
/// # Errors
///
/// Returns an error if no tour or more than one tour matches.
pub fn find_tour<'a>(manager: &'a DataManager, reference: &str) -> Result<&'a Tour> {
    if let Ok(id) = reference.parse::<TourId>() {
        return manager
            .tour(id)
            .ok_or_else(|| eyre!("No tour with id {id}"));
    }

    let mut matches = manager
        .tours()
        .filter(|tour| tour.name().eq_ignore_ascii_case(reference.trim()));
    match (matches.next(), matches.next()) {
        (Some(tour), None) => Ok(tour),
        (None, _) => bail!("No tour named '{reference}'"),
        (Some(_), Some(_)) => bail!("More than one tour is named '{reference}', use its id"),
    }
}

fn sorted_tours(manager: &DataManager) -> Vec<&Tour> {
    let mut tours: Vec<&Tour> = manager.tours().collect();
    tours.sort_by(|a, b| {
        a.name()
            .to_lowercase()
            .cmp(&b.name().to_lowercase())
            .then_with(|| a.id().cmp(&b.id()))
    });
    tours
}

fn list_tours(manager: &DataManager, out: &mut dyn Write) -> Result<()> {
    let tours: Vec<&Tour> = sorted_tours(manager);
    if tours.is_empty() {
        writeln!(out, "No tours")?;
        return Ok(());
    }

    for tour in tours {
        let marker: char = if tour.is_changed() { '*' } else { ' ' };
        writeln!(
            out,
            "{marker} {}  {}  {} -> {}  {}  {} trips",
            tour.id(),
            tour.name(),
            tour.route().start_location,
            tour.route().end_location,
            format_distance(tour.route().total_distance()),
            tour.log().len()
        )?;
    }
    Ok(())
}

fn show_tour(tour: &Tour, out: &mut dyn Write) -> Result<()> {
    let report: String = crate::report::TextReportGenerator::render_tour(tour)?;
    write!(out, "{report}")?;
    Ok(())
}

fn edit_tour(
    manager: &mut DataManager,
    reference: &str,
    name: Option<&str>,
    description: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    let id: TourId = find_tour(manager, reference)?.id();
    let tour: &mut Tour = manager
        .tour_mut(id)
        .ok_or_else(|| eyre!("No tour with id {id}"))?;

    let mut changed: bool = false;
    if let Some(name) = name {
        changed |= tour.set_name(name)?;
    }
    if let Some(description) = description {
        changed |= tour.set_description(description)?;
    }

    if changed {
        writeln!(out, "Updated tour {id}")?;
    } else {
        writeln!(out, "Tour {id} unchanged")?;
    }
    Ok(())
}

fn add_log(
    manager: &mut DataManager,
    reference: &str,
    fields: LogEntryFields,
    position: Option<usize>,
    out: &mut dyn Write,
) -> Result<()> {
    if position == Some(0) {
        bail!("Log positions start at 1");
    }
    let id: TourId = find_tour(manager, reference)?.id();
    let entry: LogEntry = LogEntry::new(fields)?;
    let tour: &mut Tour = manager
        .tour_mut(id)
        .ok_or_else(|| eyre!("No tour with id {id}"))?;

    let summary: String = format!(
        "{} over {}",
        format_duration(entry.duration()),
        format_distance(entry.distance())
    );
    match position {
        Some(position) => tour.log_mut().insert(position - 1, entry)?,
        None => tour.log_mut().push(entry)?,
    }

    writeln!(out, "Logged {summary} on '{}'", tour.name())?;
    Ok(())
}

fn remove_log(
    manager: &mut DataManager,
    reference: &str,
    position: usize,
    out: &mut dyn Write,
) -> Result<()> {
    let id: TourId = find_tour(manager, reference)?.id();
    let tour: &mut Tour = manager
        .tour_mut(id)
        .ok_or_else(|| eyre!("No tour with id {id}"))?;

    if position == 0 {
        bail!("Log positions start at 1");
    }
    tour.log_mut().remove_at(position - 1)?;
    writeln!(out, "Removed trip {position} from '{}'", tour.name())?;
    Ok(())
}

/// Parses an RFC 3339 timestamp or a plain `YYYY-MM-DD` date at midnight UTC.
///
/// # Errors
///
/// Returns a message if `text` is neither.
pub fn parse_date(text: &str) -> std::result::Result<OffsetDateTime, String> {
    if let Ok(date) = OffsetDateTime::parse(text, &Rfc3339) {
        return Ok(date);
    }
    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map(|date| date.midnight().assume_utc())
        .map_err(|_| format!("'{text}' is not an RFC 3339 timestamp or YYYY-MM-DD date"))
}

/// Parses `hh:mm`, `hh:mm:ss` or a whole number of minutes.
///
/// # Errors
///
/// Returns a message if `text` is none of those.
pub fn parse_duration(text: &str) -> std::result::Result<Duration, String> {
    let invalid = || format!("'{text}' is not a duration (hh:mm[:ss] or minutes)");
    let parts: Vec<&str> = text.trim().split(':').collect();
    let numbers: Vec<i64> = parts
        .iter()
        .map(|part| part.parse::<i64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| invalid())?;

    if numbers.iter().any(|number| *number < 0) {
        return Err(invalid());
    }

    let seconds: Option<i64> = match numbers.as_slice() {
        [minutes] => minutes.checked_mul(60),
        [hours, minutes] if *minutes < 60 => hours
            .checked_mul(3600)
            .and_then(|seconds| seconds.checked_add(minutes * 60)),
        [hours, minutes, seconds] if *minutes < 60 && *seconds < 60 => hours
            .checked_mul(3600)
            .and_then(|total| total.checked_add(minutes * 60 + seconds)),
        _ => None,
    };
    seconds.map(Duration::seconds).ok_or_else(invalid)
}
