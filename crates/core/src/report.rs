// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::Path;

use tour_planner_domain::Tour;

use crate::error::ReportError;

/// Renders tour reports to files.
pub trait ReportGenerator {
    /// Writes a report for one tour, including its route and log, to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the report could not be written.
    fn generate_tour_report(&self, tour: &Tour, path: &Path) -> Result<(), ReportError>;

    /// Writes an overview of all `tours` with aggregate statistics to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the report could not be written.
    fn generate_summary_report(&self, tours: &[&Tour], path: &Path) -> Result<(), ReportError>;
}
