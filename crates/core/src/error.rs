// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;
use tour_planner_domain::{DomainError, TourId};

/// Failures reported by a [`DatabaseClient`](crate::DatabaseClient) or its factory.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be opened or reached.
    #[error("Store connection failed: {0}")]
    Connection(String),

    /// Reading from the store failed.
    #[error("Store query failed: {0}")]
    Query(String),

    /// Writing to the store failed; nothing was committed.
    #[error("Store write failed: {0}")]
    Write(String),

    /// The store returned rows that do not form valid tours.
    #[error("Store returned invalid data: {0}")]
    InvalidData(String),
}

/// Failures reported by directions or map image providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider configuration cannot be used.
    #[error("Invalid provider configuration: {0}")]
    Configuration(String),

    /// A request to the provider failed.
    #[error("Provider request failed: {0}")]
    Request(String),

    /// Reading or writing cached provider files failed.
    #[error("Provider cache I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while producing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing the report failed.
    #[error("Report output failed: {0}")]
    Io(#[from] std::io::Error),

    /// The report could not be rendered.
    #[error("Report rendering failed: {0}")]
    Render(String),
}

/// Failures while reading or writing tours in an exchange format.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The document is not valid for this format.
    #[error("Malformed document: {0}")]
    Format(#[from] serde_json::Error),

    /// Reading or writing the underlying stream failed.
    #[error("Stream I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The document parsed but describes an invalid tour.
    #[error("Invalid tour in document: {0}")]
    InvalidTour(#[from] DomainError),

    /// A value could not be interpreted.
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// The document field.
        field: &'static str,
        /// The offending text.
        value: String,
    },
}

/// Errors returned by the [`DataManager`](crate::DataManager).
///
/// Collaborator errors are wrapped with the operation that triggered them
/// and never swallowed.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Another operation is still in flight.
    #[error("The data manager is busy")]
    Busy,

    /// The data manager has been disposed.
    #[error("The data manager has been disposed")]
    Disposed,

    /// The operation needs a configuration and none was loaded yet.
    #[error("The data manager has not been initialized")]
    NotInitialized,

    /// Directions or map image providers could not be created.
    #[error("Failed to initialize data providers: {0}")]
    ProviderInitialization(#[source] ProviderError),

    /// A store operation failed.
    #[error("Store operation '{operation}' failed: {source}")]
    Store {
        /// What the data manager was doing.
        operation: &'static str,
        /// The underlying failure.
        #[source]
        source: StoreError,
    },

    /// A provider operation failed.
    #[error("Provider operation '{operation}' failed: {source}")]
    Provider {
        /// What the data manager was doing.
        operation: &'static str,
        /// The underlying failure.
        #[source]
        source: ProviderError,
    },

    /// The directions provider found no route between the given locations.
    #[error("No route found from '{from}' to '{to}'")]
    RouteNotFound {
        /// Start location as requested.
        from: String,
        /// End location as requested.
        to: String,
    },

    /// No live tour has the given identity.
    #[error("Tour {0} not found")]
    TourNotFound(TourId),

    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),

    /// Import or export failed.
    #[error("Conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    /// Report generation failed.
    #[error("Report generation failed: {0}")]
    Report(#[from] ReportError),
}
