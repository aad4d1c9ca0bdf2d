// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tour_planner::StoreError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Stored rows could not be turned back into tours.
    ReconstructionError(String),
    /// A value could not be converted to its column representation.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested resource was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::ReconstructionError(msg) => write!(f, "Tour reconstruction error: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::DatabaseConnectionFailed(_)
            | PersistenceError::MigrationFailed(_)
            | PersistenceError::InitializationError(_)
            | PersistenceError::ForeignKeyEnforcementNotEnabled => {
                Self::Connection(err.to_string())
            }
            PersistenceError::ReconstructionError(_) => Self::InvalidData(err.to_string()),
            PersistenceError::DatabaseError(_)
            | PersistenceError::QueryFailed(_)
            | PersistenceError::SerializationError(_)
            | PersistenceError::NotFound(_) => Self::Query(err.to_string()),
        }
    }
}

impl PersistenceError {
    /// Converts a failure raised while writing into a [`StoreError`].
    ///
    /// Anything that is not a connection problem becomes [`StoreError::Write`].
    #[must_use]
    pub fn into_write_error(self) -> StoreError {
        match self {
            Self::DatabaseConnectionFailed(_)
            | Self::MigrationFailed(_)
            | Self::InitializationError(_)
            | Self::ForeignKeyEnforcementNotEnabled => StoreError::from(self),
            _ => StoreError::Write(self.to_string()),
        }
    }
}
