// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application configuration.
//!
//! Configuration is a JSON document with one section per collaborator:
//!
//! ```json
//! {
//!   "directions_api": { "service_endpoint": "offline", "api_key": "" },
//!   "map_image_api": { "service_endpoint": "offline", "api_key": "" },
//!   "database": { "connection_string": "tours.db" }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Connection string that selects a private in-memory store.
pub const IN_MEMORY_CONNECTION: &str = ":memory:";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Errors while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid configuration document.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for one remote provider.
///
/// `Eq + Hash` so that factories can cache one client per distinct setting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApiClientConfig {
    /// Base URL of the service, or a provider-specific keyword.
    pub service_endpoint: String,
    /// API key sent with every request.
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiClientConfig {
    /// Creates settings for `service_endpoint` with no credentials.
    #[must_use]
    pub fn new(service_endpoint: &str) -> Self {
        Self {
            service_endpoint: service_endpoint.to_string(),
            api_key: String::new(),
            username: None,
            password: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

/// Settings for the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DbClientConfig {
    /// A file path, or `":memory:"` for an in-memory store.
    pub connection_string: String,
}

impl DbClientConfig {
    #[must_use]
    pub fn new(connection_string: &str) -> Self {
        Self {
            connection_string: connection_string.to_string(),
        }
    }

    /// Returns whether this selects an in-memory store.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.connection_string == IN_MEMORY_CONNECTION
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directions provider settings.
    pub directions_api: ApiClientConfig,
    /// Map image provider settings.
    pub map_image_api: ApiClientConfig,
    /// Store settings.
    pub database: DbClientConfig,
}

impl Config {
    /// Loads configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading configuration from {}", path.display());
        let contents: String = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parses configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is invalid.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }
}
