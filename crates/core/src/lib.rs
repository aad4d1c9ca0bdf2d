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

mod config;
mod converter;
mod data_manager;
mod error;
mod provider;
mod report;
mod store;

#[cfg(test)]
mod tests;

pub use config::{ApiClientConfig, Config, ConfigError, DbClientConfig, IN_MEMORY_CONNECTION};
pub use converter::{DataConverter, JsonConverter};
pub use data_manager::{DataManager, ManagerState};
pub use error::{ConversionError, CoreError, ProviderError, ReportError, StoreError};
pub use provider::{DataProviderFactory, DirectionsProvider, MapImageProvider, ProviderCache};
pub use report::ReportGenerator;
pub use store::{DatabaseClient, DatabaseClientFactory};
