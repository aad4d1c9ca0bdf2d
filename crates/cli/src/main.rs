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
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;
mod providers;
mod report;
mod shell;

#[cfg(test)]
mod tests;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use color_eyre::Result;
use color_eyre::eyre::Context;
use tour_planner::{
    ApiClientConfig, Config, CoreError, DataManager, DbClientConfig, JsonConverter,
};
use tour_planner_persistence::SqliteDatabaseFactory;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info};
use tracing_log::AsTrace;

use crate::commands::Command;
use crate::providers::{OFFLINE_ENDPOINT, OfflineProviderFactory};
use crate::report::TextReportGenerator;

/// Configuration file looked up in the working directory when `--config`
/// is not given.
const DEFAULT_CONFIG_FILE: &str = "tour-planner.json";

const DEFAULT_DATABASE: &str = "tours.db";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();
    init_tracing(args.log_level());

    if let Err(err) = args.run() {
        error!("{err}");
        return Err(err);
    }
    Ok(())
}

/// Uses `RUST_LOG` when set, otherwise the verbosity flags.
fn init_tracing(level: LevelFilter) {
    let builder = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .without_time();

    if std::env::var_os("RUST_LOG").is_some() {
        builder
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    } else {
        builder.with_max_level(level).init();
    }
}

/// Tour Planner - plan tours and keep a log of every trip
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database to use instead of the configured one (a file path or ":memory:")
    #[arg(short, long)]
    database: Option<String>,

    /// Directory for cached map images
    #[arg(long, default_value = "map-cache")]
    image_cache: PathBuf,

    #[command(subcommand)]
    command: TopLevel,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

#[derive(Clone, Debug, Subcommand)]
enum TopLevel {
    /// Start an interactive shell; changes are saved with `sync`
    Shell,

    #[command(flatten)]
    Tours(Command),
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }

    fn load_config(&self) -> Result<Config> {
        let mut config: Config = match &self.config {
            Some(path) => Config::load(path)
                .wrap_err_with(|| format!("Failed to load {}", path.display()))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Config::load(Path::new(DEFAULT_CONFIG_FILE))
                    .wrap_err_with(|| format!("Failed to load {DEFAULT_CONFIG_FILE}"))?
            }
            None => default_config(),
        };

        if let Some(database) = &self.database {
            config.database = DbClientConfig::new(database);
        }
        Ok(config)
    }

    fn run(self) -> Result<()> {
        let config: Config = self.load_config()?;
        info!("Using database at: {}", config.database.connection_string);

        let mut manager: DataManager =
            build_manager(config, &self.image_cache).wrap_err("Failed to open tour data")?;
        let stdout = io::stdout();
        let mut out = stdout.lock();

        let result: Result<()> = match self.command {
            TopLevel::Shell => shell::run_shell(&mut manager, &mut io::stdin().lock(), &mut out),
            TopLevel::Tours(command) => run_once(&mut manager, command, &mut out),
        };

        manager.dispose();
        result
    }
}

/// Runs one command and saves whatever it changed.
fn run_once(manager: &mut DataManager, command: Command, out: &mut dyn Write) -> Result<()> {
    command.run(manager, out)?;
    if manager.has_pending_changes() {
        debug!("Saving changes");
        manager
            .synchronize_tours()
            .wrap_err("Failed to save changes")?;
    }
    Ok(())
}

/// Configuration used when no file is available: offline providers and a
/// database file in the working directory.
fn default_config() -> Config {
    Config {
        directions_api: ApiClientConfig::new(OFFLINE_ENDPOINT),
        map_image_api: ApiClientConfig::new(OFFLINE_ENDPOINT),
        database: DbClientConfig::new(DEFAULT_DATABASE),
    }
}

/// Wires the offline providers, the `SQLite` store, text reports and JSON
/// conversion into an initialized data manager.
fn build_manager(config: Config, image_dir: &Path) -> std::result::Result<DataManager, CoreError> {
    DataManager::create(
        config,
        Box::new(OfflineProviderFactory::new(image_dir)),
        Box::new(SqliteDatabaseFactory::new()),
        Box::new(TextReportGenerator::new()),
        Box::new(JsonConverter::new()),
    )
}
