//! Command-line interface: parsing, configuration merging and dispatch.

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use anyhow::Context;

use crate::config::{Environment as AppEnvironment, Settings};
use crate::logger::init_logger;

/// Loads the layered configuration and applies the CLI overrides.
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<(Settings, AppEnvironment)> {
    let merger = ConfigurationMerger::from_cli(cli).context("Failed to load configuration")?;
    let settings = merger
        .merge_cli_args(cli)
        .context("Invalid configuration")?;
    Ok((settings, merger.environment()))
}

pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .context("Invalid logger configuration")?;
    init_logger(logger_config).context("Failed to initialize logger")?;
    Ok(())
}
