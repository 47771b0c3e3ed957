//! Logger setup on top of `tracing-subscriber`
//!
//! Console output (colored only on a terminal) and an optional file sink in
//! `full`, `compact` or `json` format.

pub mod config;
pub mod error;
pub(crate) mod writer;

pub use config::*;
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use writer::LogFileWriter;

/// Install the global subscriber for the given configuration.
///
/// `RUST_LOG` takes precedence over `config.level` when set.
pub fn init_logger(config: LoggerConfig) -> Result<(), LoggerError> {
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| LoggerError::config(e.to_string()))?;

    match (config.console.enabled, config.file.enabled) {
        (true, true) => init_both(&config, filter),
        (true, false) => init_console_only(&config.console, filter),
        (false, true) => init_file_only(&config.file, filter),
        (false, false) => Err(LoggerError::config(
            "At least one output (console or file) must be enabled",
        )),
    }
}

fn use_ansi(console: &ConsoleConfig) -> bool {
    console.colored && std::io::stdout().is_terminal()
}

fn console_layer<S>(console: &ConsoleConfig) -> fmt::Layer<S> {
    fmt::layer().with_ansi(use_ansi(console)).with_target(true)
}

fn init_console_only(config: &ConsoleConfig, filter: EnvFilter) -> Result<(), LoggerError> {
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(use_ansi(config)).with_target(true))
        .try_init()
        .map_err(|e| LoggerError::init(e.to_string()))
}

fn init_file_only(config: &FileConfig, filter: EnvFilter) -> Result<(), LoggerError> {
    let writer = LogFileWriter::new(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Full => registry
            .with(fmt::layer().with_ansi(false).with_writer(writer))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().with_ansi(false).compact().with_writer(writer))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().with_ansi(false).json().with_writer(writer))
            .try_init(),
    };
    result.map_err(|e| LoggerError::init(e.to_string()))
}

fn init_both(config: &LoggerConfig, filter: EnvFilter) -> Result<(), LoggerError> {
    let writer = LogFileWriter::new(&config.file)?;

    // The file layer goes first so console ANSI codes do not leak into span
    // fields written to the file (tokio-rs/tracing#1817).
    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.file.format {
        LogFormat::Full => registry
            .with(fmt::layer().with_ansi(false).with_writer(writer))
            .with(console_layer(&config.console))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().with_ansi(false).compact().with_writer(writer))
            .with(console_layer(&config.console))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().with_ansi(false).json().with_writer(writer))
            .with(console_layer(&config.console))
            .try_init(),
    };
    result.map_err(|e| LoggerError::init(e.to_string()))
}
