//! Applies CLI overrides on top of the loaded configuration.
//!
//! Precedence, lowest first: configuration files, `WISHSTORE_*` variables,
//! global flags (`--verbose`, `--quiet`), subcommand flags.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Environment, Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
    environment: Environment,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings, environment: Environment) -> Self {
        Self {
            base_config,
            environment,
        }
    }

    /// Loads the configuration selected by `--config` and `--env`, without
    /// validating it yet.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }
        if let Some(ref path) = cli.config {
            loader = loader.with_config_file(path);
        }

        let environment = loader.environment();
        Ok(Self::new(loader.load_unvalidated()?, environment))
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the validated settings with every CLI override applied.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if let Some(level) = cli.global_log_level() {
            config.logger.level = level.as_str().to_string();
        }

        if let Some(Commands::Serve {
            ref host,
            port,
            log_level,
            ..
        }) = cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn base() -> Settings {
        let mut settings = Settings::default();
        settings.database.url = "postgres://localhost/wishstore".to_string();
        settings.jwt.secret = "0123456789abcdef0123456789abcdef".to_string();
        settings
    }

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(base(), Environment::Test).merge_cli_args(&cli)
    }

    #[test]
    fn test_no_overrides_keeps_base() {
        assert_eq!(merge(&["wishstore"]).unwrap(), base());
    }

    #[test]
    fn test_serve_flags_override_files() {
        let settings = merge(&["wishstore", "serve", "--host", "0.0.0.0", "--port", "9000"]).unwrap();
        assert_eq!(settings.server.address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_subcommand_log_level_beats_global_flag() {
        let settings = merge(&["wishstore", "--quiet", "serve", "--log-level", "debug"]).unwrap();
        assert_eq!(settings.logger.level, "debug");

        let settings = merge(&["wishstore", "--verbose"]).unwrap();
        assert_eq!(settings.logger.level, "debug");
    }

    #[test]
    fn test_merged_settings_are_validated() {
        let cli = Cli::try_parse_from(["wishstore"]).unwrap();
        let mut invalid = base();
        invalid.jwt.secret = "short".to_string();

        let err = ConfigurationMerger::new(invalid, Environment::Test)
            .merge_cli_args(&cli)
            .unwrap_err();
        assert_eq!(err.field(), Some("jwt.secret"));
    }
}
