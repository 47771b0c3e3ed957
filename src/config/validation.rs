//! Configuration validation logic
//!
//! Each section validates itself; `Settings::validate` reports the first
//! failure.

use crate::config::error::ConfigError;
use crate::config::settings::{
    DatabaseConfig, FileSettings, JwtConfig, LoggerSettings, ServerConfig, Settings,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

const VALID_DATABASE_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

/// Minimum HS256 secret length accepted at startup
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// # Validation Rules
    /// - URL must be a non-empty PostgreSQL connection string
    /// - Pool sizes must be positive with min not exceeding max
    /// - Connection timeout must be positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Set database.url or WISHSTORE_DATABASE__URL.",
            ));
        }

        if !VALID_DATABASE_SCHEMES
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
        {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl JwtConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::validation(
                "jwt.secret",
                "JWT secret cannot be empty",
            ));
        }

        if self.secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::validation(
                "jwt.secret",
                format!(
                    "JWT secret should be at least {} characters",
                    MIN_JWT_SECRET_LENGTH
                ),
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled",
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.jwt.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.database.url = "postgres://localhost/wishstore".to_string();
        settings.jwt.secret = "a".repeat(MIN_JWT_SECRET_LENGTH);
        settings
    }

    fn field_of(result: Result<(), ConfigError>) -> String {
        result
            .unwrap_err()
            .field()
            .map(str::to_string)
            .unwrap_or_default()
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_server_port_zero() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate()), "server.port");
    }

    #[test]
    fn test_server_request_timeout_zero() {
        let config = ServerConfig {
            request_timeout: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate()), "server.request_timeout");
    }

    #[test]
    fn test_database_url_required() {
        assert_eq!(field_of(DatabaseConfig::default().validate()), "database.url");
    }

    #[test]
    fn test_database_url_scheme() {
        let config = DatabaseConfig {
            url: "mysql://localhost/wishstore".to_string(),
            ..Default::default()
        };
        assert_eq!(field_of(config.validate()), "database.url");

        let config = DatabaseConfig {
            url: "postgresql://localhost/wishstore".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_min_exceeds_max() {
        let config = DatabaseConfig {
            url: "postgres://localhost/wishstore".to_string(),
            max_connections: 2,
            min_connections: 5,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate()), "database.min_connections");
    }

    #[test]
    fn test_jwt_secret_rules() {
        assert_eq!(field_of(JwtConfig::default().validate()), "jwt.secret");

        let config = JwtConfig {
            secret: "short".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("at least 32 characters"));
    }

    #[test]
    fn test_logger_level_and_outputs() {
        let mut settings = valid_settings();
        settings.logger.level = "verbose".to_string();
        assert_eq!(field_of(settings.validate()), "logger.level");

        let mut settings = valid_settings();
        settings.logger.console.enabled = false;
        assert_eq!(field_of(settings.validate()), "logger");
    }

    #[test]
    fn test_file_logging_requires_path() {
        let mut settings = valid_settings();
        settings.logger.file.enabled = true;
        settings.logger.file.path = "  ".to_string();
        assert_eq!(field_of(settings.validate()), "logger.file.path");
    }
}
