//! `serve` command.

use crate::config::{Environment, Settings};
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
    environment: Environment,
}

impl ServeCommandHandler {
    pub fn new(config: Settings, environment: Environment) -> Self {
        Self {
            config,
            environment,
        }
    }

    /// Starts the server, or with `dry_run` only reports the merged
    /// configuration.
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        self.config.validate()?;
        if dry_run {
            println!("{}", self.summary());
            return Ok(());
        }
        Server::new(self.config, self.environment).run().await
    }

    /// Human-readable summary without secrets.
    pub fn summary(&self) -> String {
        let c = &self.config;
        format!(
            "Configuration is valid ({environment})\n  \
             server:   {address} (request timeout {timeout}s)\n  \
             database: pool {min}..{max}, auto_migrate={auto_migrate}\n  \
             logger:   level={level} console={console} file={file}",
            environment = self.environment,
            address = c.server.address(),
            timeout = c.server.request_timeout,
            min = c.database.min_connections,
            max = c.database.max_connections,
            auto_migrate = c.database.auto_migrate,
            level = c.logger.level,
            console = c.logger.console.enabled,
            file = c.logger.file.enabled,
        )
    }
}
