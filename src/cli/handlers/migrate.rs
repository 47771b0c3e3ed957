//! `migrate` command.

use crate::config::Settings;
use crate::db;
use crate::error::AppResult;

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Lists pending migrations with `dry_run`, reverts `rollback` steps when
    /// given, and otherwise applies everything pending.
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;
        let url = self.config.database.url.as_str();

        if dry_run {
            let pending = db::pending_migrations(url).await?;
            report("Pending", &pending);
        } else if let Some(steps) = rollback {
            let reverted = db::revert_migrations(url, steps).await?;
            tracing::info!(count = reverted.len(), "Migrations reverted");
            report("Reverted", &reverted);
        } else {
            let applied = db::run_pending_migrations(url).await?;
            tracing::info!(count = applied.len(), "Migrations applied");
            report("Applied", &applied);
        }
        Ok(())
    }
}

fn report(verb: &str, migrations: &[String]) {
    if migrations.is_empty() {
        println!("{} migrations: none, database is up to date", verb);
        return;
    }
    println!("{} migrations ({}):", verb, migrations.len());
    for migration in migrations {
        println!("  - {}", migration);
    }
}
