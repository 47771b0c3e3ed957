//! HTTP server lifecycle: pool, optional migrations, serve, graceful shutdown.

use std::time::Duration;

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::{Environment, Settings};
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
    environment: Environment,
}

impl Server {
    pub fn new(settings: Settings, environment: Environment) -> Self {
        Self {
            settings,
            environment,
        }
    }

    /// Runs until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    /// - Pool construction or startup migration failures
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        let Settings {
            application,
            server,
            database,
            jwt,
            logger,
        } = self.settings;

        tracing::info!(
            app_name = %application.name,
            app_version = %application.version,
            environment = %self.environment,
            "Application starting"
        );
        tracing::info!(
            host = %server.host,
            port = server.port,
            request_timeout = server.request_timeout,
            "Server configuration loaded"
        );
        tracing::info!(
            max_connections = database.max_connections,
            min_connections = database.min_connections,
            connection_timeout = database.connection_timeout,
            auto_migrate = database.auto_migrate,
            "Database configuration loaded"
        );
        tracing::info!(
            level = %logger.level,
            console_enabled = logger.console.enabled,
            file_enabled = logger.file.enabled,
            "Logger configuration loaded"
        );
        tracing::info!(
            leeway = jwt.leeway,
            secret_configured = !jwt.secret.is_empty(),
            "JWT configuration loaded"
        );

        if database.auto_migrate {
            tracing::info!("Applying pending migrations...");
            let applied = run_pending_migrations(&database.url).await?;
            tracing::info!(count = applied.len(), migrations = ?applied, "Migrations applied");
        }

        tracing::info!("Initializing database connection pool...");
        let pool = establish_async_connection_pool(&database).await?;
        tracing::info!("Database connection pool initialized");

        let state = AppState::new(pool, jwt);
        let router = create_router(state, Duration::from_secs(server.request_timeout));

        let address = server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;
        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM. A handler that cannot be installed never
/// resolves, leaving the other one in charge.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
