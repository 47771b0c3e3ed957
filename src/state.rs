//! Shared state handed to every handler through `State<AppState>`.

use crate::config::JwtConfig;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Pool used by the health probes. `None` when the repositories are not
    /// PostgreSQL-backed.
    pub db_pool: Option<AsyncDbPool>,
    pub jwt_config: JwtConfig,
}

impl AppState {
    /// Builds the PostgreSQL-backed services over `pool`.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool, settings.jwt.clone());
    /// ```
    pub fn new(pool: AsyncDbPool, jwt_config: JwtConfig) -> Self {
        Self {
            services: Services::new(Repositories::new(pool.clone())),
            db_pool: Some(pool),
            jwt_config,
        }
    }

    /// Builds the services over arbitrary repositories, without a pool.
    pub fn from_repositories(repos: Repositories, jwt_config: JwtConfig) -> Self {
        Self {
            services: Services::new(repos),
            db_pool: None,
            jwt_config,
        }
    }
}
