//! Repository layer for data access operations.
//!
//! Each entity has an `async_trait` repository so the service layer can run
//! against PostgreSQL in production and against other stores in tests.

mod wish_repo;
mod wishlist_repo;

use std::sync::Arc;

pub use wish_repo::{PgWishRepository, WishRepository};
pub use wishlist_repo::{PgWishlistRepository, WishlistRepository};

use crate::db::AsyncDbPool;
use crate::error::AppError;

/// Aggregates all repositories for convenient access.
///
/// Cloning only bumps the `Arc` reference counts.
#[derive(Clone)]
pub struct Repositories {
    pub wishes: Arc<dyn WishRepository>,
    pub wishlists: Arc<dyn WishlistRepository>,
}

impl Repositories {
    /// Creates the PostgreSQL-backed repositories sharing one pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            wishes: Arc::new(PgWishRepository::new(pool.clone())),
            wishlists: Arc::new(PgWishlistRepository::new(pool)),
        }
    }

    /// Assembles repositories from arbitrary implementations.
    pub fn from_parts(
        wishes: Arc<dyn WishRepository>,
        wishlists: Arc<dyn WishlistRepository>,
    ) -> Self {
        Self { wishes, wishlists }
    }
}

fn pool_error(e: impl std::error::Error + Send + Sync + 'static) -> AppError {
    AppError::ConnectionPool {
        source: anyhow::Error::from(e),
    }
}
