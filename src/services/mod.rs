//! Service layer.
//!
//! Services trace each request and delegate to the repositories. Repository
//! errors are returned unchanged.

mod wish_service;
mod wishlist_service;

pub use wish_service::WishService;
pub use wishlist_service::WishlistService;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since the repositories sit behind `Arc`.
#[derive(Clone)]
pub struct Services {
    pub wishes: WishService,
    pub wishlists: WishlistService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            wishes: WishService::new(repos.wishes),
            wishlists: WishlistService::new(repos.wishlists),
        }
    }
}
