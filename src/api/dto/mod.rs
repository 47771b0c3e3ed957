//! Data Transfer Objects for API requests and responses.
//!
//! Field names are camelCase on the wire.

mod entity_ref;
mod error;
mod health;
mod pagination;
mod wish;
mod wishlist;

pub use entity_ref::IdRef;
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use pagination::PageParams;
pub use wish::{WishPayload, WishResponse};
pub use wishlist::{WishlistPayload, WishlistResponse};
