//! Middleware components for request processing.

mod auth;
mod error_handler;
mod logging;
mod request_id;

pub use auth::{AuthUser, auth_middleware};
pub use logging::logging_middleware;
pub use request_id::{CURRENT_REQUEST_ID, REQUEST_ID_HEADER, RequestId, request_id_middleware};
