//! HTTP layer: handlers, middleware, DTOs and response headers.

pub mod doc;
pub mod dto;
pub mod handlers;
pub mod headers;
pub mod middleware;
pub mod routes;
