//! Shared helpers for the HTTP layer.

pub mod jwt;
pub mod validate;
