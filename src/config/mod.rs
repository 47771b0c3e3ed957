//! Layered settings for wishstore.
//!
//! [`ConfigLoader`] merges `config/default.toml`, the `{environment}.toml`
//! layer, `config/local.toml` and `WISHSTORE_*` variables into [`Settings`].
//! Every section validates itself before the server starts.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{DatabaseConfig, JwtConfig, Settings};
