//! Database connection pool and schema migrations.
//!
//! Request traffic goes through the async bb8 pool. Migrations run on a
//! blocking connection.

mod migrate;
mod pool;

pub use migrate::{pending_migrations, revert_migrations, run_pending_migrations};
pub use pool::{AsyncDbPool, MIGRATIONS, establish_async_connection_pool};
