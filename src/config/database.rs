//! PostgreSQL connection pool initialization.
//!
//! The pool is created lazily: the process starts even when the database
//! is unreachable, connections are established on first use, and each
//! request that needs the store surfaces its own error until the database
//! comes back. Only an unparseable `DATABASE_URL` is fatal.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;

/// Initializes the lazily-connecting PostgreSQL pool.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set or cannot be parsed.
pub fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPoolOptions::new()
        .max_connections(5)
        .connect_lazy(&database_url)
        .expect("Invalid DATABASE_URL")
}
