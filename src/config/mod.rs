//! Environment-driven configuration.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables (`.env` is read at startup via dotenvy).
//!
//! - [`database`]: PostgreSQL connection pool
//! - [`jwt`]: token signing secret and per-role expiry windows
//! - [`cors`]: allowed browser origins
//! - [`upload`]: profile image storage directory

pub mod cors;
pub mod database;
pub mod jwt;
pub mod upload;
