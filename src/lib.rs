//! DB Provider Library
//!
//! Provisions pooled SQL connections for MySQL, PostgreSQL and SQLite, manages
//! the create/drop lifecycle of in-memory SQLite stores, and applies schema
//! migrations before the application starts using a connection.

pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use config::Config;
pub use db::{ConnectionProvider, MigrationRunner};
pub use error::{DbError, DbResult};
