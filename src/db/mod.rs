//! Database access layer.
//!
//! This module provides:
//! - The connection provider and its store lifecycle
//! - Connection pool management with dynamic sizing
//! - Direct store connections used for teardown
//! - Schema migrations
//! - Backend dispatch macros for reducing code duplication

#[macro_use]
pub mod macros;
pub mod connector;
pub mod migrate;
pub mod pool;
pub mod provider;

pub use connector::{ConnectorError, ConnectorErrorKind, SqlxConnector, StoreConnector};
pub use migrate::MigrationRunner;
pub use pool::{ConnectionPool, DbConnectOptions, DbConnection, DbPool, PooledConnection, SqlxPool};
pub use provider::{ConnectionProvider, ProviderBuilder, TeardownOutcome};
