//! Direct (non-pooled) store connections.
//!
//! Tearing down an ephemeral store must not go through the pool being closed,
//! so the provider reaches it through a [`StoreConnector`]. Failures are
//! classified by code into a [`ConnectorErrorKind`]; a store reporting that it
//! is shutting down is the confirmation a drop expects.

use crate::error::BoxError;
use crate::db::pool::DbConnectOptions;
use crate::models::{BackendKind, DbProperties};
use sqlx::{Connection, SqliteConnection};
use std::future::Future;
use tracing::debug;

/// SQLSTATE codes a backend raises when it refuses connections because it is
/// shutting down: connection failure, admin shutdown, cannot connect now.
pub const STORE_SHUTDOWN_CODES: &[&str] = &["08006", "57P01", "57P03"];

/// Classification of a direct connection failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorErrorKind {
    /// The store refused the connection because it is shutting down.
    StoreShutdown,
    /// The store could not be reached.
    Unavailable,
    Other,
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ConnectorError {
    kind: ConnectorErrorKind,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl ConnectorError {
    pub fn new(kind: ConnectorErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn kind(&self) -> ConnectorErrorKind {
        self.kind
    }

    pub fn is_store_shutdown(&self) -> bool {
        self.kind == ConnectorErrorKind::StoreShutdown
    }
}

impl From<sqlx::Error> for ConnectorError {
    fn from(err: sqlx::Error) -> Self {
        let kind = match &err {
            sqlx::Error::PoolClosed => ConnectorErrorKind::StoreShutdown,
            sqlx::Error::Database(db_err)
                if db_err
                    .code()
                    .is_some_and(|code| STORE_SHUTDOWN_CODES.contains(&&*code)) =>
            {
                ConnectorErrorKind::StoreShutdown
            }
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolTimedOut => {
                ConnectorErrorKind::Unavailable
            }
            _ => ConnectorErrorKind::Other,
        };
        Self {
            kind,
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Opens connections outside of any pool.
pub trait StoreConnector: Send + Sync {
    /// Connect to `uri`, which carries a drop directive, and destroy the store.
    fn drop_store(&self, uri: &str) -> impl Future<Output = Result<(), ConnectorError>> + Send;
}

/// sqlx-backed [`StoreConnector`].
#[derive(Debug, Clone)]
pub struct SqlxConnector {
    backend: BackendKind,
    properties: DbProperties,
}

impl SqlxConnector {
    pub fn new(backend: BackendKind, properties: DbProperties) -> Self {
        Self {
            backend,
            properties,
        }
    }

    async fn drop_sqlite(options: &sqlx::sqlite::SqliteConnectOptions) -> Result<(), ConnectorError> {
        let mut conn = SqliteConnection::connect_with(options).await?;

        // Dropped tables would otherwise cascade through foreign key checks.
        sqlx::query("PRAGMA foreign_keys = OFF")
            .execute(&mut conn)
            .await?;
        let objects: Vec<(String, String)> = sqlx::query_as(
            "SELECT type, name FROM sqlite_master \
             WHERE type IN ('table', 'view') AND name NOT LIKE 'sqlite_%' \
             ORDER BY type DESC",
        )
        .fetch_all(&mut conn)
        .await?;

        for (kind, name) in &objects {
            let statement = format!(
                "DROP {} IF EXISTS \"{}\"",
                kind.to_uppercase(),
                name.replace('"', "\"\"")
            );
            sqlx::query(&statement).execute(&mut conn).await?;
        }
        debug!(objects = objects.len(), "Dropped store objects");

        conn.close().await?;
        Ok(())
    }
}

impl StoreConnector for SqlxConnector {
    async fn drop_store(&self, uri: &str) -> Result<(), ConnectorError> {
        let options = DbConnectOptions::parse(self.backend, uri, &self.properties)
            .map_err(|e| ConnectorError::new(ConnectorErrorKind::Other, e.to_string()))?;
        match options {
            DbConnectOptions::SQLite(options) => Self::drop_sqlite(&options).await,
            _ => Err(ConnectorError::new(
                ConnectorErrorKind::Other,
                format!("{} stores cannot be dropped through a connection", self.backend),
            )),
        }
    }
}
