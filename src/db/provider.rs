//! Connection provider lifecycle.
//!
//! [`ConnectionProvider`] owns one pool and mediates every acquisition from it.
//! Backends that declare a [`StoreLifecycle`] get two extra steps:
//!
//! - **Bootstrap**: the first acquisition shrinks the pool to one connection,
//!   opens it with a create directive, points the pool back at the bare URI,
//!   then lets the pool grow to its operating maximum.
//! - **Teardown**: `close()` connects directly with a drop directive before
//!   closing the pool. A store answering that it is shutting down confirms the
//!   drop.
//!
//! # Concurrency
//!
//! Bootstrap, teardown and every other change of `open` run under a
//! per-provider async mutex, so concurrent first callers create the store
//! exactly once. Once `open` is set, acquisitions skip the mutex and rely on the pool's own locking. Closing while other tasks
//! are still acquiring is not supported.

use crate::db::connector::{ConnectorError, SqlxConnector, StoreConnector};
use crate::db::pool::{ConnectionPool, SqlxPool};
use crate::error::{DbError, DbResult};
use crate::models::{BackendKind, DbProperties, PoolSizing, ProviderInfo, StoreLifecycle};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

/// Result of explicitly dropping an ephemeral store.
#[derive(Debug)]
pub enum TeardownOutcome {
    /// The backend has no store to drop.
    NotRequired,
    /// The store is gone.
    Confirmed,
    Failed(ConnectorError),
}

impl TeardownOutcome {
    fn into_result(self) -> DbResult<()> {
        match self {
            Self::NotRequired | Self::Confirmed => Ok(()),
            Self::Failed(err) => Err(DbError::teardown("Failed to drop the in-memory store", err)),
        }
    }
}

/// Builder validating that both a backend and connection properties are given.
#[derive(Debug, Default)]
pub struct ProviderBuilder {
    backend: Option<BackendKind>,
    properties: Option<DbProperties>,
    sizing: Option<PoolSizing>,
}

impl ProviderBuilder {
    pub fn backend(mut self, backend: BackendKind) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn properties(mut self, properties: DbProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Sizing used for backends without a store lifecycle. Defaults to
    /// [`PoolSizing::default`].
    pub fn sizing(mut self, sizing: PoolSizing) -> Self {
        self.sizing = Some(sizing);
        self
    }

    /// Build a provider backed by sqlx.
    pub fn build(self) -> DbResult<ConnectionProvider> {
        let backend = self
            .backend
            .ok_or_else(|| DbError::invalid_input("A backend kind is required"))?;
        let properties = self
            .properties
            .ok_or_else(|| DbError::invalid_input("Connection properties are required"))?;
        let sizing = self.sizing.unwrap_or_default();

        let uri = base_uri(backend, &properties)?;
        let pool = SqlxPool::new(backend, properties.clone(), uri.clone(), sizing)?;
        let connector = SqlxConnector::new(backend, properties.clone());
        Ok(ConnectionProvider::from_parts(
            backend, properties, uri, pool, connector,
        ))
    }
}

/// Build and validate the base URI for `backend`.
pub fn base_uri(backend: BackendKind, properties: &DbProperties) -> DbResult<String> {
    if properties.name.trim().is_empty() {
        return Err(DbError::configuration(
            "Database name is empty",
            "Set the database name (or file path for SQLite)",
        ));
    }
    let uri = backend.uri(properties);
    if backend.is_network() {
        let parsed = Url::parse(&uri).map_err(|e| {
            DbError::configuration(
                format!("Invalid {} connection URI: {}", backend, e),
                "Check the host, port and database name",
            )
        })?;
        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(DbError::configuration(
                format!("{} requires a host", backend),
                "Set the database host",
            ));
        }
    }
    Ok(uri)
}

/// Provides pooled connections for one backend and manages the pool's lifecycle.
pub struct ConnectionProvider<P = SqlxPool, C = SqlxConnector> {
    backend: BackendKind,
    properties: DbProperties,
    uri: String,
    pool: P,
    connector: C,
    open: AtomicBool,
    /// Serializes bootstrap and teardown.
    lifecycle: Mutex<()>,
}

impl<P, C> std::fmt::Debug for ConnectionProvider<P, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionProvider")
            .field("backend", &self.backend)
            .field("uri", &self.uri)
            .field("login", &self.properties.login)
            .field("open", &self.open.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

impl ConnectionProvider {
    pub fn builder() -> ProviderBuilder {
        ProviderBuilder::default()
    }

    /// Create a sqlx-backed provider with the default pool sizing.
    pub fn new(backend: BackendKind, properties: DbProperties) -> DbResult<Self> {
        Self::builder().backend(backend).properties(properties).build()
    }
}

impl<P, C> ConnectionProvider<P, C>
where
    P: ConnectionPool,
    C: StoreConnector,
{
    /// Assemble a provider from an already configured pool and connector.
    /// `pool` must target `uri`.
    pub fn from_parts(
        backend: BackendKind,
        properties: DbProperties,
        uri: String,
        pool: P,
        connector: C,
    ) -> Self {
        Self {
            backend,
            properties,
            uri,
            pool,
            connector,
            open: AtomicBool::new(false),
            lifecycle: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    /// Base URI, without any directive.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn login(&self) -> &str {
        &self.properties.login
    }

    pub fn password(&self) -> &str {
        &self.properties.password
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    pub fn sizing(&self) -> PoolSizing {
        self.pool.sizing()
    }

    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// Summary of this provider without secrets.
    pub fn info(&self) -> ProviderInfo {
        ProviderInfo {
            backend: self.backend,
            uri: self.uri.clone(),
            login: self.properties.login.clone(),
            open: self.is_open(),
            sizing: self.sizing(),
        }
    }

    /// Get a connection from the pool.
    ///
    /// The first acquisition for a backend with a store lifecycle creates the
    /// store. If that fails, the pool is pointed back at the base URI and the
    /// next call tries again.
    pub async fn acquire(&self) -> DbResult<P::Connection> {
        if self.is_open() {
            return self.pool.acquire().await;
        }
        match self.backend.lifecycle() {
            Some(lifecycle) => self.bootstrap(lifecycle).await,
            None => self.first_open().await,
        }
    }

    async fn first_open(&self) -> DbResult<P::Connection> {
        let _guard = self.lifecycle.lock().await;
        let connection = self.pool.acquire().await?;
        if !self.open.swap(true, Ordering::AcqRel) {
            debug!(backend = %self.backend, uri = %self.uri, "Connection pool opened");
        }
        Ok(connection)
    }

    async fn bootstrap(&self, lifecycle: StoreLifecycle) -> DbResult<P::Connection> {
        let guard = self.lifecycle.lock().await;
        if self.is_open() {
            // Created by a caller that held the lock before us.
            drop(guard);
            return self.pool.acquire().await;
        }

        self.pool.set_sizing(lifecycle.bootstrap_sizing());
        self.pool.set_target_uri(&lifecycle.create_uri(&self.uri))?;
        let created = self.pool.acquire().await;
        // Connections opened from now on must attach to the store, not recreate it.
        let restored = self.pool.set_target_uri(&self.uri);
        let connection = created?;
        restored?;

        self.open.store(true, Ordering::Release);
        let sizing = lifecycle.operating_sizing();
        self.pool.set_sizing(sizing);
        info!(
            backend = %self.backend,
            uri = %self.uri,
            max = sizing.max,
            "Created in-memory store"
        );
        Ok(connection)
    }

    /// Close the provider.
    ///
    /// Does nothing unless a connection was acquired since the last close.
    /// Otherwise drops the store (for backends with a store lifecycle), closes
    /// the pool and clears the open flag. The pool is closed even when the drop
    /// fails; the drop failure is returned afterwards. Closing the pool waits
    /// for checked-out connections to be returned.
    pub async fn close(&self) -> DbResult<()> {
        let _guard = self.lifecycle.lock().await;
        if !self.is_open() {
            return Ok(());
        }

        let outcome = match self.backend.lifecycle() {
            Some(lifecycle) => self.drop_store(lifecycle).await,
            None => TeardownOutcome::NotRequired,
        };
        self.pool.close().await;
        self.open.store(false, Ordering::Release);
        info!(backend = %self.backend, uri = %self.uri, "Closed database connection pool");
        outcome.into_result()
    }

    async fn drop_store(&self, lifecycle: StoreLifecycle) -> TeardownOutcome {
        match self.connector.drop_store(&lifecycle.drop_uri(&self.uri)).await {
            Ok(()) => TeardownOutcome::Confirmed,
            Err(err) if err.is_store_shutdown() => {
                debug!(backend = %self.backend, "Store confirmed shutdown");
                TeardownOutcome::Confirmed
            }
            Err(err) => {
                warn!(backend = %self.backend, error = %err, "Failed to drop store");
                TeardownOutcome::Failed(err)
            }
        }
    }
}
