//! Connection pool management.
//!
//! [`ConnectionPool`] is the seam the provider drives: it can be resized and
//! retargeted while in use. [`SqlxPool`] implements it on top of the
//! database-specific sqlx pools (MySqlPool, PgPool, SqlitePool).
//!
//! sqlx fixes a pool's size when it is built, so the dynamic maximum is a
//! semaphore gate in front of a pool built with the operating ceiling. Each
//! checked-out [`DbConnection`] holds one gate permit. Shrinking below the
//! number of checked-out connections is settled as those connections return:
//! their permits are forgotten instead of released.

use crate::config::{ACQUIRE_TIMEOUT, MAX_IDLE_TIME, MAX_IDLE_TIME_EXCESS_CONNECTIONS, NORMAL_MAX_POOL_SIZE};
use crate::error::{DbError, DbResult};
use crate::models::{BackendKind, DbProperties, Directive, PoolSizing};
use sqlx::pool::PoolConnection;
use sqlx::{
    Connection, MySql, MySqlPool, PgPool, Postgres, Sqlite, SqlitePool,
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    postgres::{PgConnectOptions, PgPoolOptions},
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::future::Future;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::sync::{OnceCell, OwnedSemaphorePermit, Semaphore};
use tracing::{debug, info};
use url::Url;

/// A pooled-connection resource whose sizing and target can change at runtime.
pub trait ConnectionPool: Send + Sync {
    type Connection: Send;

    /// Current sizing policy.
    fn sizing(&self) -> PoolSizing;

    /// Replace the sizing policy.
    fn set_sizing(&self, sizing: PoolSizing);

    /// URI new physical connections are opened against.
    fn target_uri(&self) -> String;

    /// Point new physical connections at `uri`.
    fn set_target_uri(&self, uri: &str) -> DbResult<()>;

    /// Check a connection out, waiting for one to become available.
    fn acquire(&self) -> impl Future<Output = DbResult<Self::Connection>> + Send;

    /// Release every physical connection and background resource.
    fn close(&self) -> impl Future<Output = ()> + Send;
}

/// Backend-specific connect options parsed from a target URI.
#[derive(Debug, Clone)]
pub enum DbConnectOptions {
    MySql(MySqlConnectOptions),
    Postgres(PgConnectOptions),
    SQLite(SqliteConnectOptions),
}

impl DbConnectOptions {
    /// Parse `uri` for `backend`, applying the credentials from `properties`.
    ///
    /// A trailing [`Directive`] is split off first. Only a create directive may
    /// materialize a missing store; a bare URI addresses an existing one.
    pub fn parse(backend: BackendKind, uri: &str, properties: &DbProperties) -> DbResult<Self> {
        let (base, directive) = Directive::split(uri);
        check_scheme(backend, base)?;
        match backend {
            BackendKind::MySql => {
                let mut options =
                    MySqlConnectOptions::from_str(base).map_err(|e| invalid_uri(backend, e))?;
                if !properties.login.is_empty() {
                    options = options.username(&properties.login);
                }
                if !properties.password.is_empty() {
                    options = options.password(&properties.password);
                }
                Ok(Self::MySql(options.charset("utf8mb4")))
            }
            BackendKind::Postgres => {
                let mut options =
                    PgConnectOptions::from_str(base).map_err(|e| invalid_uri(backend, e))?;
                if !properties.login.is_empty() {
                    options = options.username(&properties.login);
                }
                if !properties.password.is_empty() {
                    options = options.password(&properties.password);
                }
                Ok(Self::Postgres(options))
            }
            BackendKind::Sqlite | BackendKind::SqliteMemory => {
                let options =
                    SqliteConnectOptions::from_str(base).map_err(|e| invalid_uri(backend, e))?;
                let options = match directive {
                    Some(Directive::Create) => options.create_if_missing(true),
                    _ => options,
                };
                Ok(Self::SQLite(options))
            }
        }
    }
}

/// sqlx does not check the scheme itself: the MySQL parser ignores it and the
/// SQLite parser takes any string as a file name.
fn check_scheme(backend: BackendKind, uri: &str) -> DbResult<()> {
    let accepted: &[&str] = match backend {
        BackendKind::MySql => &["mysql", "mariadb"],
        BackendKind::Postgres => &["postgres", "postgresql"],
        BackendKind::Sqlite | BackendKind::SqliteMemory => &["sqlite"],
    };
    let parsed = Url::parse(uri).map_err(|e| invalid_uri(backend, e))?;
    if !accepted.contains(&parsed.scheme()) {
        return Err(invalid_uri(
            backend,
            format!("unsupported scheme '{}'", parsed.scheme()),
        ));
    }
    Ok(())
}

fn invalid_uri(backend: BackendKind, err: impl std::fmt::Display) -> DbError {
    let format = match backend {
        BackendKind::MySql => "mysql://host:3306/database",
        BackendKind::Postgres => "postgres://host:5432/database",
        BackendKind::Sqlite => "sqlite:path/to/db.sqlite",
        BackendKind::SqliteMemory => "sqlite:file:name?mode=memory&cache=shared",
    };
    DbError::configuration(
        format!("Cannot load {} driver for this URI: {}", backend, err),
        format!("Check the connection properties; expected a URI like {}", format),
    )
}

/// Database-specific connection pool (avoids AnyPool limitations).
#[derive(Debug, Clone)]
pub enum DbPool {
    MySql(MySqlPool),
    Postgres(PgPool),
    SQLite(SqlitePool),
}

impl DbPool {
    /// Close the connection pool.
    pub async fn close(&self) {
        impl_db_dispatch!(DbPool, self, {
            MySql(pool) => pool.close().await,
            Postgres(pool) => pool.close().await,
            SQLite(pool) => pool.close().await,
        })
    }

    /// Number of physical connections currently held, idle or in use.
    pub fn size(&self) -> u32 {
        impl_db_dispatch!(DbPool, self, {
            MySql(pool) => pool.size(),
            Postgres(pool) => pool.size(),
            SQLite(pool) => pool.size(),
        })
    }

    async fn acquire(&self) -> Result<PooledConnection, sqlx::Error> {
        Ok(match self {
            DbPool::MySql(pool) => PooledConnection::MySql(pool.acquire().await?),
            DbPool::Postgres(pool) => PooledConnection::Postgres(pool.acquire().await?),
            DbPool::SQLite(pool) => PooledConnection::SQLite(pool.acquire().await?),
        })
    }

    fn set_connect_options(&self, options: DbConnectOptions) -> DbResult<()> {
        match (self, options) {
            (DbPool::MySql(pool), DbConnectOptions::MySql(options)) => {
                pool.set_connect_options(options)
            }
            (DbPool::Postgres(pool), DbConnectOptions::Postgres(options)) => {
                pool.set_connect_options(options)
            }
            (DbPool::SQLite(pool), DbConnectOptions::SQLite(options)) => {
                pool.set_connect_options(options)
            }
            _ => {
                return Err(DbError::internal(
                    "Connect options do not match the pool backend",
                ));
            }
        }
        Ok(())
    }
}

/// A connection checked out of a database-specific pool.
#[derive(Debug)]
pub enum PooledConnection {
    MySql(PoolConnection<MySql>),
    Postgres(PoolConnection<Postgres>),
    SQLite(PoolConnection<Sqlite>),
}

/// Connection handed to callers by [`SqlxPool`].
///
/// Dropping it returns the physical connection to the pool and frees its
/// slot under the pool's current maximum.
#[derive(Debug)]
pub struct DbConnection {
    inner: PooledConnection,
    permit: Option<OwnedSemaphorePermit>,
    pending_shrink: Arc<AtomicUsize>,
}

impl Drop for DbConnection {
    fn drop(&mut self) {
        if let Some(permit) = self.permit.take() {
            if take_pending(&self.pending_shrink, 1) == 1 {
                permit.forget();
            }
        }
    }
}

/// Subtract up to `wanted` from `counter`, returning how much was taken.
fn take_pending(counter: &AtomicUsize, wanted: usize) -> usize {
    match counter.fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
        (n > 0).then(|| n - n.min(wanted))
    }) {
        Ok(previous) => previous.min(wanted),
        Err(_) => 0,
    }
}

impl DbConnection {
    pub fn inner(&self) -> &PooledConnection {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut PooledConnection {
        &mut self.inner
    }

    /// The SQLite connection, if this is one.
    pub fn as_sqlite_mut(&mut self) -> Option<&mut PoolConnection<Sqlite>> {
        match &mut self.inner {
            PooledConnection::SQLite(conn) => Some(conn),
            _ => None,
        }
    }

    /// Check that the connection is still alive.
    pub async fn ping(&mut self) -> DbResult<()> {
        let result = impl_db_dispatch!(PooledConnection, &mut self.inner, {
            MySql(conn) => conn.ping().await,
            Postgres(conn) => conn.ping().await,
            SQLite(conn) => conn.ping().await,
        });
        result.map_err(DbError::from)
    }
}

/// sqlx-backed [`ConnectionPool`] with a dynamically adjustable maximum.
pub struct SqlxPool {
    backend: BackendKind,
    properties: DbProperties,
    sizing: Mutex<PoolSizing>,
    target: RwLock<String>,
    /// One permit per connection allowed out under the current maximum.
    gate: Arc<Semaphore>,
    /// Permits still to be forgotten when checked-out connections return.
    pending_shrink: Arc<AtomicUsize>,
    /// Built on first acquisition, inside the runtime, with the sizing in force then.
    pool: OnceCell<DbPool>,
}

impl std::fmt::Debug for SqlxPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlxPool")
            .field("backend", &self.backend)
            .field("sizing", &self.sizing())
            .field("target", &self.target_uri())
            .field("built", &self.pool.initialized())
            .finish_non_exhaustive()
    }
}

impl SqlxPool {
    /// Create a pool for `backend` targeting `uri`.
    ///
    /// The URI is parsed immediately so that a backend the driver cannot handle
    /// is reported at construction rather than on first use. No connection is
    /// opened here.
    pub fn new(
        backend: BackendKind,
        properties: DbProperties,
        uri: impl Into<String>,
        sizing: PoolSizing,
    ) -> DbResult<Self> {
        let uri = uri.into();
        sizing
            .validate()
            .map_err(|message| DbError::configuration(message, "Adjust the pool sizing"))?;
        DbConnectOptions::parse(backend, &uri, &properties)?;

        Ok(Self {
            backend,
            properties,
            gate: Arc::new(Semaphore::new(sizing.max as usize)),
            pending_shrink: Arc::new(AtomicUsize::new(0)),
            sizing: Mutex::new(sizing),
            target: RwLock::new(uri),
            pool: OnceCell::new(),
        })
    }

    /// The underlying sqlx pool, if it has been built.
    pub fn inner(&self) -> Option<&DbPool> {
        self.pool.get()
    }

    async fn pool(&self) -> DbResult<&DbPool> {
        self.pool.get_or_try_init(|| async { self.build() }).await
    }

    fn build(&self) -> DbResult<DbPool> {
        let sizing = self.sizing();
        let target = self.target_uri();
        let options = DbConnectOptions::parse(self.backend, &target, &self.properties)?;
        let ceiling = sizing.max.max(NORMAL_MAX_POOL_SIZE);
        // An in-memory store only lives while one of its connections is open.
        let max_lifetime = match self.backend.lifecycle() {
            Some(_) => None,
            None => Some(MAX_IDLE_TIME),
        };
        let idle_timeout = Some(MAX_IDLE_TIME_EXCESS_CONNECTIONS);

        let pool = match options {
            DbConnectOptions::MySql(options) => DbPool::MySql(
                MySqlPoolOptions::new()
                    .min_connections(sizing.min)
                    .max_connections(ceiling)
                    .acquire_timeout(ACQUIRE_TIMEOUT)
                    .idle_timeout(idle_timeout)
                    .max_lifetime(max_lifetime)
                    .connect_lazy_with(options),
            ),
            DbConnectOptions::Postgres(options) => DbPool::Postgres(
                PgPoolOptions::new()
                    .min_connections(sizing.min)
                    .max_connections(ceiling)
                    .acquire_timeout(ACQUIRE_TIMEOUT)
                    .idle_timeout(idle_timeout)
                    .max_lifetime(max_lifetime)
                    .connect_lazy_with(options),
            ),
            DbConnectOptions::SQLite(options) => DbPool::SQLite(
                SqlitePoolOptions::new()
                    .min_connections(sizing.min)
                    .max_connections(ceiling)
                    .acquire_timeout(ACQUIRE_TIMEOUT)
                    .idle_timeout(idle_timeout)
                    .max_lifetime(max_lifetime)
                    .connect_lazy_with(options),
            ),
        };

        info!(
            backend = %self.backend,
            uri = %target,
            min = sizing.min,
            max = sizing.max,
            ceiling,
            "Built connection pool"
        );
        Ok(pool)
    }

    async fn acquire_permit(&self) -> DbResult<OwnedSemaphorePermit> {
        let wait = Arc::clone(&self.gate).acquire_owned();
        match tokio::time::timeout(ACQUIRE_TIMEOUT, wait).await {
            Ok(Ok(permit)) => Ok(permit),
            Ok(Err(_)) => Err(DbError::acquisition(
                "Connection pool is closed",
                "Build a new provider",
            )),
            Err(_) => Err(sqlx::Error::PoolTimedOut.into()),
        }
    }

    /// Wrap a driver failure, keeping the cause and adding a hint.
    fn acquisition_error(&self, err: sqlx::Error) -> DbError {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Configuration(_) => {
                err.into()
            }
            err => {
                let suggestion = connection_suggestion(self.backend, &err);
                DbError::acquisition_caused_by(
                    format!("Cannot connect to {}: {}", self.backend, err),
                    suggestion,
                    err,
                )
            }
        }
    }
}

impl ConnectionPool for SqlxPool {
    type Connection = DbConnection;

    fn sizing(&self) -> PoolSizing {
        *self.sizing.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_sizing(&self, sizing: PoolSizing) {
        let mut current = self.sizing.lock().unwrap_or_else(PoisonError::into_inner);
        let (old_max, new_max) = (current.max as usize, sizing.max as usize);
        if new_max > old_max {
            let grow = new_max - old_max;
            let cancelled = take_pending(&self.pending_shrink, grow);
            self.gate.add_permits(grow - cancelled);
        } else if new_max < old_max {
            let shrink = old_max - new_max;
            let forgotten = self.gate.forget_permits(shrink);
            if forgotten < shrink {
                self.pending_shrink
                    .fetch_add(shrink - forgotten, Ordering::AcqRel);
                debug!(
                    requested = shrink,
                    forgotten, "Pool shrink deferred until connections return"
                );
            }
        }
        if self.pool.initialized() && sizing.min != current.min {
            debug!(
                min = sizing.min,
                "Minimum pool size only applies when the pool is built"
            );
        }
        debug!(
            min = sizing.min,
            max = sizing.max,
            initial = sizing.initial,
            "Pool sizing updated"
        );
        *current = sizing;
    }

    fn target_uri(&self) -> String {
        self.target
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_target_uri(&self, uri: &str) -> DbResult<()> {
        let options = DbConnectOptions::parse(self.backend, uri, &self.properties)?;
        if let Some(pool) = self.pool.get() {
            pool.set_connect_options(options)?;
        }
        *self.target.write().unwrap_or_else(PoisonError::into_inner) = uri.to_string();
        debug!(backend = %self.backend, uri = %uri, "Pool target updated");
        Ok(())
    }

    async fn acquire(&self) -> DbResult<DbConnection> {
        let permit = self.acquire_permit().await?;
        let pool = self.pool().await?;
        let inner = pool
            .acquire()
            .await
            .map_err(|e| self.acquisition_error(e))?;
        Ok(DbConnection {
            inner,
            permit: Some(permit),
            pending_shrink: Arc::clone(&self.pending_shrink),
        })
    }

    async fn close(&self) {
        self.gate.close();
        if let Some(pool) = self.pool.get() {
            debug!(backend = %self.backend, connections = pool.size(), "Closing pool");
            pool.close().await;
        }
    }
}

/// Generate a helpful suggestion for connection errors.
fn connection_suggestion(backend: BackendKind, error: &sqlx::Error) -> String {
    let error_str = error.to_string().to_lowercase();

    if error_str.contains("connection refused") {
        return format!("Check that the {} server is running and accessible", backend);
    }

    if error_str.contains("authentication") || error_str.contains("password") {
        return "Verify the login and password".to_string();
    }

    if error_str.contains("does not exist") || error_str.contains("unknown database") {
        return "Check that the database name exists".to_string();
    }

    if error_str.contains("tls") || error_str.contains("ssl") {
        return "Check TLS/SSL configuration or try disabling it".to_string();
    }

    match backend {
        BackendKind::MySql | BackendKind::Postgres => {
            "Verify host, port and database name".to_string()
        }
        BackendKind::Sqlite => "Verify the file path exists and is writable".to_string(),
        BackendKind::SqliteMemory => "Verify the in-memory store was created".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_pool(name: &str, sizing: PoolSizing) -> SqlxPool {
        let props = DbProperties::default_for(BackendKind::SqliteMemory, name);
        let uri = BackendKind::SqliteMemory.uri(&props);
        SqlxPool::new(BackendKind::SqliteMemory, props, uri, sizing).unwrap()
    }

    #[test]
    fn test_parse_mysql_options() {
        let props = DbProperties::new("db.local", 3306, "app", "svc", "secret");
        let options =
            DbConnectOptions::parse(BackendKind::MySql, &BackendKind::MySql.uri(&props), &props)
                .unwrap();
        assert!(matches!(options, DbConnectOptions::MySql(_)));
    }

    #[test]
    fn test_parse_postgres_options() {
        let props = DbProperties::new("db.local", 5432, "app", "svc", "secret");
        let options = DbConnectOptions::parse(
            BackendKind::Postgres,
            &BackendKind::Postgres.uri(&props),
            &props,
        )
        .unwrap();
        assert!(matches!(options, DbConnectOptions::Postgres(_)));
    }

    #[test]
    fn test_parse_rejects_foreign_scheme() {
        let props = DbProperties::new("db.local", 3306, "app", "", "");
        let err = DbConnectOptions::parse(BackendKind::MySql, "redis://db.local/0", &props)
            .unwrap_err();
        assert!(matches!(err, DbError::Configuration { .. }));
    }

    #[test]
    fn test_parse_rejects_backend_mismatch() {
        let props = DbProperties::default_for(BackendKind::Sqlite, "app.db");
        let err = DbConnectOptions::parse(BackendKind::Sqlite, "postgres://db.local/app", &props)
            .unwrap_err();
        assert!(matches!(err, DbError::Configuration { .. }));
    }

    #[test]
    fn test_parse_accepts_sqlite_file_path() {
        let props = DbProperties::default_for(BackendKind::Sqlite, "/tmp/data/app.db");
        let uri = BackendKind::Sqlite.uri(&props);
        let options = DbConnectOptions::parse(BackendKind::Sqlite, &uri, &props).unwrap();
        assert!(matches!(options, DbConnectOptions::SQLite(_)));
    }

    #[test]
    fn test_parse_strips_directive() {
        let props = DbProperties::default_for(BackendKind::SqliteMemory, "directive");
        let uri = Directive::Create.apply(&BackendKind::SqliteMemory.uri(&props));
        let options = DbConnectOptions::parse(BackendKind::SqliteMemory, &uri, &props).unwrap();
        assert!(matches!(options, DbConnectOptions::SQLite(_)));
    }

    #[test]
    fn test_new_rejects_invalid_sizing() {
        let props = DbProperties::default_for(BackendKind::SqliteMemory, "bad");
        let uri = BackendKind::SqliteMemory.uri(&props);
        let result = SqlxPool::new(BackendKind::SqliteMemory, props, uri, PoolSizing::fixed(0));
        assert!(matches!(result, Err(DbError::Configuration { .. })));
    }

    #[test]
    fn test_pool_is_not_built_at_construction() {
        let pool = memory_pool("lazy", PoolSizing::default());
        assert!(pool.inner().is_none());
    }

    #[test]
    fn test_set_sizing_adjusts_gate() {
        let pool = memory_pool("gate", PoolSizing::fixed(1));
        assert_eq!(pool.gate.available_permits(), 1);

        pool.set_sizing(PoolSizing {
            min: 1,
            max: 15,
            initial: 1,
        });
        assert_eq!(pool.gate.available_permits(), 15);
        assert_eq!(pool.sizing().max, 15);

        pool.set_sizing(PoolSizing::fixed(3));
        assert_eq!(pool.gate.available_permits(), 3);
    }

    #[test]
    fn test_set_target_uri_before_build() {
        let pool = memory_pool("target", PoolSizing::default());
        let create = Directive::Create.apply(&pool.target_uri());
        pool.set_target_uri(&create).unwrap();
        assert_eq!(pool.target_uri(), create);
    }

    #[test]
    fn test_set_target_uri_rejects_invalid() {
        let pool = memory_pool("invalid-target", PoolSizing::default());
        let before = pool.target_uri();
        assert!(pool.set_target_uri("mysql://elsewhere/db").is_err());
        assert_eq!(pool.target_uri(), before);
    }

    #[tokio::test]
    async fn test_acquire_and_ping() {
        let pool = memory_pool("ping", PoolSizing::default());
        let mut conn = pool.acquire().await.unwrap();
        conn.ping().await.unwrap();
        assert!(conn.as_sqlite_mut().is_some());
        drop(conn);
        pool.close().await;
    }

    #[tokio::test]
    async fn test_gate_limits_checkouts() {
        let pool = memory_pool("limit", PoolSizing::fixed(1));
        let first = pool.acquire().await.unwrap();
        assert_eq!(pool.gate.available_permits(), 0);
        drop(first);
        assert_eq!(pool.gate.available_permits(), 1);
        pool.close().await;
    }

    #[tokio::test]
    async fn test_shrink_settles_as_connections_return() {
        let pool = memory_pool(
            "deferred-shrink",
            PoolSizing {
                min: 1,
                max: 2,
                initial: 1,
            },
        );
        let first = pool.acquire().await.unwrap();
        let second = pool.acquire().await.unwrap();

        pool.set_sizing(PoolSizing::fixed(1));
        assert_eq!(pool.gate.available_permits(), 0);

        drop(first);
        assert_eq!(pool.gate.available_permits(), 0);
        drop(second);
        assert_eq!(pool.gate.available_permits(), 1);
        pool.close().await;
    }

    #[tokio::test]
    async fn test_grow_cancels_deferred_shrink() {
        let pool = memory_pool(
            "cancelled-shrink",
            PoolSizing {
                min: 1,
                max: 2,
                initial: 1,
            },
        );
        let first = pool.acquire().await.unwrap();
        let second = pool.acquire().await.unwrap();

        pool.set_sizing(PoolSizing::fixed(1));
        pool.set_sizing(PoolSizing {
            min: 1,
            max: 2,
            initial: 1,
        });
        drop(first);
        drop(second);
        assert_eq!(pool.gate.available_permits(), 2);
        pool.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_gate_is_acquisition_error() {
        let pool = memory_pool("exhausted", PoolSizing::fixed(1));
        let _held = pool.acquire_permit().await.unwrap();

        let err = pool.acquire().await.unwrap_err();
        assert!(
            matches!(err, DbError::Acquisition { source: Some(_), .. }),
            "got {err:?}"
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn test_driver_pool_timeout_is_acquisition_error() {
        let pool = memory_pool("driver-timeout", PoolSizing::default());
        let err = pool.acquisition_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DbError::Acquisition { source: Some(_), .. }));
    }

    #[tokio::test]
    async fn test_acquire_after_close_fails() {
        let pool = memory_pool("closed", PoolSizing::default());
        drop(pool.acquire().await.unwrap());
        pool.close().await;
        let result = pool.acquire().await;
        assert!(matches!(result, Err(DbError::Acquisition { .. })));
    }

    #[test]
    fn test_connection_suggestion() {
        let err = sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        let suggestion = connection_suggestion(BackendKind::MySql, &err);
        assert!(suggestion.contains("MySQL"));
    }
}
