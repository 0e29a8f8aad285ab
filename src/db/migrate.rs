//! Schema migrations.
//!
//! Migrations are sqlx migration scripts (`<version>_<description>.sql`) read
//! from a directory at runtime. Applied versions are tracked by sqlx in the
//! target database, so running the same source twice only applies what is new.

use crate::db::pool::DbConnection;
use crate::db::provider::ConnectionProvider;
use crate::error::{DbError, DbResult};
use sqlx::migrate::Migrator;
use std::path::{Path, PathBuf};
use tracing::info;

/// Applies pending migrations from one migration source.
#[derive(Debug, Clone)]
pub struct MigrationRunner {
    source: PathBuf,
}

impl MigrationRunner {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    async fn migrator(&self) -> DbResult<Migrator> {
        Migrator::new(self.source.as_path()).await.map_err(|e| {
            DbError::migration(
                format!("Cannot load migrations from {}", self.source.display()),
                e,
            )
        })
    }

    /// Apply every pending migration on `connection`, in version order.
    pub async fn run(&self, connection: &mut DbConnection) -> DbResult<()> {
        let migrator = self.migrator().await?;
        info!(
            source = %self.source.display(),
            migrations = migrator.iter().count(),
            "Applying migrations"
        );

        let result = impl_db_dispatch!(PooledConnection, connection.inner_mut(), {
            MySql(conn) => migrator.run(&mut **conn).await,
            Postgres(conn) => migrator.run(&mut **conn).await,
            SQLite(conn) => migrator.run(&mut **conn).await,
        });
        result.map_err(|e| {
            DbError::migration(
                format!("Failed to apply migrations from {}", self.source.display()),
                e,
            )
        })?;

        info!(source = %self.source.display(), "Database schema is up to date");
        Ok(())
    }

    /// Acquire one connection from `provider` and migrate through it.
    pub async fn update(&self, provider: &ConnectionProvider) -> DbResult<()> {
        let mut connection = provider.acquire().await?;
        self.run(&mut connection).await
    }
}
