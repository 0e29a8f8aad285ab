//! Error types for the connection provider.
//!
//! All failures surfaced by the provider, the pool adapter and the migration
//! runner are expressed as [`DbError`]. Lower-level sqlx errors never escape
//! the crate unwrapped.

use thiserror::Error;

/// Boxed underlying cause kept on wrapped errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum DbError {
    /// Invalid construction input or a backend that cannot be driven. Never retried.
    #[error("Configuration error: {message}")]
    Configuration { message: String, suggestion: String },

    #[error("Invalid argument: {message}")]
    InvalidInput { message: String },

    #[error("Failed to acquire connection: {message}")]
    Acquisition {
        message: String,
        suggestion: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The explicit drop of an ephemeral store failed for a reason other than
    /// the store confirming its shutdown.
    #[error("Store teardown failed: {message}")]
    Teardown {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Migration failed: {message}")]
    Migration {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DbError {
    /// Create a configuration error with a helpful suggestion.
    pub fn configuration(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an acquisition error without an underlying cause.
    pub fn acquisition(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Acquisition {
            message: message.into(),
            suggestion: suggestion.into(),
            source: None,
        }
    }

    /// Create an acquisition error wrapping the underlying cause.
    pub fn acquisition_caused_by(
        message: impl Into<String>,
        suggestion: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Acquisition {
            message: message.into(),
            suggestion: suggestion.into(),
            source: Some(source.into()),
        }
    }

    /// Create a teardown error wrapping the underlying cause.
    pub fn teardown(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Teardown {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a migration error wrapping the underlying cause.
    pub fn migration(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Migration {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Configuration { suggestion, .. } => Some(suggestion),
            Self::Acquisition { suggestion, .. } => Some(suggestion),
            _ => None,
        }
    }

    /// Check if this error is retryable. Retry policy itself belongs to the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Acquisition { .. })
    }
}

/// Convert sqlx errors raised on the acquisition path to DbError.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(msg) => DbError::configuration(
                msg.to_string(),
                "Check the backend kind and connection properties",
            ),
            sqlx::Error::PoolTimedOut => DbError::acquisition_caused_by(
                format!(
                    "Connection pool exhausted: none free within {}s",
                    crate::config::ACQUIRE_TIMEOUT.as_secs()
                ),
                "Raise the pool size or return connections sooner",
                err,
            ),
            sqlx::Error::PoolClosed => {
                DbError::acquisition("Connection pool is closed", "Build a new provider")
            }
            sqlx::Error::Migrate(migrate_err) => {
                DbError::migration("Migration engine error", *migrate_err)
            }
            sqlx::Error::Io(_) => DbError::acquisition_caused_by(
                "I/O error",
                "Check network connectivity and database server status",
                err,
            ),
            sqlx::Error::Tls(_) => DbError::acquisition_caused_by(
                "TLS error",
                "Verify TLS configuration and certificates",
                err,
            ),
            sqlx::Error::Database(_) => DbError::acquisition_caused_by(
                "Database refused the connection",
                "Check credentials and that the database exists",
                err,
            ),
            _ => DbError::acquisition_caused_by(
                "Unexpected driver error",
                "Check database driver configuration",
                err,
            ),
        }
    }
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;
