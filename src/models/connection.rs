//! Connection-related data models.
//!
//! This module defines the backend kinds, connection properties and pool sizing
//! policy the provider is built from.

use crate::config::{DEFAULT_INITIAL_POOL_SIZE, DEFAULT_MIN_POOL_SIZE, NORMAL_MAX_POOL_SIZE};
use serde::{Deserialize, Serialize};

/// Supported database backends.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Includes MariaDB
    #[value(name = "mysql")]
    #[serde(rename = "mysql")]
    MySql,
    Postgres,
    /// Embedded SQLite database stored in a file.
    Sqlite,
    /// Shared-cache SQLite database living only in process memory.
    SqliteMemory,
}

impl BackendKind {
    /// Get the display name for this backend.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MySql => "MySQL",
            Self::Postgres => "PostgreSQL",
            Self::Sqlite => "SQLite",
            Self::SqliteMemory => "SQLite (in-memory)",
        }
    }

    /// Get the default port for this backend.
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Self::MySql => Some(3306),
            Self::Postgres => Some(5432),
            Self::Sqlite | Self::SqliteMemory => None,
        }
    }

    /// Whether the backend is reached over the network.
    pub fn is_network(&self) -> bool {
        self.default_port().is_some()
    }

    /// The create/drop capability of backends whose store must be materialized
    /// on first connection and destroyed explicitly on close.
    pub fn lifecycle(&self) -> Option<StoreLifecycle> {
        match self {
            Self::SqliteMemory => Some(StoreLifecycle::EPHEMERAL),
            _ => None,
        }
    }

    /// Build the base connection URI for these properties. Credentials are
    /// applied to the connect options, never embedded here.
    pub fn uri(&self, properties: &DbProperties) -> String {
        match self {
            Self::MySql => format!(
                "mysql://{}:{}/{}?ssl-mode=disabled&charset=utf8mb4",
                properties.host, properties.port, properties.name
            ),
            Self::Postgres => format!(
                "postgres://{}:{}/{}?sslmode=prefer",
                properties.host, properties.port, properties.name
            ),
            Self::Sqlite => format!("sqlite:{}?mode=rwc", properties.name),
            Self::SqliteMemory => {
                format!("sqlite:file:{}?mode=memory&cache=shared", properties.name)
            }
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Connection directive appended to a base URI during bootstrap or teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Create,
    Drop,
}

impl Directive {
    const SEPARATOR: char = ';';

    fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create=true",
            Self::Drop => "drop=true",
        }
    }

    /// Append this directive to a base URI.
    pub fn apply(&self, base_uri: &str) -> String {
        format!("{}{}{}", base_uri, Self::SEPARATOR, self.as_str())
    }

    /// Split a URI into its base part and optional directive.
    pub fn split(uri: &str) -> (&str, Option<Directive>) {
        match uri.rsplit_once(Self::SEPARATOR) {
            Some((base, "create=true")) => (base, Some(Self::Create)),
            Some((base, "drop=true")) => (base, Some(Self::Drop)),
            _ => (uri, None),
        }
    }
}

/// Create/drop capability attached to a backend kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLifecycle {
    /// Pool ceiling restored once the store has been created.
    pub operating_max: u32,
}

impl StoreLifecycle {
    const EPHEMERAL: Self = Self {
        operating_max: NORMAL_MAX_POOL_SIZE,
    };

    pub fn create_uri(&self, base_uri: &str) -> String {
        Directive::Create.apply(base_uri)
    }

    pub fn drop_uri(&self, base_uri: &str) -> String {
        Directive::Drop.apply(base_uri)
    }

    /// Sizing forced while the store is created: exactly one physical connection.
    pub fn bootstrap_sizing(&self) -> PoolSizing {
        PoolSizing::fixed(1)
    }

    /// Sizing once the store exists: one warm connection, growth up to the ceiling.
    pub fn operating_sizing(&self) -> PoolSizing {
        PoolSizing {
            min: 1,
            max: self.operating_max,
            initial: 1,
        }
    }
}

/// Pool sizing policy: minimum, maximum and initial number of connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSizing {
    pub min: u32,
    pub max: u32,
    pub initial: u32,
}

impl PoolSizing {
    /// A pool that holds exactly `size` connections.
    pub fn fixed(size: u32) -> Self {
        Self {
            min: size,
            max: size,
            initial: size,
        }
    }

    /// Validate the policy and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max == 0 {
            return Err("max pool size must be greater than 0".to_string());
        }
        if self.min > self.max {
            return Err(format!(
                "min pool size ({}) cannot exceed max pool size ({})",
                self.min, self.max
            ));
        }
        if self.initial > self.max {
            return Err(format!(
                "initial pool size ({}) cannot exceed max pool size ({})",
                self.initial, self.max
            ));
        }
        Ok(())
    }
}

impl Default for PoolSizing {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_POOL_SIZE,
            max: NORMAL_MAX_POOL_SIZE,
            initial: DEFAULT_INITIAL_POOL_SIZE,
        }
    }
}

/// Connection coordinates and credentials.
#[derive(Clone, Serialize, Deserialize)]
pub struct DbProperties {
    pub host: String,
    pub port: u16,
    /// Database name, or file path for the file-backed SQLite backend.
    pub name: String,
    #[serde(default)]
    pub login: String,
    /// Contains sensitive data - never log
    #[serde(default, skip_serializing)]
    pub password: String,
}

impl DbProperties {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        name: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            name: name.into(),
            login: login.into(),
            password: password.into(),
        }
    }

    /// Properties for a local database of the given backend, without credentials.
    pub fn default_for(backend: BackendKind, name: impl Into<String>) -> Self {
        Self::new(
            crate::config::DEFAULT_HOST,
            backend.default_port().unwrap_or_default(),
            name,
            "",
            "",
        )
    }
}

impl std::fmt::Debug for DbProperties {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbProperties")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("login", &self.login)
            .field("password", &"****")
            .finish()
    }
}

/// Summary of a provider, safe to log or print (no secrets exposed).
#[derive(Debug, Clone, Serialize)]
pub struct ProviderInfo {
    pub backend: BackendKind,
    pub uri: String,
    pub login: String,
    pub open: bool,
    pub sizing: PoolSizing,
}
