//! Configuration handling for the connection provider.
//!
//! This module provides configuration management via CLI arguments and environment
//! variables, plus the fixed pool tuning constants.

use crate::models::{BackendKind, DbProperties};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Idle ceiling for pooled connections of persistent backends.
pub const MAX_IDLE_TIME: Duration = Duration::from_secs(3600);
/// Idle time after which connections above the pool minimum are released.
pub const MAX_IDLE_TIME_EXCESS_CONNECTIONS: Duration = Duration::from_secs(1800);
/// Maximum pool size once the provider is in normal operation.
pub const NORMAL_MAX_POOL_SIZE: u32 = 15;
pub const DEFAULT_MIN_POOL_SIZE: u32 = 1;
pub const DEFAULT_INITIAL_POOL_SIZE: u32 = 1;
/// How long `acquire()` waits for a pooled connection before giving up.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Command line / environment configuration for the `db-provider` binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "db-provider")]
#[command(about = "Provision a pooled database connection and apply schema migrations")]
#[command(version)]
pub struct Config {
    /// Database backend
    #[arg(long, env = "DB_BACKEND", value_enum)]
    pub backend: BackendKind,

    /// Database host (network backends only)
    #[arg(long, env = "DB_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Database port (defaults to the backend's standard port)
    #[arg(long, env = "DB_PORT")]
    pub port: Option<u16>,

    /// Database name, or file path for embedded backends
    #[arg(long, env = "DB_NAME")]
    pub name: String,

    /// Login used to authenticate
    #[arg(long, env = "DB_LOGIN", default_value = "")]
    pub login: String,

    /// Password used to authenticate
    #[arg(long, env = "DB_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Directory holding migration scripts to apply after connecting
    #[arg(long, env = "DB_MIGRATIONS")]
    pub migrations: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Output logs in JSON format
    #[arg(long, env = "JSON_LOGS", default_value = "false")]
    pub json_logs: bool,
}

impl Config {
    /// Connection properties described by this configuration.
    pub fn properties(&self) -> DbProperties {
        let port = self
            .port
            .or_else(|| self.backend.default_port())
            .unwrap_or_default();
        DbProperties::new(
            self.host.clone(),
            port,
            self.name.clone(),
            self.login.clone(),
            self.password.clone(),
        )
    }
}
