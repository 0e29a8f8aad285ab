//! DB Provider - Main entry point.
//!
//! Builds a connection provider from the command line and environment, applies
//! pending schema migrations, prints a summary of the provider and closes it.

use clap::Parser;
use db_provider::config::Config;
use db_provider::db::{ConnectionProvider, MigrationRunner};
use db_provider::error::DbResult;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse configuration from command line and environment
    let config = Config::parse();

    // Initialize logging
    init_tracing(&config);

    info!(
        backend = %config.backend,
        "Starting DB Provider v{}",
        env!("CARGO_PKG_VERSION")
    );

    let provider = ConnectionProvider::builder()
        .backend(config.backend)
        .properties(config.properties())
        .build()?;

    let result: DbResult<()> = async {
        match &config.migrations {
            Some(source) => MigrationRunner::new(source).update(&provider).await,
            None => {
                let mut connection = provider.acquire().await?;
                connection.ping().await
            }
        }
    }
    .await;

    if let Err(e) = &result {
        error!(error = %e, "Database setup failed");
    } else {
        println!("{}", serde_json::to_string_pretty(&provider.info())?);
    }

    // Close even after a failure so an in-memory store is not left behind.
    provider.close().await?;
    result?;

    info!("Shutdown complete");
    Ok(())
}
