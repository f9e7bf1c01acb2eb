//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use crate::http_server::HttpServer;
use crate::news::NewsService;
use crate::observability::{init_logging, Event};
use crate::rest_api::{endpoints, AppState};
use crate::store::{MemoryStore, PgExecutor, QueryExecutor};

use super::args::Command;
use super::config::AppConfig;
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            port,
            memory,
        } => serve(&config, port, memory),
        Command::CheckConfig { config } => check_config(&config),
        Command::Endpoints => write_json(&endpoints::descriptor()),
    }
}

/// Start the HTTP API.
///
/// 1. Load configuration and install logging
/// 2. Connect the query executor (or seed the in-memory store)
/// 3. Serve until the process ends
pub fn serve(config_path: &Path, port: Option<u16>, memory: bool) -> CliResult<()> {
    let mut config = AppConfig::load(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    init_logging(&config.logging);
    tracing::info!(
        event = %Event::ConfigLoaded,
        path = %config_path.display(),
        port = config.server.port,
        "configuration loaded"
    );

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        let store = connect_store(&config, memory).await?;
        let state = AppState::new(NewsService::new(store), config.empty_body);

        HttpServer::new(config.server.clone(), state)
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

async fn connect_store(config: &AppConfig, memory: bool) -> CliResult<Arc<dyn QueryExecutor>> {
    if memory {
        tracing::info!(event = %Event::StoreConnected, backend = "memory", "serving demo dataset");
        return Ok(Arc::new(MemoryStore::demo()));
    }

    let executor = PgExecutor::connect(&config.database)?;
    executor.ping().await?;
    tracing::info!(
        event = %Event::StoreConnected,
        backend = "postgres",
        max_connections = config.database.max_connections,
        "database pool ready"
    );
    Ok(Arc::new(executor))
}

/// Print the effective configuration with credentials masked, or fail on
/// an invalid one
pub fn check_config(config_path: &Path) -> CliResult<()> {
    let config = AppConfig::load(config_path)?;
    write_json(&config.redacted())
}
