//! json-server
//!
//! Serves canned HTTP responses described by a JSON route tree.
//!
//! # Architecture Overview
//!
//! ```text
//!   server.json ──▶ config::loader ──▶ RouteTree ──▶ routing::compiler ──▶ RouteTable
//!                                                                             │
//!   Client ──▶ TcpListener ──▶ axum Router ──▶ dispatch_handler ◀─────────────┘
//!                 (request id, trace, timeout)      │
//!   Client ◀──────────────── canned response / 405 / 404
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use json_server::config::{load_config, validate_config, ConfigError, ServerConfig};
use json_server::http::MockServer;
use json_server::lifecycle::{prepare, signals, Shutdown};
use json_server::observability::{logging, metrics};
use json_server::routing::RouteCompiler;

#[derive(Parser)]
#[command(name = "json-server")]
#[command(about = "Mock HTTP server driven by a JSON route tree", long_about = None)]
struct Cli {
    /// The JSON file to use as the server
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Optional TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Settings file (or defaults) with command-line overrides applied.
    fn resolve_config(&self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServerConfig::default(),
        };
        if let Some(file) = &self.file {
            config.routes.file = file.clone();
        }
        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    logging::init(&config.observability.log_level);
    tracing::info!("json-server v{} starting", env!("CARGO_PKG_VERSION"));

    let routes = prepare(&config, &RouteCompiler::new())?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        request_timeout_secs = config.timeouts.request_secs,
        "Listening for connections"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let shutdown = Arc::new(Shutdown::new());
    signals::spawn_signal_listener(shutdown.clone());

    let server = MockServer::new(config, routes);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
