//! Instrumented Mini HTTP Backend
//!
//! A small API service built with Tokio and Axum, instrumented end to end.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                 MINI BACKEND                  │
//!                    │                                               │
//!   Client Request   │  ┌──────────┐   ┌────────────┐   ┌────────┐  │
//!   ─────────────────┼─▶│   http   │──▶│ middleware │──▶│handlers│  │
//!                    │  │  server  │   │ telemetry  │   │        │  │
//!                    │  └──────────┘   └─────┬──────┘   └───┬────┘  │
//!                    │                       │              │       │
//!                    │                       ▼              ▼       │
//!                    │               ┌────────────┐   ┌──────────┐  │
//!   Client Response  │               │observability│  │  store   │  │
//!   ◀────────────────┼───────────────│  registry   │  │  items   │  │
//!                    │               └────────────┘   └──────────┘  │
//!                    │                                               │
//!                    │  Cross-cutting: config, structured logging    │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! Every request is timed and counted from a single emission point, so the
//! metrics endpoint and the log stream always agree on traffic totals.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use mini_backend::config::{load_config, AppConfig};
use mini_backend::http::ApiServer;
use mini_backend::observability::logging;

#[derive(Parser)]
#[command(name = "mini-backend")]
#[command(about = "Instrumented mini HTTP backend", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listener address override, e.g. 127.0.0.1:9000.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Defaults alone are a complete configuration; a file is optional.
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "mini-backend starting"
    );
    tracing::info!(
        bind_address = %config.listener.bind_address,
        log_level = %config.observability.log_level,
        config_file = ?cli.config,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let server = ApiServer::new(&config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
