// ABOUTME: HTTP server binary for the nutrition fusion API
// ABOUTME: Loads configuration, opens the database, and serves the axum router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutrifuse Server Binary
//!
//! Starts the nutrition fusion HTTP API.

use anyhow::Result;
use clap::Parser;
use nutrifuse_server::{
    config::{DatabaseUrl, ServerConfig},
    constants::endpoints::{FUSE, HEALTH_CHECK, READY_CHECK, SOURCES},
    database::Database,
    logging,
    resources::ServerResources,
    routes::build_router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "nutrifuse-server")]
#[command(about = "Nutrifuse - nutrition data fusion API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Install the subscriber before anything logs
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url.as_deref() {
        config.database_url = DatabaseUrl::parse_url(database_url)?;
    }
    info!("{}", config.summary());

    let database = Database::new(&config.database_url.to_connection_string()).await?;
    let http_port = config.http_port;
    let resources = Arc::new(ServerResources::new(database, config));
    let app = build_router(&resources);

    let addr = SocketAddr::from(([0, 0, 0, 0], http_port));
    let listener = TcpListener::bind(addr).await?;
    display_available_endpoints(http_port);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {e}");
        return Err(e.into());
    }

    info!("Server stopped");
    Ok(())
}

fn display_available_endpoints(port: u16) {
    info!("Listening on http://0.0.0.0:{port}");
    for (method, path) in [
        ("POST", FUSE),
        ("GET ", "/api/nutrition/profiles/{ingredient}"),
        ("GET ", SOURCES),
        ("GET ", HEALTH_CHECK),
        ("GET ", READY_CHECK),
    ] {
        info!("  {method} {path}");
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install shutdown handler: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
