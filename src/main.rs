// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Parser;
use std::env;
use tracing::info;
use veramo_backend::{api::start_server, version, AppState, ServiceConfig};

#[derive(Parser, Debug)]
#[command(name = "veramo-backend", version = version::VERSION_NUMBER, about = "Veramo media generation backend")]
struct Args {
    /// Interface to bind
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    info!("Starting {}", version::get_version_string());

    let mut config = ServiceConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    config
        .validate()
        .map_err(|e| anyhow!("invalid configuration: {}", e))?;

    let state = AppState::from_config(config)?;

    tokio::select! {
        result = start_server(state) => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
    }

    Ok(())
}
