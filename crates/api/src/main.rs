//! Recovery-squad API server binary.
//!
//! Usage:
//!   squad-api --config squad.toml
//!   squad-api --port 3773
//!   squad-api --port 3773 --bind 0.0.0.0
//!
//! # Environment Variables
//!
//! - `OPENROUTER_API_KEY` - Model provider credential (required unless in config)
//! - `MEM0_API_KEY` - Optional memory-service credential
//! - `RUST_LOG` - Log filter (default: info)

use squad_api::{serve, AppState};
use squad_coordinator::SquadConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,squad_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line arguments (simple for now)
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut port: Option<u16> = None;
    let mut bind_addr: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    port = Some(args[i + 1].parse().expect("Invalid port number"));
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    bind_addr = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Breakup Recovery Squad API Server");
                println!();
                println!("Usage: squad-api [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -p, --port <PORT>    Port to listen on (default: 3773)");
                println!("  -b, --bind <ADDR>    Bind address (default: 127.0.0.1)");
                println!("  -c, --config <FILE>  Path to squad.toml file");
                println!("  -h, --help           Show this help message");
                println!();
                println!("Environment variables:");
                println!("  OPENROUTER_API_KEY   Model provider credential");
                println!("  MEM0_API_KEY         Optional memory-service credential");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    // Load squad configuration
    let config = if let Some(path) = config_path {
        tracing::info!(path = %path, "Loading configuration");
        SquadConfig::from_file(&path)?
    } else {
        tracing::info!("Using default configuration");
        SquadConfig::default()
    };

    let host = bind_addr.unwrap_or_else(|| config.deployment.bind.clone());
    let port = port.unwrap_or(config.deployment.port);

    if host == "0.0.0.0" {
        tracing::warn!(
            "Server binding to 0.0.0.0 — this exposes the API to all network interfaces."
        );
    }

    let state = AppState::new(config);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    serve(Arc::new(state), addr).await?;

    Ok(())
}
