//! 0x Mesh Demo — Entry Point
//!
//! One-shot run: provisions two dummy tokens on a local devnet, signs a
//! trade order between them, and submits it to a local Mesh node for
//! validation.
//!
//! Wiring sequence:
//! 1. Load config.toml (optional; defaults reproduce the devnet snapshot)
//! 2. Init tracing (env-filter, falling back to the configured level)
//! 3. Connect the Mesh WebSocket client
//! 4. Connect the devnet provider + validate the fixed contract addresses
//! 5. Run the demo workflow
//! 6. Exit 0 on success; log a warning and exit 1 on any error

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use zeroex_mesh_demo::adapters::chain::{DevnetProvider, ExchangeContracts};
use zeroex_mesh_demo::adapters::mesh::MeshClient;
use zeroex_mesh_demo::config::{self, AppConfig};
use zeroex_mesh_demo::usecases::demo::DemoWorkflow;

#[tokio::main]
async fn main() {
    // Config comes first; failures here print directly since logging is
    // not up yet.
    let config = match config::loader::load_or_default("config.toml") {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {err:#}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.demo.log_level)),
        )
        .init();

    // Single top-level catch: every failure below lands here, gets logged
    // as a warning, and turns into exit code 1.
    if let Err(err) = run(config).await {
        warn!(error = %format!("{err:#}"), "Demo run failed");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        ws_url = %config.relay.ws_url,
        rpc_url = %config.chain.rpc_url,
        "Starting 0x Mesh order-relay demo"
    );

    let relay = Arc::new(
        MeshClient::connect(&config.relay)
            .await
            .context("Failed to connect to the Mesh relay")?,
    );

    let provider = Arc::new(
        DevnetProvider::connect(&config.chain)
            .await
            .context("Failed to connect to the devnet")?,
    );
    let chain = Arc::new(
        ExchangeContracts::new(provider, &config.chain)
            .await
            .context("Failed to validate exchange contracts")?,
    );

    let report = DemoWorkflow::new(chain, relay, config).run().await?;

    info!(
        accepted = report.results.accepted.len(),
        rejected = report.results.rejected.len(),
        "Order submission complete"
    );
    Ok(())
}
