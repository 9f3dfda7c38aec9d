//! Devnet RPC Provider - alloy-rs Connection Management
//!
//! Manages the connection to the local devnet via alloy-rs. Validates
//! RPC connectivity and the chain id at startup and exposes a shared,
//! type-erased provider instance for all on-chain operations.

use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::config::ChainConfig;

/// Shared devnet RPC provider.
///
/// All chain adapters share a single provider instance to avoid redundant
/// connections. `DynProvider` erases alloy's deeply-nested filler type so
/// the adapter layer stays free of generics.
pub struct DevnetProvider {
    /// The alloy HTTP provider connected to the devnet (type-erased).
    provider: DynProvider,
    /// RPC endpoint URL (for diagnostics).
    #[allow(dead_code)]
    rpc_url: String,
}

impl DevnetProvider {
    /// Connect to the devnet RPC endpoint and validate the chain id.
    ///
    /// The demo signs orders bound to `config.chain_id`; talking to a node
    /// on any other network would produce orders no relay will accept, so
    /// a mismatch is a startup error.
    #[instrument(skip_all)]
    pub async fn connect(config: &ChainConfig) -> Result<Self> {
        let rpc_url = config.rpc_url.clone();

        let provider = ProviderBuilder::new()
            .connect_http(rpc_url.parse().context("Invalid RPC URL")?)
            .erased();

        let chain_id = provider
            .get_chain_id()
            .await
            .context("Failed to query chain ID")?;

        if chain_id != config.chain_id {
            anyhow::bail!(
                "Expected devnet chain_id={}, got {chain_id}",
                config.chain_id
            );
        }

        info!(chain_id, "Connected to devnet RPC");

        Ok(Self { provider, rpc_url })
    }

    /// Get a clone of the type-erased alloy provider.
    pub fn inner(&self) -> DynProvider {
        self.provider.clone()
    }

    /// Enumerate the node's unlocked accounts (`eth_accounts`).
    pub async fn accounts(&self) -> Result<Vec<Address>> {
        self.provider
            .get_accounts()
            .await
            .context("Failed to enumerate unlocked accounts")
    }

    /// Check if the RPC connection is healthy via a lightweight call.
    pub async fn is_healthy(&self) -> bool {
        self.provider.get_block_number().await.is_ok()
    }
}
