//! Configuration Module - TOML-based Demo Configuration
//!
//! Loads configuration from `config.toml` when present and falls back to
//! built-in defaults otherwise. The defaults reproduce the fixed devnet
//! snapshot this demo targets (Mesh endpoint, contract addresses, test
//! accounts), so a bare checkout runs without any file at all. All contract
//! addresses and order parameters are externalized here - nothing is
//! hardcoded in the workflow layer.

pub mod loader;

use alloy::primitives::{address, Address, U256};
use serde::Deserialize;

use crate::domain::u256_decimal;

/// Top-level demo configuration.
///
/// Every section and field carries a default, so an absent `config.toml`
/// yields a fully usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// Demo process settings.
  #[serde(default)]
  pub demo: DemoConfig,
  /// Mesh order-relay endpoint settings.
  #[serde(default)]
  pub relay: RelayConfig,
  /// Devnet RPC endpoint, contract addresses, and test keys.
  #[serde(default)]
  pub chain: ChainConfig,
  /// Dummy token deployment parameters.
  #[serde(default)]
  pub token: TokenConfig,
  /// Trade order parameters.
  #[serde(default)]
  pub order: OrderConfig,
}

/// Demo process settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

/// Mesh order-relay endpoint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
  /// WebSocket URL of the local Mesh node's JSON-RPC endpoint.
  #[serde(default = "default_ws_url")]
  pub ws_url: String,
  /// Per-request timeout on the Mesh socket, in seconds.
  #[serde(default = "default_request_timeout")]
  pub request_timeout_secs: u64,
}

/// Devnet chain configuration.
///
/// The contract addresses default to the 0x ganache snapshot deployments
/// this demo is built against; the private keys are the snapshot's
/// deterministic test keys, used only to locate the maker's signing key.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
  /// Devnet JSON-RPC endpoint.
  #[serde(default = "default_rpc_url")]
  pub rpc_url: String,
  /// Expected chain id, validated at startup.
  #[serde(default = "default_chain_id")]
  pub chain_id: u64,
  /// Gas limit applied to every transaction.
  #[serde(default = "default_gas_limit")]
  pub gas_limit: u64,
  /// Gas price applied to every transaction, in wei.
  #[serde(default = "default_gas_price")]
  pub gas_price_wei: u128,
  /// ERC-20 asset-transfer proxy contract.
  #[serde(default = "default_erc20_proxy")]
  pub erc20_proxy: Address,
  /// Exchange (settlement) contract; the EIP-712 verifying contract.
  #[serde(default = "default_exchange")]
  pub exchange: Address,
  /// DevUtils state-query helper contract.
  #[serde(default = "default_dev_utils")]
  pub dev_utils: Address,
  /// Deterministic devnet private keys (hex). The maker's key is found by
  /// matching derived addresses against the node's unlocked accounts.
  #[serde(default = "default_test_private_keys")]
  pub test_private_keys: Vec<String>,
}

/// Dummy ERC-20 deployment parameters, shared by both traded tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
  /// Token name.
  #[serde(default = "default_token_name")]
  pub name: String,
  /// Token symbol.
  #[serde(default = "default_token_symbol")]
  pub symbol: String,
  /// Token decimals.
  #[serde(default = "default_token_decimals")]
  pub decimals: u32,
  /// Initial total supply, in base units.
  #[serde(default = "default_total_supply", with = "u256_decimal")]
  pub total_supply: U256,
}

/// Trade order parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderConfig {
  /// Maker asset amount in base units. The taker asset amount is the same
  /// value by construction, and both fees are zero.
  #[serde(default = "default_order_amount", with = "u256_decimal")]
  pub maker_asset_amount: U256,
  /// Seconds until the order expires.
  #[serde(default = "default_order_ttl")]
  pub ttl_secs: u64,
}

impl Default for DemoConfig {
  fn default() -> Self {
    Self {
      log_level: default_log_level(),
    }
  }
}

impl Default for RelayConfig {
  fn default() -> Self {
    Self {
      ws_url: default_ws_url(),
      request_timeout_secs: default_request_timeout(),
    }
  }
}

impl Default for ChainConfig {
  fn default() -> Self {
    Self {
      rpc_url: default_rpc_url(),
      chain_id: default_chain_id(),
      gas_limit: default_gas_limit(),
      gas_price_wei: default_gas_price(),
      erc20_proxy: default_erc20_proxy(),
      exchange: default_exchange(),
      dev_utils: default_dev_utils(),
      test_private_keys: default_test_private_keys(),
    }
  }
}

impl Default for TokenConfig {
  fn default() -> Self {
    Self {
      name: default_token_name(),
      symbol: default_token_symbol(),
      decimals: default_token_decimals(),
      total_supply: default_total_supply(),
    }
  }
}

impl Default for OrderConfig {
  fn default() -> Self {
    Self {
      maker_asset_amount: default_order_amount(),
      ttl_secs: default_order_ttl(),
    }
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_ws_url() -> String {
  "ws://localhost:60557".to_string()
}

fn default_request_timeout() -> u64 {
  30
}

fn default_rpc_url() -> String {
  "http://localhost:8545".to_string()
}

fn default_chain_id() -> u64 {
  1337
}

fn default_gas_limit() -> u64 {
  9_000_000
}

fn default_gas_price() -> u128 {
  20_000_000_000 // 20 gwei
}

fn default_erc20_proxy() -> Address {
  address!("1dc4c1cefef38a777b15aa20260a54e584b16c48")
}

fn default_exchange() -> Address {
  address!("48bacb9266a570d521063ef5dd96e61686dbe788")
}

fn default_dev_utils() -> Address {
  address!("b23672f74749bf7916ba6827c64111a4d6de7f11")
}

fn default_test_private_keys() -> Vec<String> {
  [
    "0xf2f48ee19680706196e2e339e5da3491186e0c4c5030670656b0e0164837257d",
    "0x5d862464fe9303452126c8bc94274b8c5f9874cbd219789b3eb2128075a76f72",
    "0xdf02719c4df8b9b8ac7f551fcb5d9ef48fa27eef7a66453879f4d8fdc6e78fb1",
    "0xff12e391b79415e941a94de3bf3a9aee577aed0731e297d5cfa0b8a1e02fa1d0",
  ]
  .into_iter()
  .map(str::to_string)
  .collect()
}

fn default_token_name() -> String {
  "Dummy Token".to_string()
}

fn default_token_symbol() -> String {
  "DUM".to_string()
}

fn default_token_decimals() -> u32 {
  18
}

fn default_total_supply() -> U256 {
  // 1_000_000_000 tokens at 18 decimals
  U256::from(1_000_000_000u64) * U256::from(10u64).pow(U256::from(18u64))
}

fn default_order_amount() -> U256 {
  // 100 tokens at 18 decimals
  U256::from(100u64) * U256::from(10u64).pow(U256::from(18u64))
}

fn default_order_ttl() -> u64 {
  3600
}
