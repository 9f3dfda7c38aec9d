//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml` when it exists, falling back to the
//! built-in devnet defaults when it does not, and validating all
//! parameters with clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load configuration from a TOML file, or use defaults if it is absent.
///
/// # Errors
/// Returns detailed error if:
/// - The file exists but can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_or_default(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let config = if path.exists() {
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content).with_context(|| "Failed to parse config.toml")?
  } else {
    AppConfig::default()
  };

  validate_config(&config)?;

  info!(
    ws_url = %config.relay.ws_url,
    rpc_url = %config.chain.rpc_url,
    chain_id = config.chain.chain_id,
    from_file = path.exists(),
    "Configuration loaded"
  );

  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Non-empty endpoint URLs
/// - A plausible chain id and timeout
/// - At least one devnet signing key
/// - Non-zero order amount and expiration window
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.relay.ws_url.is_empty(),
    "Mesh WebSocket URL must not be empty"
  );
  anyhow::ensure!(
    !config.chain.rpc_url.is_empty(),
    "Devnet RPC URL must not be empty"
  );
  anyhow::ensure!(config.chain.chain_id != 0, "chain_id must be non-zero");
  anyhow::ensure!(
    config.relay.request_timeout_secs > 0,
    "request_timeout_secs must be positive"
  );
  anyhow::ensure!(
    !config.chain.test_private_keys.is_empty(),
    "At least one devnet private key must be configured"
  );
  anyhow::ensure!(
    config.order.maker_asset_amount > alloy::primitives::U256::ZERO,
    "Order maker_asset_amount must be positive"
  );
  anyhow::ensure!(config.order.ttl_secs > 0, "Order ttl_secs must be positive");
  anyhow::ensure!(
    config.token.decimals <= 77,
    "Token decimals must fit a uint256 power of ten, got {}",
    config.token.decimals
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use alloy::primitives::{address, U256};

  use super::*;

  #[test]
  fn test_missing_file_yields_defaults() {
    let config = load_or_default("nonexistent.toml").unwrap();
    assert_eq!(config.relay.ws_url, "ws://localhost:60557");
    assert_eq!(config.chain.chain_id, 1337);
    assert_eq!(
      config.chain.erc20_proxy,
      address!("1dc4c1cefef38a777b15aa20260a54e584b16c48")
    );
    assert_eq!(
      config.chain.exchange,
      address!("48bacb9266a570d521063ef5dd96e61686dbe788")
    );
    assert_eq!(
      config.order.maker_asset_amount,
      U256::from(100u64) * U256::from(10u64).pow(U256::from(18u64))
    );
  }

  #[test]
  fn test_partial_file_overrides_defaults() {
    let config: AppConfig = toml::from_str(
      r#"
        [relay]
        ws_url = "ws://localhost:61000"

        [order]
        maker_asset_amount = "5000000000000000000"
      "#,
    )
    .unwrap();
    validate_config(&config).unwrap();
    assert_eq!(config.relay.ws_url, "ws://localhost:61000");
    assert_eq!(
      config.order.maker_asset_amount,
      U256::from(5u64) * U256::from(10u64).pow(U256::from(18u64))
    );
    // Untouched sections keep their defaults.
    assert_eq!(config.chain.rpc_url, "http://localhost:8545");
  }

  #[test]
  fn test_zero_order_amount_rejected() {
    let mut config = AppConfig::default();
    config.order.maker_asset_amount = U256::ZERO;
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_empty_key_list_rejected() {
    let mut config = AppConfig::default();
    config.chain.test_private_keys.clear();
    assert!(validate_config(&config).is_err());
  }
}
