//! Demo Workflow - One-shot Order Relay Orchestration
//!
//! Runs the demo sequence start to finish against the ports: enumerate
//! accounts, deploy the two dummy tokens, mint and approve the maker
//! balance, build and sign the order, query its on-chain state, and
//! submit it to the relay. Strictly sequential, no retries, no rollback:
//! the first failing step aborts the run and already-completed steps
//! (deployed tokens, set allowances) are left behind on the devnet.

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use alloy::signers::local::PrivateKeySigner;
use anyhow::{bail, Context, Result};
use tracing::{info, instrument, warn};

use crate::config::AppConfig;
use crate::domain::asset_data::encode_erc20;
use crate::domain::order::{expiration_in, random_salt, Order, SignedOrder};
use crate::ports::chain::{ChainClient, OrderRelevantState};
use crate::ports::relay::{OrderRelay, ValidationResults};

/// Everything the run produced, for logging and assertions.
#[derive(Debug)]
pub struct DemoReport {
  /// Maker token balance after minting.
  pub maker_balance: U256,
  /// Maker allowance granted to the asset-transfer proxy.
  pub maker_allowance: U256,
  /// The signed order that was submitted.
  pub order: SignedOrder,
  /// Order-relevant on-chain state at submission time.
  pub state: OrderRelevantState,
  /// The relay's validation verdict.
  pub results: ValidationResults,
}

/// The one-shot demo orchestration.
pub struct DemoWorkflow {
  /// Devnet access (accounts, tokens, DevUtils).
  chain: Arc<dyn ChainClient>,
  /// Mesh relay access.
  relay: Arc<dyn OrderRelay>,
  /// Demo parameters.
  config: AppConfig,
}

impl DemoWorkflow {
  /// Wire the workflow from its ports and configuration.
  pub fn new(chain: Arc<dyn ChainClient>, relay: Arc<dyn OrderRelay>, config: AppConfig) -> Self {
    Self {
      chain,
      relay,
      config,
    }
  }

  /// Run the full demo sequence and return what happened.
  #[instrument(skip_all)]
  pub async fn run(&self) -> Result<DemoReport> {
    let accounts = self.chain.accounts().await?;
    anyhow::ensure!(
      accounts.len() >= 3,
      "Demo needs at least three unlocked accounts, got {}",
      accounts.len()
    );
    let (maker, taker, fee_recipient) = (accounts[0], accounts[1], accounts[2]);
    let signer = self.maker_signer(maker)?;
    info!(
      maker = %maker,
      taker = %taker,
      fee_recipient = %fee_recipient,
      "Using devnet accounts"
    );

    let token = &self.config.token;
    let maker_token = self
      .chain
      .deploy_dummy_token(
        maker,
        &token.name,
        &token.symbol,
        token.decimals,
        token.total_supply,
      )
      .await?;
    let taker_token = self
      .chain
      .deploy_dummy_token(
        maker,
        &token.name,
        &token.symbol,
        token.decimals,
        token.total_supply,
      )
      .await?;

    let amount = self.config.order.maker_asset_amount;
    let proxy = self.config.chain.erc20_proxy;
    self.chain.mint(maker_token, maker, amount).await?;
    self.chain.approve(maker_token, maker, proxy, amount).await?;

    let maker_balance = self.chain.balance_of(maker_token, maker).await?;
    let maker_allowance = self.chain.allowance(maker_token, maker, proxy).await?;
    info!(balance = %maker_balance, "Maker token balance");
    info!(allowance = %maker_allowance, "Maker proxy allowance");

    let order = Order {
      chain_id: self.config.chain.chain_id,
      exchange_address: self.config.chain.exchange,
      maker_address: maker,
      taker_address: taker,
      fee_recipient_address: fee_recipient,
      sender_address: Address::ZERO,
      maker_asset_amount: amount,
      // The taker leg mirrors the maker leg, and both fees are zero.
      taker_asset_amount: amount,
      maker_fee: U256::ZERO,
      taker_fee: U256::ZERO,
      expiration_time_seconds: expiration_in(self.config.order.ttl_secs),
      salt: random_salt(),
      maker_asset_data: encode_erc20(maker_token),
      taker_asset_data: encode_erc20(taker_token),
      maker_fee_asset_data: encode_erc20(maker_token),
      taker_fee_asset_data: encode_erc20(taker_token),
    };
    let signed = order.sign(&signer).context("Failed to sign order")?;
    info!(order_hash = %signed.order_hash(), "Order signed");

    let state = self.chain.order_relevant_state(&signed).await?;
    info!(
      status = %state.order_status,
      fillable = %state.fillable_taker_asset_amount,
      valid_signature = state.is_valid_signature,
      "Order-relevant on-chain state"
    );

    let results = self
      .relay
      .add_orders(std::slice::from_ref(&signed))
      .await
      .context("Order submission to Mesh failed")?;
    for accepted in &results.accepted {
      info!(
        order_hash = %accepted.order_hash,
        fillable = %accepted.fillable_taker_asset_amount,
        is_new = accepted.is_new,
        "Order accepted by relay"
      );
    }
    for rejected in &results.rejected {
      warn!(
        order_hash = %rejected.order_hash,
        kind = %rejected.kind,
        code = %rejected.status.code,
        message = %rejected.status.message,
        "Order rejected by relay"
      );
    }

    Ok(DemoReport {
      maker_balance,
      maker_allowance,
      order: signed,
      state,
      results,
    })
  }

  /// Find the configured devnet key whose derived address is the maker.
  fn maker_signer(&self, maker: Address) -> Result<PrivateKeySigner> {
    for raw in &self.config.chain.test_private_keys {
      let signer: PrivateKeySigner = raw
        .parse()
        .context("Invalid devnet private key in config")?;
      if signer.address() == maker {
        return Ok(signer);
      }
    }
    bail!("No configured devnet key matches maker account {maker}")
  }
}
