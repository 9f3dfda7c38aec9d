//! Order Relay Port - Off-chain Order Submission Interface
//!
//! Defines the trait for handing signed orders to the Mesh relay network
//! and the validation result shapes it answers with. Mesh validates each
//! order against on-chain state before propagating it to peers; every
//! submitted order lands in exactly one of the two result lists.

use alloy::primitives::{B256, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::order::SignedOrder;
use crate::domain::u256_decimal;

/// Outcome of submitting a batch of orders for validation.
///
/// `accepted` and `rejected` partition the submission: every order shows
/// up in exactly one list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResults {
  /// Orders the relay validated and stored for propagation.
  #[serde(default)]
  pub accepted: Vec<AcceptedOrderInfo>,
  /// Orders the relay refused, with the reason.
  #[serde(default)]
  pub rejected: Vec<RejectedOrderInfo>,
}

impl ValidationResults {
  /// Total number of orders accounted for.
  pub fn total(&self) -> usize {
    self.accepted.len() + self.rejected.len()
  }
}

/// An order the relay accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedOrderInfo {
  /// EIP-712 order hash.
  pub order_hash: B256,
  /// The order as the relay stored it.
  pub signed_order: SignedOrder,
  /// How much of the taker amount is currently fillable.
  #[serde(with = "u256_decimal")]
  pub fillable_taker_asset_amount: U256,
  /// Whether the relay had not seen this order before.
  #[serde(default)]
  pub is_new: bool,
}

/// An order the relay rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedOrderInfo {
  /// EIP-712 order hash.
  pub order_hash: B256,
  /// The order as submitted.
  pub signed_order: SignedOrder,
  /// Coarse rejection class (e.g. `ZEROEX_VALIDATION`, `MESH_ERROR`).
  pub kind: String,
  /// Machine-readable code and human-readable message.
  pub status: RejectedOrderStatus,
}

/// Status detail attached to a rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedOrderStatus {
  /// Stable rejection code (e.g. `OrderHasInvalidMakerAssetAmount`).
  pub code: String,
  /// Explanation suitable for logs.
  pub message: String,
}

/// Trait for order-relay providers.
///
/// Implementors connect to an off-chain relay network and submit signed
/// orders for validation and propagation. Submission is fire-once: the
/// relay answers with a validation verdict, not a fill.
#[async_trait]
pub trait OrderRelay: Send + Sync + 'static {
  /// Submit signed orders and return the relay's validation verdict.
  async fn add_orders(&self, orders: &[SignedOrder]) -> anyhow::Result<ValidationResults>;

  /// Check that the relay endpoint is responsive.
  async fn is_healthy(&self) -> bool;
}
