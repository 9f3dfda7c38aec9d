//! Chain Client Port - On-chain Provisioning and Query Interface
//!
//! Defines the trait for everything the demo does against the devnet:
//! account enumeration, dummy-token deployment, minting and approving the
//! maker balance, and querying the order-relevant state the relay will
//! also look at when it validates the order.

use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;

use crate::domain::order::SignedOrder;

/// On-chain order status as reported by the DevUtils helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
  /// Default/unknown state.
  Invalid,
  /// Maker asset amount is zero.
  InvalidMakerAssetAmount,
  /// Taker asset amount is zero.
  InvalidTakerAssetAmount,
  /// Order is open and fillable.
  Fillable,
  /// Expiration timestamp has passed.
  Expired,
  /// Order has been completely filled.
  FullyFilled,
  /// Order has been cancelled by the maker.
  Cancelled,
}

impl From<u8> for OrderStatus {
  fn from(raw: u8) -> Self {
    match raw {
      1 => Self::InvalidMakerAssetAmount,
      2 => Self::InvalidTakerAssetAmount,
      3 => Self::Fillable,
      4 => Self::Expired,
      5 => Self::FullyFilled,
      6 => Self::Cancelled,
      _ => Self::Invalid,
    }
  }
}

impl std::fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      Self::Invalid => "INVALID",
      Self::InvalidMakerAssetAmount => "INVALID_MAKER_ASSET_AMOUNT",
      Self::InvalidTakerAssetAmount => "INVALID_TAKER_ASSET_AMOUNT",
      Self::Fillable => "FILLABLE",
      Self::Expired => "EXPIRED",
      Self::FullyFilled => "FULLY_FILLED",
      Self::Cancelled => "CANCELLED",
    };
    f.write_str(name)
  }
}

/// Everything on-chain that decides whether an order is currently
/// fillable, fetched in one call.
#[derive(Debug, Clone)]
pub struct OrderRelevantState {
  /// Fill/cancel status of the order.
  pub order_status: OrderStatus,
  /// Order hash as the helper contract computed it.
  pub order_hash: B256,
  /// Taker asset amount already filled.
  pub taker_asset_filled_amount: U256,
  /// Taker asset amount fillable given maker balance and allowance.
  pub fillable_taker_asset_amount: U256,
  /// Whether the signature checks out on-chain.
  pub is_valid_signature: bool,
}

/// Trait for devnet chain access.
///
/// Implementors wrap an RPC provider and the demo's contract bindings.
/// Token mutations are transactions awaited to inclusion; queries are
/// `eth_call`s against latest state.
#[async_trait]
pub trait ChainClient: Send + Sync + 'static {
  /// Enumerate the node's unlocked accounts.
  async fn accounts(&self) -> anyhow::Result<Vec<Address>>;

  /// Deploy a fresh mintable dummy token and return its address.
  async fn deploy_dummy_token(
    &self,
    deployer: Address,
    name: &str,
    symbol: &str,
    decimals: u32,
    total_supply: U256,
  ) -> anyhow::Result<Address>;

  /// Mint `amount` base units of `token` to `to`.
  async fn mint(&self, token: Address, to: Address, amount: U256) -> anyhow::Result<()>;

  /// Approve `spender` to move `amount` of `owner`'s `token` balance.
  async fn approve(
    &self,
    token: Address,
    owner: Address,
    spender: Address,
    amount: U256,
  ) -> anyhow::Result<()>;

  /// Current `token` balance of `owner`.
  async fn balance_of(&self, token: Address, owner: Address) -> anyhow::Result<U256>;

  /// Current allowance granted by `owner` to `spender` on `token`.
  async fn allowance(
    &self,
    token: Address,
    owner: Address,
    spender: Address,
  ) -> anyhow::Result<U256>;

  /// Query the DevUtils helper for the order's fillability state.
  async fn order_relevant_state(
    &self,
    order: &SignedOrder,
  ) -> anyhow::Result<OrderRelevantState>;

  /// Check that the RPC connection is healthy via a lightweight call.
  async fn is_healthy(&self) -> bool;
}
