//! Exchange Contract Interactions - ChainClient Implementation
//!
//! Implements the `ChainClient` port: token deployment, minting,
//! approvals, and order-relevant state queries via the DevUtils helper.
//! The proxy/exchange/DevUtils addresses come from config and are
//! validated on-chain at startup (code existence check).

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tracing::{info, instrument};

use crate::config::ChainConfig;
use crate::domain::order::SignedOrder;
use crate::ports::chain::{ChainClient, OrderRelevantState, OrderStatus};

use super::contracts::{decimals_word, DevUtils, DevUtilsInstance, DummyERC20Token};
use super::provider::DevnetProvider;

/// Fixed contract addresses of the devnet snapshot, loaded from config.
#[derive(Debug, Clone, Copy)]
pub struct ExchangeAddresses {
    /// ERC-20 asset-transfer proxy (the allowance target).
    pub erc20_proxy: Address,
    /// Exchange (settlement) contract.
    pub exchange: Address,
    /// DevUtils state-query helper.
    pub dev_utils: Address,
}

impl From<&ChainConfig> for ExchangeAddresses {
    fn from(config: &ChainConfig) -> Self {
        Self {
            erc20_proxy: config.erc20_proxy,
            exchange: config.exchange,
            dev_utils: config.dev_utils,
        }
    }
}

/// Implements on-chain demo operations via alloy-rs.
///
/// Transactions carry the configured gas limit and gas price and are
/// awaited to inclusion before the workflow moves on; queries are plain
/// `eth_call`s.
pub struct ExchangeContracts {
    /// Shared devnet RPC provider.
    provider: Arc<DevnetProvider>,
    /// DevUtils binding at the fixed helper address.
    dev_utils: DevUtilsInstance,
    /// Contract addresses from config.
    addresses: ExchangeAddresses,
    /// Gas limit applied to every transaction.
    gas_limit: u64,
    /// Gas price in wei applied to every transaction.
    gas_price: u128,
}

impl ExchangeContracts {
    /// Create and validate the contract bindings.
    ///
    /// Validates that each fixed address has deployed code on-chain.
    /// This prevents misconfiguration from silently failing at runtime.
    #[instrument(skip_all)]
    pub async fn new(provider: Arc<DevnetProvider>, config: &ChainConfig) -> Result<Self> {
        let addresses = ExchangeAddresses::from(config);
        let inner = provider.inner();

        for (name, addr) in [
            ("ERC20Proxy", addresses.erc20_proxy),
            ("Exchange", addresses.exchange),
            ("DevUtils", addresses.dev_utils),
        ] {
            let code = inner
                .get_code_at(addr)
                .await
                .context(format!("Failed to query code for {name}"))?;

            if code.is_empty() {
                bail!(
                    "Contract {name} at {} has no deployed code — check config.toml",
                    addr
                );
            }

            info!(contract = name, address = %addr, "Validated on-chain");
        }

        Ok(Self {
            dev_utils: DevUtils::new(addresses.dev_utils, inner),
            provider,
            addresses,
            gas_limit: config.gas_limit,
            gas_price: config.gas_price_wei,
        })
    }

    /// The validated fixed addresses.
    pub fn addresses(&self) -> ExchangeAddresses {
        self.addresses
    }

    fn token(&self, address: Address) -> super::contracts::DummyTokenInstance {
        DummyERC20Token::new(address, self.provider.inner())
    }
}

#[async_trait]
impl ChainClient for ExchangeContracts {
    async fn accounts(&self) -> Result<Vec<Address>> {
        self.provider.accounts().await
    }

    #[instrument(skip(self, name, symbol, total_supply))]
    async fn deploy_dummy_token(
        &self,
        deployer: Address,
        name: &str,
        symbol: &str,
        decimals: u32,
        total_supply: U256,
    ) -> Result<Address> {
        let address = DummyERC20Token::deploy_builder(
            self.provider.inner(),
            name.to_string(),
            symbol.to_string(),
            decimals_word(decimals),
            total_supply,
        )
        .from(deployer)
        .gas(self.gas_limit)
        .gas_price(self.gas_price)
        .deploy()
        .await
        .context("Dummy token deployment failed")?;

        info!(token = %address, symbol, "Deployed dummy ERC-20");
        Ok(address)
    }

    #[instrument(skip(self), fields(token = %token, to = %to))]
    async fn mint(&self, token: Address, to: Address, amount: U256) -> Result<()> {
        // The dummy token mints to msg.sender, so the recipient sends.
        self.token(token)
            .mint(amount)
            .from(to)
            .gas(self.gas_limit)
            .gas_price(self.gas_price)
            .send()
            .await
            .context("Failed to send mint transaction")?
            .watch()
            .await
            .context("Mint transaction was not mined")?;
        Ok(())
    }

    #[instrument(skip(self), fields(token = %token, owner = %owner, spender = %spender))]
    async fn approve(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> Result<()> {
        self.token(token)
            .approve(spender, amount)
            .from(owner)
            .gas(self.gas_limit)
            .gas_price(self.gas_price)
            .send()
            .await
            .context("Failed to send approve transaction")?
            .watch()
            .await
            .context("Approve transaction was not mined")?;
        Ok(())
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        self.token(token)
            .balanceOf(owner)
            .call()
            .await
            .context("balanceOf call failed")
    }

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256> {
        self.token(token)
            .allowance(owner, spender)
            .call()
            .await
            .context("allowance call failed")
    }

    #[instrument(skip_all)]
    async fn order_relevant_state(&self, order: &SignedOrder) -> Result<OrderRelevantState> {
        let ret = self
            .dev_utils
            .getOrderRelevantState(DevUtils::Order::from(&order.order), order.signature.clone())
            .call()
            .await
            .context("getOrderRelevantState call failed")?;

        Ok(OrderRelevantState {
            order_status: OrderStatus::from(ret.orderInfo.orderStatus),
            order_hash: ret.orderInfo.orderHash,
            taker_asset_filled_amount: ret.orderInfo.orderTakerAssetFilledAmount,
            fillable_taker_asset_amount: ret.fillableTakerAssetAmount,
            is_valid_signature: ret.isValidSignature,
        })
    }

    async fn is_healthy(&self) -> bool {
        self.provider.is_healthy().await
    }
}
