//! Integration Tests - Demo Workflow over Mocked Ports
//!
//! Exercises the full orchestration against mockall implementations of
//! the chain and relay ports: balances and allowances after provisioning,
//! order construction invariants, the accepted/rejected partition, and
//! abort-on-first-error behavior.

use std::sync::Arc;

use alloy::primitives::{address, Address, U256};
use alloy::signers::local::PrivateKeySigner;
use mockall::mock;
use mockall::Sequence;
use tokio_test::{assert_err, assert_ok};

use zeroex_mesh_demo::config::AppConfig;
use zeroex_mesh_demo::domain::order::SignedOrder;
use zeroex_mesh_demo::ports::chain::{OrderRelevantState, OrderStatus};
use zeroex_mesh_demo::ports::relay::{
    AcceptedOrderInfo, RejectedOrderInfo, RejectedOrderStatus, ValidationResults,
};
use zeroex_mesh_demo::usecases::demo::DemoWorkflow;

// ---- Mock Definitions ----

mock! {
    pub Chain {}

    #[async_trait::async_trait]
    impl zeroex_mesh_demo::ports::chain::ChainClient for Chain {
        async fn accounts(&self) -> anyhow::Result<Vec<Address>>;

        async fn deploy_dummy_token(
            &self,
            deployer: Address,
            name: &str,
            symbol: &str,
            decimals: u32,
            total_supply: U256,
        ) -> anyhow::Result<Address>;

        async fn mint(&self, token: Address, to: Address, amount: U256) -> anyhow::Result<()>;

        async fn approve(
            &self,
            token: Address,
            owner: Address,
            spender: Address,
            amount: U256,
        ) -> anyhow::Result<()>;

        async fn balance_of(&self, token: Address, owner: Address) -> anyhow::Result<U256>;

        async fn allowance(
            &self,
            token: Address,
            owner: Address,
            spender: Address,
        ) -> anyhow::Result<U256>;

        async fn order_relevant_state(
            &self,
            order: &SignedOrder,
        ) -> anyhow::Result<OrderRelevantState>;

        async fn is_healthy(&self) -> bool;
    }
}

mock! {
    pub Relay {}

    #[async_trait::async_trait]
    impl zeroex_mesh_demo::ports::relay::OrderRelay for Relay {
        async fn add_orders(
            &self,
            orders: &[SignedOrder],
        ) -> anyhow::Result<ValidationResults>;

        async fn is_healthy(&self) -> bool;
    }
}

// ---- Fixtures ----

const MAKER_TOKEN: Address = address!("34d402f14d58e001d8efbe6585051bf9706aa064");
const TAKER_TOKEN: Address = address!("25b8fe1de9daf8ba351890744ff28cf7dfa8f5e3");
const TAKER: Address = address!("6ecbe1db9ef729cbe972c83fb886247691fb6beb");
const FEE_RECIPIENT: Address = address!("e36ea790bc9d7ab70c55260c66d52b1eca985f84");

/// Maker address derived from the first default devnet key.
fn maker() -> Address {
    let config = AppConfig::default();
    let signer: PrivateKeySigner = config.chain.test_private_keys[0].parse().unwrap();
    signer.address()
}

/// Chain mock scripted for a clean provisioning pass.
fn happy_chain(config: &AppConfig) -> MockChain {
    let amount = config.order.maker_asset_amount;
    let proxy = config.chain.erc20_proxy;
    let maker = maker();

    let mut chain = MockChain::new();
    chain
        .expect_accounts()
        .returning(move || Ok(vec![maker, TAKER, FEE_RECIPIENT]));

    let mut deploys = Sequence::new();
    chain
        .expect_deploy_dummy_token()
        .times(1)
        .in_sequence(&mut deploys)
        .returning(|_, _, _, _, _| Ok(MAKER_TOKEN));
    chain
        .expect_deploy_dummy_token()
        .times(1)
        .in_sequence(&mut deploys)
        .returning(|_, _, _, _, _| Ok(TAKER_TOKEN));

    chain
        .expect_mint()
        .withf(move |token, to, value| {
            *token == MAKER_TOKEN && *to == maker && *value == amount
        })
        .times(1)
        .returning(|_, _, _| Ok(()));
    chain
        .expect_approve()
        .withf(move |token, owner, spender, value| {
            *token == MAKER_TOKEN && *owner == maker && *spender == proxy && *value == amount
        })
        .times(1)
        .returning(|_, _, _, _| Ok(()));

    chain
        .expect_balance_of()
        .returning(move |_, _| Ok(amount));
    chain
        .expect_allowance()
        .returning(move |_, _, _| Ok(amount));

    chain.expect_order_relevant_state().returning(|order| {
        Ok(OrderRelevantState {
            order_status: OrderStatus::Fillable,
            order_hash: order.order_hash(),
            taker_asset_filled_amount: U256::ZERO,
            fillable_taker_asset_amount: order.order.taker_asset_amount,
            is_valid_signature: order.verify_signature().is_ok(),
        })
    });

    chain
}

fn accepted_entry(order: &SignedOrder) -> AcceptedOrderInfo {
    AcceptedOrderInfo {
        order_hash: order.order_hash(),
        signed_order: order.clone(),
        fillable_taker_asset_amount: order.order.taker_asset_amount,
        is_new: true,
    }
}

// ---- Integration Tests ----

#[tokio::test]
async fn test_happy_path_submits_one_valid_order() {
    let config = AppConfig::default();
    let amount = config.order.maker_asset_amount;
    let chain = happy_chain(&config);

    let mut relay = MockRelay::new();
    relay
        .expect_add_orders()
        .withf(|orders| {
            orders.len() == 1
                && orders[0].order.taker_asset_amount == orders[0].order.maker_asset_amount
                && orders[0].order.maker_fee == U256::ZERO
                && orders[0].order.taker_fee == U256::ZERO
                && orders[0].verify_signature().is_ok()
        })
        .times(1)
        .returning(|orders| {
            Ok(ValidationResults {
                accepted: vec![accepted_entry(&orders[0])],
                rejected: vec![],
            })
        });

    let workflow = DemoWorkflow::new(Arc::new(chain), Arc::new(relay), config);
    let report = tokio_test::assert_ok!(workflow.run().await);

    // Provisioning left the maker with exactly the order amount, balance
    // and allowance alike.
    assert_eq!(report.maker_balance, amount);
    assert_eq!(report.maker_allowance, amount);

    // Order construction invariants.
    assert_eq!(report.order.order.maker_asset_amount, amount);
    assert_eq!(report.order.order.taker_asset_amount, amount);
    assert_eq!(report.order.order.maker_address, maker());
    assert!(report.order.verify_signature().is_ok());

    // On-chain state reflects the signed order.
    assert_eq!(report.state.order_status, OrderStatus::Fillable);
    assert!(report.state.is_valid_signature);
    assert_eq!(report.state.order_hash, report.order.order_hash());

    // The one submitted order is fully accounted for.
    assert_eq!(report.results.total(), 1);
    assert_eq!(report.results.accepted.len(), 1);
    assert!(report.results.rejected.is_empty());
}

#[tokio::test]
async fn test_rejected_order_still_partitions_the_submission() {
    let config = AppConfig::default();
    let chain = happy_chain(&config);

    let mut relay = MockRelay::new();
    relay.expect_add_orders().times(1).returning(|orders| {
        Ok(ValidationResults {
            accepted: vec![],
            rejected: vec![RejectedOrderInfo {
                order_hash: orders[0].order_hash(),
                signed_order: orders[0].clone(),
                kind: "ZEROEX_VALIDATION".to_string(),
                status: RejectedOrderStatus {
                    code: "OrderHasInvalidMakerAssetAmount".to_string(),
                    message: "order makerAssetAmount cannot be 0".to_string(),
                },
            }],
        })
    });

    let workflow = DemoWorkflow::new(Arc::new(chain), Arc::new(relay), config);
    let report = tokio_test::assert_ok!(workflow.run().await);

    assert_eq!(report.results.total(), 1);
    assert!(report.results.accepted.is_empty());
    assert_eq!(report.results.rejected[0].kind, "ZEROEX_VALIDATION");
}

#[tokio::test]
async fn test_mint_failure_aborts_before_submission() {
    let config = AppConfig::default();
    let maker_addr = maker();

    let mut chain = MockChain::new();
    chain
        .expect_accounts()
        .returning(move || Ok(vec![maker_addr, TAKER, FEE_RECIPIENT]));
    chain
        .expect_deploy_dummy_token()
        .times(2)
        .returning(|_, _, _, _, _| Ok(MAKER_TOKEN));
    chain
        .expect_mint()
        .times(1)
        .returning(|_, _, _| Err(anyhow::anyhow!("mint reverted")));
    // Nothing past the failing step may run.
    chain.expect_approve().never();
    chain.expect_order_relevant_state().never();

    let mut relay = MockRelay::new();
    relay.expect_add_orders().never();

    let workflow = DemoWorkflow::new(Arc::new(chain), Arc::new(relay), config);
    let err = tokio_test::assert_err!(workflow.run().await);
    assert!(format!("{err:#}").contains("mint reverted"));
}

#[tokio::test]
async fn test_unknown_maker_key_aborts_before_any_deployment() {
    let mut config = AppConfig::default();
    // Only a key that does NOT belong to the maker account.
    config.chain.test_private_keys =
        vec!["0x5d862464fe9303452126c8bc94274b8c5f9874cbd219789b3eb2128075a76f72".to_string()];
    let maker_addr = maker();

    let mut chain = MockChain::new();
    chain
        .expect_accounts()
        .returning(move || Ok(vec![maker_addr, TAKER, FEE_RECIPIENT]));
    chain.expect_deploy_dummy_token().never();
    chain.expect_mint().never();

    let mut relay = MockRelay::new();
    relay.expect_add_orders().never();

    let workflow = DemoWorkflow::new(Arc::new(chain), Arc::new(relay), config);
    let err = tokio_test::assert_err!(workflow.run().await);
    assert!(format!("{err:#}").contains("No configured devnet key"));
}

#[tokio::test]
async fn test_too_few_accounts_is_an_error() {
    let config = AppConfig::default();

    let mut chain = MockChain::new();
    chain
        .expect_accounts()
        .returning(|| Ok(vec![address!("5409ed021d9299bf6814279a6a1411a7e866a631")]));
    chain.expect_deploy_dummy_token().never();

    let mut relay = MockRelay::new();
    relay.expect_add_orders().never();

    let workflow = DemoWorkflow::new(Arc::new(chain), Arc::new(relay), config);
    let err = tokio_test::assert_err!(workflow.run().await);
    assert!(format!("{err:#}").contains("three unlocked accounts"));
}
