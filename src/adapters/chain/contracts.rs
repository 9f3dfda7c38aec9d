//! Contract bindings for the demo's on-chain surface.
//!
//! `DummyERC20Token` is generated from the vendored build artifact so the
//! adapter can deploy fresh instances; `DevUtils` is an interface-only
//! binding for the state-query helper already deployed on the devnet
//! snapshot. The `DevUtils::Order` tuple mirrors the domain order field
//! for field.

use alloy::primitives::U256;
use alloy::providers::DynProvider;
use alloy::sol;

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    DummyERC20Token,
    "./artifacts/DummyERC20Token.json",
);

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract DevUtils {
        struct Order {
            address makerAddress;
            address takerAddress;
            address feeRecipientAddress;
            address senderAddress;
            uint256 makerAssetAmount;
            uint256 takerAssetAmount;
            uint256 makerFee;
            uint256 takerFee;
            uint256 expirationTimeSeconds;
            uint256 salt;
            bytes makerAssetData;
            bytes takerAssetData;
            bytes makerFeeAssetData;
            bytes takerFeeAssetData;
        }

        struct OrderInfo {
            uint8 orderStatus;
            bytes32 orderHash;
            uint256 orderTakerAssetFilledAmount;
        }

        function getOrderRelevantState(Order memory order, bytes memory signature)
            public
            view
            returns (
                OrderInfo memory orderInfo,
                uint256 fillableTakerAssetAmount,
                bool isValidSignature
            );
    }
}

pub type DummyTokenInstance = DummyERC20Token::DummyERC20TokenInstance<DynProvider>;
pub type DevUtilsInstance = DevUtils::DevUtilsInstance<DynProvider>;

impl From<&crate::domain::order::Order> for DevUtils::Order {
    fn from(order: &crate::domain::order::Order) -> Self {
        Self {
            makerAddress: order.maker_address,
            takerAddress: order.taker_address,
            feeRecipientAddress: order.fee_recipient_address,
            senderAddress: order.sender_address,
            makerAssetAmount: order.maker_asset_amount,
            takerAssetAmount: order.taker_asset_amount,
            makerFee: order.maker_fee,
            takerFee: order.taker_fee,
            expirationTimeSeconds: order.expiration_time_seconds,
            salt: order.salt,
            makerAssetData: order.maker_asset_data.clone(),
            takerAssetData: order.taker_asset_data.clone(),
            makerFeeAssetData: order.maker_fee_asset_data.clone(),
            takerFeeAssetData: order.taker_fee_asset_data.clone(),
        }
    }
}

/// Widen the config's token decimals to the contract's `uint256` argument.
pub fn decimals_word(decimals: u32) -> U256 {
    U256::from(decimals)
}
