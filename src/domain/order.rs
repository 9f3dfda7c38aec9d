//! 0x v3 trade order — EIP-712 hashing and signing.
//!
//! An order is immutable once signed: the signature covers every field,
//! so any mutation invalidates it. The order hash (the EIP-712 signing
//! hash) is also the identity the Mesh network and the settlement
//! contract agree on.
//!
//! Hashing follows the v3 protocol exactly:
//! - domain: `name = "0x Protocol"`, `version = "3.0.0"`, chain id, and
//!   the exchange contract as verifying contract;
//! - struct hash: `keccak256(ORDER_TYPEHASH ‖ fields)` with the dynamic
//!   `bytes` fields hashed into their slots;
//! - signing hash: `keccak256(0x1901 ‖ domainSeparator ‖ structHash)`.

use std::sync::LazyLock;

use alloy::primitives::{keccak256, Address, Bytes, B256, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use alloy::sol;
use alloy::sol_types::SolType;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::u256_decimal;

/// EIP-712 domain name of the v3 exchange.
pub const EIP712_DOMAIN_NAME: &str = "0x Protocol";

/// EIP-712 domain version of the v3 exchange.
pub const EIP712_DOMAIN_VERSION: &str = "3.0.0";

/// Trailing signature byte marking an EIP-712 signature.
pub const SIGNATURE_TYPE_EIP712: u8 = 0x02;

/// Signature length: `v ‖ r ‖ s ‖ signatureType`.
pub const SIGNATURE_LEN: usize = 66;

static EIP712_DOMAIN_TYPEHASH: LazyLock<B256> = LazyLock::new(|| {
    keccak256(
        b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)",
    )
});

static ORDER_TYPEHASH: LazyLock<B256> = LazyLock::new(|| {
    keccak256(
        b"Order(\
          address makerAddress,\
          address takerAddress,\
          address feeRecipientAddress,\
          address senderAddress,\
          uint256 makerAssetAmount,\
          uint256 takerAssetAmount,\
          uint256 makerFee,\
          uint256 takerFee,\
          uint256 expirationTimeSeconds,\
          uint256 salt,\
          bytes makerAssetData,\
          bytes takerAssetData,\
          bytes makerFeeAssetData,\
          bytes takerFeeAssetData\
          )",
    )
});

type DomainSeparatorSol = sol! {
    tuple(
        bytes32, // EIP712_DOMAIN_TYPEHASH
        bytes32, // keccak256(name)
        bytes32, // keccak256(version)
        uint256, // chainId
        address, // verifyingContract
    )
};

type OrderStructSol = sol! {
    tuple(
        bytes32, // ORDER_TYPEHASH
        address, // makerAddress
        address, // takerAddress
        address, // feeRecipientAddress
        address, // senderAddress
        uint256, // makerAssetAmount
        uint256, // takerAssetAmount
        uint256, // makerFee
        uint256, // takerFee
        uint256, // expirationTimeSeconds
        uint256, // salt
        bytes32, // keccak256(makerAssetData)
        bytes32, // keccak256(takerAssetData)
        bytes32, // keccak256(makerFeeAssetData)
        bytes32, // keccak256(takerFeeAssetData)
    )
};

/// EIP-712 domain separator binding orders to one exchange deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainSeparator(pub B256);

impl DomainSeparator {
    pub fn new(chain_id: u64, exchange: Address) -> Self {
        Self(keccak256(DomainSeparatorSol::abi_encode_sequence(&(
            *EIP712_DOMAIN_TYPEHASH,
            keccak256(EIP712_DOMAIN_NAME.as_bytes()),
            keccak256(EIP712_DOMAIN_VERSION.as_bytes()),
            U256::from(chain_id),
            exchange,
        ))))
    }
}

/// Errors signing an order or verifying an order signature.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order signing failed: {0}")]
    Sign(#[from] alloy::signers::Error),
    #[error("signature must be {SIGNATURE_LEN} bytes, got {0}")]
    MalformedSignature(usize),
    #[error("unsupported signature type {0:#04x}")]
    UnsupportedSignatureType(u8),
    #[error("invalid recovery byte {0}, expected 27 or 28")]
    InvalidRecoveryByte(u8),
    #[error("signature recovery failed: {0}")]
    Recovery(#[from] alloy::primitives::SignatureError),
    #[error("recovered signer {recovered} does not match maker {maker}")]
    SignerMismatch { maker: Address, recovered: Address },
}

/// A 0x v3 trade order, serialized in the Mesh wire format: camelCase
/// keys, `uint256` amounts as decimal strings, byte blobs as 0x-hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Network the settlement contract lives on.
    pub chain_id: u64,
    /// Settlement contract; the EIP-712 verifying contract.
    pub exchange_address: Address,
    /// Account creating and signing the order.
    pub maker_address: Address,
    /// Account allowed to fill the order; zero means anyone.
    pub taker_address: Address,
    /// Recipient of the (here zero) fees.
    pub fee_recipient_address: Address,
    /// Account allowed to submit the fill transaction; zero means anyone.
    pub sender_address: Address,
    /// Amount of maker asset offered.
    #[serde(with = "u256_decimal")]
    pub maker_asset_amount: U256,
    /// Amount of taker asset demanded.
    #[serde(with = "u256_decimal")]
    pub taker_asset_amount: U256,
    /// Fee paid by the maker on fill.
    #[serde(with = "u256_decimal")]
    pub maker_fee: U256,
    /// Fee paid by the taker on fill.
    #[serde(with = "u256_decimal")]
    pub taker_fee: U256,
    /// Unix timestamp after which the order is void.
    #[serde(with = "u256_decimal")]
    pub expiration_time_seconds: U256,
    /// Entropy making otherwise identical orders distinct.
    #[serde(with = "u256_decimal")]
    pub salt: U256,
    /// Asset data identifying the maker token.
    pub maker_asset_data: Bytes,
    /// Asset data identifying the taker token.
    pub taker_asset_data: Bytes,
    /// Asset data for the maker fee leg.
    pub maker_fee_asset_data: Bytes,
    /// Asset data for the taker fee leg.
    pub taker_fee_asset_data: Bytes,
}

impl Order {
    /// Domain separator derived from the order's own chain id and
    /// exchange address.
    pub fn domain_separator(&self) -> DomainSeparator {
        DomainSeparator::new(self.chain_id, self.exchange_address)
    }

    /// EIP-712 struct hash over all order fields.
    pub fn hash_struct(&self) -> B256 {
        keccak256(OrderStructSol::abi_encode_sequence(&(
            *ORDER_TYPEHASH,
            self.maker_address,
            self.taker_address,
            self.fee_recipient_address,
            self.sender_address,
            self.maker_asset_amount,
            self.taker_asset_amount,
            self.maker_fee,
            self.taker_fee,
            self.expiration_time_seconds,
            self.salt,
            keccak256(&self.maker_asset_data),
            keccak256(&self.taker_asset_data),
            keccak256(&self.maker_fee_asset_data),
            keccak256(&self.taker_fee_asset_data),
        )))
    }

    /// The hash that gets signed, and the order's network-wide identity.
    pub fn order_hash(&self) -> B256 {
        let DomainSeparator(domain) = self.domain_separator();
        let mut message = [0u8; 66];
        message[0] = 0x19;
        message[1] = 0x01;
        message[2..34].copy_from_slice(domain.as_slice());
        message[34..66].copy_from_slice(self.hash_struct().as_slice());
        keccak256(message)
    }

    /// Sign the order hash with the maker's key, producing the 66-byte
    /// `v ‖ r ‖ s ‖ 0x02` signature the exchange and Mesh expect.
    pub fn sign(self, signer: &PrivateKeySigner) -> Result<SignedOrder, OrderError> {
        let rsv = signer.sign_hash_sync(&self.order_hash())?.as_bytes();
        let mut signature = Vec::with_capacity(SIGNATURE_LEN);
        signature.push(rsv[64]);
        signature.extend_from_slice(&rsv[..64]);
        signature.push(SIGNATURE_TYPE_EIP712);
        Ok(SignedOrder {
            order: self,
            signature: signature.into(),
        })
    }
}

/// An order plus the maker's signature over its hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedOrder {
    #[serde(flatten)]
    pub order: Order,
    /// 66-byte `v ‖ r ‖ s ‖ signatureType` blob.
    pub signature: Bytes,
}

impl SignedOrder {
    /// The signed order's hash (identical to `Order::order_hash`).
    pub fn order_hash(&self) -> B256 {
        self.order.order_hash()
    }

    /// Recover the signer and check it is the maker.
    ///
    /// Returns the recovered address on success so callers can log it.
    pub fn verify_signature(&self) -> Result<Address, OrderError> {
        if self.signature.len() != SIGNATURE_LEN {
            return Err(OrderError::MalformedSignature(self.signature.len()));
        }
        let signature_type = self.signature[65];
        if signature_type != SIGNATURE_TYPE_EIP712 {
            return Err(OrderError::UnsupportedSignatureType(signature_type));
        }
        let v = self.signature[0];
        if v != 27 && v != 28 {
            return Err(OrderError::InvalidRecoveryByte(v));
        }
        let r = U256::from_be_slice(&self.signature[1..33]);
        let s = U256::from_be_slice(&self.signature[33..65]);
        let signature = alloy::primitives::Signature::new(r, s, v == 28);
        let recovered = signature.recover_address_from_prehash(&self.order.order_hash())?;
        if recovered != self.order.maker_address {
            return Err(OrderError::SignerMismatch {
                maker: self.order.maker_address,
                recovered,
            });
        }
        Ok(recovered)
    }
}

/// 128 bits of UUID entropy, widened to the salt word.
pub fn random_salt() -> U256 {
    U256::from_be_slice(Uuid::new_v4().as_bytes())
}

/// Expiration timestamp `ttl_secs` from now.
pub fn expiration_in(ttl_secs: u64) -> U256 {
    let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
    U256::from(now.saturating_add(ttl_secs))
}
