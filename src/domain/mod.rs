//! Core order domain types.
//!
//! Defines the 0x v3 trade order, its EIP-712 hashing and signing rules,
//! and the asset-data encoding that identifies the traded tokens. These
//! types are the foundation of the hexagonal architecture's inner ring:
//! adapters serialize them onto the wire, but the hashing and signature
//! semantics live entirely here.

pub mod asset_data;
pub mod order;
pub mod u256_decimal;
