//! ERC-20 asset-data encoding.
//!
//! A trade leg references its token through an "asset data" blob: the
//! 4-byte ERC-20 proxy id followed by the ABI-encoded token address,
//! 36 bytes total. The asset-transfer proxy dispatches on the id, so a
//! wrong prefix makes an order unfillable even when everything else
//! checks out.

use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolValue;
use thiserror::Error;

/// `bytes4(keccak256("ERC20Token(address)"))` — the ERC-20 proxy id.
pub const ERC20_PROXY_ID: [u8; 4] = [0xf4, 0x72, 0x61, 0xb0];

/// Encoded asset-data length: proxy id plus one ABI word.
pub const ERC20_ASSET_DATA_LEN: usize = 36;

/// Errors decoding an asset-data blob.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetDataError {
    #[error("asset data must be {ERC20_ASSET_DATA_LEN} bytes, got {0}")]
    WrongLength(usize),
    #[error("unknown asset proxy id {0:#010x}")]
    UnknownProxyId(u32),
}

/// Encode an ERC-20 token address into asset data.
pub fn encode_erc20(token: Address) -> Bytes {
    let mut data = Vec::with_capacity(ERC20_ASSET_DATA_LEN);
    data.extend_from_slice(&ERC20_PROXY_ID);
    data.extend_from_slice(&token.abi_encode());
    data.into()
}

/// Decode ERC-20 asset data back into the token address it references.
pub fn decode_erc20(data: &[u8]) -> Result<Address, AssetDataError> {
    if data.len() != ERC20_ASSET_DATA_LEN {
        return Err(AssetDataError::WrongLength(data.len()));
    }
    if data[..4] != ERC20_PROXY_ID {
        let id = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
        return Err(AssetDataError::UnknownProxyId(id));
    }
    // The address occupies the low 20 bytes of the 32-byte ABI word.
    Ok(Address::from_slice(&data[16..36]))
}
