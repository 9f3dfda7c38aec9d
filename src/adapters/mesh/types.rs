//! Mesh JSON-RPC Wire Types
//!
//! Envelope types for the JSON-RPC 2.0 exchange with the Mesh node. The
//! `mesh_addOrders` result body deserializes straight into the port-level
//! `ValidationResults`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const JSONRPC_VERSION: &str = "2.0";

/// Outgoing JSON-RPC request.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: serde_json::Value,
}

impl<'a> RpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            method,
            params,
        }
    }
}

/// Incoming JSON-RPC frame.
///
/// Subscription pushes carry no `id`; responses carry the request's.
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

/// JSON-RPC error object, surfaced verbatim to the caller.
#[derive(Debug, Clone, Deserialize, Error)]
#[error("Mesh RPC error {code}: {message}")]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}
