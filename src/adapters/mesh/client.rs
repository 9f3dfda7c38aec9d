//! Mesh WebSocket Client - JSON-RPC Order Submission
//!
//! Connects to the local Mesh node's WebSocket endpoint and implements
//! the `OrderRelay` port over JSON-RPC 2.0. The demo is strictly
//! sequential, so the client keeps a single socket behind a lock and has
//! exactly one request in flight at a time; the connection lives for the
//! whole run and is dropped at process exit.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, instrument};

use crate::config::RelayConfig;
use crate::domain::order::SignedOrder;
use crate::ports::relay::{OrderRelay, ValidationResults};

use super::types::{RpcRequest, RpcResponse};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket JSON-RPC client for a Mesh node.
pub struct MeshClient {
    /// Socket and request-id counter behind one lock: one request in
    /// flight at a time.
    state: Mutex<ClientState>,
    /// Per-request timeout.
    request_timeout: Duration,
}

struct ClientState {
    stream: WsStream,
    next_id: u64,
}

impl MeshClient {
    /// Open the WebSocket connection to the Mesh RPC endpoint.
    #[instrument(skip_all, fields(url = %config.ws_url))]
    pub async fn connect(config: &RelayConfig) -> Result<Self> {
        let (stream, _) = connect_async(&config.ws_url)
            .await
            .with_context(|| format!("Mesh WebSocket connection to {} failed", config.ws_url))?;

        info!("Connected to Mesh RPC endpoint");

        Ok(Self {
            state: Mutex::new(ClientState { stream, next_id: 1 }),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }

    /// Issue one JSON-RPC request and wait for its response.
    async fn call(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
        let mut state = self.state.lock().await;
        let id = state.next_id;
        state.next_id += 1;

        let request = serde_json::to_string(&RpcRequest::new(id, method, params))
            .context("Failed to encode Mesh RPC request")?;
        state
            .stream
            .send(Message::Text(request))
            .await
            .context("Failed to send Mesh RPC request")?;

        let response =
            tokio::time::timeout(self.request_timeout, read_response(&mut state.stream, id))
                .await
                .with_context(|| format!("Timed out waiting for {method} response"))??;

        match (response.result, response.error) {
            (_, Some(error)) => Err(error.into()),
            (Some(result), None) => Ok(result),
            (None, None) => {
                bail!("Mesh RPC response to {method} carried neither result nor error")
            }
        }
    }
}

/// Read frames until the response matching `id` arrives.
///
/// Subscription pushes and unrelated frames are skipped, not errors.
async fn read_response(stream: &mut WsStream, id: u64) -> Result<RpcResponse> {
    loop {
        let Some(message) = stream.next().await else {
            bail!("Mesh WebSocket stream ended");
        };

        match message.context("Mesh WebSocket read failed")? {
            Message::Text(text) => {
                let response: RpcResponse = match serde_json::from_str(&text) {
                    Ok(response) => response,
                    Err(err) => {
                        debug!(error = %err, "Skipping unparseable Mesh frame");
                        continue;
                    }
                };
                if response.id == Some(id) {
                    return Ok(response);
                }
                debug!(frame_id = ?response.id, "Skipping unmatched Mesh frame");
            }
            Message::Ping(_) | Message::Pong(_) => {}
            Message::Close(frame) => bail!("Mesh closed the connection: {frame:?}"),
            _ => {}
        }
    }
}

#[async_trait]
impl OrderRelay for MeshClient {
    #[instrument(skip_all, fields(orders = orders.len()))]
    async fn add_orders(&self, orders: &[SignedOrder]) -> Result<ValidationResults> {
        let result = self
            .call("mesh_addOrders", serde_json::json!([orders]))
            .await?;
        serde_json::from_value(result).context("Malformed mesh_addOrders result")
    }

    async fn is_healthy(&self) -> bool {
        self.call("mesh_getStats", serde_json::json!([]))
            .await
            .is_ok()
    }
}
