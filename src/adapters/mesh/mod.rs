//! Mesh relay adapter: a WebSocket JSON-RPC client implementing the
//! `OrderRelay` port.

pub mod client;
pub mod types;

pub use client::MeshClient;
