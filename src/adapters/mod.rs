//! Adapters - Transport and Contract Implementations of the Ports
//!
//! `chain` wraps the devnet RPC provider and the contract bindings;
//! `mesh` speaks JSON-RPC over WebSocket to the local Mesh node.

pub mod chain;
pub mod mesh;
