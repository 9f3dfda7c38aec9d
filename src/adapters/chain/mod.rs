//! Devnet chain adapter: provider management, contract bindings, and the
//! `ChainClient` implementation built on them.

pub mod client;
pub mod contracts;
pub mod provider;

pub use client::ExchangeContracts;
pub use provider::DevnetProvider;
