//! chainroute-relay — JSON-RPC over a privacy-preserving relay.
//!
//! # Overview
//!
//! - [`RelayClient`] — the relay capability: forward one HTTP request to an
//!   endpoint and return its response. Multi-hop dispatch and return-path
//!   routing happen behind this trait.
//! - [`GatewayRelayClient`] — `reqwest` adapter that hands requests to a
//!   relay entry gateway.
//! - [`RelayBridge`] — an [`RpcTransport`](chainroute_core::RpcTransport)
//!   that wraps JSON-RPC calls into relay requests for one endpoint.
//!
//! Construct one relay client per process and share it behind an `Arc`.

pub mod bridge;
pub mod client;
pub mod gateway;

pub use bridge::{RelayBridge, RELAY_REQUEST_ID};
pub use client::{RelayClient, RelayClientConfig, RelayRequest, RelayResponse};
pub use gateway::GatewayRelayClient;
