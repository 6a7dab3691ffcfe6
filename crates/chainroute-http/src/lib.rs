//! chainroute-http — HTTP JSON-RPC transport for the public route.
//!
//! [`HttpRpcClient`] talks to one endpoint; [`fallback_chain`] wraps an
//! ordered endpoint list into a [`FallbackTransport`] that shares a single
//! connection pool.

pub mod client;

pub use client::{fallback_chain, HttpClientConfig, HttpRpcClient};

pub use chainroute_core::FallbackTransport;
