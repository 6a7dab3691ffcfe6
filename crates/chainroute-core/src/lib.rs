//! chainroute-core — foundation traits and types for ChainRoute.
//!
//! # Overview
//!
//! ChainRoute decides, per network connection, whether JSON-RPC calls travel
//! over an ordered chain of public HTTP endpoints or through a privacy relay.
//! The core crate defines:
//!
//! - [`RpcTransport`] — the async trait every transport implements
//! - [`JsonRpcRequest`] / [`JsonRpcResponse`] — wire types
//! - [`TransportError`] — structured error type
//! - [`Network`] / [`Endpoint`] — what a connection targets
//! - [`RoutingPreference`] — process-wide routing configuration
//! - [`fallback`] module — ordered multi-endpoint fallback chain

pub mod error;
pub mod fallback;
pub mod network;
pub mod preference;
pub mod request;
pub mod transport;

pub use error::TransportError;
pub use fallback::FallbackTransport;
pub use network::{Endpoint, Network};
pub use preference::RoutingPreference;
pub use request::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcId, RpcParam, DEFAULT_REQUEST_ID,
};
pub use transport::RpcTransport;
