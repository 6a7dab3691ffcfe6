//! Transport-level error types.

use thiserror::Error;

use crate::request::JsonRpcError;

/// Errors that can occur during an RPC transport operation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connection refused, non-success status, etc.).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The privacy relay could not deliver the request or its reply.
    #[error("Relay error: {0}")]
    Relay(String),

    /// JSON-RPC protocol-level error returned by the node.
    #[error("RPC error {}: {}", .0.code, .0.message)]
    Rpc(JsonRpcError),

    /// The body was not a JSON-RPC response carrying exactly one of
    /// `result` / `error`.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The fallback chain was built without any endpoint.
    #[error("All providers unavailable")]
    AllProvidersDown,

    /// Every endpoint of the fallback chain failed.
    #[error("All {attempted} providers failed, last error: {last_error}")]
    AllProvidersFailed { attempted: usize, last_error: String },

    /// No endpoint could be resolved for the network.
    #[error("No RPC endpoint for chain {chain_id}")]
    NoEndpoint { chain_id: u64 },

    /// Request timed out after the configured duration.
    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// Response could not be deserialized.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// An unexpected error.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Returns `true` if the next endpoint of a fallback chain may be tried.
    ///
    /// Node-side execution errors are final: the endpoint answered.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::Relay(_)
                | Self::MalformedResponse(_)
                | Self::Timeout { .. }
                | Self::Deserialization(_)
        )
    }

    /// Returns `true` if this is a node-side execution error (not retryable).
    pub fn is_execution_error(&self) -> bool {
        matches!(self, Self::Rpc(_))
    }
}
