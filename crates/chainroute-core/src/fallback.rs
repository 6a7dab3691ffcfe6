//! Ordered multi-endpoint fallback chain.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::{JsonRpcRequest, JsonRpcResponse};
use crate::transport::RpcTransport;

/// Tries its transports strictly in the supplied order.
///
/// The first transport that yields a well-formed response wins, even when
/// that response carries a JSON-RPC `error`. Transport failures advance to
/// the next entry; no entry is tried twice.
pub struct FallbackTransport {
    transports: Vec<Arc<dyn RpcTransport>>,
}

impl FallbackTransport {
    /// Build a chain from transports in priority order.
    pub fn new(transports: Vec<Arc<dyn RpcTransport>>) -> Self {
        Self { transports }
    }

    /// Number of transports in the chain.
    pub fn len(&self) -> usize {
        self.transports.len()
    }

    /// Returns `true` if the chain has no transports.
    pub fn is_empty(&self) -> bool {
        self.transports.is_empty()
    }

    /// URLs of the chain's transports, in order.
    pub fn urls(&self) -> Vec<&str> {
        self.transports.iter().map(|t| t.url()).collect()
    }
}

#[async_trait]
impl RpcTransport for FallbackTransport {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        let mut last_error = None;

        for (idx, transport) in self.transports.iter().enumerate() {
            match transport.send(req.clone()).await {
                Ok(resp) => return Ok(resp),
                Err(e) if e.is_retryable() => {
                    tracing::warn!(
                        index = idx,
                        url = %transport.url(),
                        method = %req.method,
                        error = %e,
                        "endpoint failed, falling back"
                    );
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        match last_error {
            Some(e) => Err(TransportError::AllProvidersFailed {
                attempted: self.transports.len(),
                last_error: e.to_string(),
            }),
            None => Err(TransportError::AllProvidersDown),
        }
    }

    fn url(&self) -> &str {
        self.transports.first().map_or("fallback", |t| t.url())
    }
}
