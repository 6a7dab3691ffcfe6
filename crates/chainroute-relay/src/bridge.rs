//! JSON-RPC transport over the privacy relay.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use chainroute_core::{Endpoint, JsonRpcRequest, JsonRpcResponse, RpcTransport, TransportError};

use crate::client::{RelayClient, RelayRequest};

/// Every relayed envelope carries this id.
pub const RELAY_REQUEST_ID: u64 = 1;

/// Presents a relay client as an [`RpcTransport`] for one endpoint.
///
/// One relay attempt per call. Every failure is returned as a
/// [`TransportError`]; JSON-RPC `error` payloads are passed through as
/// responses.
pub struct RelayBridge {
    endpoint: Endpoint,
    relay: Arc<dyn RelayClient>,
}

impl RelayBridge {
    pub fn new(endpoint: Endpoint, relay: Arc<dyn RelayClient>) -> Self {
        Self { endpoint, relay }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn relay(&self) -> &Arc<dyn RelayClient> {
        &self.relay
    }

    /// Relay `method(params)` and return the node's response.
    pub async fn request(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<JsonRpcResponse, TransportError> {
        self.send(JsonRpcRequest::new(RELAY_REQUEST_ID, method, params))
            .await
    }

    async fn relay_once(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        let envelope = JsonRpcRequest::new(RELAY_REQUEST_ID, req.method, req.params);
        let body = encode_body(&envelope)?;

        let resp = self
            .relay
            .forward(&self.endpoint, RelayRequest::post_json(body))
            .await?;

        if !resp.is_success() {
            return Err(TransportError::Http(format!(
                "HTTP {}: {}",
                resp.status, resp.body
            )));
        }

        let parsed = JsonRpcResponse::from_body(&resp.body)?;
        tracing::debug!(
            url = %self.endpoint,
            method = %envelope.method,
            rpc_error = parsed.error.is_some(),
            "private rpc response"
        );
        Ok(parsed)
    }
}

/// Encode a relay body. Failures map to [`TransportError::Other`].
fn encode_body<T: Serialize>(value: &T) -> Result<String, TransportError> {
    serde_json::to_string(value)
        .map_err(|e| TransportError::Other(format!("failed to serialize request: {e}")))
}

#[async_trait]
impl RpcTransport for RelayBridge {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        let method = req.method.clone();
        let caller_id = req.id.clone();
        match self.relay_once(req).await {
            Ok(mut resp) => {
                // The wire id is always RELAY_REQUEST_ID; answer with the caller's.
                resp.id = caller_id;
                Ok(resp)
            }
            Err(e) => {
                tracing::warn!(url = %self.endpoint, method = %method, error = %e, "private rpc failed");
                Err(e)
            }
        }
    }

    fn url(&self) -> &str {
        self.endpoint.as_str()
    }
}
