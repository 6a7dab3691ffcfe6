//! Relay client that hands requests to a relay entry gateway over HTTP.
//!
//! The gateway receives the relayed request's method, headers and body, plus:
//!
//! | header                | value                                   |
//! |-----------------------|-----------------------------------------|
//! | `x-relay-target`      | destination endpoint URL                |
//! | `x-relay-client-id`   | [`RelayClientConfig::client_id`]        |
//! | `x-relay-zero-hop`    | `true` / `false`                        |
//! | `x-relay-exit-nodes`  | `true` / `false`                        |
//!
//! and answers with the destination's status and body.

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Method;
use url::Url;

use chainroute_core::{Endpoint, TransportError};

use crate::client::{RelayClient, RelayClientConfig, RelayRequest, RelayResponse};

pub const TARGET_HEADER: &str = "x-relay-target";
pub const CLIENT_ID_HEADER: &str = "x-relay-client-id";
pub const ZERO_HOP_HEADER: &str = "x-relay-zero-hop";
pub const EXIT_NODES_HEADER: &str = "x-relay-exit-nodes";

/// `reqwest`-backed [`RelayClient`] talking to a relay entry gateway.
pub struct GatewayRelayClient {
    entry: Url,
    http: reqwest::Client,
    config: RelayClientConfig,
}

impl GatewayRelayClient {
    pub fn new(entry: Url, config: RelayClientConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build relay client: {e}")))?;
        Ok(Self::with_http_client(entry, config, http))
    }

    pub fn with_http_client(entry: Url, config: RelayClientConfig, http: reqwest::Client) -> Self {
        Self {
            entry,
            http,
            config,
        }
    }

    pub fn entry(&self) -> &Url {
        &self.entry
    }

    fn build(
        &self,
        endpoint: &Endpoint,
        req: RelayRequest,
    ) -> Result<reqwest::Request, TransportError> {
        let method = Method::from_bytes(req.method.as_bytes())
            .map_err(|e| TransportError::Relay(format!("invalid method {}: {e}", req.method)))?;

        let mut builder = self.http.request(method, self.entry.clone());
        for (name, value) in &req.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::Relay(format!("invalid header {name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| TransportError::Relay(format!("invalid header value: {e}")))?;
            builder = builder.header(name, value);
        }

        builder
            .header(TARGET_HEADER, endpoint.as_str())
            .header(CLIENT_ID_HEADER, self.config.client_id.as_str())
            .header(ZERO_HOP_HEADER, self.config.force_zero_hop.to_string())
            .header(
                EXIT_NODES_HEADER,
                self.config.client_associated_exit_nodes.to_string(),
            )
            .body(req.body)
            .build()
            .map_err(|e| TransportError::Relay(e.to_string()))
    }
}

#[async_trait]
impl RelayClient for GatewayRelayClient {
    async fn forward(
        &self,
        endpoint: &Endpoint,
        req: RelayRequest,
    ) -> Result<RelayResponse, TransportError> {
        let request = self.build(endpoint, req)?;
        let resp = self
            .http
            .execute(request)
            .await
            .map_err(|e| TransportError::Relay(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::Relay(e.to_string()))?;
        Ok(RelayResponse { status, body })
    }

    fn config(&self) -> &RelayClientConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayRelayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayRelayClient")
            .field("entry", &self.entry.as_str())
            .field("config", &self.config)
            .finish()
    }
}
