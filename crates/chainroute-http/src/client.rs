//! HTTP JSON-RPC client backed by `reqwest`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use chainroute_core::error::TransportError;
use chainroute_core::fallback::FallbackTransport;
use chainroute_core::network::Endpoint;
use chainroute_core::request::{JsonRpcRequest, JsonRpcResponse};
use chainroute_core::transport::RpcTransport;

/// Configuration for `HttpRpcClient`.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Per-request timeout. `None` leaves reqwest's default in place.
    pub request_timeout: Option<Duration>,
}

impl HttpClientConfig {
    fn build(&self) -> Result<reqwest::Client, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build HTTP client: {e}")))
    }
}

/// HTTP JSON-RPC client for a single endpoint.
///
/// Makes exactly one attempt per request; failover is the job of the
/// surrounding [`FallbackTransport`].
pub struct HttpRpcClient {
    endpoint: Endpoint,
    http: reqwest::Client,
    request_timeout: Option<Duration>,
}

impl HttpRpcClient {
    /// Create a new client for the given JSON-RPC endpoint.
    pub fn new(endpoint: Endpoint, config: HttpClientConfig) -> Result<Self, TransportError> {
        let http = config.build()?;
        Ok(Self::with_http_client(endpoint, http, config.request_timeout))
    }

    /// Create a client that reuses an existing connection pool.
    pub fn with_http_client(
        endpoint: Endpoint,
        http: reqwest::Client,
        request_timeout: Option<Duration>,
    ) -> Self {
        Self {
            endpoint,
            http,
            request_timeout,
        }
    }

    /// Create with default configuration.
    pub fn default_for(endpoint: Endpoint) -> Result<Self, TransportError> {
        Self::new(endpoint, HttpClientConfig::default())
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn map_send_error(&self, e: reqwest::Error) -> TransportError {
        match self.request_timeout {
            Some(timeout) if e.is_timeout() => TransportError::Timeout {
                ms: timeout.as_millis() as u64,
            },
            _ => TransportError::Http(e.to_string()),
        }
    }
}

#[async_trait]
impl RpcTransport for HttpRpcClient {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        let resp = self
            .http
            .post(self.endpoint.url().clone())
            .json(&req)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Http(format!("HTTP {status}: {body}")));
        }

        let body = resp.text().await.map_err(|e| self.map_send_error(e))?;
        let parsed = JsonRpcResponse::from_body(&body)?;
        tracing::trace!(url = %self.endpoint, method = %req.method, "rpc response");
        Ok(parsed)
    }

    fn url(&self) -> &str {
        self.endpoint.as_str()
    }
}

/// Wrap `endpoints` into an ordered fallback chain sharing one HTTP client.
pub fn fallback_chain(
    endpoints: &[Endpoint],
    config: &HttpClientConfig,
) -> Result<FallbackTransport, TransportError> {
    let http = config.build()?;
    let transports = endpoints
        .iter()
        .map(|ep| {
            Arc::new(HttpRpcClient::with_http_client(
                ep.clone(),
                http.clone(),
                config.request_timeout,
            )) as Arc<dyn RpcTransport>
        })
        .collect();
    Ok(FallbackTransport::new(transports))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ep(s: &str) -> Endpoint {
        Endpoint::parse(s).unwrap()
    }

    #[test]
    fn chain_keeps_endpoint_order() {
        let chain = fallback_chain(
            &[ep("https://premium.example/v2/key"), ep("https://public.example/")],
            &HttpClientConfig::default(),
        )
        .unwrap();
        assert_eq!(
            chain.urls(),
            vec!["https://premium.example/v2/key", "https://public.example/"]
        );
    }

    #[test]
    fn client_reports_its_endpoint() {
        let client = HttpRpcClient::default_for(ep("https://rpc.example/")).unwrap();
        assert_eq!(client.url(), "https://rpc.example/");
        assert_eq!(client.endpoint().url().scheme(), "https");
    }
}
