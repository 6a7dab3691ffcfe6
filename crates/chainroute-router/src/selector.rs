//! Per-connection transport selection.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use chainroute_core::{
    Endpoint, JsonRpcRequest, JsonRpcResponse, Network, RoutingPreference, RpcTransport,
    TransportError, DEFAULT_REQUEST_ID,
};
use chainroute_http::{fallback_chain, HttpClientConfig};
use chainroute_providers::ProviderResolver;
use chainroute_relay::{RelayBridge, RelayClient};

use crate::config::ConfigError;

/// Which channel carries a connection's calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Ordered fallback over public HTTP endpoints.
    Public,
    /// Privacy relay to the best endpoint.
    Private,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Public => "public",
            Self::Private => "private",
        })
    }
}

/// A network connection as handed to the wallet layer.
pub struct Connection {
    network: Network,
    route: Route,
    endpoints: Vec<Endpoint>,
    polling_interval: Option<Duration>,
    transport: Arc<dyn RpcTransport>,
}

impl Connection {
    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Endpoints the transport talks to, in priority order.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Block polling period; `None` for local networks.
    pub fn polling_interval(&self) -> Option<Duration> {
        self.polling_interval
    }

    pub fn transport(&self) -> &Arc<dyn RpcTransport> {
        &self.transport
    }

    pub async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        self.transport.send(req).await
    }

    /// Send `method(params)` over the connection's transport.
    pub async fn request(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<JsonRpcResponse, TransportError> {
        self.send(JsonRpcRequest::new(DEFAULT_REQUEST_ID, method, params))
            .await
    }

    /// Like [`request`](Self::request), but a JSON-RPC `error` payload
    /// becomes [`TransportError::Rpc`].
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, TransportError> {
        self.request(method, params)
            .await?
            .into_result()
            .map_err(TransportError::Rpc)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("network", &self.network.id)
            .field("route", &self.route)
            .field("endpoints", &self.endpoints)
            .field("polling_interval", &self.polling_interval)
            .finish()
    }
}

/// Builds one [`Connection`] per network from the process-wide preference.
///
/// Holds the single relay client shared by every private connection.
pub struct TransportSelector {
    preference: RoutingPreference,
    resolver: ProviderResolver,
    relay: Option<Arc<dyn RelayClient>>,
    http: HttpClientConfig,
}

impl TransportSelector {
    /// Fails when private routing is preferred but no relay client is given.
    pub fn new(
        preference: RoutingPreference,
        resolver: ProviderResolver,
        relay: Option<Arc<dyn RelayClient>>,
    ) -> Result<Self, ConfigError> {
        if preference.use_private && relay.is_none() {
            return Err(ConfigError::MissingRelay);
        }
        Ok(Self {
            preference,
            resolver,
            relay,
            http: HttpClientConfig::default(),
        })
    }

    /// Override the HTTP settings used for public endpoints.
    pub fn with_http_config(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }

    pub fn preference(&self) -> &RoutingPreference {
        &self.preference
    }

    pub fn resolver(&self) -> &ProviderResolver {
        &self.resolver
    }

    /// The shared relay client, if private routing is possible.
    pub fn relay(&self) -> Option<&Arc<dyn RelayClient>> {
        self.relay.as_ref()
    }

    /// The route a connection to `network` takes.
    ///
    /// Local networks have no externally reachable endpoint for the relay
    /// to target, so they always go public.
    pub fn route_for(&self, network: &Network) -> Route {
        if !self.preference.use_private || network.is_local() {
            Route::Public
        } else {
            Route::Private
        }
    }

    /// Build the connection for `network`.
    pub fn client(&self, network: &Network) -> Result<Connection, TransportError> {
        let route = self.route_for(network);
        let resolved = self.resolver.resolve(network);
        if resolved.is_empty() {
            return Err(TransportError::NoEndpoint {
                chain_id: network.id,
            });
        }

        let (endpoints, transport): (Vec<Endpoint>, Arc<dyn RpcTransport>) = match route {
            Route::Public => {
                let chain = fallback_chain(&resolved, &self.http)?;
                (resolved, Arc::new(chain) as Arc<dyn RpcTransport>)
            }
            Route::Private => {
                let relay = self
                    .relay
                    .clone()
                    .ok_or_else(|| TransportError::Other(ConfigError::MissingRelay.to_string()))?;
                let best = resolved[0].clone();
                (
                    vec![best.clone()],
                    Arc::new(RelayBridge::new(best, relay)) as Arc<dyn RpcTransport>,
                )
            }
        };

        let polling_interval = if network.is_local() {
            None
        } else {
            Some(self.preference.polling_interval)
        };

        tracing::info!(
            chain_id = network.id,
            network = %network.name,
            %route,
            endpoints = endpoints.len(),
            polling_ms = polling_interval.map(|d| d.as_millis() as u64),
            "connection ready"
        );

        Ok(Connection {
            network: network.clone(),
            route,
            endpoints,
            polling_interval,
            transport,
        })
    }

    /// Build a connection for each network, in order.
    pub fn connect_all(&self, networks: &[Network]) -> Result<Vec<Connection>, TransportError> {
        networks.iter().map(|n| self.client(n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chainroute_core::preference::DEFAULT_POLLING_INTERVAL;
    use chainroute_providers::chains;
    use chainroute_relay::{RelayClientConfig, RelayRequest, RelayResponse};

    const OK_BODY: &str = r#"{"jsonrpc":"2.0","id":1,"result":"0x1"}"#;

    struct StubRelay {
        config: RelayClientConfig,
        body: &'static str,
    }

    #[async_trait]
    impl RelayClient for StubRelay {
        async fn forward(
            &self,
            _endpoint: &Endpoint,
            _req: RelayRequest,
        ) -> Result<RelayResponse, TransportError> {
            Ok(RelayResponse {
                status: 200,
                body: self.body.into(),
            })
        }

        fn config(&self) -> &RelayClientConfig {
            &self.config
        }
    }

    fn stub_relay(body: &'static str) -> Arc<dyn RelayClient> {
        Arc::new(StubRelay {
            config: RelayClientConfig::new("test"),
            body,
        })
    }

    fn selector_with(use_private: bool, body: &'static str) -> TransportSelector {
        let preference = RoutingPreference {
            use_private,
            relay_client_id: "test".into(),
            polling_interval: Duration::from_secs(4),
        };
        TransportSelector::new(preference, ProviderResolver::default(), Some(stub_relay(body)))
            .unwrap()
    }

    fn selector(use_private: bool) -> TransportSelector {
        selector_with(use_private, OK_BODY)
    }

    #[test]
    fn local_network_is_always_public() {
        for use_private in [false, true] {
            assert_eq!(selector(use_private).route_for(&chains::hardhat()), Route::Public);
        }
    }

    #[test]
    fn non_local_private_iff_preferred() {
        for net in chains::all().into_iter().filter(|n| !n.is_local()) {
            assert_eq!(selector(true).route_for(&net), Route::Private, "{net}");
            assert_eq!(selector(false).route_for(&net), Route::Public, "{net}");
        }
    }

    #[test]
    fn public_connection_uses_every_endpoint() {
        let conn = selector(false).client(&chains::mainnet()).unwrap();
        assert_eq!(conn.route(), Route::Public);
        assert_eq!(conn.endpoints(), chains::mainnet().rpc_urls.as_slice());
        assert_eq!(conn.transport().url(), chains::mainnet().rpc_urls[0].as_str());
    }

    #[test]
    fn private_connection_uses_best_endpoint() {
        let resolver = ProviderResolver::new(Some("key".into()));
        let sel = TransportSelector::new(
            RoutingPreference::private("test", DEFAULT_POLLING_INTERVAL),
            resolver,
            Some(stub_relay(OK_BODY)),
        )
        .unwrap();
        let conn = sel.client(&chains::mainnet()).unwrap();
        assert_eq!(conn.route(), Route::Private);
        assert_eq!(conn.endpoints().len(), 1);
        assert_eq!(
            conn.endpoints()[0].as_str(),
            "https://eth-mainnet.g.alchemy.com/v2/key"
        );
    }

    #[test]
    fn polling_interval_only_on_non_local() {
        for use_private in [false, true] {
            let sel = selector(use_private);
            let remote = sel.client(&chains::sepolia()).unwrap();
            assert_eq!(remote.polling_interval(), Some(Duration::from_secs(4)));
            let local = sel.client(&chains::hardhat()).unwrap();
            assert_eq!(local.polling_interval(), None);
        }
    }

    #[test]
    fn private_without_relay_is_rejected() {
        let err = TransportSelector::new(
            RoutingPreference::private("test", DEFAULT_POLLING_INTERVAL),
            ProviderResolver::default(),
            None,
        )
        .err()
        .unwrap();
        assert!(matches!(err, ConfigError::MissingRelay));
    }

    #[test]
    fn public_without_relay_is_fine() {
        let sel = TransportSelector::new(
            RoutingPreference::public(DEFAULT_POLLING_INTERVAL),
            ProviderResolver::default(),
            None,
        )
        .unwrap();
        assert!(sel.relay().is_none());
        assert_eq!(sel.client(&chains::base()).unwrap().route(), Route::Public);
    }

    #[test]
    fn network_without_endpoint_fails() {
        let net = Network::public(56, "BNB", vec![]);
        let err = selector(true).client(&net).unwrap_err();
        assert!(matches!(err, TransportError::NoEndpoint { chain_id: 56 }));
    }

    #[test]
    fn relay_client_is_shared_across_connections() {
        let sel = selector(true);
        let before = Arc::strong_count(sel.relay().unwrap());
        let conns = sel
            .connect_all(&[chains::mainnet(), chains::optimism(), chains::base()])
            .unwrap();
        assert_eq!(conns.len(), 3);
        assert_eq!(Arc::strong_count(sel.relay().unwrap()), before + 3);
    }

    #[tokio::test]
    async fn private_connection_answers_through_relay() {
        let conn = selector(true).client(&chains::arbitrum()).unwrap();
        let resp = conn.request("eth_chainId", vec![]).await.unwrap();
        assert_eq!(resp.result, Some(serde_json::json!("0x1")));
    }

    #[tokio::test]
    async fn call_returns_result_value() {
        let conn = selector(true).client(&chains::optimism()).unwrap();
        let value = conn.call("eth_chainId", vec![]).await.unwrap();
        assert_eq!(value, serde_json::json!("0x1"));
    }

    #[tokio::test]
    async fn call_surfaces_node_error_as_execution_error() {
        let conn = selector_with(
            true,
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":3,"message":"execution reverted"}}"#,
        )
        .client(&chains::base())
        .unwrap();

        let err = conn.call("eth_call", vec![]).await.unwrap_err();
        assert!(err.is_execution_error());
        match err {
            TransportError::Rpc(e) => {
                assert_eq!(e.code, 3);
                assert_eq!(e.message, "execution reverted");
            }
            other => panic!("expected rpc error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn call_keeps_transport_failures_distinct() {
        let conn = selector_with(true, "gateway exploded").client(&chains::base()).unwrap();
        let err = conn.call("eth_call", vec![]).await.unwrap_err();
        assert!(!err.is_execution_error());
        assert!(matches!(err, TransportError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn request_uses_default_id() {
        let conn = selector(true).client(&chains::mainnet()).unwrap();
        let resp = conn.request("eth_chainId", vec![]).await.unwrap();
        assert_eq!(resp.id, chainroute_core::RpcId::Number(DEFAULT_REQUEST_ID));
    }
}
