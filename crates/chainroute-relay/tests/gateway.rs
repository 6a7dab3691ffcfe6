//! Relay bridge over the HTTP gateway client, against a stub gateway.

use std::sync::Arc;

use chainroute_core::{Endpoint, RpcTransport, TransportError};
use chainroute_relay::{GatewayRelayClient, RelayBridge, RelayClient, RelayClientConfig};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer) -> Arc<dyn RelayClient> {
    let entry = Url::parse(&server.uri()).expect("server uri");
    let config = RelayClientConfig {
        client_id: "wallet-web".into(),
        force_zero_hop: true,
        client_associated_exit_nodes: true,
    };
    Arc::new(GatewayRelayClient::new(entry, config).expect("gateway client"))
}

fn target() -> Endpoint {
    Endpoint::parse("https://eth-mainnet.g.alchemy.com/v2/key").expect("endpoint")
}

#[tokio::test]
async fn relays_envelope_and_returns_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("content-type", "application/json"))
        .and(header("x-relay-target", "https://eth-mainnet.g.alchemy.com/v2/key"))
        .and(header("x-relay-client-id", "wallet-web"))
        .and(header("x-relay-zero-hop", "true"))
        .and(header("x-relay-exit-nodes", "true"))
        .and(body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_chainId",
            "params": []
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"jsonrpc": "2.0", "id": 1, "result": "0x1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let bridge = RelayBridge::new(target(), gateway(&server));
    let resp = bridge.request("eth_chainId", vec![]).await.expect("response");
    assert_eq!(resp.into_result().expect("result"), json!("0x1"));
}

#[tokio::test]
async fn gateway_error_status_fails_explicitly() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("no route"))
        .expect(1)
        .mount(&server)
        .await;

    let bridge = RelayBridge::new(target(), gateway(&server));
    let err = bridge.request("eth_chainId", vec![]).await.expect_err("503");
    assert!(matches!(err, TransportError::Http(ref m) if m.contains("503")));
}

#[tokio::test]
async fn unreachable_gateway_fails_explicitly() {
    let entry = Url::parse("http://nonexistent.invalid/").expect("url");
    let relay: Arc<dyn RelayClient> = Arc::new(
        GatewayRelayClient::new(entry, RelayClientConfig::new("wallet-web")).expect("client"),
    );

    let bridge = RelayBridge::new(target(), relay);
    let err = bridge.request("eth_chainId", vec![]).await.expect_err("dns failure");
    assert!(matches!(err, TransportError::Relay(_)));
    assert_eq!(bridge.url(), "https://eth-mainnet.g.alchemy.com/v2/key");
}
