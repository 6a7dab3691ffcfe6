//! The relay capability and its request/response descriptors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use chainroute_core::{Endpoint, TransportError};

/// Relay client configuration, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayClientConfig {
    /// Identifies this deployment to the relay network.
    pub client_id: String,
    /// Force a direct single-hop route instead of multi-hop.
    #[serde(default = "bool_true")]
    pub force_zero_hop: bool,
    /// Allow egress through exit nodes associated with `client_id`.
    #[serde(default = "bool_true")]
    pub client_associated_exit_nodes: bool,
}

fn bool_true() -> bool {
    true
}

impl RelayClientConfig {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            force_zero_hop: true,
            client_associated_exit_nodes: true,
        }
    }
}

/// An HTTP request to be delivered through the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayRequest {
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RelayRequest {
    /// A `POST` carrying a JSON body.
    pub fn post_json(body: impl Into<String>) -> Self {
        Self {
            method: "POST".into(),
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: body.into(),
        }
    }

    /// Value of the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The endpoint's reply as returned through the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: u16,
    pub body: String,
}

impl RelayResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A privacy relay that forwards HTTP requests without revealing the
/// caller's address to the destination.
///
/// Implementations are shared by every private connection, so `forward`
/// must not need `&mut self`.
#[async_trait]
pub trait RelayClient: Send + Sync + 'static {
    /// Deliver `req` to `endpoint` and return the endpoint's response.
    async fn forward(
        &self,
        endpoint: &Endpoint,
        req: RelayRequest,
    ) -> Result<RelayResponse, TransportError>;

    /// The configuration this client was built with.
    fn config(&self) -> &RelayClientConfig;
}
