//! Ordered endpoint resolution per network.

use chainroute_core::{Endpoint, Network};

use crate::alchemy;

/// Endpoint used by a local network that carries no URL of its own.
pub const LOCAL_ENDPOINT: &str = "http://127.0.0.1:8545";

/// Produces the ordered candidate endpoints for a network.
///
/// Missing premium credentials never fail resolution; the network's
/// built-in endpoints are used instead.
#[derive(Debug, Clone, Default)]
pub struct ProviderResolver {
    alchemy_api_key: Option<String>,
}

impl ProviderResolver {
    pub fn new(alchemy_api_key: Option<String>) -> Self {
        Self {
            alchemy_api_key: alchemy_api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Returns `true` if a premium provider key is configured.
    pub fn has_premium(&self) -> bool {
        self.alchemy_api_key.is_some()
    }

    /// Premium endpoint first (when available), then the network defaults.
    pub fn resolve(&self, network: &Network) -> Vec<Endpoint> {
        let mut endpoints = Vec::with_capacity(network.rpc_urls.len() + 1);

        if let Some(premium) = self
            .alchemy_api_key
            .as_deref()
            .and_then(|key| alchemy::endpoint(key, network.id))
        {
            endpoints.push(premium);
        }

        for ep in &network.rpc_urls {
            if !endpoints.contains(ep) {
                endpoints.push(ep.clone());
            }
        }

        if endpoints.is_empty() && network.is_local() {
            if let Ok(local) = Endpoint::parse(LOCAL_ENDPOINT) {
                endpoints.push(local);
            }
        }

        tracing::debug!(
            chain_id = network.id,
            count = endpoints.len(),
            premium = self.has_premium(),
            "resolved endpoints"
        );
        endpoints
    }
}
