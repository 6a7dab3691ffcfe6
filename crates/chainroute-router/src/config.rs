//! Environment-driven routing configuration.
//!
//! | variable                          | default |
//! |-----------------------------------|---------|
//! | `CHAINROUTE_TARGET_NETWORKS`      | `31337` |
//! | `CHAINROUTE_USE_PRIVATE_RPC`      | `false` |
//! | `CHAINROUTE_POLLING_INTERVAL_MS`  | `30000` |
//! | `CHAINROUTE_RELAY_CLIENT_ID`      | required when private |
//! | `CHAINROUTE_RELAY_ENTRY_URL`      | required when private |
//! | `CHAINROUTE_RELAY_FORCE_ZERO_HOP` | `true`  |
//! | `CHAINROUTE_RELAY_EXIT_NODES`     | `true`  |
//! | `CHAINROUTE_ALCHEMY_API_KEY`      | unset   |

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use chainroute_core::preference::DEFAULT_POLLING_INTERVAL;
use chainroute_core::{Network, RoutingPreference, TransportError};
use chainroute_providers::{chains, ProviderResolver};
use chainroute_relay::{GatewayRelayClient, RelayClient, RelayClientConfig};

use crate::selector::TransportSelector;

pub const TARGET_NETWORKS: &str = "CHAINROUTE_TARGET_NETWORKS";
pub const USE_PRIVATE_RPC: &str = "CHAINROUTE_USE_PRIVATE_RPC";
pub const POLLING_INTERVAL_MS: &str = "CHAINROUTE_POLLING_INTERVAL_MS";
pub const RELAY_CLIENT_ID: &str = "CHAINROUTE_RELAY_CLIENT_ID";
pub const RELAY_ENTRY_URL: &str = "CHAINROUTE_RELAY_ENTRY_URL";
pub const RELAY_FORCE_ZERO_HOP: &str = "CHAINROUTE_RELAY_FORCE_ZERO_HOP";
pub const RELAY_EXIT_NODES: &str = "CHAINROUTE_RELAY_EXIT_NODES";
pub const ALCHEMY_API_KEY: &str = "CHAINROUTE_ALCHEMY_API_KEY";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is required when private routing is enabled")]
    Missing { var: &'static str },

    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("unknown chain id {0}")]
    UnknownChain(u64),

    #[error("private routing is enabled but no relay client was provided")]
    MissingRelay,

    #[error("failed to build relay client: {0}")]
    Relay(#[from] TransportError),
}

/// Everything needed to build a [`TransportSelector`].
#[derive(Debug, Clone)]
pub struct RouteConfig {
    pub target_networks: Vec<Network>,
    pub preference: RoutingPreference,
    pub relay: RelayClientConfig,
    pub relay_entry_url: Option<Url>,
    pub alchemy_api_key: Option<String>,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            target_networks: vec![chains::hardhat()],
            preference: RoutingPreference::default(),
            relay: RelayClientConfig::new(""),
            relay_entry_url: None,
            alchemy_api_key: None,
        }
    }
}

impl RouteConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup` (variable name → value).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let target_networks = match get(TARGET_NETWORKS) {
            Some(raw) => parse_networks(&raw)?,
            None => vec![chains::hardhat()],
        };

        let use_private = match get(USE_PRIVATE_RPC) {
            Some(raw) => parse_bool(USE_PRIVATE_RPC, &raw)?,
            None => false,
        };

        let polling_interval = match get(POLLING_INTERVAL_MS) {
            Some(raw) => Duration::from_millis(raw.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    var: POLLING_INTERVAL_MS,
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?),
            None => DEFAULT_POLLING_INTERVAL,
        };

        let relay_client_id = get(RELAY_CLIENT_ID).unwrap_or_default();
        let relay_entry_url = match get(RELAY_ENTRY_URL) {
            Some(raw) => Some(Url::parse(&raw).map_err(|e| ConfigError::Invalid {
                var: RELAY_ENTRY_URL,
                value: raw.clone(),
                reason: e.to_string(),
            })?),
            None => None,
        };

        if use_private {
            if relay_client_id.is_empty() {
                return Err(ConfigError::Missing { var: RELAY_CLIENT_ID });
            }
            if relay_entry_url.is_none() {
                return Err(ConfigError::Missing { var: RELAY_ENTRY_URL });
            }
        }

        let relay = RelayClientConfig {
            client_id: relay_client_id.clone(),
            force_zero_hop: match get(RELAY_FORCE_ZERO_HOP) {
                Some(raw) => parse_bool(RELAY_FORCE_ZERO_HOP, &raw)?,
                None => true,
            },
            client_associated_exit_nodes: match get(RELAY_EXIT_NODES) {
                Some(raw) => parse_bool(RELAY_EXIT_NODES, &raw)?,
                None => true,
            },
        };

        Ok(Self {
            target_networks,
            preference: RoutingPreference {
                use_private,
                relay_client_id,
                polling_interval,
            },
            relay,
            relay_entry_url,
            alchemy_api_key: get(ALCHEMY_API_KEY),
        })
    }

    /// Target networks plus mainnet.
    pub fn enabled_networks(&self) -> Vec<Network> {
        chains::enabled_networks(self.target_networks.clone())
    }

    /// Build the selector, constructing the relay client once if private
    /// routing is enabled.
    pub fn build_selector(&self) -> Result<TransportSelector, ConfigError> {
        let relay = if self.preference.use_private {
            let entry = self
                .relay_entry_url
                .clone()
                .ok_or(ConfigError::Missing { var: RELAY_ENTRY_URL })?;
            let client = GatewayRelayClient::new(entry, self.relay.clone())?;
            tracing::info!(
                client_id = %self.relay.client_id,
                force_zero_hop = self.relay.force_zero_hop,
                exit_nodes = self.relay.client_associated_exit_nodes,
                "relay client ready"
            );
            Some(Arc::new(client) as Arc<dyn RelayClient>)
        } else {
            None
        };

        TransportSelector::new(
            self.preference.clone(),
            ProviderResolver::new(self.alchemy_api_key.clone()),
            relay,
        )
    }
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: raw.to_string(),
            reason: "expected a boolean".into(),
        }),
    }
}

fn parse_networks(raw: &str) -> Result<Vec<Network>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let id: u64 = s.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                var: TARGET_NETWORKS,
                value: s.to_string(),
                reason: e.to_string(),
            })?;
            chains::by_id(id).ok_or(ConfigError::UnknownChain(id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = RouteConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.target_networks, vec![chains::hardhat()]);
        assert!(!cfg.preference.use_private);
        assert_eq!(cfg.preference.polling_interval, Duration::from_secs(30));
        assert!(cfg.relay.force_zero_hop);
        assert!(cfg.relay.client_associated_exit_nodes);
        assert!(cfg.alchemy_api_key.is_none());
    }

    #[test]
    fn full_private_config() {
        let cfg = RouteConfig::from_lookup(lookup(&[
            (TARGET_NETWORKS, "11155111, 10"),
            (USE_PRIVATE_RPC, "true"),
            (POLLING_INTERVAL_MS, "4000"),
            (RELAY_CLIENT_ID, "wallet-web"),
            (RELAY_ENTRY_URL, "http://127.0.0.1:3001/relay"),
            (RELAY_FORCE_ZERO_HOP, "no"),
            (ALCHEMY_API_KEY, "abc"),
        ]))
        .unwrap();

        assert_eq!(
            cfg.target_networks.iter().map(|n| n.id).collect::<Vec<_>>(),
            vec![11155111, 10]
        );
        assert_eq!(
            cfg.preference,
            RoutingPreference::private("wallet-web", Duration::from_millis(4000))
        );
        assert!(!cfg.relay.force_zero_hop);
        assert!(cfg.relay.client_associated_exit_nodes);
        assert_eq!(cfg.alchemy_api_key.as_deref(), Some("abc"));
        assert_eq!(cfg.enabled_networks().last().unwrap().id, chains::MAINNET_ID);

        let selector = cfg.build_selector().unwrap();
        assert!(selector.relay().is_some());
        assert_eq!(selector.relay().unwrap().config().client_id, "wallet-web");
    }

    #[test]
    fn private_requires_client_id_and_entry() {
        let err = RouteConfig::from_lookup(lookup(&[(USE_PRIVATE_RPC, "1")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { var: RELAY_CLIENT_ID }));

        let err = RouteConfig::from_lookup(lookup(&[
            (USE_PRIVATE_RPC, "1"),
            (RELAY_CLIENT_ID, "wallet-web"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing { var: RELAY_ENTRY_URL }));
    }

    #[test]
    fn public_selector_has_no_relay() {
        let cfg = RouteConfig::from_lookup(lookup(&[(USE_PRIVATE_RPC, "false")])).unwrap();
        assert!(cfg.build_selector().unwrap().relay().is_none());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            RouteConfig::from_lookup(lookup(&[(USE_PRIVATE_RPC, "maybe")])).unwrap_err(),
            ConfigError::Invalid { var: USE_PRIVATE_RPC, .. }
        ));
        assert!(matches!(
            RouteConfig::from_lookup(lookup(&[(POLLING_INTERVAL_MS, "soon")])).unwrap_err(),
            ConfigError::Invalid { var: POLLING_INTERVAL_MS, .. }
        ));
        assert!(matches!(
            RouteConfig::from_lookup(lookup(&[(TARGET_NETWORKS, "1,424242")])).unwrap_err(),
            ConfigError::UnknownChain(424242)
        ));
    }
}
