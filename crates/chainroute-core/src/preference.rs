//! Process-wide routing preference.

use std::time::Duration;

/// Default polling interval for public networks.
pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_millis(30_000);

/// How connections should reach the network, shared by every connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingPreference {
    /// Route non-local networks through the privacy relay.
    pub use_private: bool,
    /// Identifies this deployment to the relay network.
    pub relay_client_id: String,
    /// Block polling period attached to non-local connections.
    pub polling_interval: Duration,
}

impl Default for RoutingPreference {
    fn default() -> Self {
        Self {
            use_private: false,
            relay_client_id: String::new(),
            polling_interval: DEFAULT_POLLING_INTERVAL,
        }
    }
}

impl RoutingPreference {
    /// Public routing with the given polling interval.
    pub fn public(polling_interval: Duration) -> Self {
        Self {
            polling_interval,
            ..Default::default()
        }
    }

    /// Private routing identified by `relay_client_id`.
    pub fn private(relay_client_id: impl Into<String>, polling_interval: Duration) -> Self {
        Self {
            use_private: true,
            relay_client_id: relay_client_id.into(),
            polling_interval,
        }
    }
}
