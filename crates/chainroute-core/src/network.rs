//! Networks and their RPC endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

/// An HTTP URL serving JSON-RPC for a network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(Url);

impl Endpoint {
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        Url::parse(input).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.0
    }
}

impl From<Url> for Endpoint {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl FromStr for Endpoint {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// A blockchain the client can connect to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// EIP-155 chain id.
    pub id: u64,
    pub name: String,
    /// Developer-only chain running next to the client (e.g. hardhat, anvil).
    #[serde(default)]
    pub local: bool,
    /// Built-in public endpoints, in priority order.
    #[serde(default)]
    pub rpc_urls: Vec<Endpoint>,
}

impl Network {
    /// A public network with the given default endpoints.
    pub fn public(id: u64, name: impl Into<String>, rpc_urls: Vec<Endpoint>) -> Self {
        Self {
            id,
            name: name.into(),
            local: false,
            rpc_urls,
        }
    }

    /// A local developer network.
    pub fn local(id: u64, name: impl Into<String>, rpc_urls: Vec<Endpoint>) -> Self {
        Self {
            id,
            name: name.into(),
            local: true,
            rpc_urls,
        }
    }

    pub fn is_local(&self) -> bool {
        self.local
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
