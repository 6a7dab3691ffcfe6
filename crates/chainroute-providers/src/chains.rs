//! Built-in chain table with free public endpoints.
//!
//! Public endpoints need no API key. Rate limits are lower and reliability
//! may vary, so they sit behind any premium endpoint in the fallback order.

use chainroute_core::{Endpoint, Network};

pub const MAINNET_ID: u64 = 1;
pub const HARDHAT_ID: u64 = 31337;

fn endpoints(urls: &[&str]) -> Vec<Endpoint> {
    urls.iter().filter_map(|u| Endpoint::parse(u).ok()).collect()
}

pub fn mainnet() -> Network {
    Network::public(
        MAINNET_ID,
        "Ethereum",
        endpoints(&[
            "https://cloudflare-eth.com",
            "https://rpc.ankr.com/eth",
            "https://eth.llamarpc.com",
        ]),
    )
}

pub fn sepolia() -> Network {
    Network::public(11155111, "Sepolia", endpoints(&["https://rpc.sepolia.org"]))
}

pub fn optimism() -> Network {
    Network::public(
        10,
        "OP Mainnet",
        endpoints(&["https://mainnet.optimism.io", "https://rpc.ankr.com/optimism"]),
    )
}

pub fn arbitrum() -> Network {
    Network::public(
        42161,
        "Arbitrum One",
        endpoints(&["https://arb1.arbitrum.io/rpc", "https://rpc.ankr.com/arbitrum"]),
    )
}

pub fn base() -> Network {
    Network::public(
        8453,
        "Base",
        endpoints(&["https://mainnet.base.org", "https://rpc.ankr.com/base"]),
    )
}

pub fn polygon() -> Network {
    Network::public(
        137,
        "Polygon",
        endpoints(&["https://polygon-rpc.com", "https://rpc.ankr.com/polygon"]),
    )
}

/// Local hardhat / anvil node.
pub fn hardhat() -> Network {
    Network::local(HARDHAT_ID, "Hardhat", endpoints(&["http://127.0.0.1:8545"]))
}

/// Every built-in network.
pub fn all() -> Vec<Network> {
    vec![
        mainnet(),
        sepolia(),
        optimism(),
        arbitrum(),
        base(),
        polygon(),
        hardhat(),
    ]
}

/// Look up a built-in network by chain id.
pub fn by_id(chain_id: u64) -> Option<Network> {
    all().into_iter().find(|n| n.id == chain_id)
}

/// The networks a client connects to: `targets`, plus mainnet once.
///
/// Mainnet is always enabled for name resolution and price lookups.
pub fn enabled_networks(mut targets: Vec<Network>) -> Vec<Network> {
    if !targets.iter().any(|n| n.id == MAINNET_ID) {
        targets.push(mainnet());
    }
    targets
}
