//! Alchemy provider profile.

use chainroute_core::Endpoint;

/// URL of the Alchemy HTTP JSON-RPC endpoint, if Alchemy serves `chain_id`.
pub fn http_url(api_key: &str, chain_id: u64) -> Option<String> {
    let network = chain_id_to_network(chain_id)?;
    Some(format!("https://{network}.g.alchemy.com/v2/{api_key}"))
}

/// Alchemy endpoint for `chain_id`, or `None` for unsupported chains.
pub fn endpoint(api_key: &str, chain_id: u64) -> Option<Endpoint> {
    let url = http_url(api_key, chain_id)?;
    match Endpoint::parse(&url) {
        Ok(ep) => Some(ep),
        Err(e) => {
            tracing::warn!(chain_id, error = %e, "invalid Alchemy URL, skipping");
            None
        }
    }
}

fn chain_id_to_network(chain_id: u64) -> Option<&'static str> {
    let network = match chain_id {
        1 => "eth-mainnet",
        11155111 => "eth-sepolia",
        137 => "polygon-mainnet",
        80002 => "polygon-amoy",
        42161 => "arb-mainnet",
        421614 => "arb-sepolia",
        10 => "opt-mainnet",
        11155420 => "opt-sepolia",
        8453 => "base-mainnet",
        84532 => "base-sepolia",
        _ => return None,
    };
    Some(network)
}
