//! chainroute CLI — inspect routing decisions and send calls per network.
//!
//! # Commands
//! ```text
//! chainroute networks
//! chainroute route --chain-id <ID>
//! chainroute call  --chain-id <ID> --method <NAME> [--params <JSON array>]
//! ```
//!
//! Configuration comes from the environment (and `.env`), see
//! `chainroute_router::config`.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use chainroute_core::{Network, TransportError};
use chainroute_providers::chains;
use chainroute_router::{RouteConfig, TransportSelector};

mod logging;

#[derive(Parser)]
#[command(
    name = "chainroute",
    about = "Per-network RPC routing: public fallback or privacy relay",
    long_about = "
ChainRoute CLI: show how each network's JSON-RPC traffic is routed and send
calls through the selected transport.

ENVIRONMENT VARIABLES:
  CHAINROUTE_TARGET_NETWORKS       Comma-separated chain ids (default 31337)
  CHAINROUTE_USE_PRIVATE_RPC       Route public networks through the relay
  CHAINROUTE_POLLING_INTERVAL_MS   Polling interval for public networks
  CHAINROUTE_RELAY_CLIENT_ID       Relay client identifier
  CHAINROUTE_RELAY_ENTRY_URL       Relay entry gateway URL
  CHAINROUTE_RELAY_FORCE_ZERO_HOP  Force single-hop relay (default true)
  CHAINROUTE_RELAY_EXIT_NODES      Allow client-associated exit nodes (default true)
  CHAINROUTE_ALCHEMY_API_KEY       Premium provider key
",
    version
)]
struct Cli {
    /// Log level used when RUST_LOG is unset
    #[arg(long, global = true, env = "CHAINROUTE_LOG", default_value = "warn")]
    log_level: String,

    /// Emit JSON structured logs
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List enabled networks with their route and polling interval
    Networks,
    /// Show the route and ordered endpoints for one network
    Route {
        #[arg(long)]
        chain_id: u64,
    },
    /// Send one JSON-RPC call through the selected transport
    Call {
        #[arg(long)]
        chain_id: u64,
        /// JSON-RPC method, e.g. eth_blockNumber
        #[arg(short, long)]
        method: String,
        /// Parameters as a JSON array
        #[arg(short, long, default_value = "[]")]
        params: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_level, cli.json_logs);

    let config = RouteConfig::from_env().context("invalid configuration")?;
    let selector = config.build_selector().context("failed to build transport selector")?;

    match cli.command {
        Commands::Networks => cmd_networks(&config, &selector),
        Commands::Route { chain_id } => cmd_route(&config, &selector, chain_id),
        Commands::Call {
            chain_id,
            method,
            params,
        } => cmd_call(&config, &selector, chain_id, &method, &params).await,
    }
}

fn cmd_networks(config: &RouteConfig, selector: &TransportSelector) -> Result<()> {
    println!(
        "Private routing: {}",
        if config.preference.use_private { "on" } else { "off" }
    );
    println!();
    println!("{:<10} {:<16} {:<8} {:<9} POLLING", "CHAIN", "NAME", "LOCAL", "ROUTE");
    for network in config.enabled_networks() {
        let polling = if network.is_local() {
            "-".to_string()
        } else {
            format!("{}ms", config.preference.polling_interval.as_millis())
        };
        println!(
            "{:<10} {:<16} {:<8} {:<9} {}",
            network.id,
            network.name,
            network.is_local(),
            selector.route_for(&network),
            polling
        );
    }
    Ok(())
}

fn cmd_route(config: &RouteConfig, selector: &TransportSelector, chain_id: u64) -> Result<()> {
    let network = find_network(config, chain_id)?;
    let conn = selector.client(&network)?;
    tracing::debug!(chain_id, route = %conn.route(), endpoints = conn.endpoints().len(), "resolved route");

    println!("Network:   {network}");
    println!("Route:     {}", conn.route());
    match conn.polling_interval() {
        Some(interval) => println!("Polling:   {}ms", interval.as_millis()),
        None => println!("Polling:   none (local network)"),
    }
    println!("Endpoints:");
    for (i, ep) in conn.endpoints().iter().enumerate() {
        println!("  {}. {}", i + 1, redact(ep.as_str()));
    }
    Ok(())
}

async fn cmd_call(
    config: &RouteConfig,
    selector: &TransportSelector,
    chain_id: u64,
    method: &str,
    params: &str,
) -> Result<()> {
    let params: Vec<Value> = serde_json::from_str(params)
        .with_context(|| format!("--params must be a JSON array, got {params}"))?;
    let network = find_network(config, chain_id)?;
    let conn = selector.client(&network)?;

    tracing::debug!(chain_id, method, route = %conn.route(), "sending call");

    let result = conn.call(method, params).await.map_err(|e| {
        tracing::warn!(chain_id, method, route = %conn.route(), error = %e, "call failed");
        call_error(e)
    })?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Node-side errors are reported as-is; anything else names the transport.
fn call_error(err: TransportError) -> anyhow::Error {
    if err.is_execution_error() {
        anyhow!("node returned {err}")
    } else {
        anyhow::Error::new(err).context("transport failed")
    }
}

fn find_network(config: &RouteConfig, chain_id: u64) -> Result<Network> {
    config
        .enabled_networks()
        .into_iter()
        .find(|n| n.id == chain_id)
        .or_else(|| chains::by_id(chain_id))
        .ok_or_else(|| anyhow!("unknown chain id {chain_id}"))
}

/// Hide API keys embedded in provider URL paths.
fn redact(url: &str) -> String {
    match url.rsplit_once("/v2/") {
        Some((base, key)) if !key.is_empty() => format!("{base}/v2/***"),
        _ => url.to_string(),
    }
}
