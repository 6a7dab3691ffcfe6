//! chainroute-providers — where a network's RPC traffic can go.
//!
//! [`ProviderResolver`] turns a [`Network`](chainroute_core::Network) into an
//! ordered endpoint list: the premium provider first when one is configured,
//! then the network's built-in public endpoints.
//!
//! # Quick start
//! ```rust,no_run
//! use chainroute_providers::{chains, ProviderResolver};
//!
//! let resolver = ProviderResolver::new(Some("YOUR_ALCHEMY_KEY".into()));
//! let endpoints = resolver.resolve(&chains::mainnet());
//! ```

pub mod alchemy;
pub mod chains;
pub mod resolver;

pub use resolver::{ProviderResolver, LOCAL_ENDPOINT};
