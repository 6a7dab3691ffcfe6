//! chainroute-router — choose how each network connection reaches its chain.
//!
//! [`TransportSelector`] evaluates the [`RoutingPreference`] once per
//! network and yields a [`Connection`]:
//!
//! ```text
//! use_private == false  ──────────────┐
//! network is local      ──────────────┼─► Route::Public  → FallbackTransport(all endpoints)
//! otherwise             ──────────────┴─► Route::Private → RelayBridge(first endpoint)
//! ```
//!
//! Non-local connections carry the configured polling interval.
//!
//! [`RoutingPreference`]: chainroute_core::RoutingPreference

pub mod config;
pub mod selector;

pub use config::{ConfigError, RouteConfig};
pub use selector::{Connection, Route, TransportSelector};
