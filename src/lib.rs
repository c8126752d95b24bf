//! Multi-hop asset conversion over heterogeneous liquidity venues.
//!
//! A route is a list of packed pool hints ([`codec`]). The [`router::ConversionEngine`] executes
//! it hop by hop against a [`venue::Chain`], each hop dispatched to the adapter for its venue
//! family ([`venue`]), and either completes with at least the requested minimum output or leaves
//! no effect at all.

pub mod codec;
pub mod config;
pub mod math;
pub mod router;
pub mod venue;

pub use codec::{Action, CodecError, PoolHint, VenueType};
pub use config::{ConfigError, FactoryRouter, RouterConfig, VenueAddresses};
pub use math::min_output_with_slippage;
pub use router::{
    ConversionEngine, ConversionReceipt, ConversionRequest, RegistryError, Route, RouteRegistry,
    RouterError,
};
pub use venue::{Chain, NATIVE_ASSET, VenueError};
