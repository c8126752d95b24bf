use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::{self, CodecError, PoolHint, VenueType};
use crate::router::registry::RegistryError;
use crate::venue::VenueError;

/// Ordered hint words converting one asset into another.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    hops: Vec<U256>,
}

impl Route {
    pub fn new(hops: Vec<U256>) -> Self {
        Self { hops }
    }

    pub fn from_hints<'a>(hints: impl IntoIterator<Item = &'a PoolHint>) -> Self {
        Self {
            hops: hints.into_iter().map(codec::encode).collect(),
        }
    }

    #[inline]
    pub fn hops(&self) -> &[U256] {
        &self.hops
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub input_asset: Address,
    pub input_amount: U256,
    pub output_asset: Address,
    pub min_output: U256,
    /// Explicit route; resolved from the registry when absent.
    pub route: Option<Route>,
}

impl ConversionRequest {
    pub fn new(input_asset: Address, input_amount: U256, output_asset: Address) -> Self {
        Self {
            input_asset,
            input_amount,
            output_asset,
            min_output: U256::ZERO,
            route: None,
        }
    }

    #[must_use]
    pub fn with_min_output(mut self, min_output: U256) -> Self {
        self.min_output = min_output;
        self
    }

    #[must_use]
    pub fn with_route(mut self, route: Route) -> Self {
        self.route = Some(route);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HopReceipt {
    pub venue: Address,
    pub venue_type: VenueType,
    /// Asset the running balance is held in after the hop.
    pub asset_out: Address,
    pub amount_out: U256,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionReceipt {
    pub amount_out: U256,
    pub hops: Vec<HopReceipt>,
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Venue(#[from] VenueError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("input amount is zero")]
    ZeroInputAmount,

    #[error("route has no hops")]
    EmptyRoute,

    #[error("cannot unwrap {asset}, it is not the wrapped native asset")]
    WrapMismatch { asset: Address },

    #[error("output {actual} is below the minimum {minimum}")]
    InsufficientOutput { minimum: U256, actual: U256 },

    #[error("hop {hop} expects {expected} but the running asset is {found}")]
    RouteDiscontinuity {
        hop: usize,
        expected: Address,
        found: Address,
    },

    #[error("conversion already in progress on this engine")]
    Reentrancy,
}
