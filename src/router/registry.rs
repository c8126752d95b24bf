use alloy_primitives::Address;
use parking_lot::{RwLock, RwLockReadGuard};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::codec::CodecError;
use crate::router::common::Route;
use crate::venue::ShareAssets;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no route registered from {from} to {to}")]
    RouteNotRegistered { from: Address, to: Address },

    #[error("{caller} is not the registry operator")]
    Unauthorized { caller: Address },

    #[error("{venues} venues but {shares} share assets")]
    LengthMismatch { venues: usize, shares: usize },

    #[error("hop {hop} of the route is invalid: {error}")]
    InvalidRoute { hop: usize, error: CodecError },

    #[error("route has no hops")]
    EmptyRoute,
}

/// Routes keyed by `(source, destination)` plus the share asset of venues whose liquidity token is
/// not the venue itself.
///
/// Writes are operator-only. Readers get an `Arc` to the route that was current at lookup time, so
/// an overwrite never shows up half-applied.
#[derive(Debug)]
pub struct RouteRegistry {
    operator: RwLock<Address>,
    routes: RwLock<HashMap<(Address, Address), Arc<Route>>>,
    share_assets: RwLock<HashMap<Address, Address>>,
}

impl RouteRegistry {
    pub fn new(operator: Address) -> Self {
        Self {
            operator: RwLock::new(operator),
            routes: RwLock::new(HashMap::new()),
            share_assets: RwLock::new(HashMap::new()),
        }
    }

    pub fn operator(&self) -> Address {
        *self.operator.read()
    }

    /// Checks `caller` against the operator. The returned guard must be held until the write
    /// lands, so a concurrent `transfer_operator` cannot slip in between.
    fn authorize(&self, caller: Address) -> Result<RwLockReadGuard<'_, Address>, RegistryError> {
        let operator = self.operator.read();
        if caller != *operator {
            return Err(RegistryError::Unauthorized { caller });
        }
        Ok(operator)
    }

    pub fn transfer_operator(&self, caller: Address, new_operator: Address) -> Result<(), RegistryError> {
        let mut operator = self.operator.write();
        if caller != *operator {
            return Err(RegistryError::Unauthorized { caller });
        }
        *operator = new_operator;
        info!(%caller, %new_operator, "registry operator transferred");
        Ok(())
    }

    /// Creates or replaces the route for `(source, destination)`.
    ///
    /// Every hop must decode; a rejected route leaves the current entry in place.
    pub fn register_route(
        &self,
        caller: Address,
        source: Address,
        destination: Address,
        route: Route,
    ) -> Result<(), RegistryError> {
        let _operator = self.authorize(caller)?;
        if route.is_empty() {
            return Err(RegistryError::EmptyRoute);
        }
        for (hop, word) in route.hops().iter().enumerate() {
            crate::codec::decode(*word).map_err(|error| RegistryError::InvalidRoute { hop, error })?;
        }

        let hops = route.len();
        self.routes
            .write()
            .insert((source, destination), Arc::new(route));
        info!(%source, %destination, hops, "route registered");
        Ok(())
    }

    pub fn route(&self, source: Address, destination: Address) -> Option<Arc<Route>> {
        self.routes.read().get(&(source, destination)).cloned()
    }

    pub fn resolve(&self, source: Address, destination: Address) -> Result<Arc<Route>, RegistryError> {
        self.route(source, destination)
            .ok_or(RegistryError::RouteNotRegistered {
                from: source,
                to: destination,
            })
    }

    pub fn register_venue_share_asset(
        &self,
        caller: Address,
        venue: Address,
        share: Address,
    ) -> Result<(), RegistryError> {
        let _operator = self.authorize(caller)?;
        self.share_assets.write().insert(venue, share);
        info!(%venue, %share, "venue share asset registered");
        Ok(())
    }

    /// Batch form of [`register_venue_share_asset`](Self::register_venue_share_asset). Nothing is
    /// written when the lengths differ.
    pub fn register_venue_share_assets(
        &self,
        caller: Address,
        venues: &[Address],
        shares: &[Address],
    ) -> Result<(), RegistryError> {
        let _operator = self.authorize(caller)?;
        if venues.len() != shares.len() {
            return Err(RegistryError::LengthMismatch {
                venues: venues.len(),
                shares: shares.len(),
            });
        }
        let mut share_assets = self.share_assets.write();
        for (venue, share) in venues.iter().zip(shares) {
            share_assets.insert(*venue, *share);
        }
        info!(count = venues.len(), "venue share assets registered");
        Ok(())
    }
}

impl ShareAssets for RouteRegistry {
    fn share_asset(&self, venue: Address) -> Address {
        self.share_assets
            .read()
            .get(&venue)
            .copied()
            .unwrap_or(venue)
    }
}
