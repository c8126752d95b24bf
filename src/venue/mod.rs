pub mod abi;
pub mod adapter;
pub mod balancer;
pub mod common;
pub mod curve;
pub mod lido;
pub mod uniswap;

#[cfg(test)]
pub(crate) mod mock;

pub use adapter::{AdapterContext, execute_hop, plan_hop};
pub use common::{
    CURVE_NATIVE_COIN, Chain, HopPlan, NATIVE_ASSET, ShareAssets, SnapshotId, VenueCall,
    VenueError,
};
