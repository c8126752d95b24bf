use alloy_primitives::{Address, B256, Bytes, U256, address};
use alloy_sol_types::{SolCall, SolType, sol_data};
use thiserror::Error;

use crate::codec::{Action, VenueType};
use crate::venue::abi::{IERC20, IWrappedNative};

/// Sentinel for the chain's native asset at the ends of a route.
pub const NATIVE_ASSET: Address = Address::ZERO;

/// Coin address Curve pools report for the native asset.
pub const CURVE_NATIVE_COIN: Address = address!("0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// Handle for a state checkpoint opened with [`Chain::snapshot`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SnapshotId(pub u64);

/// The execution environment the venues live in.
///
/// Every venue call goes through this trait. Calls are synchronous and a venue may call back into
/// the caller before `call` returns. `snapshot` / `revert_to` / `commit` give the engine an
/// all-or-nothing scope: after `revert_to(id)` no effect since `snapshot()` returned `id` may be
/// observable, and `commit(id)` makes those effects permanent.
pub trait Chain {
    fn native_balance(&self, holder: Address) -> U256;

    /// Read-only call. `Err` carries the venue's revert payload unmodified.
    fn static_call(&self, target: Address, calldata: &[u8]) -> Result<Bytes, Bytes>;

    /// State-changing call sent by `from`. `Err` carries the venue's revert payload unmodified.
    fn call(&mut self, from: Address, call: &VenueCall) -> Result<Bytes, Bytes>;

    fn snapshot(&mut self) -> SnapshotId;

    fn revert_to(&mut self, id: SnapshotId);

    fn commit(&mut self, id: SnapshotId);
}

/// Resolves the fungible share token of a venue.
pub trait ShareAssets {
    /// Returns the share asset registered for `venue`, or `venue` itself.
    fn share_asset(&self, venue: Address) -> Address;
}

/// One externally callable operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VenueCall {
    pub target: Address,
    pub value: U256,
    pub calldata: Bytes,
}

impl VenueCall {
    pub fn new<C: SolCall>(target: Address, call: &C) -> Self {
        Self {
            target,
            value: U256::ZERO,
            calldata: call.abi_encode().into(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Returns the 4-byte function selector, if present.
    pub fn selector(&self) -> Option<[u8; 4]> {
        self.calldata.get(..4).and_then(|s| s.try_into().ok())
    }
}

/// Everything needed to execute one hop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HopPlan {
    /// Asset the hop consumes. Always a token, the wrapped form when the venue takes native value.
    pub asset_in: Address,
    /// Asset whose balance delta is the hop's output.
    pub asset_out: Address,
    pub calls: Vec<VenueCall>,
    /// The venue pays out the native asset; it is measured natively and re-wrapped into `asset_out`.
    pub native_output: bool,
}

impl HopPlan {
    pub fn new(asset_in: Address, asset_out: Address) -> Self {
        Self {
            asset_in,
            asset_out,
            calls: Vec::new(),
            native_output: false,
        }
    }

    pub fn push(&mut self, call: VenueCall) {
        self.calls.push(call);
    }

    pub fn approve(&mut self, token: Address, spender: Address, amount: U256) {
        self.push(VenueCall::new(token, &IERC20::approveCall { spender, amount }));
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VenueError {
    #[error("venue {target} reverted: {payload}")]
    CallReverted { target: Address, payload: Bytes },

    #[error("{venue_type} does not support {action}")]
    UnsupportedAction {
        venue_type: VenueType,
        action: Action,
    },

    #[error("{venue_type} expects {min}..={max} tokens, hint declares {actual}")]
    TokenCountMismatch {
        venue_type: VenueType,
        min: u8,
        max: u8,
        actual: u8,
    },

    #[error("invalid return data from {target}: {reason}")]
    InvalidReturnData { target: Address, reason: String },

    #[error("balance of {asset} decreased during the hop")]
    BalanceDecreased { asset: Address },

    #[error("no router configured for factory {factory} of venue {venue}")]
    UnknownFactory { venue: Address, factory: Address },

    #[error("{venue} cannot take the native asset")]
    NativeCoinUnsupported { venue: Address },
}

/// Issues a read-only call and returns the raw return data.
pub fn view<C: SolCall>(chain: &dyn Chain, target: Address, call: &C) -> Result<Bytes, VenueError> {
    chain
        .static_call(target, &call.abi_encode())
        .map_err(|payload| VenueError::CallReverted { target, payload })
}

/// Issues a read-only call returning a single ABI value.
pub fn view_as<T: SolType, C: SolCall>(
    chain: &dyn Chain,
    target: Address,
    call: &C,
) -> Result<T::RustType, VenueError> {
    let data = view(chain, target, call)?;
    T::abi_decode(&data).map_err(|e| VenueError::InvalidReturnData {
        target,
        reason: e.to_string(),
    })
}

pub fn view_address<C: SolCall>(
    chain: &dyn Chain,
    target: Address,
    call: &C,
) -> Result<Address, VenueError> {
    view_as::<sol_data::Address, C>(chain, target, call)
}

pub fn view_bytes32<C: SolCall>(
    chain: &dyn Chain,
    target: Address,
    call: &C,
) -> Result<B256, VenueError> {
    view_as::<sol_data::FixedBytes<32>, C>(chain, target, call)
}

/// Balance of `asset` held by `holder`; [`NATIVE_ASSET`] reads the native balance.
pub fn balance_of(chain: &dyn Chain, asset: Address, holder: Address) -> Result<U256, VenueError> {
    if asset == NATIVE_ASSET {
        return Ok(chain.native_balance(holder));
    }
    view_as::<sol_data::Uint<256>, _>(chain, asset, &IERC20::balanceOfCall { account: holder })
}

/// Sends a call from `from`, tagging a revert with the call target.
pub fn send(chain: &mut dyn Chain, from: Address, call: &VenueCall) -> Result<Bytes, VenueError> {
    chain
        .call(from, call)
        .map_err(|payload| VenueError::CallReverted {
            target: call.target,
            payload,
        })
}

pub fn wrap_native_call(wrapped_native: Address, amount: U256) -> VenueCall {
    VenueCall::new(wrapped_native, &IWrappedNative::depositCall {}).with_value(amount)
}

pub fn unwrap_native_call(wrapped_native: Address, amount: U256) -> VenueCall {
    VenueCall::new(wrapped_native, &IWrappedNative::withdrawCall { amount })
}

/// True for either spelling of the native asset a venue may report.
#[inline]
pub fn is_native(asset: Address) -> bool {
    asset == NATIVE_ASSET || asset == CURVE_NATIVE_COIN
}
