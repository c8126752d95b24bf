use alloy_primitives::{Address, U256};
use tracing::debug;

use crate::codec::{PoolHint, VenueType};
use crate::config::VenueAddresses;
use crate::venue::common::{
    Chain, HopPlan, NATIVE_ASSET, ShareAssets, VenueError, balance_of, send, wrap_native_call,
};
use crate::venue::{balancer, curve, lido, uniswap};

/// What an adapter needs besides the hint itself.
pub struct AdapterContext<'a> {
    /// Holder of the running balance.
    pub account: Address,
    pub wrapped_native: Address,
    pub venues: &'a VenueAddresses,
    pub shares: &'a dyn ShareAssets,
}

/// Builds the calls for one hop.
///
/// Venue state is only read here (token identities, pool ids); nothing is sent.
pub fn plan_hop(
    chain: &dyn Chain,
    ctx: &AdapterContext<'_>,
    hint: &PoolHint,
    amount_in: U256,
) -> Result<HopPlan, VenueError> {
    let arity = hint.venue_type().arity();
    if !arity.contains(&hint.token_count()) {
        return Err(VenueError::TokenCountMismatch {
            venue_type: hint.venue_type(),
            min: *arity.start(),
            max: *arity.end(),
            actual: hint.token_count(),
        });
    }

    match hint.venue_type() {
        VenueType::TwoAssetConstantProduct => uniswap::plan_v2(chain, ctx, hint, amount_in),
        VenueType::ConcentratedLiquidity => uniswap::plan_v3(chain, ctx, hint, amount_in),
        VenueType::WeightedMultiAsset => balancer::plan(chain, ctx, hint, amount_in),
        VenueType::BaseStablePool2
        | VenueType::BaseStablePool3
        | VenueType::CryptoPool
        | VenueType::TriCryptoPool
        | VenueType::EthNativePool
        | VenueType::EthNativePoolFactory
        | VenueType::MetaPoolFactory
        | VenueType::MetaPoolFactoryUsdUnderlying
        | VenueType::PlainPoolFactory
        | VenueType::UsdMetaPoolFactoryUnderlying => curve::plan(chain, ctx, hint, amount_in),
        VenueType::LiquidStakeWrap => lido::plan_wrap(chain, hint, amount_in),
        VenueType::LiquidStakeStake => lido::plan_stake(ctx, hint, amount_in),
    }
}

/// Sends the planned calls and returns the amount of `plan.asset_out` the account gained.
pub fn execute_hop(
    chain: &mut dyn Chain,
    ctx: &AdapterContext<'_>,
    plan: &HopPlan,
) -> Result<U256, VenueError> {
    let measured = if plan.native_output {
        NATIVE_ASSET
    } else {
        plan.asset_out
    };

    let before = balance_of(chain, measured, ctx.account)?;
    for call in &plan.calls {
        send(chain, ctx.account, call)?;
    }
    let after = balance_of(chain, measured, ctx.account)?;

    let amount_out = after
        .checked_sub(before)
        .ok_or(VenueError::BalanceDecreased { asset: measured })?;

    if plan.native_output && !amount_out.is_zero() {
        send(chain, ctx.account, &wrap_native_call(ctx.wrapped_native, amount_out))?;
        debug!(amount = %amount_out, "re-wrapped native venue output");
    }

    Ok(amount_out)
}

/// `[0, .., amount at index, .., 0]`.
pub(crate) fn amounts_at<const N: usize>(index: u8, amount: U256) -> [U256; N] {
    let mut amounts = [U256::ZERO; N];
    amounts[usize::from(index)] = amount;
    amounts
}
