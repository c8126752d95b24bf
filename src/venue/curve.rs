//! Stable-swap and crypto-swap pool families.
//!
//! The families differ in how a coin is indexed (`int128` for stable pools, `uint256` for crypto
//! pools, underlying indices routed through a deposit zap for factory meta pools) and in the
//! fixed-size amounts array `add_liquidity` takes. A coin reported as the native asset is paid
//! with call value out of unwrapped wrapped-native, and native output is re-wrapped by the caller.

use alloy_primitives::{Address, U256};

use crate::codec::{Action, PoolHint, VenueType};
use crate::venue::abi::{
    ICurveCryptoPool, ICurveMetaZap, ICurveMetaZap3, ICurveMetaZap4, ICurvePool, ICurvePool2,
    ICurvePool3, ICurvePool4,
};
use crate::venue::adapter::{AdapterContext, amounts_at};
use crate::venue::common::{
    Chain, HopPlan, VenueCall, VenueError, is_native, unwrap_native_call, view_address,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Indexing {
    Signed,
    Unsigned,
    /// Index 0 is the meta pool's own coin, `k >= 1` is base pool coin `k - 1`.
    Underlying { base_pool: Address, zap: Address },
}

fn indexing(ctx: &AdapterContext<'_>, venue_type: VenueType) -> Indexing {
    match venue_type {
        VenueType::CryptoPool | VenueType::TriCryptoPool => Indexing::Unsigned,
        VenueType::MetaPoolFactoryUsdUnderlying => Indexing::Underlying {
            base_pool: ctx.venues.curve_usd_base_pool,
            zap: ctx.venues.curve_usd_meta_zap,
        },
        VenueType::UsdMetaPoolFactoryUnderlying => Indexing::Underlying {
            base_pool: ctx.venues.curve_usd2_base_pool,
            zap: ctx.venues.curve_usd2_meta_zap,
        },
        _ => Indexing::Signed,
    }
}

fn coin(
    chain: &dyn Chain,
    pool: Address,
    indexing: Indexing,
    index: u8,
) -> Result<Address, VenueError> {
    match indexing {
        Indexing::Underlying { base_pool, .. } if index > 0 => view_address(
            chain,
            base_pool,
            &ICurvePool::coinsCall {
                i: U256::from(index - 1),
            },
        ),
        _ => view_address(
            chain,
            pool,
            &ICurvePool::coinsCall {
                i: U256::from(index),
            },
        ),
    }
}

/// The asset the account holds for `coin` between hops.
fn held(ctx: &AdapterContext<'_>, coin: Address) -> Address {
    if is_native(coin) {
        ctx.wrapped_native
    } else {
        coin
    }
}

/// Makes `amount` of `coin` available to `spender` and returns the value the call must carry.
fn pay_in(
    plan: &mut HopPlan,
    ctx: &AdapterContext<'_>,
    coin: Address,
    spender: Address,
    amount: U256,
) -> U256 {
    if is_native(coin) {
        plan.push(unwrap_native_call(ctx.wrapped_native, amount));
        amount
    } else {
        plan.approve(coin, spender, amount);
        U256::ZERO
    }
}

pub(crate) fn plan(
    chain: &dyn Chain,
    ctx: &AdapterContext<'_>,
    hint: &PoolHint,
    amount_in: U256,
) -> Result<HopPlan, VenueError> {
    let pool = hint.venue_address();
    let indexing = indexing(ctx, hint.venue_type());

    match hint.action() {
        Action::Swap => plan_swap(chain, ctx, hint, indexing, amount_in),
        Action::AddLiquidity => {
            let coin_in = coin(chain, pool, indexing, hint.input_index())?;
            let share = ctx.shares.share_asset(pool);
            let mut plan = HopPlan::new(held(ctx, coin_in), share);

            let call = match indexing {
                Indexing::Underlying { zap, .. } => {
                    // deposit zaps are not payable
                    if is_native(coin_in) {
                        return Err(VenueError::NativeCoinUnsupported { venue: zap });
                    }
                    pay_in(&mut plan, ctx, coin_in, zap, amount_in);
                    zap_add_liquidity(zap, pool, hint, amount_in)
                }
                _ => {
                    let value = pay_in(&mut plan, ctx, coin_in, pool, amount_in);
                    add_liquidity(pool, hint, amount_in).with_value(value)
                }
            };
            plan.push(call);
            Ok(plan)
        }
        Action::RemoveLiquidity => {
            let coin_out = coin(chain, pool, indexing, hint.output_index())?;
            let share = ctx.shares.share_asset(pool);
            let mut plan = HopPlan::new(share, held(ctx, coin_out));
            plan.native_output = is_native(coin_out);

            let call = match indexing {
                Indexing::Signed => VenueCall::new(
                    pool,
                    &ICurvePool::remove_liquidity_one_coinCall {
                        token_amount: amount_in,
                        i: i128::from(hint.output_index()),
                        min_amount: U256::ZERO,
                    },
                ),
                Indexing::Unsigned => VenueCall::new(
                    pool,
                    &ICurveCryptoPool::remove_liquidity_one_coinCall {
                        token_amount: amount_in,
                        i: U256::from(hint.output_index()),
                        min_amount: U256::ZERO,
                    },
                ),
                Indexing::Underlying { zap, .. } => {
                    plan.approve(share, zap, amount_in);
                    VenueCall::new(
                        zap,
                        &ICurveMetaZap::remove_liquidity_one_coinCall {
                            pool,
                            burn_amount: amount_in,
                            i: i128::from(hint.output_index()),
                            min_amount: U256::ZERO,
                        },
                    )
                }
            };
            plan.push(call);
            Ok(plan)
        }
    }
}

fn plan_swap(
    chain: &dyn Chain,
    ctx: &AdapterContext<'_>,
    hint: &PoolHint,
    indexing: Indexing,
    amount_in: U256,
) -> Result<HopPlan, VenueError> {
    let pool = hint.venue_address();
    let coin_in = coin(chain, pool, indexing, hint.input_index())?;
    let coin_out = coin(chain, pool, indexing, hint.output_index())?;

    let mut plan = HopPlan::new(held(ctx, coin_in), held(ctx, coin_out));
    plan.native_output = is_native(coin_out);
    let value = pay_in(&mut plan, ctx, coin_in, pool, amount_in);

    let (i, j) = (hint.input_index(), hint.output_index());
    let call = match indexing {
        Indexing::Signed => VenueCall::new(
            pool,
            &ICurvePool::exchangeCall {
                i: i128::from(i),
                j: i128::from(j),
                dx: amount_in,
                min_dy: U256::ZERO,
            },
        ),
        Indexing::Unsigned => VenueCall::new(
            pool,
            &ICurveCryptoPool::exchangeCall {
                i: U256::from(i),
                j: U256::from(j),
                dx: amount_in,
                min_dy: U256::ZERO,
            },
        ),
        Indexing::Underlying { .. } => VenueCall::new(
            pool,
            &ICurvePool::exchange_underlyingCall {
                i: i128::from(i),
                j: i128::from(j),
                dx: amount_in,
                min_dy: U256::ZERO,
            },
        ),
    };
    plan.push(call.with_value(value));
    Ok(plan)
}

// token_count is 2..=4 for every hint that reaches here
fn add_liquidity(pool: Address, hint: &PoolHint, amount: U256) -> VenueCall {
    let index = hint.input_index();
    match hint.token_count() {
        2 => VenueCall::new(
            pool,
            &ICurvePool2::add_liquidityCall {
                amounts: amounts_at(index, amount),
                min_mint_amount: U256::ZERO,
            },
        ),
        3 => VenueCall::new(
            pool,
            &ICurvePool3::add_liquidityCall {
                amounts: amounts_at(index, amount),
                min_mint_amount: U256::ZERO,
            },
        ),
        _ => VenueCall::new(
            pool,
            &ICurvePool4::add_liquidityCall {
                amounts: amounts_at(index, amount),
                min_mint_amount: U256::ZERO,
            },
        ),
    }
}

fn zap_add_liquidity(zap: Address, pool: Address, hint: &PoolHint, amount: U256) -> VenueCall {
    let index = hint.input_index();
    match hint.token_count() {
        3 => VenueCall::new(
            zap,
            &ICurveMetaZap3::add_liquidityCall {
                pool,
                deposit_amounts: amounts_at(index, amount),
                min_mint_amount: U256::ZERO,
            },
        ),
        _ => VenueCall::new(
            zap,
            &ICurveMetaZap4::add_liquidityCall {
                pool,
                deposit_amounts: amounts_at(index, amount),
                min_mint_amount: U256::ZERO,
            },
        ),
    }
}
