//! Constant-product pairs and concentrated-liquidity pools, both swap-only.
//!
//! Swaps go through the router bound to the hinted pool's factory, with exact input, no price
//! limit and the account as recipient. A router resolves pools from its own factory, so binding by
//! factory makes the hinted pool the one that trades. The minimum output is enforced once for the
//! whole route, so each hop passes zero.

use alloy_primitives::aliases::U160;
use alloy_primitives::{Address, U256};
use alloy_sol_types::sol_data;

use crate::codec::{Action, PoolHint};
use crate::config::{FactoryRouter, VenueAddresses};
use crate::venue::abi::{IUniswapV2Pair, IUniswapV2Router, IUniswapV3Pool, IUniswapV3Router};
use crate::venue::adapter::AdapterContext;
use crate::venue::common::{Chain, HopPlan, VenueCall, VenueError, view_address, view_as};

fn require_swap(hint: &PoolHint) -> Result<(), VenueError> {
    match hint.action() {
        Action::Swap => Ok(()),
        action => Err(VenueError::UnsupportedAction {
            venue_type: hint.venue_type(),
            action,
        }),
    }
}

/// Input and output tokens of a two-token pool.
fn swap_tokens(chain: &dyn Chain, hint: &PoolHint) -> Result<(Address, Address), VenueError> {
    let pool = hint.venue_address();
    // token0/token1 share selectors between the two families
    let tokens = [
        view_address(chain, pool, &IUniswapV2Pair::token0Call {})?,
        view_address(chain, pool, &IUniswapV2Pair::token1Call {})?,
    ];
    let token = |index: u8| {
        tokens
            .get(usize::from(index))
            .copied()
            .ok_or(VenueError::TokenCountMismatch {
                venue_type: hint.venue_type(),
                min: 2,
                max: 2,
                actual: hint.token_count(),
            })
    };
    Ok((token(hint.input_index())?, token(hint.output_index())?))
}

fn factory_router(
    chain: &dyn Chain,
    pool: Address,
    routers: &[FactoryRouter],
) -> Result<Address, VenueError> {
    // factory() shares its selector between the two families
    let factory = view_address(chain, pool, &IUniswapV2Pair::factoryCall {})?;
    VenueAddresses::router_for(routers, factory).ok_or(VenueError::UnknownFactory {
        venue: pool,
        factory,
    })
}

pub(crate) fn plan_v2(
    chain: &dyn Chain,
    ctx: &AdapterContext<'_>,
    hint: &PoolHint,
    amount_in: U256,
) -> Result<HopPlan, VenueError> {
    require_swap(hint)?;
    let (token_in, token_out) = swap_tokens(chain, hint)?;
    let router = factory_router(chain, hint.venue_address(), &ctx.venues.uniswap_v2_routers)?;

    let mut plan = HopPlan::new(token_in, token_out);
    plan.approve(token_in, router, amount_in);
    plan.push(VenueCall::new(
        router,
        &IUniswapV2Router::swapExactTokensForTokensCall {
            amountIn: amount_in,
            amountOutMin: U256::ZERO,
            path: vec![token_in, token_out],
            to: ctx.account,
            deadline: U256::MAX,
        },
    ));
    Ok(plan)
}

pub(crate) fn plan_v3(
    chain: &dyn Chain,
    ctx: &AdapterContext<'_>,
    hint: &PoolHint,
    amount_in: U256,
) -> Result<HopPlan, VenueError> {
    require_swap(hint)?;
    let pool = hint.venue_address();
    let (token_in, token_out) = swap_tokens(chain, hint)?;
    let fee = view_as::<sol_data::Uint<24>, _>(chain, pool, &IUniswapV3Pool::feeCall {})?;
    let router = factory_router(chain, pool, &ctx.venues.uniswap_v3_routers)?;

    let mut plan = HopPlan::new(token_in, token_out);
    plan.approve(token_in, router, amount_in);
    plan.push(VenueCall::new(
        router,
        &IUniswapV3Router::exactInputSingleCall {
            params: IUniswapV3Router::ExactInputSingleParams {
                tokenIn: token_in,
                tokenOut: token_out,
                fee,
                recipient: ctx.account,
                deadline: U256::MAX,
                amountIn: amount_in,
                amountOutMinimum: U256::ZERO,
                sqrtPriceLimitX96: U160::ZERO,
            },
        },
    ));
    Ok(plan)
}
