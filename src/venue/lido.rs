//! Liquid-stake token and its non-rebasing wrapper.
//!
//! Both adapters only mint or redeem, so liquidity actions are their whole surface. The staked
//! token moves shares rather than amounts, which can leave the output a unit or two short.

use alloy_primitives::U256;

use crate::codec::{Action, PoolHint};
use crate::venue::abi::{ILiquidStake, IWrappedLiquidStake};
use crate::venue::adapter::AdapterContext;
use crate::venue::common::{Chain, HopPlan, VenueCall, VenueError, unwrap_native_call, view_address};

fn unsupported(hint: &PoolHint) -> VenueError {
    VenueError::UnsupportedAction {
        venue_type: hint.venue_type(),
        action: hint.action(),
    }
}

/// Wraps (`AddLiquidity`) or unwraps (`RemoveLiquidity`) the staked token at the wrapper venue.
pub(crate) fn plan_wrap(
    chain: &dyn Chain,
    hint: &PoolHint,
    amount_in: U256,
) -> Result<HopPlan, VenueError> {
    let wrapper = hint.venue_address();

    match hint.action() {
        Action::AddLiquidity => {
            let staked = view_address(chain, wrapper, &IWrappedLiquidStake::stETHCall {})?;
            let mut plan = HopPlan::new(staked, wrapper);
            plan.approve(staked, wrapper, amount_in);
            plan.push(VenueCall::new(
                wrapper,
                &IWrappedLiquidStake::wrapCall { amount: amount_in },
            ));
            Ok(plan)
        }
        Action::RemoveLiquidity => {
            let staked = view_address(chain, wrapper, &IWrappedLiquidStake::stETHCall {})?;
            let mut plan = HopPlan::new(wrapper, staked);
            plan.push(VenueCall::new(
                wrapper,
                &IWrappedLiquidStake::unwrapCall { amount: amount_in },
            ));
            Ok(plan)
        }
        Action::Swap => Err(unsupported(hint)),
    }
}

/// Stakes wrapped native into the liquid-stake token at the hint's venue.
pub(crate) fn plan_stake(
    ctx: &AdapterContext<'_>,
    hint: &PoolHint,
    amount_in: U256,
) -> Result<HopPlan, VenueError> {
    if hint.action() != Action::AddLiquidity {
        return Err(unsupported(hint));
    }
    let token = hint.venue_address();

    let mut plan = HopPlan::new(ctx.wrapped_native, token);
    plan.push(unwrap_native_call(ctx.wrapped_native, amount_in));
    plan.push(
        VenueCall::new(
            token,
            &ILiquidStake::submitCall {
                referral: ctx.venues.liquid_stake_referral,
            },
        )
        .with_value(amount_in),
    );
    Ok(plan)
}
