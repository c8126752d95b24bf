//! Weighted multi-asset pools reached through the shared vault.

use alloy_primitives::{Address, B256, Bytes, U256};
use alloy_sol_types::{SolCall, SolValue};

use crate::codec::{Action, PoolHint};
use crate::venue::abi::{IBalancerPool, IBalancerVault};
use crate::venue::adapter::AdapterContext;
use crate::venue::common::{Chain, HopPlan, VenueCall, VenueError, view, view_bytes32};

/// `JoinKind.EXACT_TOKENS_IN_FOR_BPT_OUT`
const JOIN_EXACT_TOKENS_IN: u8 = 1;
/// `ExitKind.EXACT_BPT_IN_FOR_ONE_TOKEN_OUT`
const EXIT_EXACT_BPT_IN_FOR_ONE_TOKEN_OUT: u8 = 0;

struct PoolTokens {
    id: B256,
    tokens: Vec<Address>,
}

fn pool_tokens(
    chain: &dyn Chain,
    ctx: &AdapterContext<'_>,
    hint: &PoolHint,
) -> Result<PoolTokens, VenueError> {
    let vault = ctx.venues.balancer_vault;
    let id = view_bytes32(chain, hint.venue_address(), &IBalancerPool::getPoolIdCall {})?;
    let data = view(chain, vault, &IBalancerVault::getPoolTokensCall { poolId: id })?;
    let tokens = IBalancerVault::getPoolTokensCall::abi_decode_returns(&data)
        .map_err(|e| VenueError::InvalidReturnData {
            target: vault,
            reason: e.to_string(),
        })?
        .tokens;

    if tokens.len() != usize::from(hint.token_count()) {
        let pool_count = u8::try_from(tokens.len()).unwrap_or(u8::MAX);
        return Err(VenueError::TokenCountMismatch {
            venue_type: hint.venue_type(),
            min: pool_count,
            max: pool_count,
            actual: hint.token_count(),
        });
    }
    Ok(PoolTokens { id, tokens })
}

fn amounts_vec(len: usize, index: u8, amount: U256) -> Vec<U256> {
    let mut amounts = vec![U256::ZERO; len];
    amounts[usize::from(index)] = amount;
    amounts
}

pub(crate) fn plan(
    chain: &dyn Chain,
    ctx: &AdapterContext<'_>,
    hint: &PoolHint,
    amount_in: U256,
) -> Result<HopPlan, VenueError> {
    let PoolTokens { id, tokens } = pool_tokens(chain, ctx, hint)?;
    let vault = ctx.venues.balancer_vault;
    let input = usize::from(hint.input_index());
    let output = usize::from(hint.output_index());

    match hint.action() {
        Action::Swap => {
            let mut plan = HopPlan::new(tokens[input], tokens[output]);
            plan.approve(tokens[input], vault, amount_in);
            plan.push(VenueCall::new(
                vault,
                &IBalancerVault::swapCall {
                    singleSwap: IBalancerVault::SingleSwap {
                        poolId: id,
                        kind: IBalancerVault::SwapKind::GIVEN_IN,
                        assetIn: tokens[input],
                        assetOut: tokens[output],
                        amount: amount_in,
                        userData: Bytes::new(),
                    },
                    funds: IBalancerVault::FundManagement {
                        sender: ctx.account,
                        fromInternalBalance: false,
                        recipient: ctx.account,
                        toInternalBalance: false,
                    },
                    limit: U256::ZERO,
                    deadline: U256::MAX,
                },
            ));
            Ok(plan)
        }
        Action::AddLiquidity => {
            let share = ctx.shares.share_asset(hint.venue_address());
            let amounts = amounts_vec(tokens.len(), hint.input_index(), amount_in);
            let user_data = (U256::from(JOIN_EXACT_TOKENS_IN), amounts.clone(), U256::ZERO)
                .abi_encode_params();

            let mut plan = HopPlan::new(tokens[input], share);
            plan.approve(tokens[input], vault, amount_in);
            plan.push(VenueCall::new(
                vault,
                &IBalancerVault::joinPoolCall {
                    poolId: id,
                    sender: ctx.account,
                    recipient: ctx.account,
                    request: IBalancerVault::JoinPoolRequest {
                        assets: tokens,
                        maxAmountsIn: amounts,
                        userData: user_data.into(),
                        fromInternalBalance: false,
                    },
                },
            ));
            Ok(plan)
        }
        Action::RemoveLiquidity => {
            let share = ctx.shares.share_asset(hint.venue_address());
            let user_data = (
                U256::from(EXIT_EXACT_BPT_IN_FOR_ONE_TOKEN_OUT),
                amount_in,
                U256::from(hint.output_index()),
            )
                .abi_encode_params();

            let mut plan = HopPlan::new(share, tokens[output]);
            plan.push(VenueCall::new(
                vault,
                &IBalancerVault::exitPoolCall {
                    poolId: id,
                    sender: ctx.account,
                    recipient: ctx.account,
                    request: IBalancerVault::ExitPoolRequest {
                        minAmountsOut: vec![U256::ZERO; tokens.len()],
                        assets: tokens,
                        userData: user_data.into(),
                        toInternalBalance: false,
                    },
                },
            ));
            Ok(plan)
        }
    }
}
