use alloy_primitives::{U256, U512};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Basis points in one whole.
pub const BPS_DENOMINATOR: u16 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum MathError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("result does not fit in 256 bits")]
    Overflow,
    #[error("tolerance of {0} bps exceeds 10000")]
    ToleranceOutOfRange(u16),
}

/// Calculates (x * y / denominator) with full precision, rounding towards zero.
pub fn mul_div_floor(x: U256, y: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let prod = U512::from(x) * U512::from(y);
    let result = prod / U512::from(denominator);
    if result > U512::from(U256::MAX) {
        return Err(MathError::Overflow);
    }
    Ok(result.to::<U256>())
}
