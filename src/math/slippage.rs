use alloy_primitives::U256;

use crate::math::common::{BPS_DENOMINATOR, MathError, mul_div_floor};

/// Returns the smallest acceptable output for `quoted` when `tolerance_bps` of it may be lost,
/// rounding down.
///
/// The result is meant for [`ConversionRequest::with_min_output`](crate::router::ConversionRequest::with_min_output).
pub fn min_output_with_slippage(quoted: U256, tolerance_bps: u16) -> Result<U256, MathError> {
    if tolerance_bps > BPS_DENOMINATOR {
        return Err(MathError::ToleranceOutOfRange(tolerance_bps));
    }
    mul_div_floor(
        quoted,
        U256::from(BPS_DENOMINATOR - tolerance_bps),
        U256::from(BPS_DENOMINATOR),
    )
}
