pub mod common;
pub mod slippage;

pub use common::MathError;
pub use slippage::min_output_with_slippage;
