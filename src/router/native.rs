use alloy_primitives::{Address, U256};
use tracing::debug;

use crate::router::common::RouterError;
use crate::venue::common::{send, unwrap_native_call, wrap_native_call};
use crate::venue::{Chain, NATIVE_ASSET};

/// Converts between the native asset and its wrapped form at the two ends of a route.
///
/// Hops only ever see the wrapped form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeBoundary {
    wrapped: Address,
}

impl NativeBoundary {
    pub fn new(wrapped: Address) -> Self {
        Self { wrapped }
    }

    #[inline]
    pub fn wrapped(&self) -> Address {
        self.wrapped
    }

    /// The asset a route endpoint is held in while hops run.
    #[inline]
    pub fn normalize(&self, asset: Address) -> Address {
        if asset == NATIVE_ASSET {
            self.wrapped
        } else {
            asset
        }
    }

    /// Wraps `amount` when `asset` is native; returns the held asset and amount.
    pub fn wrap_if_native(
        &self,
        chain: &mut dyn Chain,
        account: Address,
        asset: Address,
        amount: U256,
    ) -> Result<(Address, U256), RouterError> {
        if asset != NATIVE_ASSET {
            return Ok((asset, amount));
        }
        send(chain, account, &wrap_native_call(self.wrapped, amount))?;
        debug!(%amount, "wrapped native input");
        Ok((self.wrapped, amount))
    }

    /// Unwraps `amount` of `held`, which must be the wrapped native asset. Exact 1:1.
    pub fn unwrap_native(
        &self,
        chain: &mut dyn Chain,
        account: Address,
        held: Address,
        amount: U256,
    ) -> Result<U256, RouterError> {
        if held != self.wrapped {
            return Err(RouterError::WrapMismatch { asset: held });
        }
        send(chain, account, &unwrap_native_call(self.wrapped, amount))?;
        debug!(%amount, "unwrapped native output");
        Ok(amount)
    }

    /// Unwraps the final balance when `destination` is native, otherwise passes it through.
    pub fn unwrap_if_native(
        &self,
        chain: &mut dyn Chain,
        account: Address,
        destination: Address,
        held: Address,
        amount: U256,
    ) -> Result<U256, RouterError> {
        if destination == NATIVE_ASSET {
            self.unwrap_native(chain, account, held, amount)
        } else {
            Ok(amount)
        }
    }
}
