use alloy_primitives::U256;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

use crate::codec;
use crate::config::{ConfigError, RouterConfig};
use crate::router::common::{
    ConversionReceipt, ConversionRequest, HopReceipt, Route, RouterError,
};
use crate::router::native::NativeBoundary;
use crate::router::registry::RouteRegistry;
use crate::venue::{AdapterContext, Chain, execute_hop, plan_hop};

/// Runs routes hop by hop for one router account.
///
/// A conversion either completes or leaves no effect: every state change happens inside a chain
/// snapshot that is reverted on any error. Conversions on one engine never nest.
#[derive(Debug)]
pub struct ConversionEngine {
    config: RouterConfig,
    registry: Arc<RouteRegistry>,
    boundary: NativeBoundary,
    in_flight: AtomicBool,
}

/// Holds the engine's in-flight flag until dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn enter(flag: &'a AtomicBool) -> Result<Self, RouterError> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| RouterError::Reentrancy)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ConversionEngine {
    pub fn new(config: RouterConfig, registry: Arc<RouteRegistry>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            boundary: NativeBoundary::new(config.wrapped_native),
            config,
            registry,
            in_flight: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<RouteRegistry> {
        &self.registry
    }

    /// Converts `request.input_amount` of the input asset and returns the output amount.
    pub fn convert(
        &self,
        chain: &mut dyn Chain,
        request: &ConversionRequest,
    ) -> Result<U256, RouterError> {
        self.convert_with_receipt(chain, request)
            .map(|receipt| receipt.amount_out)
    }

    /// Like [`convert`](Self::convert), also reporting what each hop produced.
    pub fn convert_with_receipt(
        &self,
        chain: &mut dyn Chain,
        request: &ConversionRequest,
    ) -> Result<ConversionReceipt, RouterError> {
        let _in_flight = InFlight::enter(&self.in_flight)?;

        if request.input_amount.is_zero() {
            return Err(RouterError::ZeroInputAmount);
        }

        let resolved;
        let route: &Route = match &request.route {
            Some(route) => route,
            None => {
                resolved = self.registry.resolve(
                    self.boundary.normalize(request.input_asset),
                    self.boundary.normalize(request.output_asset),
                )?;
                &resolved
            }
        };
        if route.is_empty() {
            return Err(RouterError::EmptyRoute);
        }

        let snapshot = chain.snapshot();
        match self.execute(chain, request, route) {
            Ok(receipt) => {
                chain.commit(snapshot);
                info!(
                    input_asset = %request.input_asset,
                    output_asset = %request.output_asset,
                    amount_in = %request.input_amount,
                    amount_out = %receipt.amount_out,
                    hops = route.len(),
                    "conversion completed"
                );
                Ok(receipt)
            }
            Err(error) => {
                chain.revert_to(snapshot);
                warn!(
                    input_asset = %request.input_asset,
                    output_asset = %request.output_asset,
                    %error,
                    "conversion rolled back"
                );
                Err(error)
            }
        }
    }

    fn execute(
        &self,
        chain: &mut dyn Chain,
        request: &ConversionRequest,
        route: &Route,
    ) -> Result<ConversionReceipt, RouterError> {
        let account = self.config.account;
        let ctx = AdapterContext {
            account,
            wrapped_native: self.boundary.wrapped(),
            venues: &self.config.venues,
            shares: self.registry.as_ref(),
        };

        let (mut held, mut running) = self.boundary.wrap_if_native(
            chain,
            account,
            request.input_asset,
            request.input_amount,
        )?;
        let mut hops = Vec::with_capacity(route.len());

        for (index, word) in route.hops().iter().enumerate() {
            let hint = codec::decode(*word)?;
            let plan = plan_hop(&*chain, &ctx, &hint, running)?;
            if self.config.strict_contiguity && plan.asset_in != held {
                return Err(RouterError::RouteDiscontinuity {
                    hop: index,
                    expected: plan.asset_in,
                    found: held,
                });
            }

            running = execute_hop(chain, &ctx, &plan)?;
            held = plan.asset_out;
            debug!(
                hop = index,
                venue = %hint.venue_address(),
                venue_type = %hint.venue_type(),
                action = %hint.action(),
                asset_out = %held,
                amount_out = %running,
                "hop executed"
            );
            hops.push(HopReceipt {
                venue: hint.venue_address(),
                venue_type: hint.venue_type(),
                asset_out: held,
                amount_out: running,
            });
        }

        let destination = self.boundary.normalize(request.output_asset);
        if self.config.strict_contiguity && held != destination {
            return Err(RouterError::RouteDiscontinuity {
                hop: route.len(),
                expected: destination,
                found: held,
            });
        }

        let amount_out =
            self.boundary
                .unwrap_if_native(chain, account, request.output_asset, held, running)?;
        if amount_out < request.min_output {
            return Err(RouterError::InsufficientOutput {
                minimum: request.min_output,
                actual: amount_out,
            });
        }

        Ok(ConversionReceipt { amount_out, hops })
    }
}
