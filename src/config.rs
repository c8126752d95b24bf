//! Router configuration.
//!
//! Addresses of the shared venue entry points (routers, vault, deposit zaps) and of the wrapped
//! native asset are not part of a pool hint, so they live here. Everything except `account` has
//! an Ethereum mainnet default; a JSON document only needs to override what differs.
//!
//! ```ignore
//! let config = RouterConfig::from_json_str(r#"{ "account": "0x…", "strict_contiguity": true }"#)?;
//! ```

use alloy_primitives::{Address, address};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Account that holds the input and receives every hop's output.
    pub account: Address,

    /// Fungible form of the native asset.
    #[serde(default = "default_wrapped_native")]
    pub wrapped_native: Address,

    /// Fail a conversion when a hop's input asset is not the asset the previous hop produced.
    #[serde(default)]
    pub strict_contiguity: bool,

    #[serde(default)]
    pub venues: VenueAddresses,
}

/// Router that trades the pools deployed by `factory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryRouter {
    pub factory: Address,
    pub router: Address,
}

impl FactoryRouter {
    pub const fn new(factory: Address, router: Address) -> Self {
        Self { factory, router }
    }
}

/// Shared entry points of the venue families that are not reached through the pool itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueAddresses {
    /// Constant-product routers keyed by the factory of the pairs they trade. A pair from a
    /// factory missing here cannot be swapped.
    pub uniswap_v2_routers: Vec<FactoryRouter>,
    /// Concentrated-liquidity routers keyed by pool factory.
    pub uniswap_v3_routers: Vec<FactoryRouter>,
    pub balancer_vault: Address,
    /// 3-asset USD base pool and the deposit zap for its factory meta pools.
    pub curve_usd_base_pool: Address,
    pub curve_usd_meta_zap: Address,
    /// 2-asset USD base pool and the deposit zap for its factory meta pools.
    pub curve_usd2_base_pool: Address,
    pub curve_usd2_meta_zap: Address,
    /// Referral passed when staking into the liquid-stake token.
    pub liquid_stake_referral: Address,
}

impl Default for VenueAddresses {
    fn default() -> Self {
        Self {
            uniswap_v2_routers: vec![
                // Uniswap V2
                FactoryRouter::new(
                    address!("0x5c69bee701ef814a2b6a3edd4b1652cb9cc5aa6f"),
                    address!("0x7a250d5630b4cf539739df2c5dacb4c659f2488d"),
                ),
                // SushiSwap
                FactoryRouter::new(
                    address!("0xc0aee478e3658e2610c5f7a4a2e1777ce9e4f2ac"),
                    address!("0xd9e1ce17f2641f24ae83637ab66a2cca9c378b9f"),
                ),
            ],
            uniswap_v3_routers: vec![FactoryRouter::new(
                address!("0x1f98431c8ad98523631ae4a59f267346ea31f984"),
                address!("0xe592427a0aece92de3edee1f18e0157c05861564"),
            )],
            balancer_vault: address!("0xBA12222222228d8Ba445958a75a0704d566BF2C8"),
            curve_usd_base_pool: address!("0xbEbc44782C7dB0a1A60Cb6fe97d0b483032FF1C7"),
            curve_usd_meta_zap: address!("0xA79828DF1850E8a3A3064576f380D90aECDD3359"),
            curve_usd2_base_pool: address!("0xDcEF968d416a41Cdac0ED8702fAC8128A64241A2"),
            curve_usd2_meta_zap: address!("0x08780fb7E580e492c1935bEe4fA5920b94AA95Da"),
            liquid_stake_referral: Address::ZERO,
        }
    }
}

fn default_wrapped_native() -> Address {
    address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2")
}

impl VenueAddresses {
    /// Router bound to `factory` in `routers`.
    pub fn router_for(routers: &[FactoryRouter], factory: Address) -> Option<Address> {
        routers
            .iter()
            .find(|binding| binding.factory == factory)
            .map(|binding| binding.router)
    }
}

impl RouterConfig {
    /// Creates a configuration with mainnet defaults for `account`.
    #[must_use]
    pub fn new(account: Address) -> Self {
        Self {
            account,
            wrapped_native: default_wrapped_native(),
            strict_contiguity: false,
            venues: VenueAddresses::default(),
        }
    }

    #[must_use]
    pub fn with_wrapped_native(mut self, wrapped_native: Address) -> Self {
        self.wrapped_native = wrapped_native;
        self
    }

    #[must_use]
    pub fn with_strict_contiguity(mut self, strict: bool) -> Self {
        self.strict_contiguity = strict;
        self
    }

    #[must_use]
    pub fn with_venues(mut self, venues: VenueAddresses) -> Self {
        self.venues = venues;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.account.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "account",
                message: "must not be the zero address",
            });
        }
        if self.wrapped_native.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "wrapped_native",
                message: "the zero address is reserved for the native asset",
            });
        }
        for (field, routers) in [
            ("venues.uniswap_v2_routers", &self.venues.uniswap_v2_routers),
            ("venues.uniswap_v3_routers", &self.venues.uniswap_v3_routers),
        ] {
            let mut factories: Vec<Address> =
                routers.iter().map(|binding| binding.factory).collect();
            factories.sort_unstable();
            if factories.windows(2).any(|pair| pair[0] == pair[1]) {
                return Err(ConfigError::InvalidValue {
                    field,
                    message: "a factory is bound to more than one router",
                });
            }
        }
        Ok(())
    }
}
