use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Smallest and largest number of coins a hint may address.
pub const MIN_TOKEN_COUNT: u8 = 2;
pub const MAX_TOKEN_COUNT: u8 = 4;

/// Venue families the router can dispatch to.
///
/// The ordinal is part of the wire format, so variants must never be reordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum VenueType {
    /// Uniswap V2 style pair, reached through its router.
    TwoAssetConstantProduct = 0,
    /// Uniswap V3 style pool, reached through its swap router.
    ConcentratedLiquidity = 1,
    /// Balancer V2 weighted pool, reached through the vault.
    WeightedMultiAsset = 2,
    BaseStablePool2 = 3,
    BaseStablePool3 = 4,
    CryptoPool = 5,
    TriCryptoPool = 6,
    /// Curve pool holding the native asset as coin 0 (legacy, separate LP token).
    EthNativePool = 7,
    /// Factory-deployed Curve pool holding the native asset.
    EthNativePoolFactory = 8,
    MetaPoolFactory = 9,
    /// Factory meta pool traded through its underlying coins (3-asset USD base pool).
    MetaPoolFactoryUsdUnderlying = 10,
    PlainPoolFactory = 11,
    /// Factory meta pool traded through its underlying coins (2-asset USD base pool).
    UsdMetaPoolFactoryUnderlying = 12,
    /// Wrapper between the rebasing liquid-stake token and its wrapped form.
    LiquidStakeWrap = 13,
    /// Staking the native asset into the liquid-stake token.
    LiquidStakeStake = 14,
}

impl VenueType {
    /// Returns the venue type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::TwoAssetConstantProduct => "two-asset-constant-product",
            Self::ConcentratedLiquidity => "concentrated-liquidity",
            Self::WeightedMultiAsset => "weighted-multi-asset",
            Self::BaseStablePool2 => "base-stable-pool-2",
            Self::BaseStablePool3 => "base-stable-pool-3",
            Self::CryptoPool => "crypto-pool",
            Self::TriCryptoPool => "tricrypto-pool",
            Self::EthNativePool => "eth-native-pool",
            Self::EthNativePoolFactory => "eth-native-pool-factory",
            Self::MetaPoolFactory => "meta-pool-factory",
            Self::MetaPoolFactoryUsdUnderlying => "meta-pool-factory-usd-underlying",
            Self::PlainPoolFactory => "plain-pool-factory",
            Self::UsdMetaPoolFactoryUnderlying => "usd-meta-pool-factory-underlying",
            Self::LiquidStakeWrap => "liquid-stake-wrap",
            Self::LiquidStakeStake => "liquid-stake-stake",
        }
    }

    /// Number of coins a hint for this family may declare.
    #[must_use]
    pub fn arity(&self) -> RangeInclusive<u8> {
        match self {
            Self::WeightedMultiAsset | Self::PlainPoolFactory => MIN_TOKEN_COUNT..=MAX_TOKEN_COUNT,
            Self::BaseStablePool3 | Self::TriCryptoPool | Self::UsdMetaPoolFactoryUnderlying => {
                3..=3
            }
            Self::MetaPoolFactoryUsdUnderlying => 4..=4,
            _ => 2..=2,
        }
    }

    /// Returns every venue type in ordinal order.
    #[must_use]
    pub fn all() -> &'static [VenueType] {
        &[
            VenueType::TwoAssetConstantProduct,
            VenueType::ConcentratedLiquidity,
            VenueType::WeightedMultiAsset,
            VenueType::BaseStablePool2,
            VenueType::BaseStablePool3,
            VenueType::CryptoPool,
            VenueType::TriCryptoPool,
            VenueType::EthNativePool,
            VenueType::EthNativePoolFactory,
            VenueType::MetaPoolFactory,
            VenueType::MetaPoolFactoryUsdUnderlying,
            VenueType::PlainPoolFactory,
            VenueType::UsdMetaPoolFactoryUnderlying,
            VenueType::LiquidStakeWrap,
            VenueType::LiquidStakeStake,
        ]
    }
}

impl TryFrom<u8> for VenueType {
    type Error = CodecError;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        Self::all()
            .get(usize::from(ordinal))
            .copied()
            .ok_or(CodecError::UnsupportedVenueType(ordinal))
    }
}

impl fmt::Display for VenueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What a hop does with the venue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Action {
    Swap = 0,
    AddLiquidity = 1,
    RemoveLiquidity = 2,
}

impl TryFrom<u8> for Action {
    type Error = CodecError;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        match ordinal {
            0 => Ok(Action::Swap),
            1 => Ok(Action::AddLiquidity),
            2 => Ok(Action::RemoveLiquidity),
            other => Err(CodecError::MalformedHint(Malformation::Action(other))),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Swap => "swap",
            Action::AddLiquidity => "add-liquidity",
            Action::RemoveLiquidity => "remove-liquidity",
        };
        write!(f, "{name}")
    }
}

/// A single routing instruction.
///
/// Fields are private so every value in circulation satisfies the structural
/// invariants checked by [`PoolHint::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PoolHintFields")]
pub struct PoolHint {
    venue_address: Address,
    venue_type: VenueType,
    token_count: u8,
    input_index: u8,
    output_index: u8,
    action: Action,
}

/// Token count and index checks shared by [`PoolHint::new`] and word decoding.
pub(crate) fn check_layout(
    token_count: u8,
    input_index: u8,
    output_index: u8,
) -> Result<(), Malformation> {
    if !(MIN_TOKEN_COUNT..=MAX_TOKEN_COUNT).contains(&token_count) {
        return Err(Malformation::TokenCount(token_count));
    }
    if input_index >= token_count {
        return Err(Malformation::InputIndex {
            index: input_index,
            token_count,
        });
    }
    if output_index >= token_count {
        return Err(Malformation::OutputIndex {
            index: output_index,
            token_count,
        });
    }
    if input_index == output_index {
        return Err(Malformation::SameIndex(input_index));
    }
    Ok(())
}

impl PoolHint {
    pub fn new(
        venue_address: Address,
        venue_type: VenueType,
        token_count: u8,
        input_index: u8,
        output_index: u8,
        action: Action,
    ) -> Result<Self, CodecError> {
        check_layout(token_count, input_index, output_index).map_err(CodecError::MalformedHint)?;
        Ok(Self {
            venue_address,
            venue_type,
            token_count,
            input_index,
            output_index,
            action,
        })
    }

    #[inline]
    #[must_use]
    pub fn venue_address(&self) -> Address {
        self.venue_address
    }

    #[inline]
    #[must_use]
    pub fn venue_type(&self) -> VenueType {
        self.venue_type
    }

    #[inline]
    #[must_use]
    pub fn token_count(&self) -> u8 {
        self.token_count
    }

    #[inline]
    #[must_use]
    pub fn input_index(&self) -> u8 {
        self.input_index
    }

    #[inline]
    #[must_use]
    pub fn output_index(&self) -> u8 {
        self.output_index
    }

    #[inline]
    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }
}

/// Unchecked mirror of [`PoolHint`] used for deserialization.
#[derive(Deserialize)]
struct PoolHintFields {
    venue_address: Address,
    venue_type: VenueType,
    token_count: u8,
    input_index: u8,
    output_index: u8,
    action: Action,
}

impl TryFrom<PoolHintFields> for PoolHint {
    type Error = CodecError;

    fn try_from(fields: PoolHintFields) -> Result<Self, Self::Error> {
        PoolHint::new(
            fields.venue_address,
            fields.venue_type,
            fields.token_count,
            fields.input_index,
            fields.output_index,
            fields.action,
        )
    }
}

/// Structural violation found in a hint word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Malformation {
    #[error("token count {0} outside [2, 4]")]
    TokenCount(u8),
    #[error("input index {index} >= token count {token_count}")]
    InputIndex { index: u8, token_count: u8 },
    #[error("output index {index} >= token count {token_count}")]
    OutputIndex { index: u8, token_count: u8 },
    #[error("input and output index are both {0}")]
    SameIndex(u8),
    #[error("action ordinal {0} is not defined")]
    Action(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("malformed pool hint: {0}")]
    MalformedHint(Malformation),
    #[error("unsupported venue type ordinal {0}")]
    UnsupportedVenueType(u8),
}
