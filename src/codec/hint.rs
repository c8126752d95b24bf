use alloy_primitives::{Address, B256, U256};

use crate::codec::common::{Action, CodecError, PoolHint, VenueType, check_layout};
#[cfg(target_arch = "wasm32")]
use serde_wasm_bindgen::{Error, from_value, to_value};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// Word layout, least-significant bit first:
// [0, 160) venue address | [160, 168) venue type | [168, 171) token count |
// [171, 174) input index | [174, 177) output index | [177, 179) action
const VENUE_TYPE_OFFSET: usize = 160;
const TOKEN_COUNT_OFFSET: usize = 168;
const INPUT_INDEX_OFFSET: usize = 171;
const OUTPUT_INDEX_OFFSET: usize = 174;
const ACTION_OFFSET: usize = 177;

const VENUE_TYPE_BITS: usize = 8;
const INDEX_BITS: usize = 3;
const ACTION_BITS: usize = 2;

/// Packs a hint into its instruction word.
pub fn encode(hint: &PoolHint) -> U256 {
    U256::from_be_slice(hint.venue_address().as_slice())
        | U256::from(hint.venue_type() as u8) << VENUE_TYPE_OFFSET
        | U256::from(hint.token_count()) << TOKEN_COUNT_OFFSET
        | U256::from(hint.input_index()) << INPUT_INDEX_OFFSET
        | U256::from(hint.output_index()) << OUTPUT_INDEX_OFFSET
        | U256::from(hint.action() as u8) << ACTION_OFFSET
}

/// Unpacks an instruction word.
///
/// Only the structure is checked here; whether the venue exists is discovered when the hop runs.
/// The layout and action are checked before the venue type, so a malformed word is always
/// `MalformedHint` whatever its venue ordinal. Bits above the action field are ignored.
pub fn decode(word: U256) -> Result<PoolHint, CodecError> {
    let token_count = field(word, TOKEN_COUNT_OFFSET, INDEX_BITS);
    let input_index = field(word, INPUT_INDEX_OFFSET, INDEX_BITS);
    let output_index = field(word, OUTPUT_INDEX_OFFSET, INDEX_BITS);
    check_layout(token_count, input_index, output_index).map_err(CodecError::MalformedHint)?;
    let action = Action::try_from(field(word, ACTION_OFFSET, ACTION_BITS))?;
    let venue_type = VenueType::try_from(field(word, VENUE_TYPE_OFFSET, VENUE_TYPE_BITS))?;

    let venue_address = Address::from_word(B256::from(word.to_be_bytes::<32>()));
    PoolHint::new(
        venue_address,
        venue_type,
        token_count,
        input_index,
        output_index,
        action,
    )
}

/// Extracts `width` bits starting at `offset`. `width` never exceeds 8.
fn field(word: U256, offset: usize, width: usize) -> u8 {
    let mask = U256::from((1u16 << width) - 1);
    ((word >> offset) & mask).to::<u8>()
}


// WASM wrapper functions
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn wasm_encode_pool_hint(hint: JsValue) -> Result<JsValue, Error> {
    let hint: PoolHint = from_value(hint)?;
    to_value(&encode(&hint))
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn wasm_decode_pool_hint(word: JsValue) -> Result<JsValue, Error> {
    let word: U256 = from_value(word)?;
    let hint = decode(word).map_err(|e| Error::new(e.to_string()))?;
    to_value(&hint)
}
