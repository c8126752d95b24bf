pub mod common;
pub mod hint;

pub use common::{Action, CodecError, Malformation, PoolHint, VenueType};
pub use hint::{decode, encode};
