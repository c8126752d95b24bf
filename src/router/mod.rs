pub mod common;
pub mod engine;
pub mod native;
pub mod registry;

pub use common::{ConversionReceipt, ConversionRequest, HopReceipt, Route, RouterError};
pub use engine::ConversionEngine;
pub use native::NativeBoundary;
pub use registry::{RegistryError, RouteRegistry};
