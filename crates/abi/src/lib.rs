//! Solidity ABI type model.
//!
//! [`ParamType`] is the recursive type tree parsed from canonical strings
//! like `int24[5][]`; [`AbiParameter`] and [`AbiEventParameter`] are the
//! named, JSON-shaped parameters that carry tuple `components`.

pub mod error;
pub mod param;
pub mod param_type;

pub use error::{AbiError, Result};
pub use param::{signature, AbiEventParameter, AbiParameter, Parameter};
pub use param_type::{ParamType, ParserOptions};

/// Parses a canonical type string with the strict parser.
pub fn parse(signature: &str) -> Result<ParamType> {
    ParamType::parse(signature)
}
