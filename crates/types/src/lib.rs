pub mod address;
pub mod bytes;
pub mod hash;
pub mod hexutil;
pub mod uint;

pub use address::Address;
pub use bytes::Bytes;
pub use hash::{keccak256, FixedHashExt, H160, H256};
pub use hexutil::{decode_hex, encode_hex, parse_quantity_u64};
pub use uint::{UintExt, U256};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("Odd-length hex string: {0}")]
    OddLength(String),

    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid address checksum")]
    InvalidChecksum,

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Integer overflow: value does not fit in {0} bytes")]
    Overflow(usize),
}

pub type Result<T> = std::result::Result<T, TypesError>;
