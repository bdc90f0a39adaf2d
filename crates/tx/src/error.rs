use ethwire_rlp::RlpError;
use ethwire_types::TypesError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxError {
    #[error("Invalid transaction type: expected {expected}, found {found}")]
    InvalidTransactionType { expected: u8, found: u8 },

    #[error("Unsupported transaction type: {0}")]
    UnsupportedTransactionType(u8),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    #[error("Invalid hex data: {0}")]
    InvalidHex(TypesError),

    #[error("Invalid quantity for {field}: {source}")]
    InvalidQuantity {
        field: &'static str,
        source: TypesError,
    },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {field} is not valid for type {tx_type} transactions")]
    UnexpectedField { field: &'static str, tx_type: u8 },

    #[error("Empty transaction payload")]
    EmptyPayload,

    #[error("RLP error: {0}")]
    Rlp(#[from] RlpError),
}

pub type Result<T> = std::result::Result<T, TxError>;
