use ethwire_types::TypesError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RlpError {
    #[error("Decoder error: {0}")]
    Decoder(#[from] DecoderError),

    #[error("Invalid value: {0}")]
    Types(#[from] TypesError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecoderError {
    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Invalid RLP data: {0}")]
    InvalidData(String),

    #[error("Integer overflow")]
    IntegerOverflow,

    #[error("Leading zeros in integer")]
    LeadingZeros,

    #[error("Non-canonical size prefix")]
    NonCanonicalSize,

    #[error("Expected a byte string, got a list")]
    UnexpectedList,

    #[error("Expected a list, got a byte string")]
    UnexpectedString,

    #[error("Lists nested deeper than {0} levels")]
    TooDeep(usize),

    #[error("{0} trailing bytes after RLP item")]
    TrailingBytes(usize),
}
