use thiserror::Error;

#[derive(Debug, Error)]
pub enum AbiError {
    #[error("Empty type string")]
    EmptyType,

    #[error("Invalid array type: {0}")]
    InvalidArrayType(String),

    #[error("Invalid number in type: {0}")]
    InvalidNumber(String),

    #[error("Invalid fixed bytes size: {0} (must be 1..=32)")]
    InvalidBytesAlignment(usize),

    #[error("Invalid integer bit width: {0} (must be a multiple of 8 in 8..=256)")]
    InvalidBitWidth(usize),

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Tuple parameter `{0}` has no components")]
    MissingComponents(String),

    #[error("Parameter `{0}` is not a tuple but has components")]
    UnexpectedComponents(String),

    #[error("Parameter `{0}` has `indexed`, which is only valid on event parameters")]
    UnexpectedIndexed(String),

    #[error("Event parameter `{0}` is missing `indexed`")]
    MissingIndexed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AbiError>;
