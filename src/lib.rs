// Core modules
pub mod config;

// Re-export commonly used types
pub use config::{Config, LogConfig, ParserConfig};

// Re-export crate modules
pub use ethwire_abi as abi;
pub use ethwire_rlp as rlp;
pub use ethwire_tx as tx;
pub use ethwire_types as types;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get client version string
pub fn client_version() -> String {
    format!("ethwire/v{}/rust", VERSION)
}
