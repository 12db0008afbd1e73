/// Error type for [`crate::config`] module. Captures errors related to loading
/// configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error loading from environment variable
    #[error("missing or non-unicode environment variable: {0}")]
    Var(String),
    /// Error parsing environment variable
    #[error("failed to parse environment variable: {0}")]
    Parse(#[from] std::num::ParseIntError),
    /// Error parsing hex from environment variable
    #[error("failed to parse hex: {0}")]
    Hex(#[from] hex::FromHexError),
    /// The signer key could not be parsed.
    #[error("invalid signer key: {0}")]
    Key(#[from] alloy::signers::local::LocalSignerError),
    /// A percentage outside `0..=100`.
    #[error("{key} must be a percentage between 0 and 100, got {value}")]
    Percent {
        /// The environment variable.
        key: &'static str,
        /// The value found.
        value: u64,
    },
    /// No relay endpoint is known for the chain, and none was configured.
    #[error(transparent)]
    UnknownChain(#[from] oval_constants::ParseChainError),
}

impl ConfigError {
    /// Missing or non-unicode env var.
    pub fn missing(s: &str) -> Self {
        ConfigError::Var(s.to_string())
    }
}
