//! Error types for coinflip_view

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a `CoinFlipConfig`
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config parsed but holds unusable values
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// A flip result string that is neither "heads" nor "tails"
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown flip result {0:?}, expected \"heads\" or \"tails\"")]
pub struct ParseFlipResultError(pub String);

/// Result type for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;
