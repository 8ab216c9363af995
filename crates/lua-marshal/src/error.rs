//! Error types
//!
//! Conversion itself has no type-level failures: unsupported values degrade to
//! text. What remains are failures of the Lua runtime while allocating or
//! iterating, and configuration loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Conversion errors
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Lua runtime error during conversion: {0}")]
    Lua(#[from] mlua::Error),
}

impl From<ConvertError> for mlua::Error {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::Lua(inner) => inner,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Result type for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
