//! Conversion Configuration
//!
//! Limits applied while walking nested values. Loadable from TOML so hosts
//! can keep it next to their own settings:
//!
//! ```toml
//! max_depth = 64
//! detect_cycles = true
//! ```

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default nesting limit for composites
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Settings shared by encode and decode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Composites nested this deep are rendered as text instead of converted
    pub max_depth: usize,

    /// Track tables on the current decode path and stop at self-references
    pub detect_cycles: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            detect_cycles: true,
        }
    }
}

impl ConvertConfig {
    /// Set the nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable cycle detection during decode
    pub fn with_cycle_detection(mut self, enabled: bool) -> Self {
        self.detect_cycles = enabled;
        self
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Self::parse(content, PathBuf::from("<string>"))
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        Self::parse(&content, path.to_path_buf())
    }

    fn parse(content: &str, file: PathBuf) -> ConfigResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|error| ConfigError::TomlParseError { file, error })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_depth".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConvertConfig::default();
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.detect_cycles);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ConvertConfig::from_toml_str("").unwrap();
        assert_eq!(config, ConvertConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = ConvertConfig::from_toml_str("max_depth = 8").unwrap();
        assert_eq!(config.max_depth, 8);
        assert!(config.detect_cycles);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = ConvertConfig::from_toml_str("max_depth = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "max_depth"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ConvertConfig::from_toml_str("max_dept = 3").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParseError { .. }));
    }

    #[test]
    fn test_builders() {
        let config = ConvertConfig::default()
            .with_max_depth(4)
            .with_cycle_detection(false);
        assert_eq!(config.max_depth, 4);
        assert!(!config.detect_cycles);
    }
}
