//! Configuration management for tabprep.
//!
//! [`PreprocessorConfig`] carries the split parameters and the imputation
//! policies. It can be built in code through [`ConfigBuilder`], read from a
//! JSON or TOML file, or overridden from `TABPREP_*` environment variables.

pub mod core;
pub mod strategy;

// Re-export commonly used configuration types
pub use self::core::{ConfigBuilder, PreprocessorConfig};
pub use strategy::{CategoricalImputation, ImputationStrategy, UnknownCategoryPolicy};

use crate::core::error::{Result, TabprepError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "tabprep.toml";

/// On-disk configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigFormat {
    /// TOML configuration format
    Toml,
    /// JSON configuration format
    Json,
}

impl Default for ConfigFormat {
    fn default() -> Self {
        ConfigFormat::Toml
    }
}

impl ConfigFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => Err(TabprepError::config(format!(
                "Unsupported config file format for {}. Use .json or .toml",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")).unwrap(), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")).unwrap(), ConfigFormat::Toml);
        assert!(ConfigFormat::from_path(Path::new("a.ini")).is_err());
        assert!(ConfigFormat::from_path(Path::new("noext")).is_err());
    }
}
