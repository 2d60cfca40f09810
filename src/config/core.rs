//! Preprocessor configuration and its builder.
//!
//! Every tunable of the pipeline lives here and is passed explicitly to the
//! operations that need it; there are no process-wide settings.

use super::strategy::{CategoricalImputation, ImputationStrategy, UnknownCategoryPolicy};
use super::ConfigFormat;
use crate::core::constants::*;
use crate::core::error::{Result, TabprepError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`PreprocessorConfig::test_fraction`]
pub const ENV_TEST_FRACTION: &str = "TABPREP_TEST_FRACTION";
/// Environment variable overriding [`PreprocessorConfig::seed`]
pub const ENV_SEED: &str = "TABPREP_SEED";
/// Environment variable overriding [`PreprocessorConfig::numerical_imputation`]
pub const ENV_NUMERICAL_IMPUTATION: &str = "TABPREP_NUMERICAL_IMPUTATION";

/// Configuration for splitting and preprocessing a tabular dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessorConfig {
    /// Fraction of rows placed in the test partition, in (0, 1)
    pub test_fraction: f64,
    /// Seed of the split permutation
    pub seed: u64,
    /// Imputation strategy for numerical columns
    pub numerical_imputation: ImputationStrategy,
    /// Imputation strategy for categorical columns
    pub categorical_imputation: CategoricalImputation,
    /// Handling of categories unseen at fit time
    pub unknown_category_policy: UnknownCategoryPolicy,
    /// Columns emitted unchanged, never fitted
    pub passthrough_columns: Vec<String>,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        PreprocessorConfig {
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_RANDOM_SEED,
            numerical_imputation: ImputationStrategy::default(),
            categorical_imputation: CategoricalImputation::default(),
            unknown_category_policy: UnknownCategoryPolicy::default(),
            passthrough_columns: Vec::new(),
        }
    }
}

impl PreprocessorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        validate_test_fraction(self.test_fraction)
    }

    /// Whether `column` was declared as passthrough
    pub fn is_passthrough(&self, column: &str) -> bool {
        self.passthrough_columns.iter().any(|c| c == column)
    }

    /// Load configuration from a `.json` or `.toml` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            TabprepError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let parsed: std::result::Result<PreprocessorConfig, String> = match format {
            ConfigFormat::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::from_str(&content).map_err(|e| e.to_string()),
        };
        let config = parsed.map_err(|e| {
            TabprepError::config(format!("Invalid config file {}: {}", path.display(), e))
        })?;

        config.validate()?;
        log::debug!("Loaded preprocessor config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a `.json` or `.toml` file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn load_from_environment() -> Result<Self> {
        let mut config = PreprocessorConfig::default();
        config.apply_environment_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides to an existing configuration
    pub fn apply_environment_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var(ENV_TEST_FRACTION) {
            self.test_fraction = val.trim().parse().map_err(|_| {
                TabprepError::invalid_parameter(ENV_TEST_FRACTION, val.clone(), "not a number")
            })?;
        }

        if let Ok(val) = std::env::var(ENV_SEED) {
            self.seed = val.trim().parse().map_err(|_| {
                TabprepError::invalid_parameter(ENV_SEED, val.clone(), "not an unsigned integer")
            })?;
        }

        if let Ok(val) = std::env::var(ENV_NUMERICAL_IMPUTATION) {
            self.numerical_imputation = val.parse()?;
        }

        self.validate()
    }
}

fn validate_test_fraction(test_fraction: f64) -> Result<()> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(TabprepError::invalid_parameter(
            "test_fraction",
            test_fraction.to_string(),
            "must be in range (0.0, 1.0)",
        ));
    }
    Ok(())
}

/// Builder for [`PreprocessorConfig`].
///
/// Invalid values are collected and reported together by [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: PreprocessorConfig,
    validation_errors: Vec<String>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        ConfigBuilder {
            config: PreprocessorConfig::default(),
            validation_errors: Vec::new(),
        }
    }

    /// Set the test fraction
    pub fn test_fraction(mut self, fraction: f64) -> Self {
        if validate_test_fraction(fraction).is_err() {
            self.validation_errors
                .push(format!("test_fraction must be in range (0.0, 1.0), got {}", fraction));
        }
        self.config.test_fraction = fraction;
        self
    }

    /// Set the split seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the numerical imputation strategy
    pub fn numerical_imputation(mut self, strategy: ImputationStrategy) -> Self {
        self.config.numerical_imputation = strategy;
        self
    }

    /// Set the numerical imputation strategy by name
    pub fn numerical_imputation_name(mut self, name: &str) -> Self {
        match name.parse() {
            Ok(strategy) => self.config.numerical_imputation = strategy,
            Err(e) => self.validation_errors.push(e.to_string()),
        }
        self
    }

    /// Declare a column that is emitted unchanged
    pub fn passthrough_column<S: Into<String>>(mut self, column: S) -> Self {
        self.config.passthrough_columns.push(column.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<PreprocessorConfig> {
        if !self.validation_errors.is_empty() {
            return Err(TabprepError::config(format!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            )));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
