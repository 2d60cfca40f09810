//! Strategy enumerations for imputation and unknown-category handling.

use crate::core::error::{Result, TabprepError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Imputation strategy for numerical columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputationStrategy {
    /// Fill with the arithmetic mean of the non-missing training values
    Mean,
    /// Fill with the median of the non-missing training values
    Median,
    /// Fill with the most frequent non-missing training value
    MostFrequent,
}

impl Default for ImputationStrategy {
    fn default() -> Self {
        ImputationStrategy::Mean
    }
}

impl ImputationStrategy {
    /// Canonical strategy name
    pub fn as_str(&self) -> &'static str {
        match self {
            ImputationStrategy::Mean => "mean",
            ImputationStrategy::Median => "median",
            ImputationStrategy::MostFrequent => "most_frequent",
        }
    }
}

impl fmt::Display for ImputationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImputationStrategy {
    type Err = TabprepError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" => Ok(ImputationStrategy::Mean),
            "median" => Ok(ImputationStrategy::Median),
            "most_frequent" | "mode" => Ok(ImputationStrategy::MostFrequent),
            _ => Err(crate::config_error!(
                "unsupported numerical imputation strategy '{}'; expected one of mean, median, most_frequent",
                s
            )),
        }
    }
}

/// Imputation strategy for categorical columns. Only the mode is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalImputation {
    /// Fill with the most frequent non-missing training category
    #[default]
    MostFrequent,
}

impl FromStr for CategoricalImputation {
    type Err = TabprepError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "most_frequent" | "mode" => Ok(CategoricalImputation::MostFrequent),
            _ => Err(TabprepError::config(format!(
                "unsupported categorical imputation strategy '{}'; only most_frequent is available",
                s
            ))),
        }
    }
}

/// What to emit for a category that was not seen during fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCategoryPolicy {
    /// All-zero indicator block, no error
    #[default]
    Ignore,
}

impl FromStr for UnknownCategoryPolicy {
    type Err = TabprepError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(UnknownCategoryPolicy::Ignore),
            _ => Err(TabprepError::config(format!(
                "unsupported unknown-category policy '{}'; only ignore is available",
                s
            ))),
        }
    }
}
