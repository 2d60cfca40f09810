//! # tabprep
//!
//! Leakage-safe preprocessing for tabular datasets.
//!
//! tabprep splits rows into train/test partitions with a seeded
//! permutation, learns imputation values, scaling parameters and category
//! vocabularies from the training partition only, and applies the learned
//! transform to any partition.
//!
//! ## Features
//!
//! - **Deterministic split**: the partition depends only on the row count,
//!   the test fraction and the seed; targets follow their rows.
//! - **Immutable fitted state**: every fit produces a fresh
//!   [`FittedState`] which is swapped in whole; transforms only read it.
//! - **Imputation**: mean, median or most-frequent for numerical columns,
//!   most-frequent for categorical columns.
//! - **Encoding**: standard scaling for numerical columns and one-hot
//!   encoding against a fixed vocabulary for categorical columns. Unknown
//!   categories encode to all zeros.
//! - **CSV input and report output** through the `csv` crate.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tabprep::{CsvLoader, PreprocessorConfig, run_pipeline};
//!
//! # fn main() -> tabprep::Result<()> {
//! tabprep::init();
//!
//! let data = CsvLoader::new().load_csv("data/raw/titanic.csv")?;
//! let (x, y) = data.take_target("Survived")?;
//!
//! let config = PreprocessorConfig::default();
//! let out = run_pipeline(&x, &y, &config)?;
//! println!("train {:?}, test {:?}", out.x_train.dim(), out.x_test.dim());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: error handling, cell types and constants
//! - [`config`]: preprocessing configuration and strategies
//! - [`dataset`]: row-oriented dataset, CSV loading, schema discovery, split
//! - [`preprocessing`]: imputation, scaling, encoding and the [`Preprocessor`]
//! - [`metrics`]: binary classification metrics
//! - [`baseline`]: logistic-regression baseline classifier
//! - [`pipeline`]: end-to-end run and report writers

#![doc(html_root_url = "https://docs.rs/tabprep/")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Configuration management module
pub mod config;

// Dataset management module
pub mod dataset;

// Fit/transform module
pub mod preprocessing;

// Metrics evaluation module
pub mod metrics;

// Baseline classifier module
pub mod baseline;

// End-to-end pipeline module
pub mod pipeline;

// Re-export core functionality for convenience
pub use crate::core::{
    constants::*,
    error::{Result, TabprepError},
    types::{ColumnKind, Value},
};

// Re-export configuration functionality
pub use config::{
    CategoricalImputation, ConfigBuilder, ConfigFormat, ImputationStrategy, PreprocessorConfig,
    UnknownCategoryPolicy,
};

// Re-export dataset functionality
pub use dataset::{
    train_test_split, ColumnSummary, CsvConfig, CsvLoader, Dataset, DatasetBuilder,
    DatasetMetadata, Schema, SplitResult,
};

// Re-export preprocessing functionality
pub use preprocessing::{EncodedMatrix, FittedState, OneHotEncoder, Preprocessor, StandardScaler};

// Re-export metrics evaluation functionality
pub use metrics::{evaluate_binary_classification, ClassificationMetrics};

// Re-export baseline functionality
pub use baseline::{LogisticRegression, LogisticRegressionParams};

// Re-export pipeline functionality
pub use pipeline::{run_pipeline, write_metrics_csv, write_sample_csv, PipelineOutput};

// Version information
pub use crate::core::constants::TABPREP_VERSION as VERSION;

/// Initialize the library.
///
/// Installs the `env_logger` backend so `RUST_LOG` controls tabprep's log
/// output. Calling it more than once, or after the host application has
/// installed its own logger, is harmless.
///
/// # Examples
///
/// ```rust
/// tabprep::init();
/// assert!(!tabprep::VERSION.is_empty());
/// ```
pub fn init() {
    crate::core::initialize_logging()
}
