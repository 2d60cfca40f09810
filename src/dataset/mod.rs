//! Dataset management module for tabprep.
//!
//! Holds the row-oriented [`Dataset`], CSV loading, column-kind discovery
//! and the seeded train/test split.

pub mod dataset;
pub mod loader;
pub mod schema;
pub mod split;

// Re-export commonly used types
pub use dataset::{ColumnSummary, Dataset, DatasetBuilder, DatasetMetadata};
pub use loader::{CsvConfig, CsvLoader};
pub use schema::{infer_column_kind, Schema};
pub use split::{split_indices, split_sizes, train_test_split, SplitResult};
