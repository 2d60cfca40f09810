//! Default values shared across the crate.

/// Library version, taken from Cargo metadata
pub const TABPREP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default fraction of rows placed in the test partition
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Default seed for the split permutation
pub const DEFAULT_RANDOM_SEED: u64 = 42;

/// Default number of processed rows written to the sample CSV
pub const DEFAULT_SAMPLE_ROWS: usize = 100;

/// Tolerance applied before rounding the test partition size up, so that
/// `10 * 0.3` counts as 3 rows rather than 4
pub const SPLIT_ROUNDING_EPSILON: f64 = 1e-9;

/// Tokens the CSV loader reads as a missing value (compared after trimming)
pub const MISSING_VALUE_TOKENS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// Separator between source column and category in one-hot feature names
pub const ONE_HOT_SEPARATOR: &str = "_";
