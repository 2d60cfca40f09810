//! Data loaders producing [`Dataset`](crate::dataset::Dataset) values.

pub mod csv;

pub use self::csv::{CsvConfig, CsvLoader};
