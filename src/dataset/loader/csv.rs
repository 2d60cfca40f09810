//! CSV file loader for tabprep.
//!
//! Reads a delimited text file into a [`Dataset`]. Cells matching one of the
//! configured missing-value tokens become [`Value::Missing`], cells that parse
//! as `f64` become [`Value::Number`], everything else is [`Value::Text`].

use crate::core::constants::MISSING_VALUE_TOKENS;
use crate::core::error::{Result, TabprepError};
use crate::core::types::Value;
use crate::dataset::Dataset;
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// CSV-specific configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvConfig {
    /// Has header row
    pub has_header: bool,
    /// Field delimiter
    pub delimiter: char,
    /// Quote character
    pub quote_char: char,
    /// Maximum number of rows to read
    pub max_rows: Option<usize>,
    /// Trim whitespace from fields
    pub trim: bool,
    /// Tokens read as a missing value
    pub missing_tokens: Vec<String>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        CsvConfig {
            has_header: true,
            delimiter: ',',
            quote_char: '"',
            max_rows: None,
            trim: true,
            missing_tokens: MISSING_VALUE_TOKENS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// CSV data loader
#[derive(Debug, Clone, Default)]
pub struct CsvLoader {
    config: CsvConfig,
}

impl CsvLoader {
    /// Create a new CSV loader with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create CSV loader with custom configuration
    pub fn with_csv_config(mut self, config: CsvConfig) -> Self {
        self.config = config;
        self
    }

    /// Set delimiter character
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Set whether file has header
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.config.has_header = has_header;
        self
    }

    /// Set maximum rows to read
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.config.max_rows = Some(max_rows);
        self
    }

    /// Current configuration
    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Load a CSV file
    pub fn load_csv<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        log::info!("Loading CSV file: {}", path.display());

        if !path.is_file() {
            return Err(TabprepError::input(format!(
                "Path is not a readable file: {}",
                path.display()
            )));
        }

        let file = File::open(path)?;
        let mut dataset = self.load_reader(file)?;

        let metadata = dataset.metadata_mut();
        metadata.source_path = Some(path.display().to_string());
        Ok(dataset)
    }

    /// Load CSV data from any reader
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.config.delimiter as u8)
            .quote(self.config.quote_char as u8)
            .has_headers(self.config.has_header)
            .flexible(true)
            .trim(if self.config.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(reader);

        let headers = if self.config.has_header {
            Some(reader.headers()?.clone())
        } else {
            None
        };

        let mut records: Vec<StringRecord> = Vec::new();
        let mut num_columns = headers.as_ref().map(|h| h.len()).unwrap_or(0);

        for (line_num, result) in reader.records().enumerate() {
            let record = result?;
            // Header occupies line 1 of the file
            let file_line = line_num + if self.config.has_header { 2 } else { 1 };

            if num_columns == 0 {
                num_columns = record.len();
            } else if record.len() != num_columns {
                return Err(TabprepError::input(format!(
                    "Inconsistent column count at line {}: expected {}, got {}",
                    file_line,
                    num_columns,
                    record.len()
                )));
            }

            records.push(record);

            if let Some(max_rows) = self.config.max_rows {
                if records.len() >= max_rows {
                    log::info!("Reached max_rows limit of {}, stopping", max_rows);
                    break;
                }
            }
        }

        if num_columns == 0 {
            return Err(TabprepError::input("CSV input has no columns"));
        }

        let columns = self.column_names(headers.as_ref(), num_columns);
        let rows = records
            .iter()
            .map(|record| record.iter().map(|field| self.parse_field(field)).collect())
            .collect();

        log::info!("Loaded {} rows with {} columns", records.len(), num_columns);

        let mut dataset = Dataset::new(columns, rows)?;
        let metadata = dataset.metadata_mut();
        metadata.format = "csv".to_string();
        metadata
            .properties
            .insert("num_rows".to_string(), records.len().to_string());
        metadata
            .properties
            .insert("num_cols".to_string(), num_columns.to_string());
        metadata
            .properties
            .insert("delimiter".to_string(), self.config.delimiter.to_string());

        Ok(dataset)
    }

    /// Column names from the header, or `column_<i>` without one
    fn column_names(&self, headers: Option<&StringRecord>, num_columns: usize) -> Vec<String> {
        match headers {
            Some(headers) => headers.iter().map(str::to_string).collect(),
            None => (0..num_columns).map(|i| format!("column_{}", i)).collect(),
        }
    }

    /// Classify a raw field as missing, numeric or text
    fn parse_field(&self, field: &str) -> Value {
        if self.config.missing_tokens.iter().any(|t| t == field) {
            return Value::Missing;
        }
        match field.parse::<f64>() {
            Ok(v) if v.is_nan() => Value::Missing,
            Ok(v) => Value::Number(v),
            Err(_) => Value::Text(field.to_string()),
        }
    }
}
