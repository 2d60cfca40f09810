//! Row-oriented tabular dataset with named columns.

use crate::core::error::{Result, TabprepError};
use crate::core::types::Value;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// An ordered collection of rows over a fixed list of named columns.
///
/// A `Dataset` is always rectangular: every row holds exactly one
/// [`Value`] per column. Construction rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Column names, in column order
    columns: Vec<String>,
    /// Row-major cells
    rows: Vec<Vec<Value>>,
    /// Provenance information
    metadata: DatasetMetadata,
}

/// Provenance information attached to a dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// File the data was read from, if any
    pub source_path: Option<String>,
    /// Input format ("csv", "memory", ...)
    pub format: String,
    /// Free-form properties
    pub properties: HashMap<String, String>,
}

/// Per-column summary of a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Column name
    pub name: String,
    /// Number of missing cells
    pub missing: usize,
    /// Number of distinct non-missing values
    pub distinct: usize,
}

impl Dataset {
    /// Create a dataset from column names and rows.
    ///
    /// Fails with an input error if the column names repeat or any row
    /// length differs from the number of columns.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(TabprepError::input(format!(
                    "duplicate column name '{}'",
                    name
                )));
            }
        }

        let dataset = Dataset {
            columns,
            rows,
            metadata: DatasetMetadata {
                format: "memory".to_string(),
                ..DatasetMetadata::default()
            },
        };
        dataset.ensure_rectangular()?;
        Ok(dataset)
    }

    /// Create a dataset from `(name, values)` column pairs.
    pub fn from_columns<S, V>(columns: Vec<(S, Vec<V>)>) -> Result<Self>
    where
        S: Into<String>,
        V: Into<Value>,
    {
        let num_rows = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
        let mut names = Vec::with_capacity(columns.len());
        let mut rows: Vec<Vec<Value>> = (0..num_rows)
            .map(|_| Vec::with_capacity(columns.len()))
            .collect();

        for (name, values) in columns {
            let name = name.into();
            if values.len() != num_rows {
                return Err(TabprepError::input(format!(
                    "column '{}' has {} values, expected {}",
                    name,
                    values.len(),
                    num_rows
                )));
            }
            for (row, value) in rows.iter_mut().zip(values) {
                row.push(value.into());
            }
            names.push(name);
        }

        Self::new(names, rows)
    }

    /// Create a dataset builder
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::new()
    }

    /// Check that every row has one cell per column
    pub fn ensure_rectangular(&self) -> Result<()> {
        let width = self.columns.len();
        if let Some((idx, row)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != width)
        {
            return Err(TabprepError::input(format!(
                "dataset is not rectangular: row {} has {} values, expected {}",
                idx,
                row.len(),
                width
            )));
        }
        Ok(())
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Whether the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in column order
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Whether a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, name: &str) -> Result<Vec<&Value>> {
        let idx = self.column_index(name).ok_or_else(|| {
            TabprepError::schema(format!("column '{}' not found in dataset", name))
        })?;
        Ok(self.column_at(idx).collect())
    }

    /// Iterate over the cells of the column at `idx`
    pub fn column_at(&self, idx: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |row| &row[idx])
    }

    /// One row
    pub fn row(&self, index: usize) -> Option<&[Value]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// All rows
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Provenance information
    pub fn metadata(&self) -> &DatasetMetadata {
        &self.metadata
    }

    /// Mutable provenance information
    pub fn metadata_mut(&mut self) -> &mut DatasetMetadata {
        &mut self.metadata
    }

    /// Create a subset of the dataset holding the given rows, in the given order
    pub fn subset(&self, indices: &[usize]) -> Result<Self> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.rows.len()) {
            return Err(TabprepError::input(format!(
                "row index {} out of bounds for dataset with {} rows",
                bad,
                self.rows.len()
            )));
        }

        Ok(Dataset {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            metadata: self.metadata.clone(),
        })
    }

    /// Replace one cell. Used to build perturbed copies of a dataset.
    pub fn set_value(&mut self, row: usize, column: &str, value: Value) -> Result<()> {
        let col = self.column_index(column).ok_or_else(|| {
            TabprepError::schema(format!("column '{}' not found in dataset", column))
        })?;
        let num_rows = self.rows.len();
        let cells = self.rows.get_mut(row).ok_or_else(|| {
            TabprepError::input(format!(
                "row index {} out of bounds for dataset with {} rows",
                row, num_rows
            ))
        })?;
        cells[col] = value;
        Ok(())
    }

    /// Remove a column and return it alongside the remaining dataset
    pub fn drop_column(&self, name: &str) -> Result<(Self, Vec<Value>)> {
        let idx = self.column_index(name).ok_or_else(|| {
            TabprepError::schema(format!("column '{}' not found in dataset", name))
        })?;

        let mut columns = self.columns.clone();
        columns.remove(idx);
        let mut removed = Vec::with_capacity(self.rows.len());
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                removed.push(row.remove(idx));
                row
            })
            .collect();

        Ok((
            Dataset {
                columns,
                rows,
                metadata: self.metadata.clone(),
            },
            removed,
        ))
    }

    /// Separate a numeric target column from the features.
    ///
    /// Fails with an input error if any target cell is missing or not numeric.
    pub fn take_target(&self, name: &str) -> Result<(Self, Array1<f64>)> {
        let (features, values) = self.drop_column(name)?;
        let target = values
            .iter()
            .enumerate()
            .map(|(row, value)| {
                value.parse_numeric().ok_or_else(|| {
                    TabprepError::input(format!(
                        "target column '{}' has a missing or non-numeric value '{}' at row {}",
                        name, value, row
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        Ok((features, Array1::from_vec(target)))
    }

    /// Missing and distinct counts per column
    pub fn summary(&self) -> Vec<ColumnSummary> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let mut distinct = HashSet::new();
                let mut missing = 0;
                for value in self.column_at(idx) {
                    match value.category_key() {
                        Some(key) => {
                            distinct.insert(key);
                        }
                        None => missing += 1,
                    }
                }
                ColumnSummary {
                    name: name.clone(),
                    missing,
                    distinct: distinct.len(),
                }
            })
            .collect()
    }
}

/// Dataset builder assembling rows one at a time
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    metadata: DatasetMetadata,
}

impl DatasetBuilder {
    /// Create a new dataset builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set column names
    pub fn columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Append a row
    pub fn row<V: Into<Value>>(mut self, row: impl IntoIterator<Item = V>) -> Self {
        self.rows.push(row.into_iter().map(Into::into).collect());
        self
    }

    /// Set metadata
    pub fn metadata(mut self, metadata: DatasetMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Build the dataset
    pub fn build(self) -> Result<Dataset> {
        let mut dataset = Dataset::new(self.columns, self.rows)?;
        if !self.metadata.format.is_empty() {
            dataset.metadata = self.metadata;
        }
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passengers() -> Dataset {
        Dataset::from_columns(vec![
            ("Age", vec![Value::from(22.0), Value::Missing, Value::from(30.0)]),
            ("Sex", vec![Value::from("male"), Value::from("female"), Value::from("male")]),
            ("Survived", vec![Value::from(0), Value::from(1), Value::from(1)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_columns() {
        let ds = passengers();
        assert_eq!(ds.num_rows(), 3);
        assert_eq!(ds.num_columns(), 3);
        assert_eq!(ds.column_names(), &["Age", "Sex", "Survived"]);
        assert_eq!(ds.row(1).unwrap()[1], Value::from("female"));
        assert_eq!(ds.metadata().format, "memory");
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Dataset::new(
            vec!["a".into(), "b".into()],
            vec![vec![Value::from(1.0), Value::from(2.0)], vec![Value::from(3.0)]],
        )
        .unwrap_err();
        assert!(matches!(err, TabprepError::Input { .. }));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let err = Dataset::new(vec!["a".into(), "a".into()], vec![]).unwrap_err();
        assert!(matches!(err, TabprepError::Input { .. }));
    }

    #[test]
    fn test_subset_keeps_order() {
        let ds = passengers();
        let sub = ds.subset(&[2, 0]).unwrap();
        assert_eq!(sub.num_rows(), 2);
        assert_eq!(sub.row(0).unwrap()[0], Value::from(30.0));
        assert_eq!(sub.row(1).unwrap()[0], Value::from(22.0));
        assert!(ds.subset(&[3]).is_err());
    }

    #[test]
    fn test_take_target() {
        let (features, target) = passengers().take_target("Survived").unwrap();
        assert_eq!(features.column_names(), &["Age", "Sex"]);
        assert_eq!(target.to_vec(), vec![0.0, 1.0, 1.0]);

        let err = passengers().take_target("Sex").unwrap_err();
        assert!(matches!(err, TabprepError::Input { .. }));
        assert!(passengers().take_target("Fare").is_err());
    }

    #[test]
    fn test_summary_counts_missing() {
        let summary = passengers().summary();
        assert_eq!(summary[0].missing, 1);
        assert_eq!(summary[0].distinct, 2);
        assert_eq!(summary[1].missing, 0);
        assert_eq!(summary[1].distinct, 2);
    }

    #[test]
    fn test_builder() {
        let ds = Dataset::builder()
            .columns(["x", "y"])
            .row([Value::from(1.0), Value::from("a")])
            .row([Value::Missing, Value::from("b")])
            .build()
            .unwrap();
        assert_eq!(ds.num_rows(), 2);
        assert!(ds.row(1).unwrap()[0].is_missing());
    }

    #[test]
    fn test_set_value() {
        let mut ds = passengers();
        ds.set_value(1, "Age", Value::from(40.0)).unwrap();
        assert_eq!(ds.column("Age").unwrap()[1], &Value::from(40.0));
        assert!(ds.set_value(9, "Age", Value::Missing).is_err());
        assert!(ds.set_value(0, "Fare", Value::Missing).is_err());
    }
}
