//! Output of a transform: encoded numeric block plus passthrough cells.

use crate::core::error::{Result, TabprepError};
use crate::core::types::Value;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

/// Transformed rows.
///
/// Columns are ordered numerical, then one-hot indicators, then passthrough.
/// The first two groups are always numeric and live in [`encoded`](Self::encoded);
/// passthrough cells keep their original [`Value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedMatrix {
    feature_names: Vec<String>,
    encoded: Array2<f64>,
    passthrough: Vec<Vec<Value>>,
}

impl EncodedMatrix {
    pub(crate) fn new(
        feature_names: Vec<String>,
        encoded: Array2<f64>,
        passthrough: Vec<Vec<Value>>,
    ) -> Self {
        debug_assert_eq!(encoded.nrows(), passthrough.len());
        EncodedMatrix {
            feature_names,
            encoded,
            passthrough,
        }
    }

    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.encoded.nrows()
    }

    /// Number of output columns
    pub fn ncols(&self) -> usize {
        self.feature_names.len()
    }

    /// `(rows, columns)`
    pub fn dim(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// One name per output column
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Numerical and indicator columns
    pub fn encoded(&self) -> ArrayView2<'_, f64> {
        self.encoded.view()
    }

    /// Number of passthrough columns
    pub fn num_passthrough(&self) -> usize {
        self.ncols() - self.encoded.ncols()
    }

    /// Cell at `(row, col)` across all output columns
    pub fn get(&self, row: usize, col: usize) -> Option<Value> {
        if row >= self.nrows() || col >= self.ncols() {
            return None;
        }
        let width = self.encoded.ncols();
        if col < width {
            Some(Value::Number(self.encoded[[row, col]]))
        } else {
            Some(self.passthrough[row][col - width].clone())
        }
    }

    /// Column position of an output feature
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.feature_names.iter().position(|n| n == name)
    }

    /// One full output row
    pub fn row(&self, row: usize) -> Option<Vec<Value>> {
        if row >= self.nrows() {
            return None;
        }
        let mut out: Vec<Value> = self
            .encoded
            .row(row)
            .iter()
            .map(|&v| Value::Number(v))
            .collect();
        out.extend(self.passthrough[row].iter().cloned());
        Some(out)
    }

    /// Iterate over full output rows
    pub fn iter_rows(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
        (0..self.nrows()).filter_map(move |i| self.row(i))
    }

    /// Dense numeric matrix of every output column.
    ///
    /// Passthrough cells must read as numbers; missing ones become `NaN`.
    /// Non-numeric text fails with an input error.
    pub fn to_array(&self) -> Result<Array2<f64>> {
        let width = self.encoded.ncols();
        let mut out = Array2::<f64>::zeros((self.nrows(), self.ncols()));
        out.slice_mut(ndarray::s![.., ..width]).assign(&self.encoded);

        for (r, cells) in self.passthrough.iter().enumerate() {
            for (c, cell) in cells.iter().enumerate() {
                out[[r, width + c]] = if cell.is_missing() {
                    f64::NAN
                } else {
                    cell.parse_numeric().ok_or_else(|| {
                        TabprepError::input(format!(
                            "passthrough column '{}' holds non-numeric value '{}' at row {}",
                            self.feature_names[width + c],
                            cell,
                            r
                        ))
                    })?
                };
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> EncodedMatrix {
        EncodedMatrix::new(
            vec!["Age".into(), "Sex_female".into(), "Sex_male".into(), "Id".into()],
            array![[-1.0, 0.0, 1.0], [1.0, 1.0, 0.0]],
            vec![vec![Value::from(7.0)], vec![Value::Missing]],
        )
    }

    #[test]
    fn test_dims_and_access() {
        let m = sample();
        assert_eq!(m.dim(), (2, 4));
        assert_eq!(m.num_passthrough(), 1);
        assert_eq!(m.get(0, 2), Some(Value::Number(1.0)));
        assert_eq!(m.get(0, 3), Some(Value::Number(7.0)));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.column_index("Sex_female"), Some(1));
        assert_eq!(m.row(1).unwrap().len(), 4);
        assert_eq!(m.iter_rows().count(), 2);
    }

    #[test]
    fn test_to_array() {
        let arr = sample().to_array().unwrap();
        assert_eq!(arr.dim(), (2, 4));
        assert_eq!(arr[[0, 3]], 7.0);
        assert!(arr[[1, 3]].is_nan());
    }

    #[test]
    fn test_to_array_rejects_text() {
        let m = EncodedMatrix::new(
            vec!["x".into(), "Name".into()],
            array![[0.5]],
            vec![vec![Value::from("Braund")]],
        );
        assert!(matches!(m.to_array().unwrap_err(), TabprepError::Input { .. }));
    }
}
