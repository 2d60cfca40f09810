//! Immutable fitted preprocessing state.
//!
//! [`FittedState::fit`] learns every statistic from the training partition
//! in one pass and returns a finished value; nothing mutates it afterwards.
//! [`FittedState::transform`] is a pure function of the state and its input.

use super::encoding::OneHotEncoder;
use super::imputation::{most_frequent_category, numerical_fill_value};
use super::matrix::EncodedMatrix;
use super::scaling::StandardScaler;
use crate::config::{ImputationStrategy, PreprocessorConfig};
use crate::core::error::{Result, TabprepError};
use crate::core::types::{ColumnKind, Value};
use crate::dataset::{Dataset, Schema};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Learned parameters of a numerical column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericalColumn {
    /// Column name
    pub name: String,
    /// Value substituted for missing cells
    pub fill_value: f64,
    /// Standardization parameters over the imputed column
    pub scaler: StandardScaler,
}

/// Learned parameters of a categorical column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalColumn {
    /// Column name
    pub name: String,
    /// Mode substituted for missing cells
    pub fill_value: String,
    /// Fixed vocabulary
    pub encoder: OneHotEncoder,
}

/// Everything learned by a fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedState {
    numerical: Vec<NumericalColumn>,
    categorical: Vec<CategoricalColumn>,
    passthrough: Vec<String>,
    numerical_imputation: ImputationStrategy,
    num_training_rows: usize,
}

impl FittedState {
    /// Learn column kinds and statistics from a training partition.
    ///
    /// Fails with a configuration error for an invalid `config`, with an
    /// input error for an empty or non-rectangular dataset or an infinite
    /// numerical value, and with a schema error when an indicator name
    /// collides with another output column.
    pub fn fit(x_train: &Dataset, config: &PreprocessorConfig) -> Result<Self> {
        config.validate()?;
        x_train.ensure_rectangular()?;
        if x_train.is_empty() {
            return Err(TabprepError::input("cannot fit on a dataset with no rows"));
        }

        log::info!(
            "Fitting preprocessor on {} rows x {} columns (numerical imputation: {})",
            x_train.num_rows(),
            x_train.num_columns(),
            config.numerical_imputation
        );

        let schema = Schema::infer(x_train, &config.passthrough_columns);
        let mut numerical = Vec::new();
        let mut categorical = Vec::new();
        let mut passthrough = Vec::new();

        for (idx, (name, kind)) in schema.columns().iter().enumerate() {
            match kind {
                ColumnKind::Numerical => {
                    numerical.push(fit_numerical(x_train, idx, name, config.numerical_imputation)?)
                }
                ColumnKind::Categorical => categorical.push(fit_categorical(x_train, idx, name)?),
                ColumnKind::Passthrough => passthrough.push(name.clone()),
            }
        }

        let state = FittedState {
            numerical,
            categorical,
            passthrough,
            numerical_imputation: config.numerical_imputation,
            num_training_rows: x_train.num_rows(),
        };
        ensure_unique_names(&state.feature_names())?;

        log::info!(
            "Preprocessor fitted: {} numerical, {} categorical, {} passthrough columns",
            state.numerical.len(),
            state.categorical.len(),
            state.passthrough.len()
        );

        Ok(state)
    }

    /// Numerical columns, in discovery order
    pub fn numerical_columns(&self) -> &[NumericalColumn] {
        &self.numerical
    }

    /// Categorical columns, in discovery order
    pub fn categorical_columns(&self) -> &[CategoricalColumn] {
        &self.categorical
    }

    /// Columns passed through at fit time, in fit input order
    pub fn passthrough_columns(&self) -> &[String] {
        &self.passthrough
    }

    /// Names of the numerical columns
    pub fn numerical_names(&self) -> Vec<&str> {
        self.numerical.iter().map(|c| c.name.as_str()).collect()
    }

    /// Names of the categorical columns
    pub fn categorical_names(&self) -> Vec<&str> {
        self.categorical.iter().map(|c| c.name.as_str()).collect()
    }

    /// Strategy used for numerical imputation
    pub fn numerical_imputation(&self) -> ImputationStrategy {
        self.numerical_imputation
    }

    /// Number of rows the state was fitted on
    pub fn num_training_rows(&self) -> usize {
        self.num_training_rows
    }

    /// Learned parameters of one numerical column
    pub fn numerical(&self, name: &str) -> Option<&NumericalColumn> {
        self.numerical.iter().find(|c| c.name == name)
    }

    /// Learned parameters of one categorical column
    pub fn categorical(&self, name: &str) -> Option<&CategoricalColumn> {
        self.categorical.iter().find(|c| c.name == name)
    }

    /// Width of the numeric block (numerical plus indicator columns)
    pub fn encoded_width(&self) -> usize {
        self.numerical.len() + self.categorical.iter().map(|c| c.encoder.width()).sum::<usize>()
    }

    /// Output names for the fitted column layout.
    ///
    /// Passthrough names are the fit-time passthrough columns; a transform
    /// input with extra columns appends those as well.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = self.encoded_names();
        names.extend(self.passthrough.iter().cloned());
        names
    }

    fn encoded_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.numerical.iter().map(|c| c.name.clone()).collect();
        for column in &self.categorical {
            names.extend(column.encoder.feature_names(&column.name));
        }
        names
    }

    /// Apply the learned transform to any dataset carrying the fitted columns.
    ///
    /// Fails with a schema error if a fitted column is absent, and with an
    /// input error if a numerical column holds non-numeric text. Nothing is
    /// returned unless every row transforms.
    pub fn transform(&self, x: &Dataset) -> Result<EncodedMatrix> {
        x.ensure_rectangular()?;

        let missing: Vec<&str> = self
            .numerical
            .iter()
            .map(|c| c.name.as_str())
            .chain(self.categorical.iter().map(|c| c.name.as_str()))
            .filter(|name| !x.has_column(name))
            .collect();
        if !missing.is_empty() {
            return Err(crate::schema_error!(
                "transform input is missing fitted column(s): {}",
                missing.join(", ")
            ));
        }

        let numerical_idx: Vec<usize> = self
            .numerical
            .iter()
            .filter_map(|c| x.column_index(&c.name))
            .collect();
        let categorical_idx: Vec<usize> = self
            .categorical
            .iter()
            .filter_map(|c| x.column_index(&c.name))
            .collect();
        let passthrough_idx: Vec<usize> = (0..x.num_columns())
            .filter(|i| !numerical_idx.contains(i) && !categorical_idx.contains(i))
            .collect();

        let width = self.encoded_width();
        let mut encoded = Array2::<f64>::zeros((x.num_rows(), width));
        let mut passthrough = Vec::with_capacity(x.num_rows());

        for (r, row) in x.rows().iter().enumerate() {
            let mut out = encoded.row_mut(r);
            let out = out
                .as_slice_mut()
                .ok_or_else(|| TabprepError::input("output row is not contiguous"))?;

            for (c, (column, &idx)) in self.numerical.iter().zip(&numerical_idx).enumerate() {
                let value = read_numerical(&row[idx], column, r)?;
                out[c] = column.scaler.transform(value);
            }

            let mut offset = self.numerical.len();
            for (column, &idx) in self.categorical.iter().zip(&categorical_idx) {
                let width = column.encoder.width();
                let key = row[idx].category_key();
                let category = key.as_deref().unwrap_or(&column.fill_value);
                column
                    .encoder
                    .encode_into(category, &mut out[offset..offset + width]);
                offset += width;
            }

            passthrough.push(passthrough_idx.iter().map(|&i| row[i].clone()).collect());
        }

        let mut feature_names = self.encoded_names();
        feature_names.extend(
            passthrough_idx
                .iter()
                .map(|&i| x.column_names()[i].clone()),
        );
        ensure_unique_names(&feature_names)?;

        log::debug!(
            "Transformed {} rows into {} output columns",
            x.num_rows(),
            feature_names.len()
        );

        Ok(EncodedMatrix::new(feature_names, encoded, passthrough))
    }
}

fn fit_numerical(
    x: &Dataset,
    idx: usize,
    name: &str,
    strategy: ImputationStrategy,
) -> Result<NumericalColumn> {
    let observed: Vec<f64> = x.column_at(idx).filter_map(Value::parse_numeric).collect();
    if let Some(row) = x
        .column_at(idx)
        .position(|v| v.parse_numeric().is_some_and(|n| !n.is_finite()))
    {
        return Err(crate::input_error!(
            "numerical column '{}' holds an infinite value at row {}",
            name,
            row
        ));
    }
    let fill_value = numerical_fill_value(&observed, strategy).ok_or_else(|| {
        TabprepError::input(format!("numerical column '{}' has no observed values", name))
    })?;

    let imputed: Vec<f64> = x
        .column_at(idx)
        .map(|v| v.parse_numeric().unwrap_or(fill_value))
        .collect();
    let scaler = StandardScaler::fit(&imputed).ok_or_else(|| {
        TabprepError::input(format!("numerical column '{}' is empty", name))
    })?;

    log::debug!(
        "Numerical column '{}': fill={} mean={} std={} ({} missing)",
        name,
        fill_value,
        scaler.mean,
        scaler.std,
        imputed.len() - observed.len()
    );

    Ok(NumericalColumn {
        name: name.to_string(),
        fill_value,
        scaler,
    })
}

fn fit_categorical(x: &Dataset, idx: usize, name: &str) -> Result<CategoricalColumn> {
    let observed: Vec<String> = x.column_at(idx).filter_map(Value::category_key).collect();
    let fill_value = most_frequent_category(observed.iter().map(String::as_str)).ok_or_else(|| {
        TabprepError::input(format!("categorical column '{}' has no observed values", name))
    })?;

    // Imputed cells all take the mode, which is already observed, so the
    // vocabulary of the imputed column equals that of the observed cells.
    let encoder = OneHotEncoder::fit(observed.iter().map(String::as_str));

    log::debug!(
        "Categorical column '{}': mode='{}' vocabulary={:?}",
        name,
        fill_value,
        encoder.categories()
    );

    Ok(CategoricalColumn {
        name: name.to_string(),
        fill_value,
        encoder,
    })
}

fn read_numerical(cell: &Value, column: &NumericalColumn, row: usize) -> Result<f64> {
    if cell.is_missing() {
        return Ok(column.fill_value);
    }
    let value = cell.parse_numeric().ok_or_else(|| {
        TabprepError::input(format!(
            "numerical column '{}' holds non-numeric value '{}' at row {}",
            column.name, cell, row
        ))
    })?;
    if !value.is_finite() {
        return Err(crate::input_error!(
            "numerical column '{}' holds an infinite value at row {}",
            column.name,
            row
        ));
    }
    Ok(value)
}

fn ensure_unique_names(names: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(names.len());
    let duplicates: Vec<&str> = names
        .iter()
        .filter(|name| !seen.insert(name.as_str()))
        .map(String::as_str)
        .collect();
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(crate::schema_error!(
            "output column name(s) collide: {}",
            duplicates.join(", ")
        ))
    }
}
