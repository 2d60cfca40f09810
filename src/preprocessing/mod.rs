//! Leakage-safe preprocessing for tabprep.
//!
//! The [`Preprocessor`] splits a dataset, fits imputation, scaling and
//! one-hot statistics on the training partition only, and applies the
//! learned transform to any partition.
//!
//! # Example
//!
//! ```rust
//! use ndarray::array;
//! use tabprep::{Dataset, Preprocessor, PreprocessorConfig, Value};
//!
//! let x = Dataset::from_columns(vec![
//!     ("Age", vec![Value::from(22.0), Value::Missing, Value::from(30.0), Value::from(41.0)]),
//!     ("Sex", vec![Value::from("male"), Value::from("female"), Value::from("male"), Value::from("female")]),
//! ])?;
//! let y = array![0.0, 1.0, 1.0, 0.0];
//!
//! let mut pre = Preprocessor::new(PreprocessorConfig::default())?;
//! let split = pre.split(&x, &y)?;
//! let train = pre.fit_transform(&split.x_train)?;
//! let test = pre.transform(&split.x_test)?;
//! assert_eq!(train.ncols(), test.ncols());
//! # Ok::<(), tabprep::TabprepError>(())
//! ```

pub mod encoding;
pub mod imputation;
pub mod matrix;
pub mod scaling;
pub mod state;

pub use encoding::OneHotEncoder;
pub use matrix::EncodedMatrix;
pub use scaling::StandardScaler;
pub use state::{CategoricalColumn, FittedState, NumericalColumn};

use crate::config::PreprocessorConfig;
use crate::core::error::{Result, TabprepError};
use crate::dataset::{train_test_split, Dataset, SplitResult};
use ndarray::Array1;
use std::sync::Arc;

/// Split / fit / transform facade over an immutable [`FittedState`].
///
/// `fit` builds a complete new state and swaps it in only on success, so a
/// failed fit leaves the previous state untouched and readers holding a
/// [`snapshot`](Self::snapshot) never see a partial update.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    config: PreprocessorConfig,
    state: Option<Arc<FittedState>>,
}

impl Preprocessor {
    /// Create an unfitted preprocessor. Fails if `config` is invalid.
    pub fn new(config: PreprocessorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Preprocessor {
            config,
            state: None,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    /// Whether a fit has completed
    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    /// Shared handle to the current fitted state
    pub fn snapshot(&self) -> Option<Arc<FittedState>> {
        self.state.clone()
    }

    /// Seeded train/test split with the configured fraction and seed
    pub fn split(&self, x: &Dataset, y: &Array1<f64>) -> Result<SplitResult> {
        train_test_split(x, y, self.config.test_fraction, self.config.seed)
    }

    /// Learn statistics from the training partition, replacing any prior state
    pub fn fit(&mut self, x_train: &Dataset) -> Result<&FittedState> {
        let state = Arc::new(FittedState::fit(x_train, &self.config)?);
        Ok(&**self.state.insert(state))
    }

    /// Apply the fitted transform
    pub fn transform(&self, x: &Dataset) -> Result<EncodedMatrix> {
        self.fitted("transform")?.transform(x)
    }

    /// `fit` followed by `transform` on the same rows
    pub fn fit_transform(&mut self, x: &Dataset) -> Result<EncodedMatrix> {
        self.fit(x)?.transform(x)
    }

    /// Output column names of the fitted layout
    pub fn feature_names(&self) -> Result<Vec<String>> {
        Ok(self.fitted("feature_names")?.feature_names())
    }

    fn fitted(&self, operation: &str) -> Result<&FittedState> {
        self.state
            .as_deref()
            .ok_or_else(|| TabprepError::not_fitted(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigBuilder, ImputationStrategy};
    use crate::core::types::Value;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn titanic_mini() -> (Dataset, Array1<f64>) {
        let x = Dataset::from_columns(vec![
            ("Age", vec![Value::from(22.0), Value::Missing, Value::from(30.0)]),
            ("Sex", vec![Value::from("male"), Value::from("female"), Value::from("male")]),
        ])
        .unwrap();
        (x, array![0.0, 1.0, 1.0])
    }

    fn config(fraction: f64) -> PreprocessorConfig {
        ConfigBuilder::new()
            .test_fraction(fraction)
            .seed(7)
            .build()
            .unwrap()
    }

    #[test]
    fn test_transform_before_fit() {
        let pre = Preprocessor::new(PreprocessorConfig::default()).unwrap();
        let (x, _) = titanic_mini();
        let err = pre.transform(&x).unwrap_err();
        assert!(matches!(err, TabprepError::State { .. }));
        assert!(matches!(pre.feature_names().unwrap_err(), TabprepError::State { .. }));
        assert!(pre.snapshot().is_none());
    }

    #[test]
    fn test_bogus_strategy_is_config_error() {
        let err = ConfigBuilder::new()
            .numerical_imputation_name("bogus")
            .build()
            .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_titanic_scenario() {
        let (x, y) = titanic_mini();
        let mut pre = Preprocessor::new(config(0.33)).unwrap();
        let split = pre.split(&x, &y).unwrap();
        assert_eq!(split.x_train.num_rows(), 2);
        assert_eq!(split.x_test.num_rows(), 1);

        let state = pre.fit(&split.x_train).unwrap();
        let observed: Vec<f64> = split
            .x_train
            .column("Age")
            .unwrap()
            .into_iter()
            .filter_map(Value::parse_numeric)
            .collect();
        let expected = observed.iter().sum::<f64>() / observed.len() as f64;
        assert_abs_diff_eq!(state.numerical("Age").unwrap().fill_value, expected);

        let test = pre.transform(&split.x_test).unwrap();
        let state = pre.snapshot().unwrap();
        let vocab = state.categorical("Sex").unwrap().encoder.categories().to_vec();
        let start = test.column_index(&format!("Sex_{}", vocab[0])).unwrap();
        let block: f64 = test.encoded().row(0).iter().skip(start).take(vocab.len()).sum();
        let test_sex = split.x_test.column("Sex").unwrap()[0].category_key().unwrap();
        let expected_hits = if vocab.contains(&test_sex) { 1.0 } else { 0.0 };
        assert_eq!(block, expected_hits);
    }

    #[test]
    fn test_unknown_category_encodes_to_zeros() {
        let (x, _) = titanic_mini();
        let mut pre = Preprocessor::new(PreprocessorConfig::default()).unwrap();
        pre.fit(&x).unwrap();

        let unseen = Dataset::from_columns(vec![
            ("Age", vec![Value::from(25.0)]),
            ("Sex", vec![Value::from("unknown")]),
        ])
        .unwrap();
        let out = pre.transform(&unseen).unwrap();
        assert_eq!(out.feature_names(), &["Age", "Sex_female", "Sex_male"]);
        assert_eq!(out.encoded().row(0).to_vec()[1..], [0.0, 0.0]);
    }

    #[test]
    fn test_mean_standardizes_to_zero() {
        let (x, _) = titanic_mini();
        let mut pre = Preprocessor::new(PreprocessorConfig::default()).unwrap();
        let out = pre.fit_transform(&x).unwrap();
        // Row 1 has a missing Age; mean imputation then scaling gives exactly 0
        assert_abs_diff_eq!(out.encoded()[[1, 0]], 0.0);
    }

    #[test]
    fn test_fit_transform_equals_fit_then_transform() {
        let (x, _) = titanic_mini();
        let mut a = Preprocessor::new(config(0.5)).unwrap();
        let mut b = a.clone();
        let combined = a.fit_transform(&x).unwrap();
        b.fit(&x).unwrap();
        assert_eq!(combined, b.transform(&x).unwrap());
    }

    #[test]
    fn test_test_partition_does_not_leak() {
        let x = Dataset::from_columns(vec![
            ("Fare", vec![7.25, 71.28, 7.92, 53.1, 8.05, 8.46, 51.86, 21.07, 11.13, 30.07]),
        ])
        .unwrap();
        let y = Array1::zeros(10);
        let mut pre = Preprocessor::new(config(0.3)).unwrap();
        let split = pre.split(&x, &y).unwrap();
        let before = pre.fit(&split.x_train).unwrap().clone();

        let mut perturbed = x.clone();
        for &row in &split.test_indices {
            perturbed.set_value(row, "Fare", Value::from(1.0e6)).unwrap();
        }
        let split2 = pre.split(&perturbed, &y).unwrap();
        assert_eq!(split2.train_indices, split.train_indices);
        let after = pre.fit(&split2.x_train).unwrap().clone();
        assert_eq!(before, after);
    }

    #[test]
    fn test_median_strategy() {
        let x = Dataset::from_columns(vec![(
            "Age",
            vec![Value::from(1.0), Value::from(2.0), Value::from(10.0), Value::Missing],
        )])
        .unwrap();
        let cfg = ConfigBuilder::new()
            .numerical_imputation(ImputationStrategy::Median)
            .build()
            .unwrap();
        let mut pre = Preprocessor::new(cfg).unwrap();
        assert_eq!(pre.fit(&x).unwrap().numerical("Age").unwrap().fill_value, 2.0);
    }

    #[test]
    fn test_fit_returns_installed_state() {
        let (x, _) = titanic_mini();
        let mut pre = Preprocessor::new(PreprocessorConfig::default()).unwrap();
        let returned = pre.fit(&x).unwrap().clone();
        assert_eq!(returned, *pre.snapshot().unwrap());
        assert!(pre.is_fitted());
    }

    #[test]
    fn test_failed_fit_keeps_previous_state() {
        let (x, _) = titanic_mini();
        let mut pre = Preprocessor::new(PreprocessorConfig::default()).unwrap();
        pre.fit(&x).unwrap();
        let before = pre.snapshot().unwrap();

        let empty = Dataset::new(vec!["Age".into(), "Sex".into()], vec![]).unwrap();
        assert!(pre.fit(&empty).is_err());
        assert!(Arc::ptr_eq(&before, &pre.snapshot().unwrap()));
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let (x, _) = titanic_mini();
        let mut pre = Preprocessor::new(PreprocessorConfig::default()).unwrap();
        pre.fit(&x).unwrap();
        let only_age = Dataset::from_columns(vec![("Age", vec![Value::from(3.0)])]).unwrap();
        assert!(matches!(
            pre.transform(&only_age).unwrap_err(),
            TabprepError::Schema { .. }
        ));
    }

    #[test]
    fn test_passthrough_columns_appended() {
        let x = Dataset::from_columns(vec![
            ("PassengerId", vec![Value::from(1.0), Value::from(2.0)]),
            ("Age", vec![Value::from(20.0), Value::from(40.0)]),
            ("Cabin", vec![Value::Missing, Value::Missing]),
        ])
        .unwrap();
        let cfg = ConfigBuilder::new()
            .passthrough_column("PassengerId")
            .build()
            .unwrap();
        let mut pre = Preprocessor::new(cfg).unwrap();
        let out = pre.fit_transform(&x).unwrap();
        assert_eq!(out.feature_names(), &["Age", "PassengerId", "Cabin"]);
        assert_eq!(out.get(1, 1), Some(Value::Number(2.0)));
        assert_eq!(out.get(0, 2), Some(Value::Missing));
        assert_eq!(pre.feature_names().unwrap(), vec!["Age", "PassengerId", "Cabin"]);
    }
}
