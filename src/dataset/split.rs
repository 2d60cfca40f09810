//! Seeded train/test partitioning.
//!
//! The partition depends only on the row count, the test fraction and the
//! seed. Targets are permuted with the same index list as their rows.

use crate::core::constants::SPLIT_ROUNDING_EPSILON;
use crate::core::error::{Result, TabprepError};
use crate::dataset::Dataset;
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Result of [`train_test_split`]
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult {
    /// Training rows
    pub x_train: Dataset,
    /// Test rows
    pub x_test: Dataset,
    /// Targets aligned with `x_train`
    pub y_train: Array1<f64>,
    /// Targets aligned with `x_test`
    pub y_test: Array1<f64>,
    /// Source row of every training row
    pub train_indices: Vec<usize>,
    /// Source row of every test row
    pub test_indices: Vec<usize>,
}

/// Partition sizes `(n_train, n_test)` for `num_rows` rows.
///
/// The test size is rounded up; the training partition gets the remainder.
/// Both partitions must be non-empty.
pub fn split_sizes(num_rows: usize, test_fraction: f64) -> Result<(usize, usize)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(TabprepError::invalid_parameter(
            "test_fraction",
            test_fraction.to_string(),
            "must be in range (0.0, 1.0)",
        ));
    }

    let n_test = ((num_rows as f64 * test_fraction) - SPLIT_ROUNDING_EPSILON)
        .ceil()
        .max(0.0) as usize;
    let n_train = num_rows.saturating_sub(n_test);

    if n_test == 0 || n_train == 0 {
        return Err(TabprepError::input(format!(
            "test_fraction {} on {} rows leaves an empty partition (train {}, test {})",
            test_fraction, num_rows, n_train, n_test
        )));
    }

    Ok((n_train, n_test))
}

/// Seeded permutation of `0..num_rows` split into `(train, test)` indices.
pub fn split_indices(
    num_rows: usize,
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    let (_, n_test) = split_sizes(num_rows, test_fraction)?;

    let mut indices: Vec<usize> = (0..num_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok((train, indices))
}

/// Split rows and targets into train and test partitions.
///
/// Fails with an input error when `x` and `y` differ in length, when `x` is
/// not rectangular, or when either partition would be empty.
pub fn train_test_split(
    x: &Dataset,
    y: &Array1<f64>,
    test_fraction: f64,
    seed: u64,
) -> Result<SplitResult> {
    x.ensure_rectangular()?;
    if x.num_rows() != y.len() {
        return Err(crate::input_error!(
            "features have {} rows but target has {} values",
            x.num_rows(),
            y.len()
        ));
    }

    let (train_indices, test_indices) = split_indices(x.num_rows(), test_fraction, seed)?;
    log::info!(
        "Split {} rows into {} train / {} test (test_fraction={}, seed={})",
        x.num_rows(),
        train_indices.len(),
        test_indices.len(),
        test_fraction,
        seed
    );

    let select = |idx: &[usize]| Array1::from_iter(idx.iter().map(|&i| y[i]));

    Ok(SplitResult {
        x_train: x.subset(&train_indices)?,
        x_test: x.subset(&test_indices)?,
        y_train: select(&train_indices),
        y_test: select(&test_indices),
        train_indices,
        test_indices,
    })
}
