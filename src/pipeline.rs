//! End-to-end preprocessing run and report writers.

use crate::config::PreprocessorConfig;
use crate::core::constants::DEFAULT_SAMPLE_ROWS;
use crate::core::error::{Result, TabprepError};
use crate::dataset::Dataset;
use crate::metrics::ClassificationMetrics;
use crate::preprocessing::{EncodedMatrix, FittedState, Preprocessor};
use ndarray::Array1;
use std::path::Path;
use std::sync::Arc;

/// Processed partitions produced by [`run_pipeline`]
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Transformed training rows
    pub x_train: EncodedMatrix,
    /// Transformed test rows
    pub x_test: EncodedMatrix,
    /// Training targets
    pub y_train: Array1<f64>,
    /// Test targets
    pub y_test: Array1<f64>,
    /// State fitted on the training rows
    pub state: Arc<FittedState>,
}

/// Split, fit on the training rows, then transform both partitions.
pub fn run_pipeline(
    x: &Dataset,
    y: &Array1<f64>,
    config: &PreprocessorConfig,
) -> Result<PipelineOutput> {
    let mut preprocessor = Preprocessor::new(config.clone())?;
    let split = preprocessor.split(x, y)?;

    let x_train = preprocessor.fit_transform(&split.x_train)?;
    let x_test = preprocessor.transform(&split.x_test)?;
    let state = preprocessor
        .snapshot()
        .ok_or_else(|| TabprepError::not_fitted("run_pipeline"))?;

    log::info!(
        "Pipeline produced train {:?} and test {:?} matrices",
        x_train.dim(),
        x_test.dim()
    );

    Ok(PipelineOutput {
        x_train,
        x_test,
        y_train: split.y_train,
        y_test: split.y_test,
        state,
    })
}

/// Write `Metric,Value` rows for the four classification metrics.
pub fn write_metrics_csv<P: AsRef<Path>>(path: P, metrics: &ClassificationMetrics) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(["Metric", "Value"])?;
    for (label, value) in metrics.rows() {
        writer.write_record([label.to_string(), value.to_string()])?;
    }
    writer.flush()?;
    log::info!("Wrote metrics to {}", path.as_ref().display());
    Ok(())
}

/// Write the feature-name header and the first `max_rows` rows of `matrix`.
///
/// `max_rows` defaults to [`DEFAULT_SAMPLE_ROWS`] when `None`.
pub fn write_sample_csv<P: AsRef<Path>>(
    path: P,
    matrix: &EncodedMatrix,
    max_rows: Option<usize>,
) -> Result<usize> {
    let limit = max_rows.unwrap_or(DEFAULT_SAMPLE_ROWS);
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(matrix.feature_names())?;

    let mut written = 0;
    for row in matrix.iter_rows().take(limit) {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
        written += 1;
    }
    writer.flush()?;
    log::info!(
        "Wrote {} sample rows to {}",
        written,
        path.as_ref().display()
    );
    Ok(written)
}
