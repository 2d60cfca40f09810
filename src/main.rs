//! tabprep demo: load a CSV, run the preprocessing pipeline, score a
//! baseline classifier and write the results.
//!
//! Usage: `tabprep-demo <data.csv> [target_column] [output_dir]`
//!
//! Configuration is read from `tabprep.toml` in the working directory when
//! present, then overridden by `TABPREP_*` environment variables.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tabprep::config::DEFAULT_CONFIG_FILE;
use tabprep::{
    evaluate_binary_classification, run_pipeline, write_metrics_csv, write_sample_csv, ColumnKind,
    CsvLoader, LogisticRegression, LogisticRegressionParams, PreprocessorConfig, Schema,
};

const DEFAULT_TARGET: &str = "Survived";
const DEFAULT_OUTPUT_DIR: &str = "results";

fn main() -> Result<()> {
    tabprep::init();

    let mut args = std::env::args().skip(1);
    let Some(data_path) = args.next().map(PathBuf::from) else {
        bail!("usage: tabprep-demo <data.csv> [target_column] [output_dir]");
    };
    let target = args.next().unwrap_or_else(|| DEFAULT_TARGET.to_string());
    let output_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    println!("{}", "=".repeat(70));
    println!("TABPREP {}: LEAKAGE-SAFE PREPROCESSING PIPELINE", tabprep::VERSION);
    println!("{}", "=".repeat(70));

    // Step 1: Load data
    println!("\n[STEP 1] Loading {}...", data_path.display());
    let data = CsvLoader::new()
        .load_csv(&data_path)
        .with_context(|| format!("failed to load {}", data_path.display()))?;
    println!("  Shape: ({}, {})", data.num_rows(), data.num_columns());
    println!("  Missing values:");
    for column in data.summary() {
        println!("    {:<14} {}", column.name, column.missing);
    }

    // Step 2: Prepare features and target
    println!("\n[STEP 2] Preparing features and target...");
    let (x, y) = data
        .take_target(&target)
        .with_context(|| format!("failed to extract target column '{}'", target))?;
    let config = load_config()?;
    let schema = Schema::infer(&x, &config.passthrough_columns);
    println!("  Features shape: ({}, {})", x.num_rows(), x.num_columns());
    println!("  Numerical features: {:?}", schema.names_of(ColumnKind::Numerical));
    println!("  Categorical features: {:?}", schema.names_of(ColumnKind::Categorical));
    println!("  Passthrough columns: {:?}", schema.names_of(ColumnKind::Passthrough));

    // Step 3: Run preprocessing pipeline
    println!("\n[STEP 3] Running preprocessing pipeline...");
    println!(
        "  test_fraction={} seed={} numerical_imputation={}",
        config.test_fraction, config.seed, config.numerical_imputation
    );
    let out = run_pipeline(&x, &y, &config).context("preprocessing pipeline failed")?;
    println!("  Train set: {:?}", out.x_train.dim());
    println!("  Test set: {:?}", out.x_test.dim());
    let survived = out.y_train.iter().filter(|&&v| v > 0.5).count();
    println!("  Target distribution (train):");
    println!("    - positive (1): {}", survived);
    println!("    - negative (0): {}", out.y_train.len() - survived);

    // Step 4: Train a validation model on the numeric block
    println!("\n[STEP 4] Training baseline logistic regression...");
    let model = LogisticRegression::fit(
        out.x_train.encoded(),
        out.y_train.view(),
        &LogisticRegressionParams::default(),
    )
    .context("baseline training failed")?;
    let predictions = model
        .predict(out.x_test.encoded())
        .context("baseline prediction failed")?;
    let metrics = evaluate_binary_classification(predictions.view(), out.y_test.view())?;

    println!("  Performance Metrics:");
    for (label, value) in metrics.rows() {
        println!("    - {:<10} {:.4}", format!("{}:", label), value);
    }

    // Step 5: Save results
    println!("\n[STEP 5] Saving results...");
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    let metrics_path = output_dir.join("pipeline_metrics.csv");
    write_metrics_csv(&metrics_path, &metrics)
        .with_context(|| format!("failed to write {}", metrics_path.display()))?;
    println!("  Saved to: {}", metrics_path.display());

    let sample_path = output_dir.join("sample_processed_data.csv");
    let rows = write_sample_csv(&sample_path, &out.x_train, None)
        .with_context(|| format!("failed to write {}", sample_path.display()))?;
    println!("  Saved {} sample rows to: {}", rows, sample_path.display());

    println!("\n{}", "=".repeat(70));
    println!("PIPELINE EXECUTION COMPLETE");
    println!("{}", "=".repeat(70));
    Ok(())
}

fn load_config() -> Result<PreprocessorConfig> {
    let path = Path::new(DEFAULT_CONFIG_FILE);
    let mut config = if path.is_file() {
        PreprocessorConfig::load_from_file(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    } else {
        PreprocessorConfig::default()
    };
    config
        .apply_environment_overrides()
        .context("invalid TABPREP_* environment override")?;
    Ok(config)
}
