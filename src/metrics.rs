//! Binary classification metrics for the demo report.

use crate::core::error::{Result, TabprepError};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Binary classification evaluation metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    /// Accuracy
    pub accuracy: f64,
    /// Precision of the positive class
    pub precision: f64,
    /// Recall of the positive class
    pub recall: f64,
    /// F1-score
    pub f1_score: f64,
}

impl ClassificationMetrics {
    /// `(label, value)` pairs in report order
    pub fn rows(&self) -> [(&'static str, f64); 4] {
        [
            ("Accuracy", self.accuracy),
            ("Precision", self.precision),
            ("Recall", self.recall),
            ("F1 Score", self.f1_score),
        ]
    }
}

/// Confusion matrix counts for a 0/1 problem
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionCounts {
    /// True positives
    pub tp: usize,
    /// False positives
    pub fp: usize,
    /// True negatives
    pub tn: usize,
    /// False negatives
    pub fn_: usize,
}

impl ConfusionCounts {
    /// Count outcomes; values above 0.5 are the positive class.
    pub fn from_labels(predictions: ArrayView1<'_, f64>, truth: ArrayView1<'_, f64>) -> Self {
        let mut counts = ConfusionCounts::default();
        for (&pred, &label) in predictions.iter().zip(truth.iter()) {
            match (pred > 0.5, label > 0.5) {
                (true, true) => counts.tp += 1,
                (true, false) => counts.fp += 1,
                (false, false) => counts.tn += 1,
                (false, true) => counts.fn_ += 1,
            }
        }
        counts
    }

    /// Total number of samples
    pub fn total(&self) -> usize {
        self.tp + self.fp + self.tn + self.fn_
    }
}

/// Evaluate binary classification metrics.
///
/// Precision, recall and F1 fall back to 0 when their denominator is zero.
pub fn evaluate_binary_classification(
    predictions: ArrayView1<'_, f64>,
    truth: ArrayView1<'_, f64>,
) -> Result<ClassificationMetrics> {
    if predictions.len() != truth.len() {
        return Err(TabprepError::input(format!(
            "{} predictions for {} labels",
            predictions.len(),
            truth.len()
        )));
    }
    if truth.is_empty() {
        return Err(TabprepError::input("cannot evaluate metrics on zero samples"));
    }

    let c = ConfusionCounts::from_labels(predictions, truth);
    let (tp, fp, tn, fn_) = (c.tp as f64, c.fp as f64, c.tn as f64, c.fn_ as f64);

    let accuracy = (tp + tn) / c.total() as f64;
    let precision = if tp + fp > 0.0 { tp / (tp + fp) } else { 0.0 };
    let recall = if tp + fn_ > 0.0 { tp / (tp + fn_) } else { 0.0 };
    let f1_score = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    Ok(ClassificationMetrics {
        accuracy,
        precision,
        recall,
        f1_score,
    })
}
