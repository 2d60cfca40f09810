//! Baseline logistic-regression classifier.
//!
//! Plain batch gradient descent on the log loss. It exists to give the
//! processed features a quick sanity score, not to be a competitive model.

use crate::core::error::{Result, TabprepError};
use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

/// Training parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionParams {
    /// Gradient step size
    pub learning_rate: f64,
    /// Maximum number of full-batch epochs
    pub max_epochs: usize,
    /// Stop once the loss improves by less than this
    pub tolerance: f64,
    /// L2 penalty on the weights
    pub l2: f64,
}

impl Default for LogisticRegressionParams {
    fn default() -> Self {
        LogisticRegressionParams {
            learning_rate: 0.1,
            max_epochs: 500,
            tolerance: 1e-7,
            l2: 0.0,
        }
    }
}

/// Fitted logistic-regression model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    weights: Array1<f64>,
    bias: f64,
    loss_history: Vec<f64>,
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn log_loss(y: ArrayView1<'_, f64>, p: &Array1<f64>) -> f64 {
    let eps = 1e-15;
    -y.iter()
        .zip(p.iter())
        .map(|(&y, &p)| {
            let p = p.clamp(eps, 1.0 - eps);
            y * p.ln() + (1.0 - y) * (1.0 - p).ln()
        })
        .sum::<f64>()
        / y.len() as f64
}

impl LogisticRegression {
    /// Train on `x` (rows × features) with 0/1 targets `y`.
    ///
    /// Fails with an input error on a shape mismatch, an empty training set,
    /// or a non-finite feature value.
    pub fn fit(
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
        params: &LogisticRegressionParams,
    ) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(TabprepError::input(format!(
                "features have {} rows but target has {} values",
                x.nrows(),
                y.len()
            )));
        }
        if x.nrows() == 0 {
            return Err(TabprepError::input("cannot train on zero rows"));
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(TabprepError::input("training features contain non-finite values"));
        }

        let n = x.nrows() as f64;
        let mut weights = Array1::<f64>::zeros(x.ncols());
        let mut bias = 0.0;
        let mut loss_history = Vec::with_capacity(params.max_epochs);

        for epoch in 0..params.max_epochs {
            let p = (x.dot(&weights) + bias).mapv(sigmoid);
            let errors = &p - &y;
            let dw = x.t().dot(&errors) / n + &weights * params.l2;
            let db = errors.sum() / n;

            weights.scaled_add(-params.learning_rate, &dw);
            bias -= params.learning_rate * db;

            let loss = log_loss(y, &p);
            let converged = loss_history
                .last()
                .map_or(false, |&prev: &f64| (prev - loss).abs() < params.tolerance);
            loss_history.push(loss);
            if converged {
                log::debug!("Logistic regression converged after {} epochs", epoch + 1);
                break;
            }
        }

        log::info!(
            "Trained logistic regression on {} rows x {} features (final loss {:.4})",
            x.nrows(),
            x.ncols(),
            loss_history.last().copied().unwrap_or(f64::NAN)
        );

        Ok(LogisticRegression {
            weights,
            bias,
            loss_history,
        })
    }

    /// Learned feature weights
    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    /// Learned intercept
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Training loss per epoch
    pub fn loss_history(&self) -> &[f64] {
        &self.loss_history
    }

    /// Positive-class probabilities
    pub fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.weights.len() {
            return Err(TabprepError::input(format!(
                "model expects {} features, got {}",
                self.weights.len(),
                x.ncols()
            )));
        }
        Ok((x.dot(&self.weights) + self.bias).mapv(sigmoid))
    }

    /// Hard 0/1 predictions at threshold 0.5
    pub fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        Ok(self
            .predict_proba(x)?
            .mapv(|p| if p >= 0.5 { 1.0 } else { 0.0 }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_separable_data() {
        let x = array![[-2.0], [-1.5], [-1.0], [1.0], [1.5], [2.0]];
        let y = array![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let model =
            LogisticRegression::fit(x.view(), y.view(), &LogisticRegressionParams::default())
                .unwrap();
        assert!(model.weights()[0] > 0.0);
        assert_eq!(model.predict(x.view()).unwrap(), y);
    }

    #[test]
    fn test_loss_decreases() {
        let x = array![[0.0, 1.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
        let y = array![1.0, 0.0, 1.0, 0.0];
        let model =
            LogisticRegression::fit(x.view(), y.view(), &LogisticRegressionParams::default())
                .unwrap();
        let history = model.loss_history();
        assert!(history.last().unwrap() < history.first().unwrap());
    }

    #[test]
    fn test_shape_errors() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0];
        let params = LogisticRegressionParams::default();
        assert!(LogisticRegression::fit(x.view(), y.view(), &params).is_err());

        let y = array![0.0, 1.0];
        let model = LogisticRegression::fit(x.view(), y.view(), &params).unwrap();
        let wide = array![[1.0, 2.0]];
        assert!(model.predict(wide.view()).is_err());
    }

    #[test]
    fn test_rejects_nan_features() {
        let x = array![[f64::NAN], [1.0]];
        let y = array![0.0, 1.0];
        let params = LogisticRegressionParams::default();
        assert!(LogisticRegression::fit(x.view(), y.view(), &params).is_err());
    }
}
