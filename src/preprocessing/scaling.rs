//! Standard scaling (z-score) parameters.

use serde::{Deserialize, Serialize};

/// Learned mean and population standard deviation of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Mean of the imputed training column
    pub mean: f64,
    /// Population standard deviation (ddof = 0) of the imputed training column
    pub std: f64,
}

impl StandardScaler {
    /// Learn scaling parameters; `None` for an empty column
    pub fn fit(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / n;
        Some(StandardScaler {
            mean,
            std: var.sqrt(),
        })
    }

    /// Standardize one value. A zero standard deviation maps everything to 0.
    pub fn transform(&self, value: f64) -> f64 {
        if self.std != 0.0 {
            (value - self.mean) / self.std
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_fit_population_std() {
        let scaler = StandardScaler::fit(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_abs_diff_eq!(scaler.mean, 5.0);
        assert_abs_diff_eq!(scaler.std, 2.0);
    }

    #[test]
    fn test_mean_maps_to_zero() {
        let scaler = StandardScaler::fit(&[22.0, 26.0, 30.0]).unwrap();
        assert_abs_diff_eq!(scaler.transform(scaler.mean), 0.0);
        assert!(scaler.transform(30.0) > 0.0);
    }

    #[test]
    fn test_zero_std() {
        let scaler = StandardScaler::fit(&[3.0, 3.0]).unwrap();
        assert_eq!(scaler.std, 0.0);
        assert_eq!(scaler.transform(3.0), 0.0);
        assert_eq!(scaler.transform(100.0), 0.0);
    }

    #[test]
    fn test_empty() {
        assert!(StandardScaler::fit(&[]).is_none());
    }
}
