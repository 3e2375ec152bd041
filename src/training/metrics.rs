//! Regression evaluation metrics

use crate::error::{HeatloadError, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Standard regression metrics
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RegressionMetrics {
    /// Root mean squared error
    pub rmse: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Coefficient of determination: 1 - ss_res / ss_tot
    pub r_squared: f64,
}

impl RegressionMetrics {
    /// Compute all three metrics from predictions and targets
    pub fn compute(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            return Err(HeatloadError::ShapeError {
                expected: format!("{} predictions", y_true.len()),
                actual: format!("{} predictions", y_pred.len()),
            });
        }
        if y_true.is_empty() {
            return Err(HeatloadError::ValidationError(
                "cannot evaluate on zero rows".to_string(),
            ));
        }

        let n = y_true.len() as f64;
        let residuals = y_pred - y_true;

        let mse = residuals.mapv(|r| r * r).sum() / n;
        let rmse = mse.sqrt();
        let mae = residuals.mapv(f64::abs).sum() / n;

        let y_mean = y_true.mean().unwrap_or(0.0);
        let ss_res = residuals.mapv(|r| r * r).sum();
        let ss_tot = y_true.mapv(|v| (v - y_mean) * (v - y_mean)).sum();
        let r_squared = if ss_tot == 0.0 {
            1.0
        } else {
            1.0 - ss_res / ss_tot
        };

        Ok(Self {
            rmse,
            mae,
            r_squared,
        })
    }
}
