//! Ordinary least-squares regression

use crate::error::{HeatloadError, Result};
use crate::preprocessing::DesignMatrix;
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Solve symmetric positive-definite system Ax = b using Cholesky decomposition.
///
/// Returns `None` when the matrix is not positive definite within a relative
/// tolerance. No regularization is applied: a singular system must surface
/// as a rank-deficiency error, not as arbitrary coefficients.
fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    if n != a.ncols() || n != b.len() {
        return None;
    }

    let max_diag = a.diag().iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    let tol = 1e-8 * max_diag.max(1.0);

    // Cholesky decomposition: A = L * L^T
    let mut l = Array2::zeros((n, n));

    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[[i, k]] * l[[j, k]];
            }

            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= tol {
                    return None;
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    // Forward substitution: L * y = b
    let mut y = Array1::zeros(n);
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[[i, j]] * y[j];
        }
        y[i] = (b[i] - sum) / l[[i, i]];
    }

    // Backward substitution: L^T * x = y
    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += l[[j, i]] * x[j];
        }
        x[i] = (y[i] - sum) / l[[i, i]];
    }

    Some(x)
}

/// Ordinary least-squares linear regression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegression {
    /// Fitted coefficients (weights)
    pub coefficients: Option<Array1<f64>>,
    /// Fitted intercept (bias)
    pub intercept: Option<f64>,
    /// Whether to fit intercept
    pub fit_intercept: bool,
    /// Whether model is fitted
    pub is_fitted: bool,
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearRegression {
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercept: None,
            fit_intercept: true,
            is_fitted: false,
        }
    }

    /// Enable/disable fitting intercept
    pub fn with_fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    /// Fit the model by solving the normal equations (X^T X) w = X^T y.
    ///
    /// Fails with [`HeatloadError::RankDeficient`] when the predictors are
    /// linearly dependent and the system has no unique solution.
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        let n_samples = x.nrows();

        if n_samples != y.len() {
            return Err(HeatloadError::ShapeError {
                expected: format!("y length = {}", n_samples),
                actual: format!("y length = {}", y.len()),
            });
        }
        if n_samples == 0 {
            return Err(HeatloadError::ValidationError(
                "cannot fit on zero rows".to_string(),
            ));
        }

        // Center data if fitting intercept
        let (x_centered, y_centered, x_mean, y_mean) = if self.fit_intercept {
            let x_mean = x.mean_axis(Axis(0)).unwrap();
            let y_mean = y.mean().unwrap_or(0.0);

            let x_centered = x - &x_mean.clone().insert_axis(Axis(0));
            let y_centered = y - y_mean;

            (x_centered, y_centered, Some(x_mean), Some(y_mean))
        } else {
            (x.clone(), y.clone(), None, None)
        };

        let xtx = x_centered.t().dot(&x_centered);
        let xty = x_centered.t().dot(&y_centered);

        let coefficients = cholesky_solve(&xtx, &xty).ok_or_else(|| {
            HeatloadError::RankDeficient(
                "normal equations are singular; predictors are linearly dependent".to_string(),
            )
        })?;

        let intercept = if self.fit_intercept {
            let x_mean = x_mean.unwrap();
            let y_mean = y_mean.unwrap();
            Some(y_mean - coefficients.dot(&x_mean))
        } else {
            Some(0.0)
        };

        self.coefficients = Some(coefficients);
        self.intercept = intercept;
        self.is_fitted = true;

        Ok(self)
    }

    /// Make predictions: x · w + intercept. Pure, no side effects.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if !self.is_fitted {
            return Err(HeatloadError::ModelNotFitted);
        }

        let coefficients = self.coefficients.as_ref().unwrap();
        let intercept = self.intercept.unwrap_or(0.0);

        Ok(x.dot(coefficients) + intercept)
    }

    /// Get R² score
    pub fn score(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<f64> {
        let y_pred = self.predict(x)?;

        let y_mean = y.mean().unwrap_or(0.0);
        let ss_res = (&y_pred - y).mapv(|v| v * v).sum();
        let ss_tot = y.mapv(|v| (v - y_mean) * (v - y_mean)).sum();

        if ss_tot == 0.0 {
            return Ok(1.0);
        }

        Ok(1.0 - ss_res / ss_tot)
    }
}

/// Result of a guarded OLS fit
#[derive(Debug, Clone)]
pub struct GuardedFit {
    pub model: LinearRegression,
    /// Columns the model was ultimately fit on, in matrix order
    pub retained: Vec<String>,
    /// Near-collinear columns removed before the successful fit
    pub dropped: Vec<String>,
}

/// Fit OLS, dropping near-collinear predictors instead of failing outright.
///
/// When the normal equations are singular, scan columns from last to first
/// and permanently remove the first one whose removal restores full rank,
/// then retry. Every drop is logged and reported in the result; the caller
/// decides whether that is acceptable. Fails only if no single-column
/// removal fixes the deficiency.
pub fn fit_ols_guarded(matrix: &DesignMatrix, y: &Array1<f64>) -> Result<GuardedFit> {
    let mut retained: Vec<String> = matrix.columns.clone();
    let mut dropped: Vec<String> = Vec::new();

    loop {
        let current = matrix.select_columns(&retained)?;
        let mut model = LinearRegression::new();
        match model.fit(&current.values, y) {
            Ok(_) => {
                return Ok(GuardedFit {
                    model,
                    retained,
                    dropped,
                });
            }
            Err(HeatloadError::RankDeficient(_)) => {
                let victim = find_collinear_column(matrix, &retained, y)?;
                warn!(column = %victim, "near-collinear predictor dropped before OLS fit");
                retained.retain(|c| c != &victim);
                dropped.push(victim);
            }
            Err(e) => return Err(e),
        }
    }
}

/// Find a column whose removal restores full rank, scanning from the last
/// column backwards so the drop is deterministic.
fn find_collinear_column(
    matrix: &DesignMatrix,
    retained: &[String],
    y: &Array1<f64>,
) -> Result<String> {
    for candidate in retained.iter().rev() {
        let without: Vec<String> = retained
            .iter()
            .filter(|c| *c != candidate)
            .cloned()
            .collect();
        if without.is_empty() {
            break;
        }
        let reduced = matrix.select_columns(&without)?;
        let mut probe = LinearRegression::new();
        if probe.fit(&reduced.values, y).is_ok() {
            return Ok(candidate.clone());
        }
    }

    Err(HeatloadError::RankDeficient(
        "no single-column removal restores full rank".to_string(),
    ))
}
