//! End-to-end pipeline orchestration
//!
//! A strict one-pass sequence: coerce → split → engineer → recipe fit on
//! train only → transform both → OLS fit on train → evaluate on test →
//! cross-validate within train. Every stage passes an explicit value to the
//! next; nothing is rebound or mutated in place across stages.

use crate::data::{self, OutlierReport};
use crate::error::Result;
use crate::feature_engineering::engineer;
use crate::preprocessing::{Recipe, RecipeConfig};
use crate::training::{cross_validate, fit_ols_guarded, CvResults, RegressionMetrics};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Share of rows assigned to the training set
    pub train_fraction: f64,
    /// Seed for the split shuffle and fold assignment
    pub seed: u64,
    /// Number of cross-validation folds
    pub cv_folds: usize,
    /// Z-score threshold for the response outlier scan
    pub outlier_threshold: f64,
    /// Recipe configuration
    pub recipe: RecipeConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            train_fraction: 0.75,
            seed: 42,
            cv_folds: 5,
            outlier_threshold: 3.0,
            recipe: RecipeConfig::default(),
        }
    }
}

/// One fitted coefficient, named by its feature column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coefficient {
    pub name: String,
    pub value: f64,
}

/// Everything the pipeline produces, serializable for the CLI JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    pub n_rows: usize,
    pub n_train: usize,
    pub n_test: usize,
    /// Response rows beyond the z-score threshold (train set; report-only)
    pub outliers: OutlierReport,
    /// Near-collinear predictors removed by the guarded OLS fit
    pub dropped_collinear: Vec<String>,
    pub intercept: f64,
    pub coefficients: Vec<Coefficient>,
    pub train_metrics: RegressionMetrics,
    pub test_metrics: RegressionMetrics,
    pub cv: CvResults,
}

/// Run the full pipeline over an already-loaded frame.
pub fn run(df: &DataFrame, config: &PipelineConfig) -> Result<PipelineReport> {
    let df = data::select_schema(df)?;
    let df = data::coerce_types(&df)?;
    let n_rows = df.height();
    info!(rows = n_rows, "dataset loaded and coerced");

    let (train, test) = data::train_test_split(&df, config.train_fraction, config.seed)?;
    info!(train = train.height(), test = test.height(), "split complete");

    // Derived columns are row-local; applied independently to each side
    let train = engineer(&train)?;
    let test = engineer(&test)?;

    let outliers = data::response_outliers(&train, &config.recipe.target, config.outlier_threshold)?;
    if !outliers.is_empty() {
        warn!(
            count = outliers.rows.len(),
            threshold = outliers.threshold,
            "response outliers detected; rows retained for auditability"
        );
    }

    let mut recipe = Recipe::with_config(config.recipe.clone());
    recipe.fit(&train)?;
    let train_matrix = recipe.apply(&train)?;
    let test_matrix = recipe.apply(&test)?;
    let y_train = recipe.target_vector(&train)?;
    let y_test = recipe.target_vector(&test)?;
    info!(features = train_matrix.n_cols(), "recipe fitted and applied");

    let fit = fit_ols_guarded(&train_matrix, &y_train)?;
    let x_train = train_matrix.select_columns(&fit.retained)?;
    let x_test = test_matrix.select_columns(&fit.retained)?;

    let train_pred = fit.model.predict(&x_train.values)?;
    let test_pred = fit.model.predict(&x_test.values)?;
    let train_metrics = RegressionMetrics::compute(&y_train, &train_pred)?;
    let test_metrics = RegressionMetrics::compute(&y_test, &test_pred)?;
    info!(
        rmse = test_metrics.rmse,
        r_squared = test_metrics.r_squared,
        "test evaluation complete"
    );

    let cv = cross_validate(&train, &config.recipe, config.cv_folds, config.seed)?;
    info!(folds = cv.n_folds, mean_rmse = cv.mean_rmse, "cross-validation complete");

    let coefficients = fit
        .retained
        .iter()
        .zip(fit.model.coefficients.as_ref().unwrap().iter())
        .map(|(name, &value)| Coefficient {
            name: name.clone(),
            value,
        })
        .collect();

    Ok(PipelineReport {
        n_rows,
        n_train: train.height(),
        n_test: test.height(),
        outliers,
        dropped_collinear: fit.dropped,
        intercept: fit.model.intercept.unwrap_or(0.0),
        coefficients,
        train_metrics,
        test_metrics,
        cv,
    })
}
