//! K-fold cross-validation

use super::linear::fit_ols_guarded;
use super::metrics::RegressionMetrics;
use crate::error::{HeatloadError, Result};
use crate::preprocessing::{Recipe, RecipeConfig};
use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A single train/validation split
#[derive(Debug, Clone)]
pub struct FoldSplit {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
    pub fold_idx: usize,
}

/// Seeded k-fold splitter; folds are disjoint and exhaustive
#[derive(Debug, Clone)]
pub struct KFold {
    n_splits: usize,
    seed: u64,
}

impl KFold {
    pub fn new(n_splits: usize, seed: u64) -> Self {
        Self { n_splits, seed }
    }

    /// Generate fold assignments for `n_samples` rows
    pub fn split(&self, n_samples: usize) -> Result<Vec<FoldSplit>> {
        if self.n_splits < 2 {
            return Err(HeatloadError::ValidationError(
                "n_splits must be at least 2".to_string(),
            ));
        }
        if n_samples < self.n_splits {
            return Err(HeatloadError::ValidationError(format!(
                "n_samples ({}) must be >= n_splits ({})",
                n_samples, self.n_splits
            )));
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        indices.shuffle(&mut rng);

        let fold_sizes: Vec<usize> = (0..self.n_splits)
            .map(|i| {
                let base = n_samples / self.n_splits;
                let remainder = n_samples % self.n_splits;
                if i < remainder {
                    base + 1
                } else {
                    base
                }
            })
            .collect();

        let mut splits = Vec::with_capacity(self.n_splits);
        let mut current = 0;

        for fold_idx in 0..self.n_splits {
            let fold_size = fold_sizes[fold_idx];
            let test_indices: Vec<usize> = indices[current..current + fold_size].to_vec();
            let train_indices: Vec<usize> = indices[..current]
                .iter()
                .chain(indices[current + fold_size..].iter())
                .copied()
                .collect();

            splits.push(FoldSplit {
                train_indices,
                test_indices,
                fold_idx,
            });

            current += fold_size;
        }

        Ok(splits)
    }
}

/// Aggregated cross-validation results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvResults {
    /// Metrics for each fold, in fold order
    pub fold_metrics: Vec<RegressionMetrics>,
    pub mean_rmse: f64,
    pub mean_mae: f64,
    pub mean_r_squared: f64,
    pub std_rmse: f64,
    pub n_folds: usize,
}

impl CvResults {
    fn from_folds(fold_metrics: Vec<RegressionMetrics>) -> Self {
        let n = fold_metrics.len();
        let mean = |f: fn(&RegressionMetrics) -> f64| {
            fold_metrics.iter().map(f).sum::<f64>() / n as f64
        };
        let mean_rmse = mean(|m| m.rmse);
        let mean_mae = mean(|m| m.mae);
        let mean_r_squared = mean(|m| m.r_squared);
        let variance = fold_metrics
            .iter()
            .map(|m| (m.rmse - mean_rmse).powi(2))
            .sum::<f64>()
            / n as f64;

        Self {
            fold_metrics,
            mean_rmse,
            mean_mae,
            mean_r_squared,
            std_rmse: variance.sqrt(),
            n_folds: n,
        }
    }
}

/// Cross-validate the recipe-plus-OLS pipeline over an engineered frame.
///
/// For each fold, the recipe and the model are fit on the remaining k-1
/// folds only; the held-out fold sees nothing but the fitted transforms.
pub fn cross_validate(
    df: &DataFrame,
    config: &RecipeConfig,
    k: usize,
    seed: u64,
) -> Result<CvResults> {
    let splits = KFold::new(k, seed).split(df.height())?;

    let mut fold_metrics = Vec::with_capacity(splits.len());

    for split in &splits {
        let train_ca = UInt32Chunked::from_vec(
            "idx".into(),
            split.train_indices.iter().map(|&i| i as u32).collect(),
        );
        let test_ca = UInt32Chunked::from_vec(
            "idx".into(),
            split.test_indices.iter().map(|&i| i as u32).collect(),
        );
        let fold_train = df.take(&train_ca)?;
        let fold_test = df.take(&test_ca)?;

        let mut recipe = Recipe::with_config(config.clone());
        recipe.fit(&fold_train)?;

        let train_matrix = recipe.apply(&fold_train)?;
        let test_matrix = recipe.apply(&fold_test)?;
        let y_train = recipe.target_vector(&fold_train)?;
        let y_test = recipe.target_vector(&fold_test)?;

        let fit = fit_ols_guarded(&train_matrix, &y_train)?;
        let x_test = test_matrix.select_columns(&fit.retained)?;
        let y_pred = fit.model.predict(&x_test.values)?;

        fold_metrics.push(RegressionMetrics::compute(&y_test, &y_pred)?);
    }

    Ok(CvResults::from_folds(fold_metrics))
}
