//! Recipe configuration

use super::ImputeStrategy;
use crate::data::{CATEGORICAL_COLUMNS, TARGET};
use serde::{Deserialize, Serialize};

/// Configuration for fitting a [`super::Recipe`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeConfig {
    /// Response column; excluded from the feature matrix
    pub target: String,

    /// Predictor columns removed before any other step
    pub drop_columns: Vec<String>,

    /// Strategy for missing numeric values
    pub numeric_impute_strategy: ImputeStrategy,

    /// Strategy for missing categorical values
    pub categorical_impute_strategy: ImputeStrategy,
}

impl Default for RecipeConfig {
    fn default() -> Self {
        Self {
            target: TARGET.to_string(),
            drop_columns: CATEGORICAL_COLUMNS.iter().map(|s| s.to_string()).collect(),
            numeric_impute_strategy: ImputeStrategy::Median,
            categorical_impute_strategy: ImputeStrategy::MostFrequent,
        }
    }
}

impl RecipeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the response column
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Builder method to set the dropped predictor columns
    pub fn with_drop_columns(mut self, columns: Vec<String>) -> Self {
        self.drop_columns = columns;
        self
    }

    /// Builder method to set the numeric impute strategy
    pub fn with_numeric_impute(mut self, strategy: ImputeStrategy) -> Self {
        self.numeric_impute_strategy = strategy;
        self
    }
}
