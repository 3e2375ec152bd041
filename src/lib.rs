//! heatload - Heating-load regression pipeline
//!
//! Predicts a building's heating load from its physical characteristics
//! via a fixed sequence of data-transformation stages:
//!
//! - [`data`] - Schema validation, loading, train/test split, diagnostics
//! - [`feature_engineering`] - Derived columns (glazing type, surface-height)
//! - [`preprocessing`] - The fitted recipe: imputation, encoding, normalization
//! - [`training`] - OLS regression, metrics, k-fold cross-validation
//! - [`pipeline`] - End-to-end orchestration producing a report
//! - [`cli`] - Command-line interface

// Core error handling
pub mod error;

// Pipeline stages
pub mod data;
pub mod feature_engineering;
pub mod preprocessing;
pub mod training;

// Orchestration
pub mod pipeline;

// Services
pub mod cli;

pub use error::{HeatloadError, Result};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{HeatloadError, Result};

    // Data handling
    pub use crate::data::{
        coerce_types, response_outliers, select_schema, train_test_split, validate_schema,
        DataLoader, OutlierReport,
    };

    // Feature engineering
    pub use crate::feature_engineering::engineer;

    // Preprocessing
    pub use crate::preprocessing::{
        DesignMatrix, ImputeStrategy, Imputer, OneHotEncoder, Recipe, RecipeConfig,
        StandardScaler,
    };

    // Training
    pub use crate::training::{
        cross_validate, fit_ols_guarded, CvResults, GuardedFit, KFold, LinearRegression,
        RegressionMetrics,
    };

    // Pipeline
    pub use crate::pipeline::{PipelineConfig, PipelineReport};
}
