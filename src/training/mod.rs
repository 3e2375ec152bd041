//! Model training module
//!
//! Ordinary least-squares regression with explicit rank-deficiency
//! reporting, regression metrics, and seeded k-fold cross-validation.

pub mod cross_validation;
pub mod linear;
pub mod metrics;

pub use cross_validation::{cross_validate, CvResults, FoldSplit, KFold};
pub use linear::{fit_ols_guarded, GuardedFit, LinearRegression};
pub use metrics::RegressionMetrics;
