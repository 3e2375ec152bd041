//! Error types for the heatload pipeline

use thiserror::Error;

/// Result type alias for heatload operations
pub type Result<T> = std::result::Result<T, HeatloadError>;

/// Main error type for the heatload pipeline
#[derive(Error, Debug)]
pub enum HeatloadError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Recipe error: {0}")]
    RecipeError(String),

    #[error("Training error: {0}")]
    TrainingError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Recipe not fitted")]
    RecipeNotFitted,

    #[error("Rank-deficient feature matrix: {0}")]
    RankDeficient(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<polars::error::PolarsError> for HeatloadError {
    fn from(err: polars::error::PolarsError) -> Self {
        HeatloadError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for HeatloadError {
    fn from(err: serde_json::Error) -> Self {
        HeatloadError::SerializationError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for HeatloadError {
    fn from(err: ndarray::ShapeError) -> Self {
        HeatloadError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HeatloadError::DataError("bad file".to_string());
        assert_eq!(err.to_string(), "Data error: bad file");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: HeatloadError = io_err.into();
        assert!(matches!(err, HeatloadError::IoError(_)));
    }
}
