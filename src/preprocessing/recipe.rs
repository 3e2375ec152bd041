//! The fitted preprocessing recipe

use super::{
    DesignMatrix, ImputeStrategy, Imputer, OneHotEncoder, RecipeConfig, StandardScaler,
};
use crate::error::{HeatloadError, Result};
use ndarray::Array1;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Fitted preprocessing specification.
///
/// All statistics (imputation fill values, one-hot vocabulary, per-column
/// mean/std) are learned from the frame passed to [`Recipe::fit`] and baked
/// in; [`Recipe::apply`] takes `&self` and can never re-fit them. The output
/// column set and order are fixed at fit time, so train and test matrices
/// always line up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    config: RecipeConfig,
    numeric_columns: Vec<String>,
    categorical_columns: Vec<String>,
    numeric_imputer: Option<Imputer>,
    categorical_imputer: Option<Imputer>,
    scaler: StandardScaler,
    encoder: OneHotEncoder,
    output_columns: Vec<String>,
    is_fitted: bool,
}

impl Recipe {
    /// Create an unfitted recipe with default configuration
    pub fn new() -> Self {
        Self::with_config(RecipeConfig::default())
    }

    /// Create an unfitted recipe with custom configuration
    pub fn with_config(config: RecipeConfig) -> Self {
        Self {
            config,
            numeric_columns: Vec::new(),
            categorical_columns: Vec::new(),
            numeric_imputer: None,
            categorical_imputer: None,
            scaler: StandardScaler::new(),
            encoder: OneHotEncoder::new(),
            output_columns: Vec::new(),
            is_fitted: false,
        }
    }

    /// Learn all preprocessing statistics from the training frame
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        if df.height() == 0 {
            return Err(HeatloadError::ValidationError(
                "cannot fit a recipe on zero rows".to_string(),
            ));
        }

        let predictors = self.predictor_frame(df)?;
        self.detect_column_types(&predictors);

        // Fit imputers
        if !self.numeric_columns.is_empty() {
            let mut imputer = Imputer::new(self.config.numeric_impute_strategy.clone());
            let cols: Vec<&str> = self.numeric_columns.iter().map(|s| s.as_str()).collect();
            imputer.fit(&predictors, &cols)?;
            self.numeric_imputer = Some(imputer);
        }

        if !self.categorical_columns.is_empty() {
            let mut imputer = Imputer::new(self.config.categorical_impute_strategy.clone());
            let cols: Vec<&str> = self.categorical_columns.iter().map(|s| s.as_str()).collect();
            imputer.fit(&predictors, &cols)?;
            self.categorical_imputer = Some(imputer);
        }

        // Impute before learning scaler and encoder statistics
        let mut imputed = predictors;
        if let Some(ref imputer) = self.numeric_imputer {
            imputed = imputer.transform(&imputed)?;
        }
        if let Some(ref imputer) = self.categorical_imputer {
            imputed = imputer.transform(&imputed)?;
        }

        if !self.numeric_columns.is_empty() {
            let cols: Vec<&str> = self.numeric_columns.iter().map(|s| s.as_str()).collect();
            self.scaler.fit(&imputed, &cols)?;
        }

        if !self.categorical_columns.is_empty() {
            let cols: Vec<&str> = self.categorical_columns.iter().map(|s| s.as_str()).collect();
            self.encoder.fit(&imputed, &cols)?;
        }

        // Fixed output order: numeric predictors first, then indicators
        self.output_columns = self.numeric_columns.clone();
        for col in &self.categorical_columns {
            self.output_columns.extend(self.encoder.output_columns(col));
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform a frame into the fixed-width feature matrix.
    ///
    /// Works for the training frame, the test frame, or any fold; only the
    /// statistics baked in at fit time are used.
    pub fn apply(&self, df: &DataFrame) -> Result<DesignMatrix> {
        if !self.is_fitted {
            return Err(HeatloadError::RecipeNotFitted);
        }

        let mut result = self.predictor_frame(df)?;

        if let Some(ref imputer) = self.numeric_imputer {
            result = imputer.transform(&result)?;
        }
        if let Some(ref imputer) = self.categorical_imputer {
            result = imputer.transform(&result)?;
        }
        result = self.scaler.transform(&result)?;
        result = self.encoder.transform(&result)?;

        let selected = result.select(self.output_columns.iter().map(|s| s.as_str()))?;
        let values = selected.to_ndarray::<Float64Type>(IndexOrder::C)?;

        Ok(DesignMatrix {
            columns: self.output_columns.clone(),
            values,
        })
    }

    /// Extract the response column as a dense vector
    pub fn target_vector(&self, df: &DataFrame) -> Result<Array1<f64>> {
        let series = df
            .column(&self.config.target)
            .map_err(|_| HeatloadError::ColumnNotFound(self.config.target.clone()))?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let ca = series.f64()?;

        if ca.null_count() > 0 {
            return Err(HeatloadError::ValidationError(format!(
                "response column '{}' has missing values",
                self.config.target
            )));
        }

        Ok(Array1::from_iter(ca.into_iter().flatten()))
    }

    /// Feature matrix column names, in output order
    pub fn output_columns(&self) -> &[String] {
        &self.output_columns
    }

    /// Numeric predictor column names
    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric_columns
    }

    /// Categorical predictor column names
    pub fn categorical_columns(&self) -> &[String] {
        &self.categorical_columns
    }

    pub fn config(&self) -> &RecipeConfig {
        &self.config
    }

    /// Drop the response and the configured drop list; cast integer
    /// predictors to Float64 for consistent processing.
    fn predictor_frame(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut result = df.clone();

        let mut to_drop: Vec<&str> = vec![self.config.target.as_str()];
        to_drop.extend(self.config.drop_columns.iter().map(|s| s.as_str()));
        for name in to_drop {
            if result.get_column_names().iter().any(|c| c.as_str() == name) {
                result = result.drop(name)?;
            }
        }

        Self::cast_numeric_to_f64(&result)
    }

    fn cast_numeric_to_f64(df: &DataFrame) -> Result<DataFrame> {
        let mut result = df.clone();
        for col in df.get_columns() {
            match col.dtype() {
                DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
                | DataType::Float32 => {
                    let casted = col.as_materialized_series().cast(&DataType::Float64)?;
                    result = result.with_column(casted)?.clone();
                }
                _ => {}
            }
        }
        Ok(result)
    }

    fn detect_column_types(&mut self, df: &DataFrame) {
        self.numeric_columns.clear();
        self.categorical_columns.clear();

        for col in df.get_columns() {
            let name = col.name().to_string();
            match col.dtype() {
                DataType::Float64 => self.numeric_columns.push(name),
                DataType::String => self.categorical_columns.push(name),
                _ => {}
            }
        }
    }
}

impl Default for Recipe {
    fn default() -> Self {
        Self::new()
    }
}
