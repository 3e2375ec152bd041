//! Missing value imputation

use crate::error::{HeatloadError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Strategy for filling missing values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImputeStrategy {
    /// Fill with the column median (numeric columns)
    Median,
    /// Fill with the most frequent value (categorical columns);
    /// ties break to the lexicographically smallest value
    MostFrequent,
}

/// Fitted imputer holding per-column fill values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Imputer {
    strategy: ImputeStrategy,
    numeric_fill: HashMap<String, f64>,
    categorical_fill: HashMap<String, String>,
    is_fitted: bool,
}

impl Imputer {
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self {
            strategy,
            numeric_fill: HashMap::new(),
            categorical_fill: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Compute fill values for the given columns
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| HeatloadError::ColumnNotFound(col_name.to_string()))?;
            let series = column.as_materialized_series();

            match self.strategy {
                ImputeStrategy::Median => {
                    let ca = series
                        .cast(&DataType::Float64)?
                        .f64()?
                        .clone();
                    let median = ca.median().ok_or_else(|| {
                        HeatloadError::ValidationError(format!(
                            "cannot compute median of column '{col_name}' with no values"
                        ))
                    })?;
                    self.numeric_fill.insert(col_name.to_string(), median);
                }
                ImputeStrategy::MostFrequent => {
                    let ca = series.str()?;
                    let mut counts: HashMap<&str, usize> = HashMap::new();
                    for value in ca.into_iter().flatten() {
                        *counts.entry(value).or_insert(0) += 1;
                    }
                    let mode = counts
                        .into_iter()
                        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(a.0)))
                        .map(|(v, _)| v.to_string())
                        .ok_or_else(|| {
                            HeatloadError::ValidationError(format!(
                                "cannot compute mode of column '{col_name}' with no values"
                            ))
                        })?;
                    self.categorical_fill.insert(col_name.to_string(), mode);
                }
            }
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Fill missing values using the fitted statistics
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(HeatloadError::RecipeNotFitted);
        }

        let mut result = df.clone();

        for (col_name, fill) in &self.numeric_fill {
            let Ok(column) = df.column(col_name) else {
                continue;
            };
            let series = column.as_materialized_series().cast(&DataType::Float64)?;
            let filled: Float64Chunked = series
                .f64()?
                .into_iter()
                .map(|opt| Some(opt.unwrap_or(*fill)))
                .collect();
            result = result
                .with_column(filled.with_name(col_name.as_str().into()).into_series())?
                .clone();
        }

        for (col_name, fill) in &self.categorical_fill {
            let Ok(column) = df.column(col_name) else {
                continue;
            };
            let series = column.as_materialized_series();
            let filled: StringChunked = series
                .str()?
                .into_iter()
                .map(|opt| Some(opt.unwrap_or(fill.as_str())))
                .collect();
            result = result
                .with_column(filled.with_name(col_name.as_str().into()).into_series())?
                .clone();
        }

        Ok(result)
    }

    /// Fitted numeric fill values
    pub fn numeric_fill(&self) -> &HashMap<String, f64> {
        &self.numeric_fill
    }

    /// Fitted categorical fill values
    pub fn categorical_fill(&self) -> &HashMap<String, String> {
        &self.categorical_fill
    }
}
