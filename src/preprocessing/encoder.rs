//! One-hot encoding with a fitted vocabulary

use crate::error::{HeatloadError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One-hot encoder producing k-1 indicator columns per categorical column.
///
/// The vocabulary is the sorted set of categories seen at fit time; the
/// first category is the reference level and gets no indicator column, so
/// the encoded block stays full rank alongside an intercept. Categories
/// never seen at fit time encode to all zeros.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    vocabulary: BTreeMap<String, Vec<String>>,
    is_fitted: bool,
}

impl Default for OneHotEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self {
            vocabulary: BTreeMap::new(),
            is_fitted: false,
        }
    }

    /// Learn the category vocabulary for each column
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| HeatloadError::ColumnNotFound(col_name.to_string()))?;
            let ca = column.as_materialized_series().str()?.clone();

            let mut categories: Vec<String> = ca
                .into_iter()
                .flatten()
                .map(|s| s.to_string())
                .collect();
            categories.sort_unstable();
            categories.dedup();

            if categories.is_empty() {
                return Err(HeatloadError::ValidationError(format!(
                    "cannot encode column '{col_name}' with no values"
                )));
            }

            self.vocabulary.insert(col_name.to_string(), categories);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Replace each fitted column with its indicator columns
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(HeatloadError::RecipeNotFitted);
        }

        let mut result = df.clone();

        for (col_name, categories) in &self.vocabulary {
            let Ok(column) = df.column(col_name) else {
                continue;
            };
            let ca = column.as_materialized_series().str()?.clone();

            // Skip the reference level (first sorted category)
            for category in categories.iter().skip(1) {
                let indicator: Float64Chunked = ca
                    .clone()
                    .into_iter()
                    .map(|opt| opt.map(|v| if v == category.as_str() { 1.0 } else { 0.0 }))
                    .collect();
                let name = Self::indicator_name(col_name, category);
                result = result
                    .with_column(indicator.with_name(name.as_str().into()).into_series())?
                    .clone();
            }

            result = result.drop(col_name)?;
        }

        Ok(result)
    }

    /// Indicator column names emitted for one fitted column, in output order
    pub fn output_columns(&self, column: &str) -> Vec<String> {
        self.vocabulary
            .get(column)
            .map(|categories| {
                categories
                    .iter()
                    .skip(1)
                    .map(|c| Self::indicator_name(column, c))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The fitted vocabulary for a column
    pub fn vocabulary_for(&self, column: &str) -> Option<&[String]> {
        self.vocabulary.get(column).map(|v| v.as_slice())
    }

    fn indicator_name(column: &str, category: &str) -> String {
        format!("{column}_{category}")
    }
}
