//! Dataset schema, loading, splitting, and diagnostics
//!
//! One row is one building observation. The schema is fixed: eight physical
//! predictors plus the `heating_load` response. Extra spreadsheet columns
//! are dropped at load time; missing required columns are a hard error.

mod loader;
mod split;

pub use loader::{DataLoader, FileInfo};
pub use split::train_test_split;

use crate::error::{HeatloadError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Response column name
pub const TARGET: &str = "heating_load";

/// Columns coerced to categorical (string) type
pub const CATEGORICAL_COLUMNS: [&str; 2] = ["orientation", "glazing_area_distribution"];

/// All required columns, in schema order
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "relative_compactness",
    "surface_area",
    "wall_area",
    "roof_area",
    "overall_height",
    "orientation",
    "glazing_area",
    "glazing_area_distribution",
    "heating_load",
];

/// Check that every required column is present.
pub fn validate_schema(df: &DataFrame) -> Result<()> {
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();
    for required in REQUIRED_COLUMNS {
        if !names.iter().any(|n| n == required) {
            return Err(HeatloadError::ColumnNotFound(required.to_string()));
        }
    }
    Ok(())
}

/// Keep only the schema columns, in schema order.
pub fn select_schema(df: &DataFrame) -> Result<DataFrame> {
    validate_schema(df)?;
    Ok(df.select(REQUIRED_COLUMNS)?)
}

/// Cast the categorical code columns to string type; no other columns altered.
///
/// Float-typed codes go through Int64 first so that `2.0` and `2` coerce to
/// the same category label.
pub fn coerce_types(df: &DataFrame) -> Result<DataFrame> {
    let mut result = df.clone();
    for col_name in CATEGORICAL_COLUMNS {
        let column = df
            .column(col_name)
            .map_err(|_| HeatloadError::ColumnNotFound(col_name.to_string()))?;
        let series = column.as_materialized_series();

        let as_int = match series.dtype() {
            DataType::Float32 | DataType::Float64 => series.cast(&DataType::Int64)?,
            _ => series.clone(),
        };
        let as_str = as_int.cast(&DataType::String)?;

        result = result.with_column(as_str)?.clone();
    }
    Ok(result)
}

/// One row flagged by the response-outlier scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlierRow {
    pub index: usize,
    pub value: f64,
    pub z_score: f64,
}

/// Z-score diagnostic over the response column.
///
/// Flagged rows are reported, never removed; filtering the data is a
/// decision left to whoever reads the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlierReport {
    pub column: String,
    pub threshold: f64,
    pub mean: f64,
    pub std: f64,
    pub rows: Vec<OutlierRow>,
}

impl OutlierReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Scan the response for rows beyond `threshold` standard deviations.
pub fn response_outliers(df: &DataFrame, column: &str, threshold: f64) -> Result<OutlierReport> {
    let series = df
        .column(column)
        .map_err(|_| HeatloadError::ColumnNotFound(column.to_string()))?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let ca = series.f64()?;

    if df.height() == 0 {
        return Err(HeatloadError::ValidationError(
            "cannot compute outlier statistics on zero rows".to_string(),
        ));
    }

    let mean = ca.mean().unwrap_or(0.0);
    let std = ca.std(1).unwrap_or(0.0);

    let mut rows = Vec::new();
    if std > 0.0 {
        for (index, opt) in ca.into_iter().enumerate() {
            if let Some(value) = opt {
                let z_score = (value - mean) / std;
                if z_score.abs() > threshold {
                    rows.push(OutlierRow { index, value, z_score });
                }
            }
        }
    }

    Ok(OutlierReport {
        column: column.to_string(),
        threshold,
        mean,
        std,
        rows,
    })
}
