//! Derived feature columns
//!
//! Both derived columns are pure functions of same-row values, so applying
//! this to train and test independently cannot leak statistics across the
//! split.

use crate::error::{HeatloadError, Result};
use polars::prelude::*;

/// Column added by [`engineer`]: "None" when no glazing is distributed,
/// "Present" otherwise.
pub const GLAZING_TYPE: &str = "glazing_type";

/// Column added by [`engineer`]: surface area times overall height.
pub const SURFACE_HEIGHT: &str = "surface_height";

/// Add `glazing_type` and `surface_height` to the frame.
///
/// Expects the frame to have passed [`crate::data::coerce_types`], so
/// `glazing_area_distribution` is a string column of category codes.
pub fn engineer(df: &DataFrame) -> Result<DataFrame> {
    let mut result = df.clone();

    // glazing_type: binary category derived from the distribution code
    let gad = df
        .column("glazing_area_distribution")
        .map_err(|_| HeatloadError::ColumnNotFound("glazing_area_distribution".to_string()))?
        .as_materialized_series()
        .clone();
    let gad = if gad.dtype() == &DataType::String {
        gad
    } else {
        // Tolerate un-coerced numeric codes
        let as_int = match gad.dtype() {
            DataType::Float32 | DataType::Float64 => gad.cast(&DataType::Int64)?,
            _ => gad,
        };
        as_int.cast(&DataType::String)?
    };
    let gad_ca = gad.str()?;
    let glazing_type: StringChunked = gad_ca
        .into_iter()
        .map(|opt| opt.map(|code| if code == "0" { "None" } else { "Present" }))
        .collect();
    result = result
        .with_column(glazing_type.with_name(GLAZING_TYPE.into()).into_series())?
        .clone();

    // surface_height: exact elementwise product, nulls propagate
    let surface = df
        .column("surface_area")
        .map_err(|_| HeatloadError::ColumnNotFound("surface_area".to_string()))?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let height = df
        .column("overall_height")
        .map_err(|_| HeatloadError::ColumnNotFound("overall_height".to_string()))?
        .as_materialized_series()
        .cast(&DataType::Float64)?;

    let surface_height: Float64Chunked = surface
        .f64()?
        .into_iter()
        .zip(height.f64()?.into_iter())
        .map(|(s, h)| match (s, h) {
            (Some(s), Some(h)) => Some(s * h),
            _ => None,
        })
        .collect();
    result = result
        .with_column(surface_height.with_name(SURFACE_HEIGHT.into()).into_series())?
        .clone();

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glazing_type_mapping() {
        let df = df!(
            "surface_area" => &[514.5, 563.5, 588.0],
            "overall_height" => &[7.0, 3.5, 7.0],
            "glazing_area_distribution" => &["0", "3", "5"],
        )
        .unwrap();

        let engineered = engineer(&df).unwrap();
        let ca = engineered.column(GLAZING_TYPE).unwrap().str().unwrap().clone();
        let values: Vec<&str> = ca.into_iter().flatten().collect();
        assert_eq!(values, vec!["None", "Present", "Present"]);
    }

    #[test]
    fn test_glazing_type_numeric_codes() {
        // Works even when coercion was skipped
        let df = df!(
            "surface_area" => &[514.5],
            "overall_height" => &[7.0],
            "glazing_area_distribution" => &[0i64],
        )
        .unwrap();

        let engineered = engineer(&df).unwrap();
        let ca = engineered.column(GLAZING_TYPE).unwrap().str().unwrap().clone();
        assert_eq!(ca.get(0), Some("None"));
    }

    #[test]
    fn test_surface_height_exact() {
        let df = df!(
            "surface_area" => &[514.5, 563.5, 588.0],
            "overall_height" => &[7.0, 3.5, 7.0],
            "glazing_area_distribution" => &["0", "1", "2"],
        )
        .unwrap();

        let engineered = engineer(&df).unwrap();
        let ca = engineered.column(SURFACE_HEIGHT).unwrap().f64().unwrap().clone();
        let values: Vec<f64> = ca.into_iter().flatten().collect();
        assert_eq!(values, vec![514.5 * 7.0, 563.5 * 3.5, 588.0 * 7.0]);
    }

    #[test]
    fn test_engineer_preserves_existing_columns() {
        let df = df!(
            "surface_area" => &[514.5],
            "overall_height" => &[7.0],
            "glazing_area_distribution" => &["0"],
        )
        .unwrap();
        let engineered = engineer(&df).unwrap();
        assert_eq!(engineered.width(), df.width() + 2);
        assert_eq!(engineered.height(), df.height());
    }

    #[test]
    fn test_engineer_missing_column() {
        let df = df!("surface_area" => &[514.5]).unwrap();
        assert!(engineer(&df).is_err());
    }
}
