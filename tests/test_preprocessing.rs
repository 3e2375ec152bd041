//! Integration test: Recipe fit/apply across separate frames

use heatload::feature_engineering::engineer;
use heatload::preprocessing::{Recipe, RecipeConfig};
use polars::prelude::*;

/// An engineered frame the way the pipeline hands it to the recipe:
/// categoricals already string-typed, derived columns present.
fn engineered_frame() -> DataFrame {
    let raw = df!(
        "relative_compactness" => &[0.98, 0.90, 0.86, 0.76, 0.66, 0.64, 0.71, 0.79],
        "surface_area" => &[514.5, 563.5, 588.0, 661.5, 759.5, 784.0, 710.5, 637.0],
        "wall_area" => &[294.0, 318.5, 294.0, 416.5, 318.5, 343.0, 269.5, 343.0],
        "roof_area" => &[110.25, 122.5, 147.0, 122.5, 220.5, 220.5, 220.5, 147.0],
        "overall_height" => &[7.0, 7.0, 3.5, 3.5, 3.5, 3.5, 3.5, 7.0],
        "orientation" => &["2", "3", "4", "5", "2", "3", "4", "5"],
        "glazing_area" => &[0.0, 0.1, 0.25, 0.4, 0.1, 0.25, 0.4, 0.1],
        "glazing_area_distribution" => &["0", "1", "3", "5", "2", "4", "1", "3"],
        "heating_load" => &[15.55, 20.84, 12.0, 32.0, 11.1, 14.3, 13.9, 28.5],
    )
    .unwrap();
    engineer(&raw).unwrap()
}

#[test]
fn test_recipe_train_and_test_matrices_align() {
    let df = engineered_frame();
    let train = df.slice(0, 6);
    let test = df.slice(6, 2);

    let mut recipe = Recipe::new();
    recipe.fit(&train).unwrap();

    let train_matrix = recipe.apply(&train).unwrap();
    let test_matrix = recipe.apply(&test).unwrap();

    assert_eq!(train_matrix.columns, test_matrix.columns);
    assert_eq!(train_matrix.n_rows(), 6);
    assert_eq!(test_matrix.n_rows(), 2);
    assert!(train_matrix.values.iter().all(|v| v.is_finite()));
    assert!(test_matrix.values.iter().all(|v| v.is_finite()));
}

#[test]
fn test_recipe_statistics_frozen_after_fit() {
    let df = engineered_frame();
    let train = df.slice(0, 6);
    let test = df.slice(6, 2);

    let mut recipe = Recipe::new();
    recipe.fit(&train).unwrap();

    // Applying to any frame must not touch the fitted state
    let before = serde_json::to_string(&recipe).unwrap();
    recipe.apply(&test).unwrap();
    recipe.apply(&train).unwrap();
    let after = serde_json::to_string(&recipe).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_recipe_imputes_missing_values() {
    let df = df!(
        "relative_compactness" => &[Some(0.98), None, Some(0.86), Some(0.76)],
        "surface_area" => &[514.5, 563.5, 588.0, 661.5],
        "wall_area" => &[294.0, 318.5, 294.0, 416.5],
        "roof_area" => &[110.25, 122.5, 147.0, 122.5],
        "overall_height" => &[7.0, 7.0, 3.5, 3.5],
        "orientation" => &["2", "3", "4", "5"],
        "glazing_area" => &[0.0, 0.1, 0.25, 0.4],
        "glazing_area_distribution" => &["0", "1", "3", "5"],
        "glazing_type" => &[Some("None"), Some("Present"), None, Some("Present")],
        "surface_height" => &[3601.5, 3944.5, 2058.0, 2315.25],
        "heating_load" => &[15.55, 20.84, 12.0, 32.0],
    )
    .unwrap();

    let mut recipe = Recipe::new();
    recipe.fit(&df).unwrap();
    let matrix = recipe.apply(&df).unwrap();

    // No NaN survives imputation plus scaling
    assert!(matrix.values.iter().all(|v| v.is_finite()));
}

#[test]
fn test_recipe_respects_custom_drop_list() {
    let df = engineered_frame();
    let config = RecipeConfig::default().with_drop_columns(vec![
        "orientation".to_string(),
        "glazing_area_distribution".to_string(),
        "roof_area".to_string(),
    ]);

    let mut recipe = Recipe::with_config(config);
    recipe.fit(&df).unwrap();
    assert!(!recipe.output_columns().contains(&"roof_area".to_string()));
}

#[test]
fn test_recipe_output_order_numeric_then_indicators() {
    let df = engineered_frame();
    let mut recipe = Recipe::new();
    recipe.fit(&df).unwrap();

    let columns = recipe.output_columns();
    let first_indicator = columns
        .iter()
        .position(|c| c.starts_with("glazing_type_"))
        .unwrap();
    for (i, name) in columns.iter().enumerate() {
        if recipe.numeric_columns().contains(name) {
            assert!(i < first_indicator, "numeric column {name} after indicators");
        }
    }
}
