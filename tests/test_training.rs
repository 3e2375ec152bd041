//! Integration test: OLS fitting, the collinearity guard, and cross-validation

use heatload::feature_engineering::engineer;
use heatload::preprocessing::{DesignMatrix, RecipeConfig};
use heatload::training::{cross_validate, fit_ols_guarded, LinearRegression, RegressionMetrics};
use ndarray::{Array1, Array2};
use polars::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn random_matrix(n_rows: usize, n_cols: usize, seed: u64) -> Array2<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Array2::from_shape_fn((n_rows, n_cols), |_| rng.gen_range(-1.0..1.0))
}

#[test]
fn test_ols_recovers_known_coefficients() {
    let x = random_matrix(200, 3, 1);
    let y: Array1<f64> = x
        .rows()
        .into_iter()
        .map(|row| 4.0 * row[0] - 2.5 * row[1] + 0.5 * row[2] + 10.0)
        .collect();

    let mut model = LinearRegression::new();
    model.fit(&x, &y).unwrap();

    let coefs = model.coefficients.as_ref().unwrap();
    assert!((coefs[0] - 4.0).abs() < 1e-8);
    assert!((coefs[1] + 2.5).abs() < 1e-8);
    assert!((coefs[2] - 0.5).abs() < 1e-8);
    assert!((model.intercept.unwrap() - 10.0).abs() < 1e-8);

    let pred = model.predict(&x).unwrap();
    let metrics = RegressionMetrics::compute(&y, &pred).unwrap();
    assert!(metrics.rmse < 1e-8);
    assert!((metrics.r_squared - 1.0).abs() < 1e-12);
}

#[test]
fn test_guarded_fit_drops_dependent_column() {
    let base = random_matrix(100, 2, 2);
    let mut values = Array2::zeros((100, 3));
    for i in 0..100 {
        values[[i, 0]] = base[[i, 0]];
        values[[i, 1]] = base[[i, 1]];
        values[[i, 2]] = base[[i, 0]] + base[[i, 1]];
    }
    let y: Array1<f64> = base
        .rows()
        .into_iter()
        .map(|row| 3.0 * row[0] + row[1])
        .collect();

    let matrix = DesignMatrix {
        columns: vec!["x0".to_string(), "x1".to_string(), "x0_plus_x1".to_string()],
        values,
    };

    let fit = fit_ols_guarded(&matrix, &y).unwrap();
    assert_eq!(fit.dropped, vec!["x0_plus_x1".to_string()]);
    assert_eq!(fit.retained, vec!["x0".to_string(), "x1".to_string()]);

    let x = matrix.select_columns(&fit.retained).unwrap();
    let pred = fit.model.predict(&x.values).unwrap();
    let metrics = RegressionMetrics::compute(&y, &pred).unwrap();
    assert!(metrics.rmse < 1e-8);
}

#[test]
fn test_guarded_fit_keeps_full_rank_matrix_intact() {
    let values = random_matrix(50, 4, 3);
    let y: Array1<f64> = values.rows().into_iter().map(|row| row.sum()).collect();

    let matrix = DesignMatrix {
        columns: (0..4).map(|i| format!("x{i}")).collect(),
        values,
    };

    let fit = fit_ols_guarded(&matrix, &y).unwrap();
    assert!(fit.dropped.is_empty());
    assert_eq!(fit.retained.len(), 4);
}

#[test]
fn test_cross_validation_on_engineered_frame() {
    let n = 60;
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let glazing_levels = [0.0, 0.1, 0.25, 0.4];

    let mut compactness = Vec::with_capacity(n);
    let mut surface = Vec::with_capacity(n);
    let mut wall = Vec::with_capacity(n);
    let mut roof = Vec::with_capacity(n);
    let mut height = Vec::with_capacity(n);
    let mut orientation = Vec::with_capacity(n);
    let mut glazing = Vec::with_capacity(n);
    let mut glazing_dist = Vec::with_capacity(n);
    let mut load = Vec::with_capacity(n);

    for i in 0..n {
        let sa = 500.0 + rng.gen_range(0.0..300.0);
        let h = if i % 2 == 0 { 3.5 } else { 7.0 };
        let ga = glazing_levels[i % glazing_levels.len()];

        compactness.push(0.6 + rng.gen_range(0.0..0.4));
        surface.push(sa);
        wall.push(245.0 + rng.gen_range(0.0..200.0));
        roof.push(110.0 + rng.gen_range(0.0..120.0));
        height.push(h);
        orientation.push(format!("{}", 2 + (i % 4)));
        glazing.push(ga);
        glazing_dist.push(format!("{}", i % 6));
        load.push(2.0 * h + 0.01 * sa + 5.0 * ga);
    }

    let raw = df!(
        "relative_compactness" => &compactness,
        "surface_area" => &surface,
        "wall_area" => &wall,
        "roof_area" => &roof,
        "overall_height" => &height,
        "orientation" => &orientation,
        "glazing_area" => &glazing,
        "glazing_area_distribution" => &glazing_dist,
        "heating_load" => &load,
    )
    .unwrap();
    let df = engineer(&raw).unwrap();

    let results = cross_validate(&df, &RecipeConfig::default(), 5, 42).unwrap();

    assert_eq!(results.n_folds, 5);
    assert_eq!(results.fold_metrics.len(), 5);
    assert!(results.mean_rmse < 1e-6, "cv rmse = {}", results.mean_rmse);
    assert!(results.mean_r_squared > 0.999999);
    assert!(results.std_rmse >= 0.0);

    // Same seed, same folds, same numbers
    let again = cross_validate(&df, &RecipeConfig::default(), 5, 42).unwrap();
    assert_eq!(results.mean_rmse, again.mean_rmse);
}
