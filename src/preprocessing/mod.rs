//! Preprocessing recipe
//!
//! A [`Recipe`] is a fitted, reusable bundle of preprocessing statistics
//! learned once from the training set: imputation fill values, one-hot
//! vocabularies, and normalization parameters. Applying it to any frame is
//! deterministic and never updates the fitted statistics.

mod config;
mod encoder;
mod imputer;
mod recipe;
mod scaler;

pub use config::RecipeConfig;
pub use encoder::OneHotEncoder;
pub use imputer::{ImputeStrategy, Imputer};
pub use recipe::Recipe;
pub use scaler::StandardScaler;

use crate::error::{HeatloadError, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Fixed-width numeric feature matrix produced by [`Recipe::apply`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignMatrix {
    /// Column names, in the order of the matrix columns
    pub columns: Vec<String>,
    /// Row-major feature values
    pub values: Array2<f64>,
}

impl DesignMatrix {
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_cols(&self) -> usize {
        self.values.ncols()
    }

    /// Build a new matrix keeping only the named columns, in the given order.
    pub fn select_columns(&self, names: &[String]) -> Result<DesignMatrix> {
        let mut indices = Vec::with_capacity(names.len());
        for name in names {
            let idx = self
                .columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| HeatloadError::ColumnNotFound(name.clone()))?;
            indices.push(idx);
        }

        let mut values = Array2::zeros((self.values.nrows(), indices.len()));
        for (out_j, &j) in indices.iter().enumerate() {
            values.column_mut(out_j).assign(&self.values.column(j));
        }

        Ok(DesignMatrix {
            columns: names.to_vec(),
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_select_columns_reorders() {
        let m = DesignMatrix {
            columns: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            values: array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
        };
        let picked = m
            .select_columns(&["c".to_string(), "a".to_string()])
            .unwrap();
        assert_eq!(picked.columns, vec!["c", "a"]);
        assert_eq!(picked.values, array![[3.0, 1.0], [6.0, 4.0]]);
    }

    #[test]
    fn test_select_columns_unknown_name() {
        let m = DesignMatrix {
            columns: vec!["a".to_string()],
            values: array![[1.0]],
        };
        assert!(m.select_columns(&["z".to_string()]).is_err());
    }
}
