//! Deterministic train/test partitioning

use crate::error::{HeatloadError, Result};
use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Partition `df` into train and test once, without replacement.
///
/// The shuffle is seeded, so the same seed always yields the same partition.
/// `train_fraction` is the share of rows assigned to the training set.
pub fn train_test_split(
    df: &DataFrame,
    train_fraction: f64,
    seed: u64,
) -> Result<(DataFrame, DataFrame)> {
    let n = df.height();
    if n == 0 {
        return Err(HeatloadError::ValidationError(
            "cannot split an empty dataset".to_string(),
        ));
    }
    if !(0.0..1.0).contains(&train_fraction) || train_fraction == 0.0 {
        return Err(HeatloadError::ValidationError(format!(
            "train_fraction must be in (0, 1), got {train_fraction}"
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let split_idx = (n as f64 * train_fraction) as usize;
    if split_idx == 0 || split_idx == n {
        return Err(HeatloadError::ValidationError(format!(
            "split of {n} rows at fraction {train_fraction} leaves one side empty"
        )));
    }

    let train_ca = UInt32Chunked::from_vec(
        "idx".into(),
        indices[..split_idx].iter().map(|&i| i as u32).collect(),
    );
    let test_ca = UInt32Chunked::from_vec(
        "idx".into(),
        indices[split_idx..].iter().map(|&i| i as u32).collect(),
    );

    let train = df.take(&train_ca)?;
    let test = df.take(&test_ca)?;

    Ok((train, test))
}
