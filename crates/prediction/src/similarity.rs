//! Vector similarity and least-squares helpers.

use crate::error::{PredictionError, Result};

/// Calculate cosine similarity between two vectors.
///
/// Returns 0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(PredictionError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot_product / (norm_a * norm_b))
    }
}

/// Ordinary least-squares fit of `ys` against `xs`.
///
/// Returns `(slope, intercept)`. When all `xs` are equal the fit is a
/// flat line through the mean of `ys`.
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Result<(f64, f64)> {
    if xs.len() != ys.len() {
        return Err(PredictionError::DimensionMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }
    if xs.len() < 2 {
        return Err(PredictionError::InsufficientData {
            needed: 2,
            got: xs.len(),
        });
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        covariance += (x - mean_x) * (y - mean_y);
        variance += (x - mean_x) * (x - mean_x);
    }

    if variance == 0.0 {
        return Ok((0.0, mean_y));
    }

    let slope = covariance / variance;
    Ok((slope, mean_y - slope * mean_x))
}

/// Arithmetic mean and population standard deviation.
pub(crate) fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}
