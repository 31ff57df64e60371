//! Prediction errors.

/// Error type for prediction operations.
pub type Result<T> = std::result::Result<T, PredictionError>;

/// Errors raised by the numeric helpers.
///
/// Task and objective predictions never fail; these only surface from
/// the vector and regression helpers when handed malformed input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    /// Two vectors of different length were compared
    #[error("Dimension mismatch: {left} vs {right}")]
    DimensionMismatch {
        /// Length of the first input
        left: usize,
        /// Length of the second input
        right: usize,
    },

    /// Not enough points to fit
    #[error("Insufficient data: need at least {needed} points, got {got}")]
    InsufficientData {
        /// Points required
        needed: usize,
        /// Points supplied
        got: usize,
    },
}
