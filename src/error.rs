//! Error types shared by the annealing components.

use thiserror::Error;

use crate::sa::Schedule;

/// Broad classification of an [`AnnealError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid cooling schedule parameters.
    Configuration,
    /// Invalid data shape or run argument.
    Domain,
}

/// Errors raised while configuring or running the annealer.
///
/// All validation is eager: an error aborts the call before any state is
/// touched, and no partial result is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnealError {
    #[error("{schedule:?} cooling requires alpha to be set")]
    MissingAlpha { schedule: Schedule },

    #[error("{schedule:?} cooling requires a positive step count")]
    ZeroSteps { schedule: Schedule },

    #[error("invalid alpha {alpha}: must be finite and non-negative")]
    InvalidAlpha { alpha: f64 },

    #[error("invalid temperature range [{tm_min}, {tm_max}]: need 0 <= tm_min <= tm_max, tm_max > 0")]
    InvalidTemperature { tm_min: f64, tm_max: f64 },

    #[error("subsample of {requested} rows requested from a dataset of {available}")]
    SubsampleTooLarge { requested: usize, available: usize },

    #[error("perturbation size {n} is below the minimum of 2")]
    ShuffleTooSmall { n: usize },

    #[error("perturbation size {n} exceeds the {len} available positions")]
    ShuffleTooLarge { n: usize, len: usize },

    #[error("dataset must have at least one dimension")]
    ZeroDimensions,

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("buffer of {len} values cannot be shaped as {rows} x {dims}")]
    ShapeMismatch { len: usize, rows: usize, dims: usize },

    #[error("row index {index} out of bounds for {rows} rows")]
    IndexOutOfBounds { index: usize, rows: usize },
}

impl AnnealError {
    /// Returns whether this is a configuration or a domain error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnnealError::MissingAlpha { .. }
            | AnnealError::ZeroSteps { .. }
            | AnnealError::InvalidAlpha { .. }
            | AnnealError::InvalidTemperature { .. } => ErrorKind::Configuration,
            _ => ErrorKind::Domain,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnnealError>;
