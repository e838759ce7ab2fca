//! Error types for Catenary.
//!
//! This module provides a unified error handling approach using `thiserror`.

use thiserror::Error;

use crate::eval::EvalError;

/// Result type alias for Catenary operations.
pub type Result<T> = std::result::Result<T, CatenaryError>;

/// Errors that can occur in Catenary.
#[derive(Debug, Error)]
pub enum CatenaryError {
    /// Expression could not be evaluated.
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// Plot domain is empty or reversed.
    #[error("invalid domain: start {start} must be less than end {end}")]
    InvalidDomain {
        /// Requested lower bound.
        start: f64,
        /// Requested upper bound.
        end: f64,
    },

    /// Every sampled point was NaN or infinite.
    #[error("no valid points to plot")]
    NoValidPoints,

    /// Failed to access clipboard.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal error.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl CatenaryError {
    /// Create an InvalidDomain error.
    pub fn invalid_domain(start: f64, end: f64) -> Self {
        Self::InvalidDomain { start, end }
    }
}
