//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Buffer construction or allocation failed.
    #[error(transparent)]
    Core(#[from] ffjpeg_core::Error),
}

impl OpsError {
    /// Returns `true` if the operation ran out of memory.
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_allocation_error())
    }
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
