//! Error types for ffjpeg-core operations.
//!
//! The [`Error`] enum covers the failure modes of buffer construction:
//! - Allocation of pixel storage
//! - Dimension and length validation
//! - Channel count validation
//!
//! # Usage
//!
//! ```rust
//! use ffjpeg_core::{Error, PixelBuffer};
//!
//! let err = PixelBuffer::from_data(2, 2, 3, vec![0; 5]).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```
//!
//! # Used By
//!
//! - [`crate::buffer::PixelBuffer`] - construction and allocation
//! - `ffjpeg-ops` - wrapped in `OpsError::Core`
//! - `ffjpeg-io` - wrapped in `IoError::Core`

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or allocating pixel buffers.
///
/// # Categories
///
/// - **Allocation errors**: [`AllocationFailed`](Error::AllocationFailed)
/// - **Dimension errors**: [`InvalidDimensions`](Error::InvalidDimensions)
/// - **Format errors**: [`UnsupportedChannels`](Error::UnsupportedChannels)
#[derive(Debug, Error)]
pub enum Error {
    /// Memory allocation failed.
    ///
    /// Returned when the allocator cannot provide storage for a new buffer.
    /// Reallocating transforms recover from this locally.
    #[error("failed to allocate {requested} bytes: {reason}")]
    AllocationFailed {
        /// Bytes requested
        requested: usize,
        /// Failure reason
        reason: String,
    },

    /// Invalid buffer dimensions.
    ///
    /// Returned when `width * height * channels` overflows or does not match
    /// the length of the supplied data.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Channel count outside 1..=4.
    #[error("unsupported channel count: {0} (expected 1-4)")]
    UnsupportedChannels(u8),
}

impl Error {
    /// Creates an [`Error::AllocationFailed`] error.
    #[inline]
    pub fn allocation_failed(requested: usize, reason: impl Into<String>) -> Self {
        Self::AllocationFailed {
            requested,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is an allocation error.
    #[inline]
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }
}
