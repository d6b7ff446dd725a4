//! Tagged result of a transform that may hand back its input untouched.

use crate::PixelBuffer;

/// What a consuming transform did with the buffer it was given.
///
/// Both arms own a valid buffer, so the caller always has something to keep
/// going with; the tag says whether the data was actually replaced.
///
/// ```rust
/// use ffjpeg_core::{PixelBuffer, TransformOutcome};
///
/// let buf = PixelBuffer::try_new(2, 2, 1).unwrap();
/// let outcome = TransformOutcome::Unchanged(buf);
/// assert!(!outcome.is_transformed());
/// assert_eq!(outcome.into_buffer().channels(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformOutcome {
    /// A new buffer replaced the input; the input storage has been released.
    Transformed(PixelBuffer),
    /// The transform did not apply (no-op input or recoverable failure).
    Unchanged(PixelBuffer),
}

impl TransformOutcome {
    /// Returns `true` for [`TransformOutcome::Transformed`].
    #[inline]
    pub fn is_transformed(&self) -> bool {
        matches!(self, Self::Transformed(_))
    }

    /// Borrows the carried buffer.
    #[inline]
    pub fn buffer(&self) -> &PixelBuffer {
        match self {
            Self::Transformed(buf) | Self::Unchanged(buf) => buf,
        }
    }

    /// Unwraps the carried buffer regardless of tag.
    #[inline]
    pub fn into_buffer(self) -> PixelBuffer {
        match self {
            Self::Transformed(buf) | Self::Unchanged(buf) => buf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let buf = PixelBuffer::filled(1, 1, &[7]).unwrap();
        let t = TransformOutcome::Transformed(buf.clone());
        assert!(t.is_transformed());
        assert_eq!(t.buffer(), &buf);
        assert_eq!(t.into_buffer(), buf);
    }
}
