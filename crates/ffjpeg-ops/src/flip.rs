//! Vertical flip (top-bottom mirror).
//!
//! # Example
//!
//! ```rust
//! use ffjpeg_core::PixelBuffer;
//! use ffjpeg_ops::flip::flip_y;
//!
//! let mut buf = PixelBuffer::from_data(1, 2, 3, vec![
//!     255, 0, 0, // Top pixel
//!     0, 255, 0, // Bottom pixel
//! ]).unwrap();
//! flip_y(&mut buf);
//! assert_eq!(buf.data(), &[0, 255, 0, 255, 0, 0]);
//! ```

use crate::parallel::swap_mirrored_rows;
use ffjpeg_core::PixelBuffer;
use tracing::trace;

/// Reverses the row order of `buffer` in place.
///
/// Row `y` trades places with row `height - 1 - y` for every `y` below
/// `height / 2`. With an odd height the middle row stays where it is.
/// Buffers with `height <= 1` or zero width are left alone.
pub fn flip_y(buffer: &mut PixelBuffer) {
    let height = buffer.height() as usize;
    let row_len = buffer.row_len();
    trace!(width = buffer.width(), height, channels = buffer.channels(), "flip_y");

    if height <= 1 || row_len == 0 {
        return;
    }

    let half = height / 2;
    let (top, rest) = buffer.data_mut().split_at_mut(half * row_len);
    // For odd heights `rest` begins with the middle row, which is skipped.
    let bottom_start = rest.len() - half * row_len;
    swap_mirrored_rows(top, &mut rest[bottom_start..], row_len);
}

/// Returns `true` if [`flip_y`] would modify `buffer`.
#[inline]
pub fn flips(buffer: &PixelBuffer) -> bool {
    buffer.height() > 1 && buffer.row_len() > 0
}
