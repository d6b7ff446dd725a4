//! Color-depth reduction (posterization).
//!
//! `total_colors` is read as an approximate palette budget shared evenly by
//! the three color channels, so each channel gets `cbrt(total_colors)` levels.
//! Every color sample snaps to the nearest point of a uniform grid over
//! `[0, 255]`; pixels are processed independently of each other.
//!
//! # Example
//!
//! ```rust
//! use ffjpeg_core::PixelBuffer;
//! use ffjpeg_ops::quantize::{limit_colors, quantize_levels};
//!
//! assert_eq!(quantize_levels(27), Some(3));
//!
//! let mut buf = PixelBuffer::from_data(2, 1, 3, vec![10, 100, 200, 63, 64, 250]).unwrap();
//! limit_colors(&mut buf, 27);
//! assert_eq!(buf.data(), &[0, 128, 255, 0, 128, 255]);
//! ```

use crate::parallel::for_each_row;
use ffjpeg_core::{to_sample, PixelBuffer};
use tracing::{debug, trace};

/// Fewest levels a quantized channel keeps.
pub const MIN_LEVELS: u32 = 2;

/// Most levels a quantized channel can have (one per 8-bit value).
pub const MAX_LEVELS: u32 = 256;

/// Number of levels per channel for a `total_colors` budget.
///
/// Returns `None` when `total_colors < 2`, in which case [`limit_colors`]
/// does nothing.
pub fn quantize_levels(total_colors: u32) -> Option<u32> {
    if total_colors < 2 {
        return None;
    }
    let levels = (total_colors as f64).cbrt().round() as u32;
    Some(levels.clamp(MIN_LEVELS, MAX_LEVELS))
}

/// Reduces the tonal levels of the first three channels of `buffer` in place.
///
/// Channels beyond the third are left as they are. No-op when the buffer has
/// fewer than three channels or `total_colors < 2`.
pub fn limit_colors(buffer: &mut PixelBuffer, total_colors: u32) {
    let channels = buffer.channels() as usize;
    trace!(width = buffer.width(), height = buffer.height(), channels, total_colors, "limit_colors");

    if channels < 3 {
        return;
    }
    let Some(levels) = quantize_levels(total_colors) else {
        return;
    };

    let step = 255.0f32 / (levels - 1) as f32;
    debug!(levels, step, "Quantizing color channels");

    let table = level_table(step);
    let row_len = buffer.row_len();
    for_each_row(buffer.data_mut(), row_len, |_, row| {
        for px in row.chunks_exact_mut(channels) {
            for v in &mut px[..3] {
                *v = table[*v as usize];
            }
        }
    });
}

/// Maps every 8-bit value to its quantized counterpart for grid `step`.
fn level_table(step: f32) -> [u8; 256] {
    std::array::from_fn(|v| {
        let q = (v as f32 / step).round();
        to_sample((q * step).clamp(0.0, 255.0))
    })
}
