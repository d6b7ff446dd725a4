//! Bilinear image resize.
//!
//! Each destination pixel `(x, y)` maps to source coordinate
//! `(x * x_ratio, y * y_ratio)` where `x_ratio = (src_w - 1) / dst_w` and
//! `y_ratio = (src_h - 1) / dst_h`. The four surrounding source pixels are
//! blended with bilinear weights; neighbours past the last column or row are
//! clamped to it.
//!
//! # Example
//!
//! ```rust
//! use ffjpeg_core::PixelBuffer;
//! use ffjpeg_ops::resize::resize_bilinear;
//!
//! let src = PixelBuffer::filled(64, 64, &[12, 34, 56, 255]).unwrap();
//! let dst = resize_bilinear(&src, 128, 96).unwrap();
//! assert_eq!(dst.dimensions(), (128, 96));
//! assert_eq!(dst.channels(), 4);
//! assert_eq!(dst.pixel(127, 95), &[12, 34, 56, 255]);
//! ```

use crate::parallel::for_each_row;
use crate::OpsResult;
use ffjpeg_core::{to_sample, PixelBuffer};
use tracing::{debug, trace};

/// Resizes `src` to `new_width x new_height` with bilinear interpolation.
///
/// The source is only borrowed; the result is a freshly allocated buffer with
/// the same channel count.
///
/// Degenerate geometry is clamped rather than rejected:
/// - a zero target side gives an empty buffer of that shape
/// - an empty source gives a zero-filled target
/// - a single-row or single-column source repeats that row or column
///
/// # Errors
///
/// Returns an allocation error (see [`crate::OpsError::is_allocation_error`])
/// when the destination cannot be allocated. `src` is untouched in that case.
pub fn resize_bilinear(src: &PixelBuffer, new_width: u32, new_height: u32) -> OpsResult<PixelBuffer> {
    let (src_w, src_h) = src.dimensions();
    let channels = src.channels() as usize;
    trace!(src_w, src_h, channels, new_width, new_height, "resize_bilinear");

    let mut dst = PixelBuffer::try_new(new_width, new_height, src.channels())?;
    if dst.is_empty() {
        return Ok(dst);
    }
    if src.is_empty() {
        debug!("Empty source, returning blank {}x{} buffer", new_width, new_height);
        return Ok(dst);
    }

    // src_w, src_h >= 1 from here on.
    let x_ratio = ((src_w - 1) as f32 / new_width as f32).max(0.0);
    let y_ratio = ((src_h - 1) as f32 / new_height as f32).max(0.0);
    debug!(x_ratio, y_ratio, "Resizing {}x{} -> {}x{}", src_w, src_h, new_width, new_height);

    let last_x = src_w as usize - 1;
    let last_y = src_h as usize - 1;
    let src_data = src.data();
    let src_row_len = src.row_len();
    let dst_row_len = dst.row_len();

    for_each_row(dst.data_mut(), dst_row_len, |y, row| {
        let gy = y as f32 * y_ratio;
        let y0 = (gy as usize).min(last_y);
        let y1 = (y0 + 1).min(last_y);
        let dy = gy - y0 as f32;

        let top = &src_data[y0 * src_row_len..(y0 + 1) * src_row_len];
        let bottom = &src_data[y1 * src_row_len..(y1 + 1) * src_row_len];

        for (x, out) in row.chunks_exact_mut(channels).enumerate() {
            let gx = x as f32 * x_ratio;
            let x0 = (gx as usize).min(last_x);
            let x1 = (x0 + 1).min(last_x);
            let dx = gx - x0 as f32;

            let w00 = (1.0 - dx) * (1.0 - dy);
            let w10 = dx * (1.0 - dy);
            let w01 = (1.0 - dx) * dy;
            let w11 = dx * dy;

            let (i0, i1) = (x0 * channels, x1 * channels);
            for (c, sample) in out.iter_mut().enumerate() {
                let v = top[i0 + c] as f32 * w00
                    + top[i1 + c] as f32 * w10
                    + bottom[i0 + c] as f32 * w01
                    + bottom[i1 + c] as f32 * w11;
                *sample = to_sample(v);
            }
        }
    });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_contract() {
        let src = PixelBuffer::filled(7, 5, &[1, 2]).unwrap();
        for (w, h) in [(1, 1), (3, 9), (14, 10), (100, 2)] {
            let dst = resize_bilinear(&src, w, h).unwrap();
            assert_eq!(dst.dimensions(), (w, h));
            assert_eq!(dst.channels(), 2);
            assert_eq!(dst.len(), (w * h * 2) as usize);
        }
    }

    #[test]
    fn test_uniform_stays_uniform() {
        let color = [200, 17, 99];
        let src = PixelBuffer::filled(13, 9, &color).unwrap();
        for (w, h) in [(4, 4), (26, 18), (5, 31), (1, 1)] {
            let dst = resize_bilinear(&src, w, h).unwrap();
            for px in dst.data().chunks_exact(3) {
                assert_eq!(px, color);
            }
        }
    }

    #[test]
    fn test_source_untouched() {
        let data: Vec<u8> = (0..48).collect();
        let src = PixelBuffer::from_data(4, 4, 3, data.clone()).unwrap();
        let _ = resize_bilinear(&src, 9, 2).unwrap();
        assert_eq!(src.data(), data.as_slice());
    }

    #[test]
    fn test_horizontal_ramp() {
        // 2x1 gray: 0 -> 200; x_ratio = 1/4
        let src = PixelBuffer::from_data(2, 1, 1, vec![0, 200]).unwrap();
        let dst = resize_bilinear(&src, 4, 1).unwrap();
        assert_eq!(dst.data(), &[0, 50, 100, 150]);
    }

    #[test]
    fn test_single_row_and_column_source() {
        let row = PixelBuffer::from_data(3, 1, 1, vec![10, 20, 30]).unwrap();
        let dst = resize_bilinear(&row, 3, 4).unwrap();
        for y in 0..4 {
            assert_eq!(dst.row(y), dst.row(0));
        }

        let col = PixelBuffer::from_data(1, 3, 1, vec![10, 20, 30]).unwrap();
        let dst = resize_bilinear(&col, 5, 3).unwrap();
        assert!(dst.row(1).iter().all(|&v| v == dst.row(1)[0]));

        let single = PixelBuffer::filled(1, 1, &[9, 8, 7]).unwrap();
        let dst = resize_bilinear(&single, 3, 3).unwrap();
        assert!(dst.data().chunks_exact(3).all(|px| px == [9, 8, 7]));
    }

    #[test]
    fn test_degenerate_targets() {
        let src = PixelBuffer::filled(4, 4, &[1, 2, 3]).unwrap();
        let dst = resize_bilinear(&src, 0, 10).unwrap();
        assert_eq!(dst.dimensions(), (0, 10));
        assert!(dst.is_empty());

        let empty = PixelBuffer::try_new(0, 0, 3).unwrap();
        let dst = resize_bilinear(&empty, 2, 2).unwrap();
        assert_eq!(dst.data(), &[0; 12]);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_allocation_failure_is_reported() {
        let src = PixelBuffer::filled(2, 2, &[5]).unwrap();
        let err = resize_bilinear(&src, u32::MAX, u32::MAX).unwrap_err();
        assert!(err.is_allocation_error());
        assert_eq!(src.data(), &[5, 5, 5, 5]);
    }
}
