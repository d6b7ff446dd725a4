//! Luma-weighted grayscale conversion.
//!
//! Collapses pixels with three or more channels into a single BT.601 luma
//! sample. Any channel past the third (alpha) is dropped.
//!
//! # Example
//!
//! ```rust
//! use ffjpeg_core::{PixelBuffer, TransformOutcome};
//! use ffjpeg_ops::grayscale::to_grayscale;
//!
//! let rgb = PixelBuffer::filled(8, 8, &[255, 255, 255]).unwrap();
//! let gray = to_grayscale(rgb).into_buffer();
//! assert_eq!(gray.channels(), 1);
//! assert!(gray.data().iter().all(|&v| v == 255));
//! ```

use crate::parallel::for_each_row;
use ffjpeg_core::{luma_bt601, to_sample, PixelBuffer, TransformOutcome};
use tracing::{trace, warn};

/// Converts `buffer` to a single-channel luma image.
///
/// - Fewer than three channels: returns [`TransformOutcome::Unchanged`] with
///   the same buffer, nothing allocated.
/// - Otherwise allocates a `width * height` buffer, fills it with
///   `0.299*R + 0.587*G + 0.114*B` per pixel and returns
///   [`TransformOutcome::Transformed`]. The input is dropped here.
/// - If that allocation fails the input comes back as
///   [`TransformOutcome::Unchanged`] so the pipeline can continue.
pub fn to_grayscale(buffer: PixelBuffer) -> TransformOutcome {
    let (width, height) = buffer.dimensions();
    let channels = buffer.channels() as usize;
    trace!(width, height, channels, "to_grayscale");

    if channels < 3 {
        return TransformOutcome::Unchanged(buffer);
    }

    let mut gray = match PixelBuffer::try_new(width, height, 1) {
        Ok(gray) => gray,
        Err(e) => {
            warn!(error = %e, "grayscale allocation failed, keeping color buffer");
            return TransformOutcome::Unchanged(buffer);
        }
    };

    let src = buffer.data();
    let src_row_len = buffer.row_len();
    for_each_row(gray.data_mut(), width as usize, |y, row| {
        let src_row = &src[y * src_row_len..(y + 1) * src_row_len];
        for (dst, px) in row.iter_mut().zip(src_row.chunks_exact(channels)) {
            *dst = to_sample(luma_bt601(px[0], px[1], px[2]));
        }
    });

    TransformOutcome::Transformed(gray)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_gray() {
        let src = PixelBuffer::from_data(2, 2, 3, vec![
            255, 0, 0, 0, 255, 0,
            0, 0, 255, 255, 255, 255,
        ]).unwrap();

        let outcome = to_grayscale(src);
        assert!(outcome.is_transformed());
        let gray = outcome.into_buffer();
        assert_eq!(gray.dimensions(), (2, 2));
        assert_eq!(gray.channels(), 1);
        assert_eq!(gray.data(), &[76, 150, 29, 255]);
    }

    #[test]
    fn test_alpha_is_dropped() {
        let src = PixelBuffer::filled(3, 2, &[10, 20, 30, 0]).unwrap();
        let gray = to_grayscale(src).into_buffer();
        // 0.299*10 + 0.587*20 + 0.114*30 = 18.15
        assert_eq!(gray.data(), &[18; 6]);
    }

    #[test]
    fn test_low_channel_is_unchanged() {
        for pixel in [&[42u8][..], &[42, 255][..]] {
            let src = PixelBuffer::filled(4, 3, pixel).unwrap();
            let outcome = to_grayscale(src.clone());
            assert!(!outcome.is_transformed());
            assert_eq!(outcome.into_buffer(), src);
        }
    }

    #[test]
    fn test_luma_tolerance() {
        let data: Vec<u8> = (0..16 * 16 * 3).map(|i| (i * 37 % 256) as u8).collect();
        let src = PixelBuffer::from_data(16, 16, 3, data).unwrap();
        let gray = to_grayscale(src.clone()).into_buffer();

        for (px, &g) in src.data().chunks_exact(3).zip(gray.data()) {
            let expected = luma_bt601(px[0], px[1], px[2]);
            assert!((g as f32 - expected).abs() <= 1.0);
        }
    }

    #[test]
    fn test_empty_image() {
        let src = PixelBuffer::try_new(0, 5, 3).unwrap();
        let gray = to_grayscale(src).into_buffer();
        assert_eq!(gray.channels(), 1);
        assert_eq!(gray.dimensions(), (0, 5));
        assert!(gray.is_empty());
    }
}
