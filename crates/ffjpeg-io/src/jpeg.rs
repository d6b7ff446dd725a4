//! JPEG format support.
//!
//! Decoding goes through `jpeg-decoder`, encoding through `jpeg-encoder`.
//! Samples are always 8-bit.
//!
//! # Channel mapping
//!
//! | Stored           | Decoded as                      |
//! |------------------|---------------------------------|
//! | L8               | 1 channel                       |
//! | L16              | 1 channel (high byte)           |
//! | RGB24            | 3 channels                      |
//! | CMYK32           | 3 channels (naive CMYK -> RGB)  |
//!
//! On encode, one- and two-channel buffers are written as grayscale (the
//! second channel is discarded), three as RGB and four as RGBA (the encoder
//! drops alpha).
//!
//! # Example
//!
//! ```rust,ignore
//! use ffjpeg_io::jpeg;
//!
//! let image = jpeg::read("photo.jpg")?;
//! jpeg::write("copy.jpg", &image, 85)?;
//! ```

use crate::{ImageReader, ImageWriter, IoError, IoResult};
use ffjpeg_core::{to_sample, PixelBuffer};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Quality used when none is given.
pub const DEFAULT_QUALITY: u8 = 90;

// ============================================================================
// JpegReader
// ============================================================================

/// JPEG decoder producing a [`PixelBuffer`] with the stored channel count.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegReader;

impl JpegReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }
}

impl ImageReader for JpegReader {
    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelBuffer> {
        let mut decoder = jpeg_decoder::Decoder::new(Cursor::new(data));
        let pixels = decoder
            .decode()
            .map_err(|e| IoError::DecodeError(e.to_string()))?;
        let info = decoder
            .info()
            .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

        let width = info.width as u32;
        let height = info.height as u32;
        debug!(width, height, pixel_format = ?info.pixel_format, "Decoded JPEG");

        let (channels, samples) = match info.pixel_format {
            jpeg_decoder::PixelFormat::L8 => (1, pixels),
            jpeg_decoder::PixelFormat::RGB24 => (3, pixels),
            jpeg_decoder::PixelFormat::L16 => {
                // big-endian, keep the high byte
                (1, pixels.chunks_exact(2).map(|l16| l16[0]).collect())
            }
            jpeg_decoder::PixelFormat::CMYK32 => {
                let rgb = pixels
                    .chunks_exact(4)
                    .flat_map(|cmyk| {
                        let k = 1.0 - cmyk[3] as f32 / 255.0;
                        let ink = |v: u8| to_sample((255.0 - v as f32) * k);
                        [ink(cmyk[0]), ink(cmyk[1]), ink(cmyk[2])]
                    })
                    .collect();
                (3, rgb)
            }
        };

        Ok(PixelBuffer::from_data(width, height, channels, samples)?)
    }
}

// ============================================================================
// JpegWriter
// ============================================================================

/// JPEG encoder.
#[derive(Debug, Clone, Copy)]
pub struct JpegWriter {
    quality: u8,
}

impl Default for JpegWriter {
    fn default() -> Self {
        Self::new(DEFAULT_QUALITY)
    }
}

impl JpegWriter {
    /// Creates a writer with `quality` clamped to `1..=100`.
    pub fn new(quality: u8) -> Self {
        Self { quality: quality.clamp(1, 100) }
    }

    /// Encoder quality.
    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl ImageWriter for JpegWriter {
    fn write_to_memory(&self, image: &PixelBuffer) -> IoResult<Vec<u8>> {
        let (width, height) = image.dimensions();
        let (w, h) = match (u16::try_from(width), u16::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(IoError::EncodeError(format!(
                    "{}x{} exceeds the JPEG size limit of 65535x65535",
                    width, height
                )));
            }
        };

        let luma;
        let (data, color_type) = match image.channels() {
            1 => (image.data(), jpeg_encoder::ColorType::Luma),
            2 => {
                luma = image.data().chunks_exact(2).map(|px| px[0]).collect::<Vec<u8>>();
                (luma.as_slice(), jpeg_encoder::ColorType::Luma)
            }
            3 => (image.data(), jpeg_encoder::ColorType::Rgb),
            4 => (image.data(), jpeg_encoder::ColorType::Rgba),
            n => return Err(IoError::UnsupportedFormat(format!("{} channels for JPEG", n))),
        };

        let mut buffer = Vec::new();
        let encoder = jpeg_encoder::Encoder::new(&mut buffer, self.quality);
        encoder
            .encode(data, w, h, color_type)
            .map_err(|e| IoError::EncodeError(e.to_string()))?;

        debug!(width, height, quality = self.quality, bytes = buffer.len(), "Encoded JPEG");
        Ok(buffer)
    }
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Reads a JPEG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    JpegReader::new().read(path)
}

/// Writes a JPEG file at the given quality.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer, quality: u8) -> IoResult<()> {
    JpegWriter::new(quality).write(path, image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &[u8], b: &[u8], tol: u8) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.abs_diff(*y) <= tol)
    }

    #[test]
    fn test_rgb_roundtrip() {
        let image = PixelBuffer::filled(16, 16, &[200, 100, 50]).unwrap();
        let bytes = JpegWriter::new(100).write_to_memory(&image).unwrap();
        assert!(bytes.starts_with(&[0xFF, 0xD8]));

        let back = JpegReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(back.dimensions(), (16, 16));
        assert_eq!(back.channels(), 3);
        assert!(close(back.pixel(7, 7), &[200, 100, 50], 4));
    }

    #[test]
    fn test_gray_stays_single_channel() {
        let image = PixelBuffer::filled(8, 8, &[128]).unwrap();
        let bytes = JpegWriter::new(95).write_to_memory(&image).unwrap();
        let back = JpegReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(back.channels(), 1);
        assert!(close(back.data(), image.data(), 2));
    }

    #[test]
    fn test_gray_alpha_written_as_luma() {
        let image = PixelBuffer::filled(8, 8, &[60, 255]).unwrap();
        let bytes = JpegWriter::default().write_to_memory(&image).unwrap();
        let back = JpegReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(back.channels(), 1);
        assert!(close(back.pixel(3, 3), &[60], 3));
    }

    #[test]
    fn test_rgba_drops_alpha() {
        let image = PixelBuffer::filled(8, 8, &[10, 240, 10, 0]).unwrap();
        let bytes = JpegWriter::new(100).write_to_memory(&image).unwrap();
        let back = JpegReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(back.channels(), 3);
    }

    #[test]
    fn test_quality_affects_size() {
        let data: Vec<u8> = (0..64 * 64 * 3).map(|i| ((i * 31) ^ (i / 7)) as u8).collect();
        let image = PixelBuffer::from_data(64, 64, 3, data).unwrap();
        let low = JpegWriter::new(10).write_to_memory(&image).unwrap();
        let high = JpegWriter::new(100).write_to_memory(&image).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_quality_clamped() {
        assert_eq!(JpegWriter::new(0).quality(), 1);
        assert_eq!(JpegWriter::new(250).quality(), 100);
        assert_eq!(JpegWriter::default().quality(), 90);
    }

    #[test]
    fn test_decode_garbage() {
        let err = JpegReader::new().read_from_memory(b"not a jpeg").unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }

    #[test]
    fn test_oversized_rejected() {
        let image = PixelBuffer::try_new(70_000, 1, 1).unwrap();
        let err = JpegWriter::default().write_to_memory(&image).unwrap_err();
        assert!(matches!(err, IoError::EncodeError(_)));
    }
}
