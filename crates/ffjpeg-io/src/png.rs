//! PNG format support.
//!
//! Reads any PNG as 8-bit samples: palettes and low bit depths are
//! expanded, 16-bit samples are stripped to their high byte, and `tRNS`
//! transparency becomes an alpha channel. The channel count is kept as
//! stored (gray = 1, gray+alpha = 2, RGB = 3, RGBA = 4).
//!
//! PNG is lossless, so the writer takes no quality setting.

use crate::{ImageReader, ImageWriter, IoError, IoResult};
use ffjpeg_core::PixelBuffer;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// PNG decoder producing 8-bit [`PixelBuffer`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngReader;

impl PngReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }
}

impl ImageReader for PngReader {
    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelBuffer> {
        let mut decoder = png::Decoder::new(Cursor::new(data));
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder
            .read_info()
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

        let buf_size = reader
            .output_buffer_size()
            .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
        let mut buf = vec![0u8; buf_size];
        let info = reader
            .next_frame(&mut buf)
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

        let channels = match (info.color_type, info.bit_depth) {
            (png::ColorType::Grayscale, png::BitDepth::Eight) => 1,
            (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => 2,
            (png::ColorType::Rgb, png::BitDepth::Eight) => 3,
            (png::ColorType::Rgba, png::BitDepth::Eight) => 4,
            (color_type, bit_depth) => {
                return Err(IoError::UnsupportedFormat(format!(
                    "PNG output {:?} {:?}",
                    color_type, bit_depth
                )));
            }
        };
        debug!(width = info.width, height = info.height, channels, "Decoded PNG");

        buf.truncate(info.buffer_size());
        Ok(PixelBuffer::from_data(info.width, info.height, channels, buf)?)
    }
}

/// PNG encoder writing 8-bit samples with default compression.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngWriter;

impl PngWriter {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self
    }
}

impl ImageWriter for PngWriter {
    fn write_to_memory(&self, image: &PixelBuffer) -> IoResult<Vec<u8>> {
        let color_type = match image.channels() {
            1 => png::ColorType::Grayscale,
            2 => png::ColorType::GrayscaleAlpha,
            3 => png::ColorType::Rgb,
            4 => png::ColorType::Rgba,
            n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
        };

        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, image.width(), image.height());
            encoder.set_color(color_type);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_compression(png::Compression::default());

            let mut writer = encoder
                .write_header()
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
            writer
                .write_image_data(image.data())
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
            writer
                .finish()
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
        }

        debug!(width = image.width(), height = image.height(), bytes = out.len(), "Encoded PNG");
        Ok(out)
    }
}

/// Reads a PNG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    PngReader::new().read(path)
}

/// Writes a PNG file.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    PngWriter::new().write(path, image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lossless_roundtrip_all_channel_counts() {
        for channels in 1..=4u8 {
            let len = 5 * 3 * channels as usize;
            let data: Vec<u8> = (0..len).map(|i| (i * 11 % 256) as u8).collect();
            let image = PixelBuffer::from_data(5, 3, channels, data).unwrap();

            let bytes = PngWriter::new().write_to_memory(&image).unwrap();
            let back = PngReader::new().read_from_memory(&bytes).unwrap();
            assert_eq!(back, image, "channels={}", channels);
        }
    }

    #[test]
    fn test_sixteen_bit_is_stripped() {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, 2, 1);
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(png::BitDepth::Sixteen);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0xAB, 0xCD, 0x12, 0x34]).unwrap();
            writer.finish().unwrap();
        }

        let back = PngReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(back.channels(), 1);
        assert_eq!(back.data(), &[0xAB, 0x12]);
    }

    #[test]
    fn test_palette_is_expanded() {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, 2, 1);
            encoder.set_color(png::ColorType::Indexed);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_palette(vec![255, 0, 0, 0, 0, 255]);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[1, 0]).unwrap();
            writer.finish().unwrap();
        }

        let back = PngReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(back.channels(), 3);
        assert_eq!(back.data(), &[0, 0, 255, 255, 0, 0]);
    }

    #[test]
    fn test_decode_garbage() {
        let err = PngReader::new().read_from_memory(b"\x89PNG broken").unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }
}
