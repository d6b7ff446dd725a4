//! I/O traits for image readers and writers.
//!
//! These traits define the interface for format-specific implementations.
//! Both operate on [`PixelBuffer`] and only need the in-memory method; the
//! file variants read or write the whole file at once.

use crate::IoResult;
use ffjpeg_core::PixelBuffer;
use std::path::Path;

/// Trait for image format readers.
///
/// # Example
///
/// ```rust,ignore
/// use ffjpeg_io::{ImageReader, IoResult};
/// use ffjpeg_core::PixelBuffer;
///
/// struct MyFormatReader;
///
/// impl ImageReader for MyFormatReader {
///     fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelBuffer> {
///         // Decode implementation
///     }
/// }
/// ```
pub trait ImageReader {
    /// Decodes an image from memory.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelBuffer>;

    /// Reads and decodes an image file.
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<PixelBuffer> {
        let data = std::fs::read(path.as_ref())?;
        self.read_from_memory(&data)
    }
}

/// Trait for image format writers.
pub trait ImageWriter {
    /// Encodes an image to a byte vector.
    fn write_to_memory(&self, image: &PixelBuffer) -> IoResult<Vec<u8>>;

    /// Encodes an image and writes it to `path`.
    fn write<P: AsRef<Path>>(&self, path: P, image: &PixelBuffer) -> IoResult<()> {
        let data = self.write_to_memory(image)?;
        std::fs::write(path.as_ref(), data)?;
        Ok(())
    }
}
