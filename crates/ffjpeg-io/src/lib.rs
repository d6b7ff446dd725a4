//! # ffjpeg-io
//!
//! Image decoding and encoding for the ffjpeg pipeline.
//!
//! Every decoded image becomes an 8-bit interleaved
//! [`PixelBuffer`](ffjpeg_core::PixelBuffer) with the channel count it was
//! stored with; every encoder takes the same buffer back.
//!
//! - **JPEG** - lossy, quality 1-100 (feature `jpeg`)
//! - **PNG** - lossless, quality ignored (feature `png`)
//!
//! # Architecture
//!
//! - [`ImageReader`] - Trait for format readers
//! - [`ImageWriter`] - Trait for format writers
//! - [`read`] / [`write`] - High-level functions with format auto-detection
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ffjpeg_io::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.jpg", &image, 85)?;
//! ```
//!
//! Reads detect the format from magic bytes, falling back to the extension.
//! Writes pick the format from the output extension; anything that is not a
//! PNG extension is written as JPEG.

#![warn(missing_docs)]

mod detect;
mod error;
mod traits;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png")]
pub mod png;

pub use detect::Format;
pub use error::{IoError, IoResult};
pub use traits::{ImageReader, ImageWriter};

use ffjpeg_core::PixelBuffer;
use std::path::Path;
use tracing::{debug, trace};

/// Reads an image file, detecting its format.
///
/// # Errors
///
/// - [`IoError::Io`] if the file cannot be opened or read
/// - [`IoError::UnsupportedFormat`] if the format is not recognized
/// - [`IoError::DecodeError`] if the contents are corrupt
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    trace!(path = %path.display(), "read");
    let data = std::fs::read(path)?;

    let format = match Format::from_bytes(&data) {
        Format::Unknown => Format::from_extension(path),
        format => format,
    };
    decode(&data, format)
}

/// Decodes an in-memory image, detecting its format from magic bytes.
pub fn read_from_memory(data: &[u8]) -> IoResult<PixelBuffer> {
    decode(data, Format::from_bytes(data))
}

/// Writes `image` to `path` in the format implied by its extension.
///
/// `quality` (clamped to 1-100) applies to JPEG only. Unknown or missing
/// extensions fall back to JPEG.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer, quality: u8) -> IoResult<()> {
    let path = path.as_ref();
    let format = match Format::from_extension(path) {
        Format::Unknown => {
            debug!(path = %path.display(), "No known extension, writing JPEG");
            Format::Jpeg
        }
        format => format,
    };
    trace!(path = %path.display(), %format, quality, "write");

    let bytes = write_to_memory(image, format, quality)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Encodes `image` as `format`.
#[allow(unused_variables, unreachable_patterns)]
pub fn write_to_memory(image: &PixelBuffer, format: Format, quality: u8) -> IoResult<Vec<u8>> {
    match format {
        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::JpegWriter::new(quality).write_to_memory(image),

        #[cfg(feature = "png")]
        Format::Png => png::PngWriter::new().write_to_memory(image),

        format => Err(IoError::UnsupportedFormat(format.to_string())),
    }
}

#[allow(unused_variables, unreachable_patterns)]
fn decode(data: &[u8], format: Format) -> IoResult<PixelBuffer> {
    match format {
        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::JpegReader::new().read_from_memory(data),

        #[cfg(feature = "png")]
        Format::Png => png::PngReader::new().read_from_memory(data),

        format => Err(IoError::UnsupportedFormat(format.to_string())),
    }
}
