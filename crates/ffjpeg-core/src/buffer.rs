//! Interleaved 8-bit pixel storage.
//!
//! [`PixelBuffer`] is the only value that flows through the pipeline. It owns
//! its samples, so a transform either borrows it mutably and edits in place
//! or takes it by value and hands back a new one.
//!
//! # Memory Layout
//!
//! Pixels are stored **row-major**, top-to-bottom, channels interleaved:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! There is no row padding: `row_len() == width * channels`.
//!
//! # Usage
//!
//! ```rust
//! use ffjpeg_core::PixelBuffer;
//!
//! let buf = PixelBuffer::from_data(2, 1, 3, vec![255, 0, 0, 0, 255, 0]).unwrap();
//! assert_eq!(buf.dimensions(), (2, 1));
//! assert_eq!(buf.pixel(1, 0), &[0, 255, 0]);
//! ```

use crate::{Error, Result};

/// Largest channel count a buffer may carry.
pub const MAX_CHANNELS: u8 = 4;

/// Owned interleaved 8-bit image buffer.
///
/// The constructor checks that `data.len() == width * height * channels`
/// and that `channels` is in `1..=4`; every method relies on it.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl PixelBuffer {
    /// Wraps existing sample data.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedChannels`] if `channels` is not in `1..=4`
    /// - [`Error::InvalidDimensions`] if the size overflows or `data` has the
    ///   wrong length
    pub fn from_data(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Allocates a zero-filled buffer without aborting on exhaustion.
    ///
    /// Storage is reserved with [`Vec::try_reserve_exact`], so an allocator
    /// failure comes back as [`Error::AllocationFailed`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use ffjpeg_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::try_new(640, 480, 1).unwrap();
    /// assert_eq!(buf.len(), 640 * 480);
    /// assert!(buf.data().iter().all(|&v| v == 0));
    /// ```
    pub fn try_new(width: u32, height: u32, channels: u8) -> Result<Self> {
        let len = byte_len(width, height, channels)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| Error::allocation_failed(len, e.to_string()))?;
        data.resize(len, 0);
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Creates a buffer where every pixel equals `pixel`.
    ///
    /// The channel count is `pixel.len()`.
    ///
    /// ```rust
    /// use ffjpeg_core::PixelBuffer;
    ///
    /// let swatch = PixelBuffer::filled(4, 4, &[200, 100, 50]).unwrap();
    /// assert_eq!(swatch.channels(), 3);
    /// assert_eq!(swatch.pixel(3, 3), &[200, 100, 50]);
    /// ```
    pub fn filled(width: u32, height: u32, pixel: &[u8]) -> Result<Self> {
        let channels = u8::try_from(pixel.len())
            .map_err(|_| Error::UnsupportedChannels(u8::MAX))?;
        let mut buf = Self::try_new(width, height, channels)?;
        for px in buf.data.chunks_exact_mut(pixel.len()) {
            px.copy_from_slice(pixel);
        }
        Ok(buf)
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel (1-4).
    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bytes per row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Total number of bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` when the buffer holds no samples (zero width or height).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw samples. The length cannot change through this slice.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer and returns its storage.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.row_len();
        &self.data[start..start + self.row_len()]
    }

    /// Samples of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels as usize;
        let start = (y as usize * self.width as usize + x as usize) * c;
        &self.data[start..start + c]
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Computes `width * height * channels`, validating channels and overflow.
pub fn byte_len(width: u32, height: u32, channels: u8) -> Result<usize> {
    if channels == 0 || channels > MAX_CHANNELS {
        return Err(Error::UnsupportedChannels(channels));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels as usize))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows usize"))
}
