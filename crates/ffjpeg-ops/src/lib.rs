//! # ffjpeg-ops
//!
//! Pixel transforms for the ffjpeg pipeline.
//!
//! # Modules
//!
//! - [`flip`] - Vertical flip, in place
//! - [`grayscale`] - BT.601 luma conversion, reallocating
//! - [`quantize`] - Per-channel posterization, in place
//! - [`resize`] - Bilinear resize, reallocating
//! - [`pipeline`] - Fixed-order driver over the four transforms
//!
//! # Example
//!
//! ```rust
//! use ffjpeg_core::PixelBuffer;
//! use ffjpeg_ops::{flip_y, limit_colors, resize_bilinear, to_grayscale};
//!
//! let mut buf = PixelBuffer::filled(16, 16, &[40, 80, 120]).unwrap();
//! flip_y(&mut buf);
//! let mut buf = to_grayscale(buf).into_buffer();
//! limit_colors(&mut buf, 64); // no-op on one channel
//! let buf = resize_bilinear(&buf, 8, 8).unwrap();
//! assert_eq!((buf.width(), buf.channels()), (8, 1));
//! ```
//!
//! # Parallelism
//!
//! With the default `parallel` feature the outer row loop of every transform
//! runs on the global rayon pool.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod parallel;
pub mod flip;
pub mod grayscale;
pub mod pipeline;
pub mod quantize;
pub mod resize;

pub use error::{OpsError, OpsResult};
pub use flip::flip_y;
pub use grayscale::to_grayscale;
pub use pipeline::{Pipeline, PipelineOptions, PipelineOutput, ResizeTarget, Stage, StageReport, StageStatus};
pub use quantize::limit_colors;
pub use resize::resize_bilinear;
