//! # ffjpeg-core
//!
//! Core types for the ffjpeg image pipeline.
//!
//! - [`PixelBuffer`] - Owned, interleaved 8-bit pixel storage
//! - [`TransformOutcome`] - Tagged result of a consuming transform
//! - [`Error`] - Construction and allocation errors
//! - [`to_sample`], [`luma_bt601`] - Shared sample math
//!
//! ## Crate Structure
//!
//! ```text
//! ffjpeg-core (this crate)
//!    ^
//!    |
//!    +-- ffjpeg-ops (transforms, pipeline)
//!    +-- ffjpeg-io (decode / encode)
//!    +-- ffjpeg-cli (ffjpeg binary)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod outcome;
pub mod pixel;

pub use buffer::{byte_len, PixelBuffer, MAX_CHANNELS};
pub use error::{Error, Result};
pub use outcome::TransformOutcome;
pub use pixel::{luma_bt601, to_sample, BT601_LUMA, BT601_LUMA_B, BT601_LUMA_G, BT601_LUMA_R};

/// Prelude module for convenient imports.
///
/// ```
/// use ffjpeg_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::PixelBuffer;
    pub use crate::error::{Error, Result};
    pub use crate::outcome::TransformOutcome;
    pub use crate::pixel::{luma_bt601, to_sample};
}
