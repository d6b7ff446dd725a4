//! Sample-level helpers shared by every transform.
//!
//! # Rounding
//!
//! All float-to-sample conversions in the workspace go through [`to_sample`],
//! which rounds to nearest and saturates to `[0, 255]`. Using one policy keeps
//! transforms consistent with each other: a uniform image stays uniform after
//! resizing, and re-quantizing an already quantized image is a no-op.

// ============================================================================
// BT.601 Luma Constants
// ============================================================================

/// BT.601 luma coefficient for red channel.
///
/// Used in `Y = 0.299*R + 0.587*G + 0.114*B`
pub const BT601_LUMA_R: f32 = 0.299;

/// BT.601 luma coefficient for green channel.
pub const BT601_LUMA_G: f32 = 0.587;

/// BT.601 luma coefficient for blue channel.
pub const BT601_LUMA_B: f32 = 0.114;

/// BT.601 luma coefficients as an array [R, G, B].
pub const BT601_LUMA: [f32; 3] = [BT601_LUMA_R, BT601_LUMA_G, BT601_LUMA_B];

/// Weighted BT.601 luma of an 8-bit RGB triple, in sample units.
///
/// # Example
///
/// ```
/// use ffjpeg_core::luma_bt601;
///
/// assert!((luma_bt601(255, 255, 255) - 255.0).abs() < 1e-3);
/// assert!((luma_bt601(255, 0, 0) - 76.245).abs() < 1e-3);
/// ```
#[inline]
pub fn luma_bt601(r: u8, g: u8, b: u8) -> f32 {
    BT601_LUMA_R * r as f32 + BT601_LUMA_G * g as f32 + BT601_LUMA_B * b as f32
}

/// Converts an interpolated or weighted value to an 8-bit sample.
///
/// Rounds to nearest (half away from zero) and clamps to `[0, 255]`.
/// NaN maps to 0.
///
/// ```
/// use ffjpeg_core::to_sample;
///
/// assert_eq!(to_sample(191.25), 191);
/// assert_eq!(to_sample(127.5), 128);
/// assert_eq!(to_sample(254.9999), 255);
/// assert_eq!(to_sample(-3.0), 0);
/// assert_eq!(to_sample(300.0), 255);
/// ```
#[inline]
pub fn to_sample(v: f32) -> u8 {
    // `as` saturates and maps NaN to 0
    v.round().clamp(0.0, 255.0) as u8
}
