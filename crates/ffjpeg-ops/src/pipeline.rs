//! Fixed-order transform pipeline.
//!
//! Stages always run as flip-y, grayscale, color limit, resize. Options only
//! switch stages on or off; they cannot reorder them.
//!
//! # Example
//!
//! ```rust
//! use ffjpeg_core::PixelBuffer;
//! use ffjpeg_ops::pipeline::{Pipeline, PipelineOptions, ResizeTarget, Stage, StageStatus};
//!
//! let options = PipelineOptions {
//!     grayscale: true,
//!     resize: Some("32x16".parse::<ResizeTarget>().unwrap()),
//!     ..Default::default()
//! };
//! let src = PixelBuffer::filled(64, 64, &[10, 20, 30]).unwrap();
//! let out = Pipeline::new(options).run(src);
//!
//! assert_eq!(out.buffer.dimensions(), (32, 16));
//! assert_eq!(out.buffer.channels(), 1);
//! assert_eq!(out.stages.len(), 2);
//! assert_eq!(out.stages[0].stage, Stage::Grayscale);
//! assert_eq!(out.stages[1].status, StageStatus::Applied);
//! ```

use crate::flip::{flip_y, flips};
use crate::grayscale::to_grayscale;
use crate::quantize::{limit_colors, quantize_levels};
use crate::resize::resize_bilinear;
use crate::OpsError;
use ffjpeg_core::{PixelBuffer, TransformOutcome};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// JPEG quality used when none is given.
pub const DEFAULT_QUALITY: i32 = 90;

/// One step of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Vertical flip.
    FlipY,
    /// Luma conversion.
    Grayscale,
    /// Color quantization.
    LimitColors,
    /// Bilinear resize.
    Resize,
}

impl Stage {
    /// All stages in the order they run.
    pub const ORDER: [Stage; 4] = [Stage::FlipY, Stage::Grayscale, Stage::LimitColors, Stage::Resize];

    /// Short name used in logs and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::FlipY => "flip-y",
            Stage::Grayscale => "grayscale",
            Stage::LimitColors => "colors",
            Stage::Resize => "resize",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What happened when a stage ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageStatus {
    /// The stage modified or replaced the buffer.
    Applied,
    /// The stage did not apply: no-op input or a recovered allocation failure.
    Unchanged,
    /// The stage failed; the buffer from before the stage was kept.
    Failed(String),
}

/// Outcome of a single enabled stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    /// Which stage ran.
    pub stage: Stage,
    /// How it went.
    pub status: StageStatus,
}

/// Target size for the resize stage, parsed from `WxH`.
///
/// ```rust
/// use ffjpeg_ops::pipeline::ResizeTarget;
///
/// let t: ResizeTarget = "1920x1080".parse().unwrap();
/// assert_eq!((t.width, t.height), (1920, 1080));
/// assert!("1920".parse::<ResizeTarget>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeTarget {
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
}

impl ResizeTarget {
    /// Creates a target.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A target with a zero side disables the resize stage.
    pub fn is_enabled(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl FromStr for ResizeTarget {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || OpsError::InvalidParameter(format!("resize target '{}' is not WxH", s));
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width = w.trim().parse().map_err(|_| invalid())?;
        let height = h.trim().parse().map_err(|_| invalid())?;
        Ok(Self { width, height })
    }
}

impl fmt::Display for ResizeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Stage toggles and encoder settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Run the vertical flip.
    pub flip_y: bool,
    /// Run the grayscale conversion.
    pub grayscale: bool,
    /// Palette budget for color quantization; `None` or `< 2` disables it.
    pub color_limit: Option<u32>,
    /// Resize target; disabled when `None` or when a side is zero.
    pub resize: Option<ResizeTarget>,
    /// Requested encoder quality, possibly out of range.
    pub quality: i32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            flip_y: false,
            grayscale: false,
            color_limit: None,
            resize: None,
            quality: DEFAULT_QUALITY,
        }
    }
}

impl PipelineOptions {
    /// Encoder quality clamped to `1..=100`.
    ///
    /// ```rust
    /// use ffjpeg_ops::pipeline::PipelineOptions;
    ///
    /// let opts = PipelineOptions { quality: 250, ..Default::default() };
    /// assert_eq!(opts.clamped_quality(), 100);
    /// ```
    pub fn clamped_quality(&self) -> u8 {
        self.quality.clamp(1, 100) as u8
    }

    /// Stages that will run, in order.
    pub fn enabled_stages(&self) -> Vec<Stage> {
        Stage::ORDER
            .into_iter()
            .filter(|stage| match stage {
                Stage::FlipY => self.flip_y,
                Stage::Grayscale => self.grayscale,
                Stage::LimitColors => self.color_limit.is_some(),
                Stage::Resize => self.resize.is_some_and(|t| t.is_enabled()),
            })
            .collect()
    }
}

/// Final buffer plus a report for every enabled stage.
#[derive(Debug)]
pub struct PipelineOutput {
    /// The buffer after the last stage.
    pub buffer: PixelBuffer,
    /// One entry per enabled stage, in execution order.
    pub stages: Vec<StageReport>,
}

impl PipelineOutput {
    /// Status of `stage`, if it was enabled.
    pub fn status(&self, stage: Stage) -> Option<&StageStatus> {
        self.stages.iter().find(|r| r.stage == stage).map(|r| &r.status)
    }
}

/// Runs the enabled transforms over a buffer.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    /// Creates a pipeline from options.
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// The options this pipeline was built with.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Takes ownership of `buffer`, runs every enabled stage and returns the
    /// result.
    ///
    /// A buffer replaced by a stage is dropped as soon as its successor
    /// exists. A failing resize keeps the previous buffer.
    pub fn run(&self, mut buffer: PixelBuffer) -> PipelineOutput {
        let mut stages = Vec::with_capacity(4);

        for stage in self.options.enabled_stages() {
            let status = match stage {
                Stage::FlipY => {
                    let status = if flips(&buffer) {
                        StageStatus::Applied
                    } else {
                        StageStatus::Unchanged
                    };
                    flip_y(&mut buffer);
                    status
                }
                Stage::Grayscale => match to_grayscale(buffer) {
                    TransformOutcome::Transformed(gray) => {
                        buffer = gray;
                        StageStatus::Applied
                    }
                    TransformOutcome::Unchanged(same) => {
                        buffer = same;
                        StageStatus::Unchanged
                    }
                },
                Stage::LimitColors => {
                    let total = self.options.color_limit.unwrap_or(0);
                    if buffer.channels() >= 3 && quantize_levels(total).is_some() {
                        limit_colors(&mut buffer, total);
                        StageStatus::Applied
                    } else {
                        StageStatus::Unchanged
                    }
                }
                Stage::Resize => {
                    // enabled_stages() only yields Resize for an enabled target
                    let Some(target) = self.options.resize else {
                        continue;
                    };
                    match resize_bilinear(&buffer, target.width, target.height) {
                        Ok(resized) => {
                            buffer = resized;
                            StageStatus::Applied
                        }
                        Err(e) => {
                            warn!(error = %e, target = %target, "resize failed, keeping previous buffer");
                            StageStatus::Failed(e.to_string())
                        }
                    }
                }
            };

            debug!(stage = %stage, status = ?status, "Stage finished");
            stages.push(StageReport { stage, status });
        }

        info!(
            width = buffer.width(),
            height = buffer.height(),
            channels = buffer.channels(),
            stages = stages.len(),
            "Pipeline complete"
        );

        PipelineOutput { buffer, stages }
    }
}
