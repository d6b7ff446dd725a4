//! ffjpeg - decode an image, run a fixed transform pipeline, encode it.
//!
//! Stages run in a fixed order regardless of flag order:
//! flip-y, grayscale, colors, resize.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use ffjpeg_ops::pipeline::{Pipeline, PipelineOptions, ResizeTarget, StageStatus, DEFAULT_QUALITY};
use std::path::PathBuf;
use tracing::{info, trace};

mod logging;

#[derive(Parser, Debug)]
#[command(name = "ffjpeg")]
#[command(author, version, about = "Flip, grayscale, color-limit and resize JPEG/PNG images")]
#[command(long_about = "
Decodes INPUT, applies the requested transforms and encodes the result to
OUTPUT. A .png output is written as PNG, anything else as JPEG.

Stages always run in this order: flip-y, grayscale, colors, resize.

Examples:
  ffjpeg in.jpg out.jpg --resize 23040x12960 --quality 90
  ffjpeg in.jpg out.jpg --colors 32 --quality 10
  ffjpeg in.png out.png --grayscale --flip-y --info
")]
struct Cli {
    /// Input image (JPEG or PNG)
    input: PathBuf,

    /// Output image
    output: PathBuf,

    /// JPEG quality, clamped to 1-100
    #[arg(long, default_value_t = DEFAULT_QUALITY, allow_negative_numbers = true)]
    quality: i32,

    /// Convert to grayscale
    #[arg(long)]
    grayscale: bool,

    /// Flip image vertically
    #[arg(long = "flip-y")]
    flip_y: bool,

    /// Limit total colors (values below 2 disable it)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    colors: Option<i64>,

    /// Resize image (example: 1920x1080)
    #[arg(long, value_name = "WxH")]
    resize: Option<ResizeTarget>,

    /// Print decoded image info
    #[arg(long)]
    info: bool,

    /// Verbose output (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Write log output to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,
}

impl Cli {
    fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            flip_y: self.flip_y,
            grayscale: self.grayscale,
            color_limit: self
                .colors
                .filter(|&n| n > 0)
                .map(|n| u32::try_from(n).unwrap_or(u32::MAX)),
            resize: self.resize,
            quality: self.quality,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.verbose, cli.log.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    trace!(input = %cli.input.display(), output = %cli.output.display(), "ffjpeg");

    let image = ffjpeg_io::read(&cli.input).context("failed to load image")?;
    info!(
        width = image.width(),
        height = image.height(),
        channels = image.channels(),
        "Loaded {}",
        cli.input.display()
    );

    if cli.info {
        println!("width={} height={} channels={}", image.width(), image.height(), image.channels());
    }

    let options = cli.pipeline_options();
    let quality = options.clamped_quality();
    let output = Pipeline::new(options).run(image);

    if cli.verbose > 0 {
        for report in &output.stages {
            match &report.status {
                StageStatus::Applied => println!("{}: applied", report.stage),
                StageStatus::Unchanged => println!("{}: unchanged", report.stage),
                StageStatus::Failed(reason) => println!("{}: failed ({})", report.stage, reason),
            }
        }
    }

    ffjpeg_io::write(&cli.output, &output.buffer, quality).context("failed to write image")?;
    info!(quality, "Wrote {}", cli.output.display());

    if cli.verbose > 0 {
        let buf = &output.buffer;
        println!(
            "Wrote {} ({}x{}, {} channels)",
            cli.output.display(),
            buf.width(),
            buf.height(),
            buf.channels()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use ffjpeg_core::PixelBuffer;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ffjpeg").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["in.jpg", "out.jpg"]);
        let opts = cli.pipeline_options();
        assert_eq!(opts, PipelineOptions::default());
        assert!(opts.enabled_stages().is_empty());
        assert_eq!(cli.threads, 0);
        assert!(!cli.info);
    }

    #[test]
    fn test_flags_map_to_options() {
        let cli = parse(&[
            "in.png", "out.png", "--resize", "64x32", "--colors", "27", "--grayscale", "--flip-y",
            "--quality", "150", "-vv",
        ]);
        let opts = cli.pipeline_options();
        assert!(opts.flip_y && opts.grayscale);
        assert_eq!(opts.color_limit, Some(27));
        assert_eq!(opts.resize, Some(ResizeTarget::new(64, 32)));
        assert_eq!(opts.clamped_quality(), 100);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_non_positive_colors_disable_stage() {
        for n in ["0", "-3"] {
            let cli = parse(&["a.jpg", "b.jpg", "--colors", n]);
            assert_eq!(cli.pipeline_options().color_limit, None);
        }
        let cli = parse(&["a.jpg", "b.jpg", "--quality", "-5"]);
        assert_eq!(cli.pipeline_options().clamped_quality(), 1);
    }

    #[test]
    fn test_bad_input_rejected() {
        let args = ["ffjpeg", "a.jpg", "b.jpg", "--resize", "big"];
        assert!(Cli::try_parse_from(args).is_err());
        assert!(Cli::try_parse_from(["ffjpeg", "only-input.jpg"]).is_err());
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        let image = PixelBuffer::filled(6, 4, &[255, 0, 0]).unwrap();
        ffjpeg_io::write(&input, &image, 90).unwrap();

        let cli = parse(&[
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "--grayscale",
            "--resize",
            "3x2",
        ]);
        run(&cli).unwrap();

        let result = ffjpeg_io::read(&output).unwrap();
        assert_eq!(result.dimensions(), (3, 2));
        assert_eq!(result.channels(), 1);
        assert!(result.data().iter().all(|&v| v == 76));
    }

    #[test]
    fn test_missing_input_reports_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let cli = parse(&[
            dir.path().join("nope.jpg").to_str().unwrap(),
            dir.path().join("out.jpg").to_str().unwrap(),
        ]);
        let err = run(&cli).unwrap_err();
        assert_eq!(err.to_string(), "failed to load image");
    }
}
