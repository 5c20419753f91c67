//! Example: detect the pupil on one eye-camera frame.
//!
//! Loads a frame, crops the default 480x480 window, runs the detector and
//! prints every fitted ellipse. The annotated frame is saved next to the
//! input.
//!
//! Run from the workspace root:
//!   cargo run -p pupilfit --example single_frame -- --input eye.png

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pupilfit::runner::io::{load_frame, save_rgb};
use pupilfit::{CropRect, DetectorConfig, PupilPipeline};

#[derive(Parser, Debug)]
#[command(about = "Fit pupil ellipses on a single frame")]
struct Args {
    #[arg(long)]
    input: PathBuf,

    /// Canny low threshold; the high one is twice this.
    #[arg(long, default_value_t = 25.0)]
    canny_low: f32,

    #[arg(long, default_value_t = 7)]
    seed: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let raw = load_frame(&args.input)?;
    let frame = raw
        .crop(CropRect::default())
        .context("frame smaller than the 480x480 crop")?;

    let mut cfg = DetectorConfig {
        color_seed: Some(args.seed),
        ..DetectorConfig::default()
    };
    cfg.preprocess.canny_low = args.canny_low;

    let mut pipeline = PupilPipeline::new(cfg);
    let result = pipeline.process_frame(&frame.as_view())?;

    println!(
        "{} contours, {} candidates, {} ellipses in {:.2} ms",
        result.contour_count,
        result.candidates.len(),
        result.overlays.len(),
        result.timings.total().as_secs_f64() * 1e3
    );
    for o in &result.overlays {
        let b = o.ellipse.to_rotated_box();
        println!(
            "  #{:<2} centre ({:.1}, {:.1}) axes {:.1} x {:.1} angle {:.1} deg",
            o.candidate_index, b.center[0], b.center[1], b.width, b.height, b.angle_deg
        );
    }
    for s in &result.skips {
        println!("  skipped {:?} #{}: {}", s.stage, s.index, s.cause);
    }

    let out = args.input.with_extension("annotated.png");
    save_rgb(&out, &result.annotated)?;
    println!("annotated frame: {}", out.display());
    Ok(())
}
