use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use pf_core::{ColorFrame, Rgb8};
use pf_detect::{Candidate, PupilPipeline, SkipEvent};
use pf_ellipse::{Ellipse, RotatedBox};
use pf_runner::io::{load_frame, save_gray, save_rgb, write_json};
use pf_runner::sweep::{write_cells_csv, write_records_csv};
use pf_runner::{
    BenchHarness, BenchReport, FrameSink, NullSink, PngSequenceSink, RunnerConfig, StopSignal,
    SweepGrid, check_source_dims, list_frame_files, open_source, run_sweep, spawn_stdin_watcher,
};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "pupilfit")]
#[command(about = "Fit ellipses to pupil candidates in eye-camera frames")]
#[command(version)]
struct Cli {
    /// JSON runner configuration; defaults apply to missing fields.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process frames until the input ends or the quit key is entered.
    Run(RunArgs),
    /// Time a fixed number of frames without writing output.
    Bench(BenchArgs),
    /// Process one frame and dump every artefact.
    Probe(ProbeArgs),
    /// Score Canny threshold and median aperture combinations on a folder.
    Sweep(SweepArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct DetectArgs {
    #[arg(long)]
    canny_low: Option<f32>,
    #[arg(long)]
    median_ksize: Option<usize>,
    /// Seed for overlay colours.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Frame directory or single image.
    #[arg(long, required = true)]
    input: PathBuf,
    /// Directory for annotated frames; nothing is written when absent.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Times a single image is replayed; endless when absent.
    #[arg(long)]
    repeat: Option<usize>,
    #[command(flatten)]
    detect: DetectArgs,
}

#[derive(Args, Debug, Clone)]
struct BenchArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value_t = 100)]
    frames: usize,
    /// Also write the report as JSON.
    #[arg(long)]
    json: Option<PathBuf>,
    #[command(flatten)]
    detect: DetectArgs,
}

#[derive(Args, Debug, Clone)]
struct ProbeArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "probe_out")]
    out: PathBuf,
    /// Also save the grayscale, blurred and opened images.
    #[arg(long)]
    stages: bool,
    #[command(flatten)]
    detect: DetectArgs,
}

#[derive(Args, Debug, Clone)]
struct SweepArgs {
    /// Directory of frames.
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "sweep_out")]
    out: PathBuf,
    #[arg(long, value_delimiter = ',')]
    thresholds: Option<Vec<f32>>,
    #[arg(long, value_delimiter = ',')]
    median_sizes: Option<Vec<usize>>,
}

#[derive(Debug, Clone, Serialize)]
struct EllipseDto {
    candidate_index: usize,
    source_index: usize,
    ellipse: Ellipse,
    rotated_box: RotatedBox,
    area: f64,
    color: Rgb8,
}

#[derive(Debug, Clone, Serialize)]
struct ProbeReport {
    input: String,
    width: usize,
    height: usize,
    contour_count: usize,
    preprocess_ms: f64,
    shapes_ms: f64,
    candidates: Vec<Candidate>,
    ellipses: Vec<EllipseDto>,
    skips: Vec<SkipEvent>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = RunnerConfig::load_or_default(cli.config.as_deref())?;

    match cli.cmd {
        Command::Run(args) => run_live(cfg, args),
        Command::Bench(args) => run_bench(cfg, args),
        Command::Probe(args) => run_probe(cfg, args),
        Command::Sweep(args) => run_grid(cfg, args),
    }
}

fn run_live(mut cfg: RunnerConfig, args: RunArgs) -> Result<()> {
    apply_detect_args(&mut cfg, &args.detect);
    let mut source = open_source(&args.input, cfg.expected_source_dims, args.repeat)?;
    let mut sink: Box<dyn FrameSink> = match &args.out {
        Some(dir) => Box::new(PngSequenceSink::create(dir)?),
        None => Box::new(NullSink),
    };

    let stop = StopSignal::new();
    // Detached: a blocked stdin read must not keep the process alive.
    let _watcher = spawn_stdin_watcher(stop.clone(), cfg.quit_key.clone());
    info!(input = %args.input.display(), quit_key = %cfg.quit_key, "running");

    let mut pipeline = PupilPipeline::new(cfg.detector.clone());
    let report = BenchHarness::new(cfg.crop, None).run(
        &mut pipeline,
        source.as_mut(),
        sink.as_mut(),
        &stop,
    )?;
    println!("{report}");
    Ok(())
}

fn run_bench(mut cfg: RunnerConfig, args: BenchArgs) -> Result<()> {
    apply_detect_args(&mut cfg, &args.detect);
    let mut source = open_source(&args.input, cfg.expected_source_dims, None)?;
    let mut pipeline = PupilPipeline::new(cfg.detector.clone());

    let report: BenchReport = BenchHarness::new(cfg.crop, Some(args.frames)).run(
        &mut pipeline,
        source.as_mut(),
        &mut NullSink,
        &StopSignal::new(),
    )?;
    println!("{report}");

    if let Some(path) = &args.json {
        write_json(path, &report)?;
        info!(path = %path.display(), "report written");
    }
    Ok(())
}

fn run_probe(mut cfg: RunnerConfig, args: ProbeArgs) -> Result<()> {
    apply_detect_args(&mut cfg, &args.detect);
    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;

    let frame = load_cropped(&args.input, &cfg)?;
    let mut pipeline = PupilPipeline::new(cfg.detector.clone());
    let result = pipeline
        .process_frame(&frame.as_view())
        .with_context(|| format!("processing {}", args.input.display()))?;

    save_rgb(&args.out.join("annotated.png"), &result.annotated)?;
    save_gray(&args.out.join("edges.png"), &result.edges)?;
    if args.stages {
        let stages = pipeline.preprocess_stages(&frame.as_view())?;
        save_gray(&args.out.join("gray.png"), &stages.gray)?;
        save_gray(&args.out.join("blurred.png"), &stages.blurred)?;
        save_gray(&args.out.join("opened.png"), &stages.opened)?;
    }

    let ellipses = result
        .overlays
        .iter()
        .map(|o| EllipseDto {
            candidate_index: o.candidate_index,
            source_index: o.source_index,
            ellipse: o.ellipse,
            rotated_box: o.ellipse.to_rotated_box(),
            area: o.ellipse.area(),
            color: o.color,
        })
        .collect();
    let report = ProbeReport {
        input: args.input.display().to_string(),
        width: frame.width(),
        height: frame.height(),
        contour_count: result.contour_count,
        preprocess_ms: result.timings.preprocess.as_secs_f64() * 1e3,
        shapes_ms: result.timings.shapes.as_secs_f64() * 1e3,
        candidates: result.candidates,
        ellipses,
        skips: result.skips,
    };
    write_json(&args.out.join("result.json"), &report)?;

    info!(
        contours = report.contour_count,
        candidates = report.candidates.len(),
        ellipses = report.ellipses.len(),
        out = %args.out.display(),
        "probe written"
    );
    Ok(())
}

fn run_grid(cfg: RunnerConfig, args: SweepArgs) -> Result<()> {
    let paths = list_frame_files(&args.input)?;
    if paths.is_empty() {
        bail!("no frame images found in {}", args.input.display());
    }

    let mut frames = Vec::with_capacity(paths.len());
    for path in &paths {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        frames.push((name, load_cropped(path, &cfg)?));
    }

    let mut grid = SweepGrid::default();
    if let Some(t) = args.thresholds {
        grid.canny_thresholds = t;
    }
    if let Some(k) = args.median_sizes {
        grid.median_sizes = k;
    }
    info!(
        images = frames.len(),
        points = grid.canny_thresholds.len() * grid.median_sizes.len(),
        "sweeping"
    );

    let outcome = run_sweep(&frames, &cfg.detector, &grid)?;

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;
    write_cells_csv(&args.out.join("loss.csv"), &outcome.cells)?;
    write_records_csv(&args.out.join("candidates.csv"), &outcome.records)?;

    if let Some(best) = outcome.best() {
        println!(
            "best: canny_threshold={} median_ksize={} loss_mean={:.3} loss_std={:.3}",
            best.canny_threshold, best.median_ksize, best.loss_mean, best.loss_std
        );
    }
    Ok(())
}

fn apply_detect_args(cfg: &mut RunnerConfig, args: &DetectArgs) {
    if let Some(v) = args.canny_low {
        cfg.detector.preprocess.canny_low = v;
    }
    if let Some(v) = args.median_ksize {
        cfg.detector.preprocess.median_ksize = v;
    }
    if args.seed.is_some() {
        cfg.detector.color_seed = args.seed;
    }
}

fn load_cropped(path: &Path, cfg: &RunnerConfig) -> Result<ColorFrame> {
    let frame = load_frame(path)?;
    check_source_dims(&frame, cfg.expected_source_dims)
        .with_context(|| format!("frame {}", path.display()))?;
    frame
        .crop(cfg.crop)
        .with_context(|| format!("cropping {} to {:?}", path.display(), cfg.crop))
}
