use std::fmt;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use pf_core::CropRect;
use pf_detect::{DiagnosticsSink, LogDiagnostics, PupilPipeline};
use serde::Serialize;
use tracing::{debug, info};

use crate::sink::FrameSink;
use crate::source::FrameSource;
use crate::stop::StopSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Budget,
    EndOfStream,
    Signal,
}

/// Aggregate timings of one driver loop.
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub frames: usize,
    pub stop_reason: StopReason,
    /// Wall-clock of the whole loop, I/O included.
    pub elapsed_secs: f64,
    pub average_fps: f64,
    /// Time inside `process_frame` calls.
    pub pipeline_total_secs: f64,
    pub pipeline_avg_ms: f64,
    pub preprocess_total_secs: f64,
    pub preprocess_avg_ms: f64,
    pub shapes_total_secs: f64,
    pub shapes_avg_ms: f64,
    pub candidates: usize,
    pub ellipses: usize,
    pub skipped: usize,
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Frames: {}", self.frames)?;
        writeln!(f, "Total Execution Time: {:.3} s", self.elapsed_secs)?;
        writeln!(f, "Average FPS: {:.2}", self.average_fps)?;
        writeln!(
            f,
            "Pipeline: {:.3} s total, {:.3} ms/frame",
            self.pipeline_total_secs, self.pipeline_avg_ms
        )?;
        writeln!(
            f,
            "  preprocess: {:.3} s total, {:.3} ms/frame",
            self.preprocess_total_secs, self.preprocess_avg_ms
        )?;
        writeln!(
            f,
            "  shapes:     {:.3} s total, {:.3} ms/frame",
            self.shapes_total_secs, self.shapes_avg_ms
        )?;
        write!(
            f,
            "Candidates: {}, ellipses: {}, skipped: {} (stopped: {:?})",
            self.candidates, self.ellipses, self.skipped, self.stop_reason
        )
    }
}

#[derive(Debug, Default)]
struct Totals {
    pipeline: Duration,
    preprocess: Duration,
    shapes: Duration,
    candidates: usize,
    ellipses: usize,
    skipped: usize,
}

/// Drives source → crop → pipeline → sink until the budget, the end of the
/// stream or the stop signal, whichever comes first.
#[derive(Debug, Clone)]
pub struct BenchHarness {
    crop: CropRect,
    budget: Option<usize>,
}

impl BenchHarness {
    pub fn new(crop: CropRect, budget: Option<usize>) -> Self {
        Self { crop, budget }
    }

    pub fn run(
        &self,
        pipeline: &mut PupilPipeline,
        source: &mut dyn FrameSource,
        sink: &mut dyn FrameSink,
        stop: &StopSignal,
    ) -> Result<BenchReport> {
        let mut totals = Totals::default();
        let mut frames = 0usize;
        let start = Instant::now();

        let stop_reason = loop {
            if self.budget.is_some_and(|b| frames >= b) {
                break StopReason::Budget;
            }
            if stop.is_raised() {
                break StopReason::Signal;
            }
            let Some(raw) = source.next_frame()? else {
                break StopReason::EndOfStream;
            };

            let frame = raw
                .crop(self.crop)
                .with_context(|| format!("cropping frame {frames} to {:?}", self.crop))?;

            let call = Instant::now();
            let result = pipeline
                .process_frame(&frame.as_view())
                .with_context(|| format!("processing frame {frames}"))?;
            totals.pipeline += call.elapsed();
            totals.preprocess += result.timings.preprocess;
            totals.shapes += result.timings.shapes;
            totals.candidates += result.candidates.len();
            totals.ellipses += result.overlays.len();
            totals.skipped += result.skips.len();

            for event in &result.skips {
                LogDiagnostics.record(*event);
            }
            debug!(
                frame = frames,
                contours = result.contour_count,
                ellipses = result.overlays.len(),
                "frame done"
            );

            sink.present(frames, &result.annotated)?;
            frames += 1;
        };

        let report = build_report(frames, stop_reason, start.elapsed(), &totals);
        info!(
            frames = report.frames,
            fps = report.average_fps,
            stop = ?report.stop_reason,
            "run finished"
        );
        Ok(report)
    }
}

fn build_report(
    frames: usize,
    stop_reason: StopReason,
    elapsed: Duration,
    totals: &Totals,
) -> BenchReport {
    let elapsed_secs = elapsed.as_secs_f64();
    let per_frame_ms = |d: Duration| {
        if frames == 0 {
            0.0
        } else {
            d.as_secs_f64() * 1000.0 / frames as f64
        }
    };

    BenchReport {
        frames,
        stop_reason,
        elapsed_secs,
        average_fps: if elapsed_secs > 0.0 {
            frames as f64 / elapsed_secs
        } else {
            0.0
        },
        pipeline_total_secs: totals.pipeline.as_secs_f64(),
        pipeline_avg_ms: per_frame_ms(totals.pipeline),
        preprocess_total_secs: totals.preprocess.as_secs_f64(),
        preprocess_avg_ms: per_frame_ms(totals.preprocess),
        shapes_total_secs: totals.shapes.as_secs_f64(),
        shapes_avg_ms: per_frame_ms(totals.shapes),
        candidates: totals.candidates,
        ellipses: totals.ellipses,
        skipped: totals.skipped,
    }
}
