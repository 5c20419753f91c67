//! Grid search over Canny threshold and median aperture.
//!
//! Each image is scored with
//! `contours + min |hull_area - ellipse_area| + (1000 if nothing was fitted)`,
//! so a setting is rewarded for producing few contours and at least one hull
//! that an ellipse describes well.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use pf_core::ColorFrame;
use pf_detect::{DetectorConfig, DiscardDiagnostics, FixedColors, PupilPipeline};
use pf_ellipse::fit_ellipse;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Added to the loss of an image without any fitted candidate.
pub const NO_CANDIDATE_PENALTY: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepGrid {
    pub canny_thresholds: Vec<f32>,
    pub median_sizes: Vec<usize>,
}

impl Default for SweepGrid {
    fn default() -> Self {
        Self {
            canny_thresholds: vec![
                4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0, 26.0, 28.0, 30.0,
                35.0, 40.0, 55.0, 60.0, 65.0, 70.0,
            ],
            median_sizes: vec![7, 9, 11, 13, 15, 17, 19, 21, 23],
        }
    }
}

/// One fitted candidate seen during the sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRecord {
    pub image: String,
    pub canny_threshold: f32,
    pub median_ksize: usize,
    pub hull_area: f64,
    pub ellipse_area: f64,
    pub circularity: f64,
}

/// Loss statistics for one grid point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepCell {
    pub canny_threshold: f32,
    pub median_ksize: usize,
    pub images: usize,
    pub loss_mean: f64,
    pub loss_std: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SweepOutcome {
    pub cells: Vec<SweepCell>,
    pub records: Vec<CandidateRecord>,
}

impl SweepOutcome {
    /// Grid point with the lowest mean loss.
    pub fn best(&self) -> Option<&SweepCell> {
        self.cells
            .iter()
            .min_by(|a, b| a.loss_mean.total_cmp(&b.loss_mean))
    }
}

/// Loss of one image given its raw contour count and the
/// `|hull_area - ellipse_area|` gap of every fitted candidate.
pub fn image_loss(contour_count: usize, area_gaps: &[f64]) -> f64 {
    let best = area_gaps.iter().copied().reduce(f64::min);
    match best {
        Some(gap) => contour_count as f64 + gap,
        None => contour_count as f64 + NO_CANDIDATE_PENALTY,
    }
}

/// Mean and population standard deviation; zeros for an empty slice.
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (mean, var.sqrt())
}

/// Evaluates every grid point on every named frame. Frames are used as
/// given; crop them beforehand.
pub fn run_sweep(
    frames: &[(String, ColorFrame)],
    base: &DetectorConfig,
    grid: &SweepGrid,
) -> Result<SweepOutcome> {
    let mut outcome = SweepOutcome::default();

    for &threshold in &grid.canny_thresholds {
        for &ksize in &grid.median_sizes {
            let mut cfg = base.clone();
            cfg.preprocess.canny_low = threshold;
            cfg.preprocess.median_ksize = ksize;
            let mut pipeline =
                PupilPipeline::with_colors(cfg, Box::new(FixedColors::new(Vec::new())));

            let mut losses = Vec::with_capacity(frames.len());
            for (name, frame) in frames {
                let edges = pipeline.preprocess(&frame.as_view()).with_context(|| {
                    format!("preprocessing {name} (threshold {threshold}, median {ksize})")
                })?;
                let (contours, candidates) =
                    pipeline.detect(&edges.as_view(), &mut DiscardDiagnostics);

                let mut gaps = Vec::with_capacity(candidates.len());
                for cand in &candidates {
                    let hull: Vec<[f64; 2]> = cand.hull.iter().map(|p| p.to_f64()).collect();
                    let Ok(ellipse) = fit_ellipse(&hull) else {
                        continue;
                    };
                    let ellipse_area = ellipse.area();
                    gaps.push((cand.area - ellipse_area).abs());
                    outcome.records.push(CandidateRecord {
                        image: name.clone(),
                        canny_threshold: threshold,
                        median_ksize: ksize,
                        hull_area: cand.area,
                        ellipse_area,
                        circularity: cand.circularity,
                    });
                }
                losses.push(image_loss(contours, &gaps));
            }

            let (loss_mean, loss_std) = mean_std(&losses);
            debug!(threshold, ksize, loss_mean, loss_std, "grid point done");
            outcome.cells.push(SweepCell {
                canny_threshold: threshold,
                median_ksize: ksize,
                images: frames.len(),
                loss_mean,
                loss_std,
            });
        }
    }

    if let Some(best) = outcome.best() {
        info!(
            threshold = best.canny_threshold,
            ksize = best.median_ksize,
            loss = best.loss_mean,
            "best grid point"
        );
    }
    Ok(outcome)
}

pub fn write_cells_csv(path: &Path, cells: &[SweepCell]) -> Result<()> {
    let mut file =
        fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    writeln!(file, "canny_threshold,median_ksize,images,loss_mean,loss_std")
        .context("writing csv header")?;
    for c in cells {
        writeln!(
            file,
            "{},{},{},{},{}",
            c.canny_threshold, c.median_ksize, c.images, c.loss_mean, c.loss_std
        )
        .context("writing csv row")?;
    }
    Ok(())
}

pub fn write_records_csv(path: &Path, records: &[CandidateRecord]) -> Result<()> {
    let mut file =
        fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    writeln!(
        file,
        "image,canny_threshold,median_ksize,hull_area,ellipse_area,circularity"
    )
    .context("writing csv header")?;
    for r in records {
        writeln!(
            file,
            "{},{},{},{},{},{}",
            csv_field(&r.image),
            r.canny_threshold,
            r.median_ksize,
            r.hull_area,
            r.ellipse_area,
            r.circularity
        )
        .context("writing csv row")?;
    }
    Ok(())
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
