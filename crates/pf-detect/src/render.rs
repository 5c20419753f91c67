use pf_core::{ImageViewMut, Rgb8};
use pf_ellipse::{Ellipse, FitError, fit_ellipse};
use serde::Serialize;

use crate::color::ColorSampler;
use crate::config::RenderConfig;
use crate::diagnostics::{DiagnosticsSink, SkipCause, SkipEvent, Stage};
use crate::draw::{draw_ellipse, draw_polyline};
use crate::filter::Candidate;

/// What was drawn for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub candidate_index: usize,
    pub source_index: usize,
    pub ellipse: Ellipse,
    pub color: Rgb8,
}

/// Fits and draws candidates. Owns the colour sequence, so successive
/// frames keep drawing fresh colours.
pub struct Renderer {
    cfg: RenderConfig,
    colors: Box<dyn ColorSampler + Send>,
}

impl Renderer {
    pub fn new(cfg: RenderConfig, colors: Box<dyn ColorSampler + Send>) -> Self {
        Self { cfg, colors }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.cfg
    }

    pub fn set_colors(&mut self, colors: Box<dyn ColorSampler + Send>) {
        self.colors = colors;
    }

    /// Draws every candidate that yields an ellipse onto `canvas`, in order.
    /// Candidates that cannot be fitted are reported to `diag` by their
    /// position in `candidates`.
    pub fn render(
        &mut self,
        candidates: &[Candidate],
        canvas: &mut ImageViewMut<'_, Rgb8>,
        diag: &mut dyn DiagnosticsSink,
    ) -> Vec<Overlay> {
        let mut overlays = Vec::with_capacity(candidates.len());
        for (index, cand) in candidates.iter().enumerate() {
            let hull: Vec<[f64; 2]> = cand.hull.iter().map(|p| p.to_f64()).collect();

            let ellipse = match fit_ellipse(&hull) {
                Ok(el) => el,
                Err(err) => {
                    let cause = match err {
                        FitError::TooFewPoints { needed, got } => {
                            SkipCause::TooFewPoints { needed, got }
                        }
                        FitError::NotAnEllipse => SkipCause::FitFailed,
                    };
                    diag.record(SkipEvent {
                        stage: Stage::Render,
                        index,
                        cause,
                    });
                    continue;
                }
            };

            let color = self.colors.next_color();
            draw_polyline(canvas, &hull, true, color, self.cfg.hull_thickness);
            draw_ellipse(canvas, &ellipse, color, self.cfg.ellipse_thickness);

            overlays.push(Overlay {
                candidate_index: index,
                source_index: cand.source_index,
                ellipse,
                color,
            });
        }
        overlays
    }
}
