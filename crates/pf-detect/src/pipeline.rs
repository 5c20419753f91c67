use std::time::{Duration, Instant};

use pf_core::{ColorFrame, Image, ImageView, ImageViewMut, Rgb8};
use tracing::debug;

use crate::color::{ColorSampler, RandomColors};
use crate::config::DetectorConfig;
use crate::diagnostics::{DiagnosticsSink, SkipEvent};
use crate::error::DetectError;
use crate::extract::ContourExtractor;
use crate::filter::{Candidate, filter_candidates};
use crate::preprocess::{PreprocessStages, Preprocessor};
use crate::render::{Overlay, Renderer};

/// Everything produced for one frame.
#[derive(Debug, Clone)]
pub struct FrameResult {
    /// Copy of the input frame with hulls and ellipses drawn on it.
    pub annotated: ColorFrame,
    pub edges: Image<u8>,
    pub contour_count: usize,
    pub candidates: Vec<Candidate>,
    pub overlays: Vec<Overlay>,
    pub skips: Vec<SkipEvent>,
    pub timings: StageTimings,
}

/// Wall-clock time spent inside `process_frame`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageTimings {
    /// Grayscale through Canny.
    pub preprocess: Duration,
    /// Contours, filtering, fitting and drawing.
    pub shapes: Duration,
}

impl StageTimings {
    pub fn total(&self) -> Duration {
        self.preprocess + self.shapes
    }
}

/// Output of the shape stages on an edge map.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub contour_count: usize,
    pub candidates: Vec<Candidate>,
    pub overlays: Vec<Overlay>,
}

/// Preprocess → extract → filter → fit and render.
///
/// Scratch buffers are reused between frames but never carry results over;
/// only the colour sequence advances.
pub struct PupilPipeline {
    cfg: DetectorConfig,
    preprocessor: Preprocessor,
    extractor: ContourExtractor,
    renderer: Renderer,
}

impl PupilPipeline {
    pub fn new(cfg: DetectorConfig) -> Self {
        let colors = Box::new(RandomColors::new(cfg.color_seed));
        Self::with_colors(cfg, colors)
    }

    pub fn with_colors(cfg: DetectorConfig, colors: Box<dyn ColorSampler + Send>) -> Self {
        Self {
            preprocessor: Preprocessor::new(cfg.preprocess.clone()),
            extractor: ContourExtractor::new(),
            renderer: Renderer::new(cfg.render.clone(), colors),
            cfg,
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.cfg
    }

    pub fn preprocess(&mut self, frame: &ImageView<'_, Rgb8>) -> Result<Image<u8>, DetectError> {
        self.preprocessor.run(frame)
    }

    pub fn preprocess_stages(
        &mut self,
        frame: &ImageView<'_, Rgb8>,
    ) -> Result<PreprocessStages, DetectError> {
        self.preprocessor.run_stages(frame)
    }

    /// Raw contour count and the surviving candidates.
    pub fn detect(
        &mut self,
        edges: &ImageView<'_, u8>,
        diag: &mut dyn DiagnosticsSink,
    ) -> (usize, Vec<Candidate>) {
        let contours = self.extractor.extract(edges);
        let candidates = filter_candidates(&contours, &self.cfg.filter, diag);
        (contours.len(), candidates)
    }

    pub fn render(
        &mut self,
        candidates: &[Candidate],
        canvas: &mut ImageViewMut<'_, Rgb8>,
        diag: &mut dyn DiagnosticsSink,
    ) -> Vec<Overlay> {
        self.renderer.render(candidates, canvas, diag)
    }

    /// Shape stages on an externally produced edge map.
    pub fn process_edges(
        &mut self,
        edges: &ImageView<'_, u8>,
        canvas: &mut ImageViewMut<'_, Rgb8>,
        diag: &mut dyn DiagnosticsSink,
    ) -> Detection {
        let (contour_count, candidates) = self.detect(edges, diag);
        let overlays = self.render(&candidates, canvas, diag);
        Detection {
            contour_count,
            candidates,
            overlays,
        }
    }

    /// Full pipeline on one frame. The input is left untouched; drawing
    /// happens on a copy.
    pub fn process_frame(
        &mut self,
        frame: &ImageView<'_, Rgb8>,
    ) -> Result<FrameResult, DetectError> {
        self.check_dims(frame)?;

        let t0 = Instant::now();
        let edges = self.preprocess(frame)?;
        let t1 = Instant::now();

        let mut annotated = frame.to_image();
        let mut skips: Vec<SkipEvent> = Vec::new();
        let detection =
            self.process_edges(&edges.as_view(), &mut annotated.as_view_mut(), &mut skips);
        let timings = StageTimings {
            preprocess: t1 - t0,
            shapes: t1.elapsed(),
        };

        debug!(
            contours = detection.contour_count,
            candidates = detection.candidates.len(),
            ellipses = detection.overlays.len(),
            skipped = skips.len(),
            "frame processed"
        );

        Ok(FrameResult {
            annotated,
            edges,
            contour_count: detection.contour_count,
            candidates: detection.candidates,
            overlays: detection.overlays,
            skips,
            timings,
        })
    }

    /// Fails when the frame size differs from `expected_dims`.
    pub fn check_dims<T>(&self, frame: &ImageView<'_, T>) -> Result<(), DetectError> {
        let actual = (frame.width(), frame.height());
        match self.cfg.expected_dims {
            Some(expected) if expected != actual => {
                Err(DetectError::UnexpectedDimensions { expected, actual })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pf_core::Image;

    use super::PupilPipeline;
    use crate::color::FixedColors;
    use crate::config::DetectorConfig;
    use crate::error::DetectError;

    #[test]
    fn wrong_frame_size_is_rejected_before_work() {
        let mut pipeline = PupilPipeline::new(DetectorConfig::default());
        let frame = Image::new_fill(640, 480, [0u8; 3]);
        let err = pipeline.process_frame(&frame.as_view()).unwrap_err();
        assert_eq!(
            err,
            DetectError::UnexpectedDimensions {
                expected: (480, 480),
                actual: (640, 480),
            }
        );
    }

    #[test]
    fn size_check_can_be_disabled() {
        let cfg = DetectorConfig {
            expected_dims: None,
            ..DetectorConfig::default()
        };
        let mut pipeline =
            PupilPipeline::with_colors(cfg, Box::new(FixedColors::single([1, 2, 3])));
        let frame = Image::new_fill(64, 40, [90u8, 90, 90]);
        let out = pipeline.process_frame(&frame.as_view()).expect("processed");
        assert_eq!(out.annotated, frame);
        assert_eq!(out.edges.dimensions(), (64, 40));
        assert_eq!(out.contour_count, 0);
    }
}
