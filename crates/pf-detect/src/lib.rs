//! Pupil candidate detection on single frames.
//!
//! A frame goes through four stages:
//!
//! 1. [`Preprocessor`]: grayscale, median blur, morphological opening and
//!    Canny, giving a 0/255 edge map.
//! 2. [`ContourExtractor`]: external contours of the edge map.
//! 3. [`filter_candidates`]: convex hull of each contour, kept only when its
//!    area and circularity both exceed the configured minimums.
//! 4. [`Renderer`]: ellipse fit per candidate, then hull and ellipse drawn in
//!    one colour from the renderer's [`ColorSampler`].
//!
//! [`PupilPipeline`] chains the stages. Per-item problems (a degenerate hull,
//! a hull too small to fit) never fail a frame; they are reported to a
//! [`DiagnosticsSink`] and the batch carries on. Frame-level problems (empty
//! frame, unexpected size, bad kernel) are returned as [`DetectError`].

mod color;
mod config;
mod diagnostics;
pub mod draw;
mod error;
mod extract;
mod filter;
mod pipeline;
mod preprocess;
mod render;

pub use color::{ColorSampler, FixedColors, RandomColors};
pub use config::{DetectorConfig, FilterConfig, PreprocessConfig, RenderConfig};
pub use diagnostics::{
    DiagnosticsSink, DiscardDiagnostics, LogDiagnostics, SkipCause, SkipEvent, Stage,
};
pub use error::DetectError;
pub use extract::ContourExtractor;
pub use filter::{
    Candidate, ContourVerdict, Rejection, assess_contour, circularity, filter_candidates,
};
pub use pipeline::{Detection, FrameResult, PupilPipeline, StageTimings};
pub use preprocess::{PreprocessStages, Preprocessor};
pub use render::{Overlay, Renderer};
