use core::fmt;

use serde::Serialize;
use tracing::warn;

/// Pipeline stage that dropped an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Index refers to the raw contour list.
    Filter,
    /// Index refers to the candidate list.
    Render,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipCause {
    /// Hull collapsed to a point or segment.
    DegenerateHull { vertices: usize },
    ZeroPerimeter,
    NonFiniteCircularity,
    TooFewPoints { needed: usize, got: usize },
    FitFailed,
}

impl fmt::Display for SkipCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateHull { vertices } => {
                write!(f, "degenerate hull with {vertices} vertices")
            }
            Self::ZeroPerimeter => write!(f, "hull perimeter is zero"),
            Self::NonFiniteCircularity => write!(f, "circularity is not finite"),
            Self::TooFewPoints { needed, got } => {
                write!(f, "too few points for ellipse fit: need {needed}, got {got}")
            }
            Self::FitFailed => write!(f, "ellipse fit failed"),
        }
    }
}

/// One item dropped without aborting the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkipEvent {
    pub stage: Stage,
    pub index: usize,
    pub cause: SkipCause,
}

/// Receiver for per-item skips.
pub trait DiagnosticsSink {
    fn record(&mut self, event: SkipEvent);
}

impl DiagnosticsSink for Vec<SkipEvent> {
    fn record(&mut self, event: SkipEvent) {
        self.push(event);
    }
}

/// Emits every skip as a `warn!` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl DiagnosticsSink for LogDiagnostics {
    fn record(&mut self, event: SkipEvent) {
        warn!(stage = ?event.stage, index = event.index, "skipped: {}", event.cause);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardDiagnostics;

impl DiagnosticsSink for DiscardDiagnostics {
    fn record(&mut self, _event: SkipEvent) {}
}
