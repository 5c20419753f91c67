use core::f64::consts::PI;

use pf_contour::{Contour, arc_length, convex_hull, polygon_area};
use pf_core::Point2i;
use serde::Serialize;

use crate::config::FilterConfig;
use crate::diagnostics::{DiagnosticsSink, SkipCause, SkipEvent, Stage};

/// Convex hull that passed both gates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// Position of the originating contour in the raw contour list.
    pub source_index: usize,
    pub hull: Vec<Point2i>,
    pub area: f64,
    pub perimeter: f64,
    pub circularity: f64,
}

/// Why a well-formed hull was not kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    SmallArea { area: f64 },
    LowCircularity { circularity: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContourVerdict {
    Candidate(Candidate),
    Rejected(Rejection),
    Skipped(SkipCause),
}

/// `4 pi A / P^2`: 1 for a circle, smaller for anything else.
pub fn circularity(area: f64, perimeter: f64) -> f64 {
    4.0 * PI * area / (perimeter * perimeter)
}

/// Runs the hull → area → perimeter → circularity chain on one contour.
pub fn assess_contour(index: usize, points: &[Point2i], cfg: &FilterConfig) -> ContourVerdict {
    let hull = convex_hull(points);
    if hull.len() < 3 {
        return ContourVerdict::Skipped(SkipCause::DegenerateHull {
            vertices: hull.len(),
        });
    }

    let area = polygon_area(&hull);
    if area <= cfg.min_hull_area {
        return ContourVerdict::Rejected(Rejection::SmallArea { area });
    }

    let perimeter = arc_length(&hull, true);
    if perimeter <= 0.0 || !perimeter.is_finite() {
        return ContourVerdict::Skipped(SkipCause::ZeroPerimeter);
    }

    let circularity = circularity(area, perimeter);
    if !circularity.is_finite() {
        return ContourVerdict::Skipped(SkipCause::NonFiniteCircularity);
    }
    if circularity <= cfg.min_circularity {
        return ContourVerdict::Rejected(Rejection::LowCircularity { circularity });
    }

    ContourVerdict::Candidate(Candidate {
        source_index: index,
        hull,
        area,
        perimeter,
        circularity,
    })
}

/// Keeps the candidates among `contours` in input order. Skips go to `diag`
/// and never stop the batch.
pub fn filter_candidates(
    contours: &[Contour],
    cfg: &FilterConfig,
    diag: &mut dyn DiagnosticsSink,
) -> Vec<Candidate> {
    let mut out = Vec::new();
    for (index, contour) in contours.iter().enumerate() {
        match assess_contour(index, &contour.points, cfg) {
            ContourVerdict::Candidate(c) => out.push(c),
            ContourVerdict::Rejected(_) => {}
            ContourVerdict::Skipped(cause) => diag.record(SkipEvent {
                stage: Stage::Filter,
                index,
                cause,
            }),
        }
    }
    out
}
