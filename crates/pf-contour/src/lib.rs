//! Contour extraction and polygon geometry on binary maps.
//!
//! [`ContourTracer`] reports only *external* borders: the outer boundary of
//! every 8-connected foreground component that can be reached from outside
//! the image through 4-connected background. Components sitting inside a
//! hole of another component are ignored. Border following uses the
//! Suzuki-Abe rules; the map is treated as if padded with one ring of
//! background, so blobs touching the image edge still get a closed border.
//!
//! With [`ChainApprox::Simple`] each straight horizontal, vertical or
//! diagonal run of the border keeps only its end points, so an axis-aligned
//! rectangle comes back as four corners.
//!
//! Hulls and measures work on integer [`Point2i`] polygons:
//! - [`convex_hull`] uses the monotone chain and drops collinear vertices.
//! - [`polygon_area`] is the absolute shoelace area.
//! - [`arc_length`] sums Euclidean edge lengths.
//!
//! [`Point2i`]: pf_core::Point2i

mod hull;
mod measure;
mod trace;

pub use hull::convex_hull;
pub use measure::{arc_length, polygon_area, signed_area};
pub use trace::{ChainApprox, Contour, ContourTracer, find_external_contours};
