//! Ellipse geometry and fitting.
//!
//! [`fit_ellipse`] picks the estimator from the number of input points:
//! six or more go through the Fitzgibbon direct least-squares fit, exactly
//! five define a conic exactly, and anything less is refused with
//! [`FitError::TooFewPoints`]. Both paths work on Hartley-normalised
//! coordinates and only return proper ellipses.
//!
//! Angles are radians in `(-pi/2, pi/2]`, measured from +x towards +y on the
//! image grid. `a >= b` always holds for values produced here.

mod conic;
mod eigen;
mod error;
mod fit;

pub use conic::{ConicCoeffs, Ellipse, RotatedBox, conic_to_ellipse, ellipse_to_conic};
pub use error::FitError;
pub use fit::{MIN_FIT_POINTS, fit_conic_direct, fit_conic_exact, fit_ellipse};
