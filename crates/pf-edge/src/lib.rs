//! Binary edge maps for boundary tracing.
//!
//! [`CannyDetector`] runs the classic chain on an 8-bit intensity image:
//! 3x3 Sobel gradients (replicated border), non-maximum suppression along
//! the quantized gradient direction, then dual-threshold hysteresis with
//! 8-connectivity. A pixel is a definite edge when its magnitude is above
//! `high_thresh`; it is kept as a weak edge when above `low_thresh` and
//! connected to a definite edge.
//!
//! Magnitude defaults to the L1 norm `|gx| + |gy|`, so thresholds are on the
//! raw Sobel scale (a 0 -> 255 step has magnitude 1020).
//!
//! Output pixels are `0` or `255`. The one-pixel image border is never an
//! edge.

mod canny;

pub use canny::{CannyConfig, CannyDetector, GradientNorm};
