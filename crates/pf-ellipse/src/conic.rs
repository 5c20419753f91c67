use core::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

/// Coefficients `[A, B, C, D, E, F]` of `A x^2 + B xy + C y^2 + D x + E y + F = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConicCoeffs(pub [f64; 6]);

impl ConicCoeffs {
    pub fn eval(&self, x: f64, y: f64) -> f64 {
        let [a, b, c, d, e, f] = self.0;
        a * x * x + b * x * y + c * y * y + d * x + e * y + f
    }

    /// `B^2 - 4AC < 0`.
    pub fn is_ellipse(&self) -> bool {
        let [a, b, c, ..] = self.0;
        b * b - 4.0 * a * c < 0.0
    }

    pub fn to_ellipse(&self) -> Option<Ellipse> {
        conic_to_ellipse(self)
    }
}

/// Ellipse in centre / semi-axes / orientation form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub cx: f64,
    pub cy: f64,
    /// Semi-major axis.
    pub a: f64,
    /// Semi-minor axis.
    pub b: f64,
    /// Major axis direction in radians.
    pub angle: f64,
}

/// Full-axis box form: centre, axis lengths and angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotatedBox {
    pub center: [f64; 2],
    pub width: f64,
    pub height: f64,
    pub angle_deg: f64,
}

impl Ellipse {
    pub fn is_valid(&self) -> bool {
        [self.cx, self.cy, self.a, self.b, self.angle]
            .iter()
            .all(|v| v.is_finite())
            && self.a > 0.0
            && self.b > 0.0
    }

    pub fn area(&self) -> f64 {
        PI * self.a * self.b
    }

    pub fn to_conic(&self) -> ConicCoeffs {
        ellipse_to_conic(self)
    }

    pub fn to_rotated_box(&self) -> RotatedBox {
        RotatedBox {
            center: [self.cx, self.cy],
            width: 2.0 * self.a,
            height: 2.0 * self.b,
            angle_deg: self.angle.to_degrees(),
        }
    }

    /// Point at parameter `t` (radians) on the boundary.
    pub fn point_at(&self, t: f64) -> [f64; 2] {
        let (s, c) = self.angle.sin_cos();
        let (u, v) = (self.a * t.cos(), self.b * t.sin());
        [self.cx + c * u - s * v, self.cy + s * u + c * v]
    }

    /// `n` boundary points at evenly spaced parameters.
    pub fn sample_points(&self, n: usize) -> Vec<[f64; 2]> {
        (0..n)
            .map(|i| self.point_at(2.0 * PI * i as f64 / n as f64))
            .collect()
    }
}

/// Geometric form of a conic, or `None` when it is not a real, bounded
/// ellipse.
pub fn conic_to_ellipse(conic: &ConicCoeffs) -> Option<Ellipse> {
    let [a, b, c, d, e, f] = conic.0;

    let det = 4.0 * a * c - b * b;
    if det <= 0.0 || !det.is_finite() {
        return None;
    }

    // Centre: gradient of the conic vanishes.
    let cx = (b * e - 2.0 * c * d) / det;
    let cy = (b * d - 2.0 * a * e) / det;
    let f0 = a * cx * cx + b * cx * cy + c * cy * cy + d * cx + e * cy + f;
    if f0.abs() < 1e-15 {
        return None;
    }

    // Eigenvalues of the quadratic part; `theta` is the direction of `l_hi`.
    let mean = 0.5 * (a + c);
    let half = 0.5 * ((a - c) * (a - c) + b * b).sqrt();
    let (l_hi, l_lo) = (mean + half, mean - half);
    let theta = 0.5 * b.atan2(a - c);

    let r_hi = -f0 / l_hi;
    let r_lo = -f0 / l_lo;
    if r_hi <= 0.0 || r_lo <= 0.0 {
        return None;
    }

    let (major_sq, minor_sq, angle) = if r_hi >= r_lo {
        (r_hi, r_lo, theta)
    } else {
        (r_lo, r_hi, theta + FRAC_PI_2)
    };

    let ellipse = Ellipse {
        cx,
        cy,
        a: major_sq.sqrt(),
        b: minor_sq.sqrt(),
        angle: wrap_half_turn(angle),
    };
    ellipse.is_valid().then_some(ellipse)
}

/// Conic of an ellipse, scaled so that the value at the centre is `-1`.
pub fn ellipse_to_conic(el: &Ellipse) -> ConicCoeffs {
    let (s, c) = el.angle.sin_cos();
    let ia = 1.0 / (el.a * el.a);
    let ib = 1.0 / (el.b * el.b);

    let qa = c * c * ia + s * s * ib;
    let qb = 2.0 * c * s * (ia - ib);
    let qc = s * s * ia + c * c * ib;
    let qd = -2.0 * qa * el.cx - qb * el.cy;
    let qe = -qb * el.cx - 2.0 * qc * el.cy;
    let qf = qa * el.cx * el.cx + qb * el.cx * el.cy + qc * el.cy * el.cy - 1.0;

    ConicCoeffs([qa, qb, qc, qd, qe, qf])
}

fn wrap_half_turn(mut angle: f64) -> f64 {
    while angle > FRAC_PI_2 {
        angle -= PI;
    }
    while angle <= -FRAC_PI_2 {
        angle += PI;
    }
    angle
}
