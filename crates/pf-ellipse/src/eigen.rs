use core::f64::consts::PI;

use nalgebra::{Matrix3, Vector3};

/// Eigenvector of the reduced Fitzgibbon system that satisfies the ellipse
/// constraint `4 a0 a2 - a1^2 > 0`.
///
/// `system` is `C1^-1 M`, which is not symmetric, so eigenvalues come from
/// the characteristic cubic and eigenvectors from the null space of
/// `system - lambda I`.
pub(crate) fn constrained_eigenvector(system: &Matrix3<f64>) -> Option<Vector3<f64>> {
    let m = system;
    let trace = m.trace();
    let minors = m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)] + m[(0, 0)] * m[(2, 2)]
        - m[(0, 2)] * m[(2, 0)]
        + m[(1, 1)] * m[(2, 2)]
        - m[(1, 2)] * m[(2, 1)];
    let det = m.determinant();

    let mut best: Option<(f64, Vector3<f64>)> = None;
    for lambda in real_cubic_roots(-trace, minors, -det) {
        let Some(v) = null_vector(&(m - Matrix3::identity() * lambda)) else {
            continue;
        };
        if 4.0 * v[0] * v[2] - v[1] * v[1] <= 0.0 {
            continue;
        }
        if best.as_ref().is_none_or(|(l, _)| lambda.abs() < *l) {
            best = Some((lambda.abs(), v));
        }
    }
    best.map(|(_, v)| v)
}

/// Unit null vector of a rank-2 matrix: the largest cross product of two rows.
fn null_vector(m: &Matrix3<f64>) -> Option<Vector3<f64>> {
    let r0 = m.row(0).transpose();
    let r1 = m.row(1).transpose();
    let r2 = m.row(2).transpose();

    let candidates = [r0.cross(&r1), r0.cross(&r2), r1.cross(&r2)];
    let v = candidates
        .into_iter()
        .max_by(|a, b| a.norm_squared().total_cmp(&b.norm_squared()))?;

    let n2 = v.norm_squared();
    if n2 < 1e-30 {
        return None;
    }
    Some(v / n2.sqrt())
}

/// Real roots of `x^3 + b x^2 + c x + d = 0`.
fn real_cubic_roots(b: f64, c: f64, d: f64) -> Vec<f64> {
    // x = t - b/3 gives t^3 + p t + q = 0.
    let shift = -b / 3.0;
    let p = c - b * b / 3.0;
    let q = 2.0 * b * b * b / 27.0 - b * c / 3.0 + d;
    let disc = q * q / 4.0 + p * p * p / 27.0;

    if disc > 0.0 {
        let s = disc.sqrt();
        let t = (-q / 2.0 + s).cbrt() + (-q / 2.0 - s).cbrt();
        return vec![t + shift];
    }

    let r = (-p / 3.0).max(0.0).sqrt();
    if r < 1e-15 {
        return vec![shift];
    }
    let phi = (-q / (2.0 * r * r * r)).clamp(-1.0, 1.0).acos();
    (0..3)
        .map(|k| 2.0 * r * ((phi + 2.0 * PI * k as f64) / 3.0).cos() + shift)
        .collect()
}
