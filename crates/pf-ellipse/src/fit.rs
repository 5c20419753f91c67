use core::f64::consts::SQRT_2;

use nalgebra::{Matrix3, Matrix6, SymmetricEigen, Vector6};

use crate::conic::{ConicCoeffs, Ellipse};
use crate::eigen::constrained_eigenvector;
use crate::error::FitError;

/// Smallest point count [`fit_ellipse`] accepts.
pub const MIN_FIT_POINTS: usize = 5;

const MIN_DIRECT_POINTS: usize = 6;

/// Fits an ellipse to `points`.
///
/// Five points are interpolated exactly; six or more use the direct
/// least-squares fit.
pub fn fit_ellipse(points: &[[f64; 2]]) -> Result<Ellipse, FitError> {
    let conic = match points.len() {
        n if n < MIN_FIT_POINTS => {
            return Err(FitError::TooFewPoints {
                needed: MIN_FIT_POINTS,
                got: n,
            });
        }
        MIN_FIT_POINTS => fit_conic_exact(points)?,
        _ => fit_conic_direct(points)?,
    };
    conic.to_ellipse().ok_or(FitError::NotAnEllipse)
}

/// Fitzgibbon direct least-squares fit, solved through the reduced 3x3
/// system of Halir and Flusser. The result is always ellipse-specific.
pub fn fit_conic_direct(points: &[[f64; 2]]) -> Result<ConicCoeffs, FitError> {
    if points.len() < MIN_DIRECT_POINTS {
        return Err(FitError::TooFewPoints {
            needed: MIN_DIRECT_POINTS,
            got: points.len(),
        });
    }

    let norm = Normalization::of(points)?;
    let scatter = norm.scatter(points);

    let s1 = scatter.fixed_view::<3, 3>(0, 0).into_owned();
    let s2 = scatter.fixed_view::<3, 3>(0, 3).into_owned();
    let s3 = scatter.fixed_view::<3, 3>(3, 3).into_owned();

    let s3_inv = s3.try_inverse().ok_or(FitError::NotAnEllipse)?;
    let t = -(s3_inv * s2.transpose());
    let m = s1 + s2 * t;

    // C1^-1 M with C1 = [[0, 0, 2], [0, -1, 0], [2, 0, 0]].
    let reduced = Matrix3::new(
        0.5 * m[(2, 0)],
        0.5 * m[(2, 1)],
        0.5 * m[(2, 2)],
        -m[(1, 0)],
        -m[(1, 1)],
        -m[(1, 2)],
        0.5 * m[(0, 0)],
        0.5 * m[(0, 1)],
        0.5 * m[(0, 2)],
    );

    let quad = constrained_eigenvector(&reduced).ok_or(FitError::NotAnEllipse)?;
    let lin = t * quad;
    let coeffs = Vector6::new(quad[0], quad[1], quad[2], lin[0], lin[1], lin[2]);

    finish(norm.restore(&coeffs))
}

/// Conic through the points by algebraic least squares: the eigenvector of
/// the smallest eigenvalue of the scatter matrix. With five points in
/// general position this is the unique interpolating conic.
pub fn fit_conic_exact(points: &[[f64; 2]]) -> Result<ConicCoeffs, FitError> {
    if points.len() < MIN_FIT_POINTS {
        return Err(FitError::TooFewPoints {
            needed: MIN_FIT_POINTS,
            got: points.len(),
        });
    }

    let norm = Normalization::of(points)?;
    let eig = SymmetricEigen::new(norm.scatter(points));

    let (k, _) = eig
        .eigenvalues
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .ok_or(FitError::NotAnEllipse)?;
    let coeffs: Vector6<f64> = eig.eigenvectors.column(k).into_owned();

    finish(norm.restore(&coeffs))
}

fn finish(conic: ConicCoeffs) -> Result<ConicCoeffs, FitError> {
    if conic.0.iter().all(|v| v.is_finite()) && conic.is_ellipse() {
        Ok(conic)
    } else {
        Err(FitError::NotAnEllipse)
    }
}

/// Centroid shift plus isotropic scale to mean distance `sqrt(2)`.
struct Normalization {
    mx: f64,
    my: f64,
    s: f64,
}

impl Normalization {
    /// Fails for point sets with no spread across some direction (all
    /// coincident or collinear); no ellipse passes through those.
    fn of(points: &[[f64; 2]]) -> Result<Self, FitError> {
        let n = points.len() as f64;
        let mx = points.iter().map(|p| p[0]).sum::<f64>() / n;
        let my = points.iter().map(|p| p[1]).sum::<f64>() / n;
        let spread = points
            .iter()
            .map(|p| (p[0] - mx).hypot(p[1] - my))
            .sum::<f64>()
            / n;
        if spread.is_nan() || spread <= 1e-12 {
            return Err(FitError::NotAnEllipse);
        }
        let s = SQRT_2 / spread;

        let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
        for p in points {
            let (x, y) = ((p[0] - mx) * s, (p[1] - my) * s);
            sxx += x * x;
            sxy += x * y;
            syy += y * y;
        }
        let (sxx, sxy, syy) = (sxx / n, sxy / n, syy / n);
        let thinnest = 0.5 * (sxx + syy) - (0.25 * (sxx - syy).powi(2) + sxy * sxy).sqrt();
        if thinnest.is_nan() || thinnest < 1e-9 {
            return Err(FitError::NotAnEllipse);
        }

        Ok(Self { mx, my, s })
    }

    /// `D^T D` for the design rows `[x^2, xy, y^2, x, y, 1]`.
    fn scatter(&self, points: &[[f64; 2]]) -> Matrix6<f64> {
        let mut acc = Matrix6::zeros();
        for p in points {
            let x = (p[0] - self.mx) * self.s;
            let y = (p[1] - self.my) * self.s;
            let row = Vector6::new(x * x, x * y, y * y, x, y, 1.0);
            acc += row * row.transpose();
        }
        acc
    }

    /// Maps a conic in normalised coordinates back to pixel coordinates.
    fn restore(&self, c: &Vector6<f64>) -> ConicCoeffs {
        let (mx, my, s) = (self.mx, self.my, self.s);
        let s2 = s * s;
        let (a, b, cc) = (c[0] * s2, c[1] * s2, c[2] * s2);
        let (d, e) = (c[3] * s, c[4] * s);

        ConicCoeffs([
            a,
            b,
            cc,
            d - 2.0 * a * mx - b * my,
            e - b * mx - 2.0 * cc * my,
            a * mx * mx + b * mx * my + cc * my * my - d * mx - e * my + c[5],
        ])
    }
}
