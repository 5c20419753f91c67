//! Rasterisation of overlay outlines onto colour frames.

use core::f64::consts::PI;

use pf_core::{ImageViewMut, Rgb8};
use pf_ellipse::Ellipse;

const MIN_ELLIPSE_SEGMENTS: usize = 16;
const MAX_ELLIPSE_SEGMENTS: usize = 720;

/// Straight segment with a round brush of diameter about `thickness`.
/// Parts outside the canvas are clipped before rasterising.
pub fn draw_segment(
    canvas: &mut ImageViewMut<'_, Rgb8>,
    from: [f64; 2],
    to: [f64; 2],
    color: Rgb8,
    thickness: u32,
) {
    let radius = (thickness.max(1) / 2) as i64;
    let margin = radius as f64 + 1.0;
    let lo = [-margin, -margin];
    let hi = [
        canvas.width() as f64 - 1.0 + margin,
        canvas.height() as f64 - 1.0 + margin,
    ];
    let Some((a, b)) = clip_segment(from, to, lo, hi) else {
        return;
    };

    let (mut x, mut y) = (a[0].round() as i64, a[1].round() as i64);
    let (x1, y1) = (b[0].round() as i64, b[1].round() as i64);
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        stamp(canvas, x, y, color, radius);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

pub fn draw_polyline(
    canvas: &mut ImageViewMut<'_, Rgb8>,
    points: &[[f64; 2]],
    closed: bool,
    color: Rgb8,
    thickness: u32,
) {
    match points {
        [] => {}
        [p] => draw_segment(canvas, *p, *p, color, thickness),
        _ => {
            for w in points.windows(2) {
                draw_segment(canvas, w[0], w[1], color, thickness);
            }
            if closed {
                draw_segment(canvas, points[points.len() - 1], points[0], color, thickness);
            }
        }
    }
}

/// Closed polygon approximating the ellipse boundary, roughly one vertex per
/// two pixels of arc.
pub fn ellipse_outline(el: &Ellipse) -> Vec<[f64; 2]> {
    let (a, b) = (el.a.abs(), el.b.abs());
    let h = 3.0 * (a + b) - ((3.0 * a + b) * (a + 3.0 * b)).sqrt();
    let perimeter = PI * h;
    let n = if perimeter.is_finite() {
        ((perimeter / 2.0).ceil() as usize).clamp(MIN_ELLIPSE_SEGMENTS, MAX_ELLIPSE_SEGMENTS)
    } else {
        MIN_ELLIPSE_SEGMENTS
    };
    el.sample_points(n)
}

pub fn draw_ellipse(
    canvas: &mut ImageViewMut<'_, Rgb8>,
    el: &Ellipse,
    color: Rgb8,
    thickness: u32,
) {
    draw_polyline(canvas, &ellipse_outline(el), true, color, thickness);
}

fn stamp(canvas: &mut ImageViewMut<'_, Rgb8>, x: i64, y: i64, color: Rgb8, radius: i64) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                canvas.put_clipped(x + dx, y + dy, color);
            }
        }
    }
}

/// Liang-Barsky clip of segment `a`-`b` against the box `lo`..`hi`.
fn clip_segment(
    a: [f64; 2],
    b: [f64; 2],
    lo: [f64; 2],
    hi: [f64; 2],
) -> Option<([f64; 2], [f64; 2])> {
    if !a.iter().chain(b.iter()).all(|v| v.is_finite()) {
        return None;
    }

    let d = [b[0] - a[0], b[1] - a[1]];
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for axis in 0..2 {
        for (p, q) in [(-d[axis], a[axis] - lo[axis]), (d[axis], hi[axis] - a[axis])] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
    }

    Some((
        [a[0] + t0 * d[0], a[1] + t0 * d[1]],
        [a[0] + t1 * d[0], a[1] + t1 * d[1]],
    ))
}
