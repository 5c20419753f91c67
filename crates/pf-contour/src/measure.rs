use pf_core::Point2i;

/// Shoelace area with sign: positive for clockwise order on a y-down grid.
pub fn signed_area(points: &[Point2i]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut acc = 0i64;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        acc += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    0.5 * acc as f64
}

/// Absolute area enclosed by a closed polygon.
pub fn polygon_area(points: &[Point2i]) -> f64 {
    signed_area(points).abs()
}

/// Sum of Euclidean edge lengths; `closed` adds the last-to-first edge.
pub fn arc_length(points: &[Point2i], closed: bool) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let mut len = 0.0;
    for w in points.windows(2) {
        len += dist(w[0], w[1]);
    }
    if closed {
        len += dist(points[points.len() - 1], points[0]);
    }
    len
}

fn dist(a: Point2i, b: Point2i) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use pf_core::Point2i;

    use crate::{arc_length, polygon_area, signed_area};

    #[test]
    fn rectangle_area_and_perimeter() {
        let rect = [
            Point2i::new(0, 0),
            Point2i::new(30, 0),
            Point2i::new(30, 20),
            Point2i::new(0, 20),
        ];
        assert_eq!(polygon_area(&rect), 600.0);
        assert_eq!(arc_length(&rect, true), 100.0);
        assert_eq!(arc_length(&rect, false), 80.0);
    }

    #[test]
    fn reversing_order_flips_sign_only() {
        let tri = [Point2i::new(0, 0), Point2i::new(6, 0), Point2i::new(0, 4)];
        let mut rev = tri;
        rev.reverse();
        assert_relative_eq!(signed_area(&tri), -signed_area(&rev));
        assert_relative_eq!(polygon_area(&tri), 12.0);
    }

    #[test]
    fn diagonal_edges_use_euclidean_length() {
        let seg = [Point2i::new(0, 0), Point2i::new(3, 4)];
        assert_relative_eq!(arc_length(&seg, false), 5.0);
        assert_relative_eq!(arc_length(&seg, true), 10.0);
    }

    #[test]
    fn short_inputs_measure_zero() {
        assert_eq!(polygon_area(&[Point2i::new(1, 1), Point2i::new(2, 2)]), 0.0);
        assert_eq!(arc_length(&[Point2i::new(1, 1)], true), 0.0);
        assert_eq!(arc_length(&[], false), 0.0);
    }
}
