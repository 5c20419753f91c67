use pf_core::Point2i;

/// Convex hull of a point set.
///
/// Vertices are returned without duplicates or collinear points, in
/// clockwise order on a y-down image grid (positive [`signed_area`]).
/// Fewer than three distinct, non-collinear inputs yield a hull with fewer
/// than three vertices.
///
/// [`signed_area`]: crate::signed_area
pub fn convex_hull(points: &[Point2i]) -> Vec<Point2i> {
    let mut pts = points.to_vec();
    pts.sort_unstable_by_key(|p| (p.x, p.y));
    pts.dedup();

    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<Point2i> = Vec::with_capacity(pts.len() + 1);
    for &p in &pts {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }

    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0
        {
            hull.pop();
        }
        hull.push(p);
    }

    hull.pop();
    hull
}

fn cross(o: Point2i, a: Point2i, b: Point2i) -> i64 {
    let (ax, ay) = ((a.x - o.x) as i64, (a.y - o.y) as i64);
    let (bx, by) = ((b.x - o.x) as i64, (b.y - o.y) as i64);
    ax * by - ay * bx
}
