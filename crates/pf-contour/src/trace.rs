use pf_core::{ImageView, Point2i};
use serde::{Deserialize, Serialize};

// Chain-code directions, counter-clockwise on a y-down grid starting east.
const DX: [isize; 8] = [1, 1, 0, -1, -1, -1, 0, 1];
const DY: [isize; 8] = [0, -1, -1, -1, 0, 1, 1, 1];
const DIRS_C4: [usize; 4] = [0, 2, 4, 6];
const WEST: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainApprox {
    /// Every border pixel.
    None,
    /// End points of straight chain runs only.
    #[default]
    Simple,
}

/// Closed border in tracing order, in image coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<Point2i>,
}

impl Contour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Reusable external border tracer.
///
/// Buffers are kept between calls so a live loop does not reallocate per
/// frame.
#[derive(Debug, Default)]
pub struct ContourTracer {
    fg: Vec<bool>,
    outside: Vec<bool>,
    consumed: Vec<bool>,
    stack: Vec<usize>,
    chain: Vec<usize>,
}

impl ContourTracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// External contours of all foreground (non-zero) components in raster
    /// discovery order.
    pub fn trace_external(&mut self, img: &ImageView<'_, u8>, approx: ChainApprox) -> Vec<Contour> {
        if img.is_empty() {
            return Vec::new();
        }

        let pw = img.width() + 2;
        let ph = img.height() + 2;
        self.load(img, pw, ph);
        self.mark_outside(pw, ph);

        let mut contours = Vec::new();
        for y in 1..ph - 1 {
            for x in 1..pw - 1 {
                let p = y * pw + x;
                if !self.fg[p] || self.consumed[p] || !self.outside[p - 1] {
                    continue;
                }

                self.follow_border(p, pw);
                let points = match approx {
                    ChainApprox::None => self.chain.iter().map(|&q| unpad(q, pw)).collect(),
                    ChainApprox::Simple => compress_chain(&self.chain, pw),
                };
                contours.push(Contour { points });
                self.consume_component(p, pw);
            }
        }
        contours
    }

    fn load(&mut self, img: &ImageView<'_, u8>, pw: usize, ph: usize) {
        let n = pw * ph;
        self.fg.clear();
        self.fg.resize(n, false);
        self.outside.clear();
        self.outside.resize(n, false);
        self.consumed.clear();
        self.consumed.resize(n, false);

        for y in 0..img.height() {
            let row = img.row(y);
            let base = (y + 1) * pw + 1;
            for (x, &v) in row.iter().enumerate() {
                self.fg[base + x] = v != 0;
            }
        }
    }

    /// Flood-fills background reachable from the padding ring with
    /// 4-connectivity.
    fn mark_outside(&mut self, pw: usize, ph: usize) {
        self.stack.clear();
        self.outside[0] = true;
        self.stack.push(0);

        while let Some(p) = self.stack.pop() {
            let (x, y) = (p % pw, p / pw);
            for &d in &DIRS_C4 {
                let Some(q) = neighbor(x, y, d, pw, ph) else {
                    continue;
                };
                if !self.fg[q] && !self.outside[q] {
                    self.outside[q] = true;
                    self.stack.push(q);
                }
            }
        }
    }

    /// Suzuki-Abe outer border following from `start`, whose west neighbour
    /// is background. Fills `self.chain` with padded indices.
    fn follow_border(&mut self, start: usize, pw: usize) {
        self.chain.clear();

        // First neighbour clockwise from west.
        let mut first = None;
        for k in 0..8 {
            let d = (WEST + 8 - k) % 8;
            if self.fg[step(start, d, pw)] {
                first = Some(d);
                break;
            }
        }
        let Some(d1) = first else {
            self.chain.push(start);
            return;
        };
        let i1 = step(start, d1, pw);

        let mut cur = start;
        let mut back = d1;
        loop {
            // Counter-clockwise from the pixel we came from.
            let mut found = back;
            for k in 1..=8 {
                let d = (back + k) % 8;
                if self.fg[step(cur, d, pw)] {
                    found = d;
                    break;
                }
            }

            self.chain.push(cur);
            let next = step(cur, found, pw);
            if next == start && cur == i1 {
                break;
            }
            back = (found + 4) % 8;
            cur = next;
        }
    }

    fn consume_component(&mut self, seed: usize, pw: usize) {
        self.stack.clear();
        self.consumed[seed] = true;
        self.stack.push(seed);

        while let Some(p) = self.stack.pop() {
            for d in 0..8 {
                let q = step(p, d, pw);
                if self.fg[q] && !self.consumed[q] {
                    self.consumed[q] = true;
                    self.stack.push(q);
                }
            }
        }
    }
}

/// One-shot convenience wrapper around [`ContourTracer`].
pub fn find_external_contours(img: &ImageView<'_, u8>, approx: ChainApprox) -> Vec<Contour> {
    ContourTracer::new().trace_external(img, approx)
}

// Foreground never touches the padding ring, so interior steps stay in range.
fn step(p: usize, d: usize, pw: usize) -> usize {
    let q = p as isize + DY[d] * pw as isize + DX[d];
    q as usize
}

fn neighbor(x: usize, y: usize, d: usize, w: usize, h: usize) -> Option<usize> {
    let nx = x as isize + DX[d];
    let ny = y as isize + DY[d];
    if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
        return None;
    }
    Some(ny as usize * w + nx as usize)
}

fn unpad(p: usize, pw: usize) -> Point2i {
    Point2i::new((p % pw) as i32 - 1, (p / pw) as i32 - 1)
}

fn compress_chain(chain: &[usize], pw: usize) -> Vec<Point2i> {
    let n = chain.len();
    if n < 3 {
        return chain.iter().map(|&p| unpad(p, pw)).collect();
    }

    let delta = |a: usize, b: usize| {
        let (pa, pb) = (unpad(chain[a], pw), unpad(chain[b], pw));
        (pb.x - pa.x, pb.y - pa.y)
    };

    let mut out = Vec::new();
    for i in 0..n {
        let prev = (i + n - 1) % n;
        let next = (i + 1) % n;
        if delta(prev, i) != delta(i, next) {
            out.push(unpad(chain[i], pw));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pf_core::{Image, Point2i};

    use super::{ChainApprox, ContourTracer, find_external_contours};

    fn paint(img: &mut Image<u8>, x0: usize, y0: usize, x1: usize, y1: usize) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                *img.get_mut(x, y).expect("in bounds") = 255;
            }
        }
    }

    fn outline(img: &mut Image<u8>, x0: usize, y0: usize, x1: usize, y1: usize) {
        for x in x0..=x1 {
            *img.get_mut(x, y0).expect("in bounds") = 255;
            *img.get_mut(x, y1).expect("in bounds") = 255;
        }
        for y in y0..=y1 {
            *img.get_mut(x0, y).expect("in bounds") = 255;
            *img.get_mut(x1, y).expect("in bounds") = 255;
        }
    }

    #[test]
    fn empty_map_has_no_contours() {
        let img = Image::new_fill(16, 12, 0u8);
        assert!(find_external_contours(&img.as_view(), ChainApprox::Simple).is_empty());
    }

    #[test]
    fn filled_rectangle_compresses_to_corners() {
        let mut img = Image::new_fill(20, 16, 0u8);
        paint(&mut img, 3, 4, 12, 9);

        let contours = find_external_contours(&img.as_view(), ChainApprox::Simple);
        assert_eq!(contours.len(), 1);

        let pts = &contours[0].points;
        assert_eq!(pts.len(), 4);
        for corner in [(3, 4), (12, 4), (12, 9), (3, 9)] {
            assert!(pts.contains(&Point2i::new(corner.0, corner.1)), "missing {corner:?}");
        }
    }

    #[test]
    fn outline_rectangle_yields_full_border_without_approximation() {
        let mut img = Image::new_fill(20, 16, 0u8);
        outline(&mut img, 2, 2, 10, 6);

        let contours = find_external_contours(&img.as_view(), ChainApprox::None);
        assert_eq!(contours.len(), 1);
        // 9 + 9 + 3 + 3 outline pixels, each visited once on the outer side.
        assert_eq!(contours[0].len(), 24);
        assert_eq!(contours[0].points[0], Point2i::new(2, 2));
    }

    #[test]
    fn nested_component_is_ignored() {
        let mut img = Image::new_fill(30, 30, 0u8);
        outline(&mut img, 2, 2, 25, 25);
        paint(&mut img, 10, 10, 14, 14);

        let contours = find_external_contours(&img.as_view(), ChainApprox::Simple);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].points.len(), 4);
        assert!(contours[0].points.contains(&Point2i::new(25, 25)));
    }

    #[test]
    fn separate_components_come_in_raster_order() {
        let mut img = Image::new_fill(30, 20, 0u8);
        paint(&mut img, 20, 2, 24, 5);
        paint(&mut img, 3, 8, 6, 12);

        let contours = find_external_contours(&img.as_view(), ChainApprox::Simple);
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[0].points[0], Point2i::new(20, 2));
        assert_eq!(contours[1].points[0], Point2i::new(3, 8));
    }

    #[test]
    fn diagonal_touch_joins_components() {
        let mut img = Image::new_fill(12, 12, 0u8);
        paint(&mut img, 2, 2, 4, 4);
        paint(&mut img, 5, 5, 7, 7);

        let contours = find_external_contours(&img.as_view(), ChainApprox::Simple);
        assert_eq!(contours.len(), 1);
    }

    #[test]
    fn isolated_pixel_is_a_single_point() {
        let mut img = Image::new_fill(8, 8, 0u8);
        *img.get_mut(3, 5).expect("in bounds") = 1;

        let contours = find_external_contours(&img.as_view(), ChainApprox::Simple);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].points, vec![Point2i::new(3, 5)]);
    }

    #[test]
    fn horizontal_segment_keeps_end_points() {
        let mut img = Image::new_fill(10, 5, 0u8);
        paint(&mut img, 1, 2, 6, 2);

        let contours = find_external_contours(&img.as_view(), ChainApprox::Simple);
        assert_eq!(contours[0].points, vec![Point2i::new(1, 2), Point2i::new(6, 2)]);
    }

    #[test]
    fn blob_touching_the_frame_is_traced_in_image_coordinates() {
        let mut img = Image::new_fill(10, 10, 0u8);
        paint(&mut img, 0, 0, 3, 9);

        let contours = find_external_contours(&img.as_view(), ChainApprox::Simple);
        assert_eq!(contours.len(), 1);
        for p in &contours[0].points {
            assert!((0..10).contains(&p.x) && (0..10).contains(&p.y));
        }
        assert!(contours[0].points.contains(&Point2i::new(0, 0)));
        assert!(contours[0].points.contains(&Point2i::new(3, 9)));
    }

    #[test]
    fn tracer_reuses_buffers_across_sizes() {
        let mut tracer = ContourTracer::new();

        let mut big = Image::new_fill(40, 40, 0u8);
        paint(&mut big, 5, 5, 30, 30);
        assert_eq!(tracer.trace_external(&big.as_view(), ChainApprox::Simple).len(), 1);

        let small = Image::new_fill(6, 4, 0u8);
        assert!(tracer.trace_external(&small.as_view(), ChainApprox::Simple).is_empty());
    }
}
