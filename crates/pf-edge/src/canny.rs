use pf_core::{BorderMode, Image, ImageView, map_index};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GradientNorm {
    #[default]
    L1,
    L2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CannyConfig {
    pub low_thresh: f32,
    pub high_thresh: f32,
    pub norm: GradientNorm,
}

impl CannyConfig {
    /// Low threshold with the high threshold at `ratio * low`.
    pub fn with_ratio(low_thresh: f32, ratio: f32) -> Self {
        Self {
            low_thresh,
            high_thresh: low_thresh * ratio,
            norm: GradientNorm::L1,
        }
    }
}

impl Default for CannyConfig {
    fn default() -> Self {
        Self::with_ratio(25.0, 2.0)
    }
}

/// Edge detector with scratch buffers reused across frames of equal size.
#[derive(Debug, Clone, Default)]
pub struct CannyDetector {
    width: usize,
    height: usize,
    gx: Vec<i32>,
    gy: Vec<i32>,
    mag: Vec<f32>,
    weak: Vec<u8>,
    edge: Vec<u8>,
    stack: Vec<usize>,
}

impl CannyDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn detect(&mut self, img: &ImageView<'_, u8>, cfg: &CannyConfig) -> Image<u8> {
        let (w, h) = (img.width(), img.height());
        self.ensure_dims(w, h);
        if w == 0 || h == 0 {
            return Image::new_fill(w, h, 0);
        }

        self.compute_sobel(img, cfg.norm);
        self.suppress_and_threshold(cfg);
        self.hysteresis();

        let data = self.edge.iter().map(|&e| if e != 0 { 255 } else { 0 }).collect();
        Image::from_vec(w, h, data).expect("edge buffer matches image size")
    }

    fn ensure_dims(&mut self, w: usize, h: usize) {
        let n = w.saturating_mul(h);
        if self.width != w || self.height != h || self.mag.len() != n {
            self.width = w;
            self.height = h;
            self.gx = vec![0; n];
            self.gy = vec![0; n];
            self.mag = vec![0.0; n];
            self.weak = vec![0; n];
            self.edge = vec![0; n];
        }
    }

    fn compute_sobel(&mut self, img: &ImageView<'_, u8>, norm: GradientNorm) {
        let (w, h) = (self.width, self.height);

        for y in 0..h {
            let ym1 = map_index(y as isize - 1, h, BorderMode::Replicate).expect("non-empty");
            let yp1 = map_index(y as isize + 1, h, BorderMode::Replicate).expect("non-empty");
            let (r0, r1, r2) = (img.row(ym1), img.row(y), img.row(yp1));

            for x in 0..w {
                let xm1 = x.saturating_sub(1);
                let xp1 = (x + 1).min(w - 1);

                let p00 = r0[xm1] as i32;
                let p01 = r0[x] as i32;
                let p02 = r0[xp1] as i32;
                let p10 = r1[xm1] as i32;
                let p12 = r1[xp1] as i32;
                let p20 = r2[xm1] as i32;
                let p21 = r2[x] as i32;
                let p22 = r2[xp1] as i32;

                let gxx = (p02 + 2 * p12 + p22) - (p00 + 2 * p10 + p20);
                let gyy = (p20 + 2 * p21 + p22) - (p00 + 2 * p01 + p02);

                let idx = y * w + x;
                self.gx[idx] = gxx;
                self.gy[idx] = gyy;
                self.mag[idx] = match norm {
                    GradientNorm::L1 => (gxx.abs() + gyy.abs()) as f32,
                    GradientNorm::L2 => ((gxx * gxx + gyy * gyy) as f32).sqrt(),
                };
            }
        }
    }

    fn suppress_and_threshold(&mut self, cfg: &CannyConfig) {
        let (w, h) = (self.width, self.height);
        let mut low = cfg.low_thresh;
        let mut high = cfg.high_thresh;
        if high < low {
            core::mem::swap(&mut high, &mut low);
        }

        self.weak.fill(0);
        self.edge.fill(0);
        self.stack.clear();
        if w < 3 || h < 3 {
            return;
        }

        const TAN22_5: f32 = 0.414_213_57;
        const TAN67_5: f32 = 2.414_213_7;

        for y in 1..(h - 1) {
            for x in 1..(w - 1) {
                let idx = y * w + x;
                let m = self.mag[idx];
                if m <= low {
                    continue;
                }

                let gxx = self.gx[idx] as f32;
                let gyy = self.gy[idx] as f32;
                let ax = gxx.abs();
                let ay = gyy.abs();

                // Strict on the "before" neighbor, non-strict on the "after"
                // one, so a two-pixel plateau yields a single edge pixel.
                let (before, after) = if ay <= ax * TAN22_5 {
                    (idx - 1, idx + 1)
                } else if ay >= ax * TAN67_5 {
                    (idx - w, idx + w)
                } else if gxx * gyy > 0.0 {
                    (idx - w - 1, idx + w + 1)
                } else {
                    (idx - w + 1, idx + w - 1)
                };

                if m > self.mag[before] && m >= self.mag[after] {
                    self.weak[idx] = 1;
                    if m > high {
                        self.edge[idx] = 1;
                        self.stack.push(idx);
                    }
                }
            }
        }
    }

    fn hysteresis(&mut self) {
        let (w, h) = (self.width, self.height);

        while let Some(idx) = self.stack.pop() {
            let x = idx % w;
            let y = idx / w;

            let y0 = y.saturating_sub(1);
            let y1 = (y + 1).min(h - 1);
            let x0 = x.saturating_sub(1);
            let x1 = (x + 1).min(w - 1);

            for ny in y0..=y1 {
                for nx in x0..=x1 {
                    let nidx = ny * w + nx;
                    if self.edge[nidx] == 0 && self.weak[nidx] != 0 {
                        self.edge[nidx] = 1;
                        self.stack.push(nidx);
                    }
                }
            }
        }
    }
}
