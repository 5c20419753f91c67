use pf_edge::{CannyConfig, GradientNorm};
use serde::{Deserialize, Serialize};

/// Grayscale → median → opening → Canny parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Odd median aperture.
    pub median_ksize: usize,
    /// Side of the square opening element; 1 leaves the image unchanged.
    pub morph_ksize: usize,
    pub canny_low: f32,
    /// High threshold is `canny_low * canny_ratio`.
    pub canny_ratio: f32,
    pub gradient_norm: GradientNorm,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            median_ksize: 9,
            morph_ksize: 1,
            canny_low: 25.0,
            canny_ratio: 2.0,
            gradient_norm: GradientNorm::L1,
        }
    }
}

impl PreprocessConfig {
    pub fn canny(&self) -> CannyConfig {
        CannyConfig {
            norm: self.gradient_norm,
            ..CannyConfig::with_ratio(self.canny_low, self.canny_ratio)
        }
    }
}

/// Candidate gates. Both comparisons are strict: a hull must have
/// `area > min_hull_area` and `circularity > min_circularity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub min_hull_area: f64,
    pub min_circularity: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_hull_area: 600.0,
            min_circularity: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub hull_thickness: u32,
    pub ellipse_thickness: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            hull_thickness: 1,
            ellipse_thickness: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Frame size `process_frame` insists on; `None` accepts any size.
    pub expected_dims: Option<(usize, usize)>,
    /// Seed for overlay colours; `None` draws from OS entropy.
    pub color_seed: Option<u64>,
    pub preprocess: PreprocessConfig,
    pub filter: FilterConfig,
    pub render: RenderConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            expected_dims: Some((480, 480)),
            color_seed: None,
            preprocess: PreprocessConfig::default(),
            filter: FilterConfig::default(),
            render: RenderConfig::default(),
        }
    }
}
