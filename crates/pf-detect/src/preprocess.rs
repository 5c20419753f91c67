use pf_core::{Error, Image, ImageView, Rgb8, rgb_to_gray};
use pf_edge::CannyDetector;
use pf_morph::{median_blur_u8, open_rect_u8};

use crate::config::PreprocessConfig;
use crate::error::DetectError;

/// Every intermediate image of one preprocessing pass.
#[derive(Debug, Clone)]
pub struct PreprocessStages {
    pub gray: Image<u8>,
    pub blurred: Image<u8>,
    pub opened: Image<u8>,
    pub edges: Image<u8>,
}

/// Turns a colour frame into a binary edge map.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    cfg: PreprocessConfig,
    canny: CannyDetector,
}

impl Preprocessor {
    pub fn new(cfg: PreprocessConfig) -> Self {
        Self {
            cfg,
            canny: CannyDetector::new(),
        }
    }

    pub fn config(&self) -> &PreprocessConfig {
        &self.cfg
    }

    pub fn run(&mut self, frame: &ImageView<'_, Rgb8>) -> Result<Image<u8>, DetectError> {
        Ok(self.run_stages(frame)?.edges)
    }

    pub fn run_stages(
        &mut self,
        frame: &ImageView<'_, Rgb8>,
    ) -> Result<PreprocessStages, DetectError> {
        if frame.is_empty() {
            return Err(Error::EmptyImage.into());
        }

        let gray = rgb_to_gray(frame);
        let blurred = median_blur_u8(&gray.as_view(), self.cfg.median_ksize)?;
        let opened = open_rect_u8(&blurred.as_view(), self.cfg.morph_ksize)?;
        let edges = self.canny.detect(&opened.as_view(), &self.cfg.canny());

        Ok(PreprocessStages {
            gray,
            blurred,
            opened,
            edges,
        })
    }
}

#[cfg(test)]
mod tests {
    use pf_core::{Error, Image};

    use super::Preprocessor;
    use crate::config::PreprocessConfig;
    use crate::error::DetectError;

    fn disc_frame(size: usize, r: f32) -> Image<[u8; 3]> {
        let c = 0.5 * size as f32;
        let mut img = Image::new_fill(size, size, [190u8, 170, 160]);
        for y in 0..size {
            for x in 0..size {
                let (dx, dy) = (x as f32 - c, y as f32 - c);
                if dx * dx + dy * dy <= r * r {
                    *img.get_mut(x, y).expect("in bounds") = [20, 25, 30];
                }
            }
        }
        img
    }

    #[test]
    fn output_matches_frame_size_and_is_binary() {
        let frame = disc_frame(96, 25.0);
        let edges = Preprocessor::default()
            .run(&frame.as_view())
            .expect("preprocess");

        assert_eq!(edges.dimensions(), (96, 96));
        assert!(edges.data().iter().all(|&v| v == 0 || v == 255));
        assert!(edges.data().iter().any(|&v| v == 255));
    }

    #[test]
    fn uniform_frame_has_no_edges() {
        let frame = Image::new_fill(64, 48, [120u8, 120, 120]);
        let edges = Preprocessor::default()
            .run(&frame.as_view())
            .expect("preprocess");
        assert!(edges.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn stages_are_exposed_in_order() {
        let frame = disc_frame(64, 15.0);
        let stages = Preprocessor::default()
            .run_stages(&frame.as_view())
            .expect("preprocess");

        assert_eq!(stages.gray.get(32, 32), Some(&24));
        // A 1x1 opening leaves the blurred image unchanged.
        assert_eq!(stages.blurred, stages.opened);
    }

    #[test]
    fn empty_frame_fails_fast() {
        let frame: Image<[u8; 3]> = Image::new_fill(0, 10, [0, 0, 0]);
        let err = Preprocessor::default().run(&frame.as_view()).unwrap_err();
        assert_eq!(err, DetectError::Image(Error::EmptyImage));
    }

    #[test]
    fn even_median_aperture_is_rejected() {
        let frame = disc_frame(32, 8.0);
        let mut pre = Preprocessor::new(PreprocessConfig {
            median_ksize: 4,
            ..PreprocessConfig::default()
        });
        let err = pre.run(&frame.as_view()).unwrap_err();
        assert!(matches!(
            err,
            DetectError::Image(Error::InvalidKernel { size: 4, .. })
        ));
    }
}
