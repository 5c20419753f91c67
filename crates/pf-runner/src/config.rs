use std::path::Path;

use anyhow::Result;
use pf_core::CropRect;
use pf_detect::DetectorConfig;
use serde::{Deserialize, Serialize};

use crate::io::read_json;

/// Everything the drivers need besides the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Raw frame size sources insist on; `None` accepts any size.
    pub expected_source_dims: Option<(usize, usize)>,
    /// Region handed to the pipeline.
    pub crop: CropRect,
    /// Line read from stdin that stops a live run.
    pub quit_key: String,
    pub detector: DetectorConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            expected_source_dims: Some((640, 480)),
            crop: CropRect::default(),
            quit_key: "q".to_string(),
            detector: DetectorConfig::default(),
        }
    }
}

impl RunnerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }

    /// Defaults when `path` is `None`.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pf_core::CropRect;

    use super::RunnerConfig;

    #[test]
    fn defaults_describe_the_reference_camera() {
        let cfg = RunnerConfig::default();
        assert_eq!(cfg.expected_source_dims, Some((640, 480)));
        assert_eq!(cfg.crop, CropRect::square(480));
        assert_eq!(cfg.quit_key, "q");
        assert_eq!(cfg.detector.expected_dims, Some((480, 480)));
    }

    #[test]
    fn loads_partial_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cfg.json");
        fs::write(
            &path,
            r#"{ "crop": { "x": 0, "y": 220, "width": 480, "height": 420 },
                 "detector": { "expected_dims": [480, 420], "filter": { "min_hull_area": 900.0 } } }"#,
        )
        .expect("write");

        let cfg = RunnerConfig::load_or_default(Some(&path)).expect("load");
        assert_eq!(cfg.crop.y, 220);
        assert_eq!(cfg.detector.expected_dims, Some((480, 420)));
        assert_eq!(cfg.detector.filter.min_hull_area, 900.0);
        assert_eq!(cfg.detector.filter.min_circularity, 0.8);
        assert_eq!(cfg.quit_key, "q");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(RunnerConfig::load(&dir.path().join("nope.json")).is_err());
    }
}
