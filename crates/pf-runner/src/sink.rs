use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pf_core::ColorFrame;

use crate::io::save_rgb;

/// Receiver of annotated frames, in presentation order.
pub trait FrameSink {
    fn present(&mut self, index: usize, frame: &ColorFrame) -> Result<()>;
}

/// Writes `frame_00000.png`, `frame_00001.png`, ... into a directory.
#[derive(Debug, Clone)]
pub struct PngSequenceSink {
    dir: PathBuf,
}

impl PngSequenceSink {
    pub fn create(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_{index:05}.png"))
    }
}

impl FrameSink for PngSequenceSink {
    fn present(&mut self, index: usize, frame: &ColorFrame) -> Result<()> {
        save_rgb(&self.frame_path(index), frame)
    }
}

/// Drops every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _index: usize, _frame: &ColorFrame) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pf_core::Image;

    use super::{FrameSink, NullSink, PngSequenceSink};
    use crate::io::load_frame;

    #[test]
    fn png_sink_numbers_frames() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("annotated");
        let mut sink = PngSequenceSink::create(&out).expect("create");

        let frame = Image::new_fill(3, 2, [7u8, 8, 9]);
        sink.present(0, &frame).expect("present");
        sink.present(12, &frame).expect("present");

        assert!(out.join("frame_00000.png").is_file());
        let back = load_frame(&out.join("frame_00012.png")).expect("load");
        assert_eq!(back, frame);
    }

    #[test]
    fn null_sink_accepts_anything() {
        NullSink
            .present(3, &Image::new_fill(1, 1, [0u8; 3]))
            .expect("present");
    }
}
