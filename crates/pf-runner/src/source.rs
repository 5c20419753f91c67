use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use pf_core::ColorFrame;

use crate::io::load_frame;

const FRAME_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Pull-based supplier of raw frames. `Ok(None)` marks the end of the stream.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<ColorFrame>>;
}

/// Frames read in file-name order from a directory, e.g. an exported eye
/// video.
#[derive(Debug)]
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    next: usize,
    expected_dims: Option<(usize, usize)>,
}

impl ImageSequenceSource {
    pub fn open(dir: &Path, expected_dims: Option<(usize, usize)>) -> Result<Self> {
        let paths = list_frame_files(dir)?;
        if paths.is_empty() {
            bail!("no frame images found in {}", dir.display());
        }
        Ok(Self {
            paths,
            next: 0,
            expected_dims,
        })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Result<Option<ColorFrame>> {
        let Some(path) = self.paths.get(self.next) else {
            return Ok(None);
        };
        self.next += 1;

        let frame = load_frame(path)?;
        check_source_dims(&frame, self.expected_dims)
            .with_context(|| format!("frame {}", path.display()))?;
        Ok(Some(frame))
    }
}

/// One frame handed out repeatedly; `None` repeats without end.
#[derive(Debug, Clone)]
pub struct StillSource {
    frame: ColorFrame,
    remaining: Option<usize>,
}

impl StillSource {
    pub fn new(frame: ColorFrame, repeat: Option<usize>) -> Self {
        Self {
            frame,
            remaining: repeat,
        }
    }

    pub fn open(
        path: &Path,
        expected_dims: Option<(usize, usize)>,
        repeat: Option<usize>,
    ) -> Result<Self> {
        let frame = load_frame(path)?;
        check_source_dims(&frame, expected_dims)
            .with_context(|| format!("frame {}", path.display()))?;
        Ok(Self::new(frame, repeat))
    }
}

impl FrameSource for StillSource {
    fn next_frame(&mut self) -> Result<Option<ColorFrame>> {
        match &mut self.remaining {
            Some(0) => Ok(None),
            Some(n) => {
                *n -= 1;
                Ok(Some(self.frame.clone()))
            }
            None => Ok(Some(self.frame.clone())),
        }
    }
}

/// Directory → sequence, single file → still frame repeated `repeat` times.
pub fn open_source(
    path: &Path,
    expected_dims: Option<(usize, usize)>,
    repeat: Option<usize>,
) -> Result<Box<dyn FrameSource>> {
    if path.is_dir() {
        Ok(Box::new(ImageSequenceSource::open(path, expected_dims)?))
    } else {
        Ok(Box::new(StillSource::open(path, expected_dims, repeat)?))
    }
}

pub fn check_source_dims(frame: &ColorFrame, expected: Option<(usize, usize)>) -> Result<()> {
    if let Some((w, h)) = expected
        && frame.dimensions() != (w, h)
    {
        bail!(
            "unexpected source frame size: expected {}x{}, got {}x{}",
            w,
            h,
            frame.width(),
            frame.height()
        );
    }
    Ok(())
}

/// Image files of `dir` with a known frame extension, sorted by name.
pub fn list_frame_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("reading frame directory {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("listing {}", dir.display()))?
            .path();
        let known = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| FRAME_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
        if known && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
