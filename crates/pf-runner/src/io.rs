//! File boundary: images in and out through the `image` crate, JSON through
//! `serde_json`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use image::{GrayImage, RgbImage};
use pf_core::{ColorFrame, Image, frame_from_interleaved};
use serde::{Deserialize, Serialize};

/// Decodes an image file into an RGB frame. Anything that is not a
/// three-channel image is refused.
pub fn load_frame(path: &Path) -> Result<ColorFrame> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let channels = dyn_img.color().channel_count() as usize;
    let (w, h) = (dyn_img.width() as usize, dyn_img.height() as usize);
    let raw = if channels == 3 {
        dyn_img.into_rgb8().into_raw()
    } else {
        dyn_img.into_bytes()
    };

    frame_from_interleaved(w, h, channels, &raw)
        .with_context(|| format!("building frame from {}", path.display()))
}

pub fn save_rgb(path: &Path, frame: &ColorFrame) -> Result<()> {
    let raw: Vec<u8> = frame.data().iter().flatten().copied().collect();
    let img = RgbImage::from_raw(frame.width() as u32, frame.height() as u32, raw)
        .context("constructing RgbImage from frame")?;
    img.save(path)
        .with_context(|| format!("saving image {}", path.display()))
}

pub fn save_gray(path: &Path, img: &Image<u8>) -> Result<()> {
    let gray = GrayImage::from_raw(img.width() as u32, img.height() as u32, img.data().to_vec())
        .context("constructing GrayImage from raw bytes")?;
    gray.save(path)
        .with_context(|| format!("saving image {}", path.display()))
}

pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(path, bytes).with_context(|| format!("writing json {}", path.display()))
}

pub fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}
