use crate::Error;
use crate::image::{Image, ImageView};

/// Interleaved `[r, g, b]` pixel.
pub type Rgb8 = [u8; 3];

/// A color frame as captured (after decoding), before preprocessing.
pub type ColorFrame = Image<Rgb8>;

// BT.601 luma weights in Q14 fixed point: 0.299, 0.587, 0.114.
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// Converts an RGB view into a single-channel intensity image.
pub fn rgb_to_gray(src: &ImageView<'_, Rgb8>) -> Image<u8> {
    let mut data = Vec::with_capacity(src.width() * src.height());
    for y in 0..src.height() {
        for &[r, g, b] in src.row(y) {
            let acc = LUMA_R * r as u32
                + LUMA_G * g as u32
                + LUMA_B * b as u32
                + (1 << (LUMA_SHIFT - 1));
            data.push((acc >> LUMA_SHIFT) as u8);
        }
    }
    Image::from_vec(src.width(), src.height(), data).expect("gray buffer matches view size")
}

/// Expands an intensity image into a gray RGB frame.
pub fn gray_to_rgb(src: &ImageView<'_, u8>) -> ColorFrame {
    let mut data = Vec::with_capacity(src.width() * src.height());
    for y in 0..src.height() {
        data.extend(src.row(y).iter().map(|&v| [v, v, v]));
    }
    Image::from_vec(src.width(), src.height(), data).expect("rgb buffer matches view size")
}

/// Builds a color frame from an interleaved 8-bit buffer.
///
/// Only 3-channel input is accepted; any other channel count is a frame
/// format error rather than something to coerce.
pub fn frame_from_interleaved(
    width: usize,
    height: usize,
    channels: usize,
    bytes: &[u8],
) -> Result<ColorFrame, Error> {
    if channels != 3 {
        return Err(Error::ChannelMismatch {
            expected: 3,
            actual: channels,
        });
    }
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage);
    }

    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(3))
        .ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: bytes.len(),
        })?;
    if bytes.len() != expected {
        return Err(Error::SizeMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    let data = bytes
        .chunks_exact(3)
        .map(|px| [px[0], px[1], px[2]])
        .collect();
    Image::from_vec(width, height, data)
}
