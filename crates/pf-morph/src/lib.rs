//! Rank-order filters on 8-bit intensity images.
//!
//! Erosion, dilation and the median are the minimum, maximum and middle
//! order statistic over a square window. Erosion/dilation take a
//! `k x k` rectangular structuring element anchored at `k / 2` and ignore
//! samples that fall off the image. The median replicates border pixels.
//!
//! A structuring element of size 1 is the identity, so [`open_rect_u8`] with
//! `k = 1` returns an unchanged copy.

mod median;
mod rect;

pub use median::median_blur_u8;
pub use rect::{close_rect_u8, dilate_rect_u8, erode_rect_u8, open_rect_u8};
