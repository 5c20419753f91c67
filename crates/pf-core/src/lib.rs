//! Foundational primitives for the pupilfit pipeline.
//!
//! ## Images and Stride
//! [`Image`] owns a contiguous row-major buffer. [`ImageView`] and
//! [`ImageViewMut`] borrow a buffer with an element stride (not a byte
//! stride), so a view can address a crop of a larger frame without copying.
//!
//! ## Frames
//! Color frames are `Image<Rgb8>` with interleaved `[r, g, b]` pixels, the
//! same channel order the `image` crate decodes to. Intensity and edge maps
//! are `Image<u8>`.
//!
//! ## Coordinates
//! Integer pixel coordinates use `x` to the right and `y` down. Contours and
//! hulls are expressed as [`Point2i`] on that grid.

mod border;
mod color;
mod error;
mod geom;
mod image;

pub use border::{BorderMode, map_index};
pub use color::{ColorFrame, Rgb8, frame_from_interleaved, gray_to_rgb, rgb_to_gray};
pub use error::Error;
pub use geom::{CropRect, Point2i};
pub use image::{Image, ImageView, ImageViewMut};
