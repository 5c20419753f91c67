use pf_core::{Error, Image, ImageView};

#[derive(Clone, Copy)]
enum Rank {
    Min,
    Max,
}

impl Rank {
    fn pick(self, a: u8, b: u8) -> u8 {
        match self {
            Self::Min => a.min(b),
            Self::Max => a.max(b),
        }
    }

    fn identity(self) -> u8 {
        match self {
            Self::Min => u8::MAX,
            Self::Max => u8::MIN,
        }
    }
}

pub fn erode_rect_u8(src: &ImageView<'_, u8>, k: usize) -> Result<Image<u8>, Error> {
    rank_rect(src, k, Rank::Min)
}

pub fn dilate_rect_u8(src: &ImageView<'_, u8>, k: usize) -> Result<Image<u8>, Error> {
    rank_rect(src, k, Rank::Max)
}

pub fn open_rect_u8(src: &ImageView<'_, u8>, k: usize) -> Result<Image<u8>, Error> {
    let eroded = erode_rect_u8(src, k)?;
    dilate_rect_u8(&eroded.as_view(), k)
}

pub fn close_rect_u8(src: &ImageView<'_, u8>, k: usize) -> Result<Image<u8>, Error> {
    let dilated = dilate_rect_u8(src, k)?;
    erode_rect_u8(&dilated.as_view(), k)
}

// The rectangle is separable: a row pass followed by a column pass gives the
// same extremum as the full k x k window.
fn rank_rect(src: &ImageView<'_, u8>, k: usize, rank: Rank) -> Result<Image<u8>, Error> {
    if k == 0 {
        return Err(Error::InvalidKernel {
            name: "structuring element",
            size: k,
        });
    }

    let (w, h) = (src.width(), src.height());
    if k == 1 || w == 0 || h == 0 {
        return Ok(src.to_image());
    }

    let before = (k / 2) as isize;
    let after = (k - 1 - k / 2) as isize;

    let mut rows = vec![0u8; w * h];
    for y in 0..h {
        let row = src.row(y);
        for x in 0..w {
            let x0 = (x as isize - before).max(0) as usize;
            let x1 = (x as isize + after).min(w as isize - 1) as usize;
            rows[y * w + x] = row[x0..=x1]
                .iter()
                .fold(rank.identity(), |acc, &v| rank.pick(acc, v));
        }
    }

    let mut out = vec![0u8; w * h];
    for y in 0..h {
        let y0 = (y as isize - before).max(0) as usize;
        let y1 = (y as isize + after).min(h as isize - 1) as usize;
        for x in 0..w {
            let mut acc = rank.identity();
            for yy in y0..=y1 {
                acc = rank.pick(acc, rows[yy * w + x]);
            }
            out[y * w + x] = acc;
        }
    }

    Image::from_vec(w, h, out)
}
