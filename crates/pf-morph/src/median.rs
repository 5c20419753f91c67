use pf_core::{BorderMode, Error, Image, ImageView, map_index};

/// Median filter with a `ksize x ksize` square aperture.
///
/// `ksize` must be odd. Border pixels are replicated. Runs a sliding
/// 256-bin histogram along each row, so the per-pixel cost is `O(ksize)`
/// updates plus one histogram scan.
pub fn median_blur_u8(src: &ImageView<'_, u8>, ksize: usize) -> Result<Image<u8>, Error> {
    if ksize == 0 || ksize % 2 == 0 {
        return Err(Error::InvalidKernel {
            name: "median",
            size: ksize,
        });
    }

    let (w, h) = (src.width(), src.height());
    if ksize == 1 || w == 0 || h == 0 {
        return Ok(src.to_image());
    }

    let r = (ksize / 2) as isize;
    let rank = (ksize * ksize / 2) as u32;
    let mut out = vec![0u8; w * h];
    let mut rows: Vec<&[u8]> = Vec::with_capacity(ksize);

    for y in 0..h {
        rows.clear();
        for dy in -r..=r {
            let yy = map_index(y as isize + dy, h, BorderMode::Replicate)
                .expect("non-empty image height");
            rows.push(src.row(yy));
        }

        let mut hist = [0u32; 256];
        for row in &rows {
            for dx in -r..=r {
                let xx = map_index(dx, w, BorderMode::Replicate).expect("non-empty image width");
                hist[row[xx] as usize] += 1;
            }
        }
        out[y * w] = median_of(&hist, rank);

        for x in 1..w {
            let x_out = map_index(x as isize - 1 - r, w, BorderMode::Replicate)
                .expect("non-empty image width");
            let x_in =
                map_index(x as isize + r, w, BorderMode::Replicate).expect("non-empty image width");
            for row in &rows {
                hist[row[x_out] as usize] -= 1;
                hist[row[x_in] as usize] += 1;
            }
            out[y * w + x] = median_of(&hist, rank);
        }
    }

    Image::from_vec(w, h, out)
}

fn median_of(hist: &[u32; 256], rank: u32) -> u8 {
    let mut seen = 0u32;
    for (value, &count) in hist.iter().enumerate() {
        seen += count;
        if seen > rank {
            return value as u8;
        }
    }
    u8::MAX
}
