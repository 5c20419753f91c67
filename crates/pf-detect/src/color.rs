use pf_core::Rgb8;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of overlay colours, one per drawn candidate.
pub trait ColorSampler {
    fn next_color(&mut self) -> Rgb8;
}

/// Three independent uniform channels in `[0, 256)`.
#[derive(Debug, Clone)]
pub struct RandomColors {
    rng: StdRng,
}

impl RandomColors {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl ColorSampler for RandomColors {
    fn next_color(&mut self) -> Rgb8 {
        [self.rng.r#gen(), self.rng.r#gen(), self.rng.r#gen()]
    }
}

/// Cycles through a fixed palette. An empty palette yields white.
#[derive(Debug, Clone)]
pub struct FixedColors {
    palette: Vec<Rgb8>,
    next: usize,
}

impl FixedColors {
    pub fn new(palette: Vec<Rgb8>) -> Self {
        Self { palette, next: 0 }
    }

    pub fn single(color: Rgb8) -> Self {
        Self::new(vec![color])
    }
}

impl ColorSampler for FixedColors {
    fn next_color(&mut self) -> Rgb8 {
        if self.palette.is_empty() {
            return [255, 255, 255];
        }
        let c = self.palette[self.next % self.palette.len()];
        self.next = self.next.wrapping_add(1);
        c
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorSampler, FixedColors, RandomColors};

    #[test]
    fn seeded_sequences_repeat() {
        let mut a = RandomColors::seeded(11);
        let mut b = RandomColors::new(Some(11));
        let xs: Vec<_> = (0..8).map(|_| a.next_color()).collect();
        let ys: Vec<_> = (0..8).map(|_| b.next_color()).collect();
        assert_eq!(xs, ys);
        assert!(xs.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn palette_cycles() {
        let mut c = FixedColors::new(vec![[1, 2, 3], [4, 5, 6]]);
        assert_eq!(c.next_color(), [1, 2, 3]);
        assert_eq!(c.next_color(), [4, 5, 6]);
        assert_eq!(c.next_color(), [1, 2, 3]);
        assert_eq!(FixedColors::new(Vec::new()).next_color(), [255, 255, 255]);
    }
}
