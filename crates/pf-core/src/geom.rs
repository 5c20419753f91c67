use serde::{Deserialize, Serialize};

/// Integer pixel coordinate (`x` right, `y` down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point2i {
    pub x: i32,
    pub y: i32,
}

impl Point2i {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_f64(self) -> [f64; 2] {
        [self.x as f64, self.y as f64]
    }
}

/// Axis-aligned crop window in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl CropRect {
    pub const fn square(size: usize) -> Self {
        Self {
            x: 0,
            y: 0,
            width: size,
            height: size,
        }
    }
}

impl Default for CropRect {
    fn default() -> Self {
        Self::square(480)
    }
}

#[cfg(test)]
mod tests {
    use super::{CropRect, Point2i};

    #[test]
    fn point_converts_to_f64() {
        let p = Point2i::new(-3, 7);
        assert_eq!(p.to_f64(), [-3.0, 7.0]);
    }

    #[test]
    fn default_crop_is_480_square_at_origin() {
        let rect = CropRect::default();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (0, 0, 480, 480));

        let json = serde_json::to_string(&rect).expect("serializable");
        let back: CropRect = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, rect);
    }
}
