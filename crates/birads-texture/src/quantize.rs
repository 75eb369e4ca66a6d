//! Gray-level quantization
//!
//! Reduces 8-bit intensities to a small number of levels before
//! co-occurrence counting. With the default 32 levels, `level = p / 8`.

use birads_core::GrayImage;

/// An image whose pixels are quantized levels in `0..levels`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedImage {
    width: u32,
    height: u32,
    levels: u32,
    data: Vec<u8>,
}

impl QuantizedImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of levels; every pixel is `< levels`.
    pub fn levels(&self) -> u32 {
        self.levels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Level at `(x, y)`. Coordinates must be in bounds.
    #[inline]
    pub fn level(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width as usize + x]
    }

    /// Count of pixels at each level.
    pub fn histogram(&self) -> Vec<u64> {
        let mut hist = vec![0u64; self.levels as usize];
        for &v in &self.data {
            hist[v as usize] += 1;
        }
        hist
    }
}

/// Quantize a single intensity with the given level step.
#[inline]
pub fn quantize_value(intensity: u8, step: u32) -> u8 {
    (intensity as u32 / step) as u8
}

/// Quantize every pixel of `img` to `levels` gray levels.
///
/// `levels` must divide 256; callers validate this through
/// [`TextureOptions::validate`](crate::TextureOptions::validate).
pub fn quantize(img: &GrayImage, levels: u32) -> QuantizedImage {
    let step = 256 / levels;
    let data = img.data().iter().map(|&p| quantize_value(p, step)).collect();
    QuantizedImage {
        width: img.width(),
        height: img.height(),
        levels,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_value_range() {
        for p in 0..=255u8 {
            let q = quantize_value(p, 8);
            assert_eq!(q, p / 8);
            assert!(q <= 31);
        }
        assert_eq!(quantize_value(7, 8), 0);
        assert_eq!(quantize_value(8, 8), 1);
        assert_eq!(quantize_value(255, 8), 31);
    }

    #[test]
    fn test_quantize_image() {
        let img = GrayImage::from_fn(4, 2, |x, y| (x * 64 + y) as u8).unwrap();
        let q = quantize(&img, 32);
        assert_eq!(q.levels(), 32);
        assert_eq!(q.level(0, 0), 0);
        assert_eq!(q.level(1, 0), 8);
        assert_eq!(q.level(3, 1), 24);
        let hist = q.histogram();
        assert_eq!(hist.iter().sum::<u64>(), 8);
        assert_eq!(hist[16], 2);
    }
}
