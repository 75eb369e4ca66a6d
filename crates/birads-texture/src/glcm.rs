//! Gray-level co-occurrence matrices
//!
//! A co-occurrence matrix `P` for an offset `(dx, dy)` counts, for every
//! pixel `(x, y)` whose neighbour `(x + dx, y + dy)` lies inside the image,
//! the pair of levels `(level(x, y), level(x + dx, y + dy))`.
//!
//! Matrices built here are made symmetric (`P + Pᵀ`, so each pair counts in
//! both directions) and normalized so the entries sum to 1. A matrix with no
//! valid pairs (offset larger than the image) stays all zero.
//!
//! # Offsets
//!
//! For distance `d` and angle `θ`, the offset is
//! `dx = round(d·cos θ)`, `dy = round(d·sin θ)` with `y` growing downward.
//! The four canonical angles are 0, 45, 90 and 135 degrees, so diagonal
//! offsets for `d = 1, 2, 4, 8, 16` are `1, 1, 3, 6, 11` pixels per axis.

use crate::quantize::QuantizedImage;
use std::f64::consts::FRAC_PI_4;

/// Number of canonical angles per distance
pub const NUM_ANGLES: usize = 4;

/// A pixel displacement between co-occurring pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub dx: i64,
    pub dy: i64,
}

impl Offset {
    /// Offset for `distance` at angle `angle_index * 45` degrees.
    pub fn from_polar(distance: u32, angle_index: usize) -> Self {
        let theta = angle_index as f64 * FRAC_PI_4;
        let d = distance as f64;
        Self {
            dx: (theta.cos() * d).round() as i64,
            dy: (theta.sin() * d).round() as i64,
        }
    }
}

/// A normalized, symmetric co-occurrence matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Glcm {
    levels: usize,
    data: Vec<f64>,
}

impl Glcm {
    /// Build the symmetric normalized matrix of `img` for `offset`.
    pub fn compute(img: &QuantizedImage, offset: Offset) -> Self {
        let levels = img.levels() as usize;
        let width = img.width() as i64;
        let height = img.height() as i64;
        let mut counts = vec![0u64; levels * levels];

        // Restrict the scan to origins whose neighbour is in bounds.
        let x_range = offset_range(width, offset.dx);
        let y_range = offset_range(height, offset.dy);
        for y in y_range.clone() {
            for x in x_range.clone() {
                let i = img.level(x as usize, y as usize) as usize;
                let j = img.level((x + offset.dx) as usize, (y + offset.dy) as usize) as usize;
                counts[i * levels + j] += 1;
                counts[j * levels + i] += 1;
            }
        }

        let total: u64 = counts.iter().sum();
        let data = if total == 0 {
            vec![0.0; levels * levels]
        } else {
            let total = total as f64;
            counts.iter().map(|&c| c as f64 / total).collect()
        };
        Self { levels, data }
    }

    /// Number of gray levels (matrix side length)
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Normalized frequency of the level pair `(i, j)`
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.levels + j]
    }

    /// True if no pixel pair was counted
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&p| p == 0.0)
    }

    /// `Σ P(i,j) · (i - j)²`
    pub fn contrast(&self) -> f64 {
        self.weighted_sum(|d| d * d)
    }

    /// `Σ P(i,j) / (1 + (i - j)²)`
    pub fn homogeneity(&self) -> f64 {
        self.weighted_sum(|d| 1.0 / (1.0 + d * d))
    }

    fn weighted_sum<F: Fn(f64) -> f64>(&self, weight: F) -> f64 {
        let mut sum = 0.0;
        for i in 0..self.levels {
            let row = &self.data[i * self.levels..(i + 1) * self.levels];
            for (j, &p) in row.iter().enumerate() {
                if p != 0.0 {
                    sum += p * weight(i as f64 - j as f64);
                }
            }
        }
        sum
    }
}

/// Origins along one axis whose neighbour at `delta` is in `0..len`.
fn offset_range(len: i64, delta: i64) -> std::ops::Range<i64> {
    let start = (-delta).max(0);
    let end = (len - delta).min(len);
    if start >= end { 0..0 } else { start..end }
}

/// The four matrices of one distance, in angle order.
pub fn glcm_group(img: &QuantizedImage, distance: u32) -> [Glcm; NUM_ANGLES] {
    std::array::from_fn(|a| Glcm::compute(img, Offset::from_polar(distance, a)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantize::quantize;
    use birads_core::GrayImage;

    fn levels_image(width: u32, height: u32, f: impl FnMut(u32, u32) -> u8) -> QuantizedImage {
        quantize(&GrayImage::from_fn(width, height, f).unwrap(), 32)
    }

    #[test]
    fn test_offsets() {
        let diag: Vec<_> = [1, 2, 4, 8, 16]
            .iter()
            .map(|&d| Offset::from_polar(d, 1))
            .collect();
        let expected = [1, 1, 3, 6, 11];
        for (off, &e) in diag.iter().zip(&expected) {
            assert_eq!(*off, Offset { dx: e, dy: e });
        }
        assert_eq!(Offset::from_polar(4, 0), Offset { dx: 4, dy: 0 });
        assert_eq!(Offset::from_polar(4, 2), Offset { dx: 0, dy: 4 });
        assert_eq!(Offset::from_polar(8, 3), Offset { dx: -6, dy: 6 });
    }

    #[test]
    fn test_offset_range() {
        assert_eq!(offset_range(10, 3), 0..7);
        assert_eq!(offset_range(10, -3), 3..10);
        assert_eq!(offset_range(10, 0), 0..10);
        assert_eq!(offset_range(4, 16), 0..0);
    }

    #[test]
    fn test_normalized_and_symmetric() {
        let img = levels_image(9, 7, |x, y| ((x * 37 + y * 11) % 256) as u8);
        let g = Glcm::compute(&img, Offset::from_polar(2, 3));
        let mut sum = 0.0;
        for i in 0..g.levels() {
            for j in 0..g.levels() {
                assert_eq!(g.get(i, j), g.get(j, i));
                sum += g.get(i, j);
            }
        }
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_checkerboard_horizontal_contrast() {
        let img = levels_image(8, 8, |x, y| if (x + y) % 2 == 0 { 0 } else { 255 });
        let g = Glcm::compute(&img, Offset::from_polar(1, 0));
        assert!((g.contrast() - 961.0).abs() < 1e-9);
        assert!((g.get(0, 31) - 0.5).abs() < 1e-12);
        // diagonal neighbours share a color
        let diag = Glcm::compute(&img, Offset::from_polar(1, 1));
        assert_eq!(diag.contrast(), 0.0);
        assert!((diag.homogeneity() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_offset_beyond_image_is_zero() {
        let img = levels_image(4, 4, |x, _| x as u8 * 60);
        let g = Glcm::compute(&img, Offset::from_polar(16, 0));
        assert!(g.is_empty());
        assert_eq!(g.contrast(), 0.0);
        assert_eq!(g.homogeneity(), 0.0);
    }

    #[test]
    fn test_group_has_four_angles() {
        let img = levels_image(20, 20, |x, y| ((x ^ y) * 12) as u8);
        let group = glcm_group(&img, 2);
        assert_eq!(group.len(), NUM_ANGLES);
        assert!(group.iter().all(|g| !g.is_empty()));
    }
}
