//! Texture feature vectors
//!
//! One [`FeatureVector`] describes one image with 11 values:
//!
//! | Index | Value |
//! |---|---|
//! | 0..5 | contrast for each distance, summed over the 4 angles |
//! | 5..10 | homogeneity for each distance, summed over the 4 angles |
//! | 10 | Shannon entropy of the quantized histogram |

use crate::glcm::glcm_group;
use crate::quantize::quantize;
use crate::{TextureOptions, TextureResult};
use birads_core::GrayImage;
use serde::Serialize;
use std::ops::Index;

/// Number of co-occurrence distance groups
pub const NUM_DISTANCES: usize = 5;

/// Length of a feature vector
pub const FEATURE_DIM: usize = 2 * NUM_DISTANCES + 1;

const ENTROPY_INDEX: usize = 2 * NUM_DISTANCES;

/// An 11-dimensional texture descriptor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_DIM]);

impl FeatureVector {
    /// Assemble a vector from its three components.
    pub fn from_parts(
        contrast: [f64; NUM_DISTANCES],
        homogeneity: [f64; NUM_DISTANCES],
        entropy: f64,
    ) -> Self {
        let mut values = [0.0; FEATURE_DIM];
        values[..NUM_DISTANCES].copy_from_slice(&contrast);
        values[NUM_DISTANCES..ENTROPY_INDEX].copy_from_slice(&homogeneity);
        values[ENTROPY_INDEX] = entropy;
        Self(values)
    }

    pub fn contrast(&self) -> &[f64] {
        &self.0[..NUM_DISTANCES]
    }

    pub fn homogeneity(&self) -> &[f64] {
        &self.0[NUM_DISTANCES..ENTROPY_INDEX]
    }

    pub fn entropy(&self) -> f64 {
        self.0[ENTROPY_INDEX]
    }

    pub fn as_array(&self) -> &[f64; FEATURE_DIM] {
        &self.0
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// True if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl From<[f64; FEATURE_DIM]> for FeatureVector {
    fn from(values: [f64; FEATURE_DIM]) -> Self {
        Self(values)
    }
}

impl From<FeatureVector> for [f64; FEATURE_DIM] {
    fn from(v: FeatureVector) -> Self {
        v.0
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

/// Extract the texture features of `img` with default options.
///
/// Images smaller than a distance produce zero contrast and homogeneity for
/// that group; the call never fails.
pub fn extract_features(img: &GrayImage) -> FeatureVector {
    extract(img, &TextureOptions::default())
}

/// Extract the texture features of `img` with custom options.
///
/// # Errors
///
/// Returns [`TextureError::InvalidParameter`](crate::TextureError::InvalidParameter)
/// if the options do not validate.
pub fn extract_features_with(
    img: &GrayImage,
    options: &TextureOptions,
) -> TextureResult<FeatureVector> {
    options.validate()?;
    Ok(extract(img, options))
}

fn extract(img: &GrayImage, options: &TextureOptions) -> FeatureVector {
    let q = quantize(img, options.levels);
    let mut contrast = [0.0; NUM_DISTANCES];
    let mut homogeneity = [0.0; NUM_DISTANCES];
    for (k, &distance) in options.distances.iter().enumerate() {
        for g in glcm_group(&q, distance) {
            contrast[k] += g.contrast();
            homogeneity[k] += g.homogeneity();
        }
    }
    FeatureVector::from_parts(contrast, homogeneity, crate::entropy::shannon_entropy(&q))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let v = FeatureVector::from_parts([1.0; 5], [2.0; 5], 3.0);
        assert_eq!(v.contrast(), &[1.0; 5]);
        assert_eq!(v.homogeneity(), &[2.0; 5]);
        assert_eq!(v.entropy(), 3.0);
        assert_eq!(v[4], 1.0);
        assert_eq!(v[5], 2.0);
        assert_eq!(v[10], 3.0);
    }

    #[test]
    fn test_constant_image() {
        let img = GrayImage::from_fn(64, 64, |_, _| 100).unwrap();
        let v = extract_features(&img);
        assert!(v.contrast().iter().all(|&c| c == 0.0));
        for &h in v.homogeneity() {
            assert!((h - 4.0).abs() < 1e-12);
        }
        assert_eq!(v.entropy(), 0.0);
    }

    #[test]
    fn test_tiny_image_does_not_fail() {
        let img = GrayImage::from_fn(3, 3, |x, y| (x * 80 + y * 10) as u8).unwrap();
        let v = extract_features(&img);
        assert!(v.is_finite());
        // distance 16 exceeds the image in every direction
        assert_eq!(v.contrast()[4], 0.0);
        assert_eq!(v.homogeneity()[4], 0.0);
        assert!(v.contrast()[0] > 0.0);
    }

    #[test]
    fn test_two_level_entropy() {
        let img = GrayImage::from_fn(16, 16, |x, _| if x < 8 { 0 } else { 200 }).unwrap();
        let v = extract_features(&img);
        assert!((v.entropy() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_options() {
        let img = GrayImage::new(8, 8).unwrap();
        let opts = TextureOptions::new().with_levels(3);
        assert!(extract_features_with(&img, &opts).is_err());
    }

    #[test]
    fn test_serialize() {
        let v = FeatureVector::from_parts([0.0; 5], [1.0; 5], 0.5);
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.starts_with("[0.0,"));
        assert!(json.ends_with("0.5]"));
    }
}
