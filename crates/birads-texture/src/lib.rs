//! birads-texture - Gray-level co-occurrence texture features
//!
//! Turns a grayscale image into an 11-dimensional [`FeatureVector`]:
//!
//! 1. Quantize intensities to 32 levels (`level = p / 8`)
//! 2. Build symmetric, normalized co-occurrence matrices for distances
//!    1, 2, 4, 8, 16 at 0, 45, 90 and 135 degrees
//! 3. Sum contrast and homogeneity over the four angles of each distance
//! 4. Append the Shannon entropy of the quantized histogram
//!
//! # Example
//!
//! ```
//! use birads_core::GrayImage;
//! use birads_texture::extract_features;
//!
//! let img = GrayImage::from_fn(32, 32, |x, y| ((x + y) * 4) as u8).unwrap();
//! let features = extract_features(&img);
//! assert_eq!(features.as_slice().len(), 11);
//! ```

pub mod entropy;
mod error;
pub mod features;
pub mod glcm;
mod options;
pub mod quantize;

pub use error::{TextureError, TextureResult};
pub use features::{
    FEATURE_DIM, FeatureVector, NUM_DISTANCES, extract_features, extract_features_with,
};
pub use glcm::{Glcm, NUM_ANGLES, Offset};
pub use options::{DEFAULT_DISTANCES, DEFAULT_LEVELS, TextureOptions};
pub use quantize::{QuantizedImage, quantize};
