//! BIRADS - Texture-based breast density category classifier
//!
//! Classifies grayscale images into one of four BIRADS categories from
//! gray-level co-occurrence texture features and a per-class Mahalanobis
//! decision rule.
//!
//! # Overview
//!
//! - [`io`]: image decoding and corpus loading
//! - [`texture`]: co-occurrence features
//! - [`classify`]: training, classification and evaluation
//! - [`report`]: text and JSON presentation of results
//! - [`region`]: region arguments for the command-line tool
//!
//! # Example
//!
//! ```
//! use birads::{ClassId, GrayImage};
//! use birads::texture::extract_features;
//!
//! let img = GrayImage::from_fn(64, 64, |_, _| 100).unwrap();
//! let features = extract_features(&img);
//! assert_eq!(features.entropy(), 0.0);
//! assert_eq!(ClassId::ALL.len(), 4);
//! ```

pub mod logging;
pub mod region;
pub mod report;

// Re-export core types (primary data structures used everywhere)
pub use birads_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use birads_classify as classify;
pub use birads_io as io;
pub use birads_texture as texture;

pub use birads_classify::{BiradsClassifier, Classification, EvaluationReport, TrainOptions};
