//! birads-core - Basic data structures for texture classification
//!
//! This crate provides the fundamental data structures shared by the
//! other `birads` crates:
//!
//! - [`GrayImage`] / [`GrayImageMut`] - 8-bit grayscale image container
//!   (immutable / mutable)
//! - [`Rect`] - Rectangular image region
//! - [`ClassId`] - BIRADS category (1-4) with its 0-based table index
//!
//! Every image handled by the classifier is reduced to 8-bit intensity
//! (0-255) when it is decoded, so a single pixel representation is enough
//! for everything downstream.

pub mod class;
pub mod error;
pub mod image;
pub mod rect;

pub use class::{ClassId, NUM_CLASSES};
pub use error::{Error, Result};
pub use image::{GrayImage, GrayImageMut, HISTOGRAM_BINS};
pub use rect::Rect;
