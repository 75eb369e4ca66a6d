//! GrayImage - The grayscale image container
//!
//! `GrayImage` holds one unsigned 8-bit intensity per pixel, stored row
//! major without padding.
//!
//! # Ownership model
//!
//! `GrayImage` uses `Arc` for cheap cloning (shared ownership), so a loaded
//! training image can be referenced from several corpus partitions without
//! copying its pixels. To modify pixel data, convert to `GrayImageMut` via
//! [`GrayImage::try_into_mut`] or [`GrayImage::to_mut`], then convert back
//! with `Into<GrayImage>`.

mod access;
mod clip;
mod histogram;

pub use histogram::HISTOGRAM_BINS;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal image data
#[derive(Debug)]
struct ImageData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Row-major intensities, `width * height` bytes
    data: Vec<u8>,
}

/// 8-bit grayscale image
///
/// # Examples
///
/// ```
/// use birads_core::GrayImage;
///
/// let img = GrayImage::new(64, 48).unwrap();
/// assert_eq!(img.width(), 64);
/// assert_eq!(img.height(), 48);
/// assert_eq!(img.get_pixel(3, 4), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct GrayImage {
    inner: Arc<ImageData>,
}

/// Mutable 8-bit grayscale image
///
/// Obtained from [`GrayImage::try_into_mut`] or [`GrayImage::to_mut`].
#[derive(Debug)]
pub struct GrayImageMut {
    inner: ImageData,
}

impl GrayImage {
    /// Create a new image with every pixel set to 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let size = Self::checked_size(width, height)?;
        Ok(Self::from_parts(width, height, vec![0u8; size]))
    }

    /// Create an image from a row-major intensity buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, and
    /// [`Error::BufferSizeMismatch`] if `data.len() != width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let size = Self::checked_size(width, height)?;
        if data.len() != size {
            return Err(Error::BufferSizeMismatch {
                expected: size,
                actual: data.len(),
            });
        }
        Ok(Self::from_parts(width, height, data))
    }

    /// Create an image whose pixels are produced by `f(x, y)`.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> u8,
    {
        let size = Self::checked_size(width, height)?;
        let mut data = Vec::with_capacity(size);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Ok(Self::from_parts(width, height, data))
    }

    fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        GrayImage {
            inner: Arc::new(ImageData {
                width,
                height,
                data,
            }),
        }
    }

    fn checked_size(width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.inner.data.len()
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Get the number of strong references to this image.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check if two images have the same width and height.
    pub fn sizes_equal(&self, other: &GrayImage) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Try to take exclusive ownership of the pixel data.
    ///
    /// Fails (returning the original image) if other references exist.
    pub fn try_into_mut(self) -> std::result::Result<GrayImageMut, Self> {
        Arc::try_unwrap(self.inner)
            .map(|inner| GrayImageMut { inner })
            .map_err(|inner| GrayImage { inner })
    }

    /// Create a mutable deep copy.
    pub fn to_mut(&self) -> GrayImageMut {
        GrayImageMut {
            inner: ImageData {
                width: self.inner.width,
                height: self.inner.height,
                data: self.inner.data.clone(),
            },
        }
    }
}

impl PartialEq for GrayImage {
    fn eq(&self, other: &Self) -> bool {
        self.sizes_equal(other) && self.inner.data == other.inner.data
    }
}

impl Eq for GrayImage {}

impl GrayImageMut {
    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable raw access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Set every pixel to `val`.
    pub fn fill(&mut self, val: u8) {
        self.inner.data.fill(val);
    }
}

impl From<GrayImageMut> for GrayImage {
    fn from(img: GrayImageMut) -> Self {
        GrayImage {
            inner: Arc::new(img.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zeroed() {
        let img = GrayImage::new(4, 3).unwrap();
        assert_eq!(img.pixel_count(), 12);
        assert!(img.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_new_invalid() {
        assert!(GrayImage::new(0, 3).is_err());
        assert!(GrayImage::new(3, 0).is_err());
    }

    #[test]
    fn test_from_raw_size_check() {
        assert!(GrayImage::from_raw(2, 2, vec![1, 2, 3, 4]).is_ok());
        let err = GrayImage::from_raw(2, 2, vec![1, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferSizeMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_from_fn_row_major() {
        let img = GrayImage::from_fn(3, 2, |x, y| (y * 10 + x) as u8).unwrap();
        assert_eq!(img.data(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(img.row(1), &[10, 11, 12]);
    }

    #[test]
    fn test_clone_shares_data() {
        let img = GrayImage::new(2, 2).unwrap();
        let other = img.clone();
        assert_eq!(img.ref_count(), 2);
        assert!(other.try_into_mut().is_err());
    }

    #[test]
    fn test_mut_roundtrip() {
        let img = GrayImage::new(2, 2).unwrap();
        let mut m = img.try_into_mut().unwrap();
        m.fill(7);
        let img: GrayImage = m.into();
        assert!(img.data().iter().all(|&v| v == 7));
    }
}
