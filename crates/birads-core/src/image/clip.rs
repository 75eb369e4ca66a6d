//! Rectangular clipping
//!
//! Extract a sub-region of an image, clipped to the image bounds.

use super::GrayImage;
use crate::Rect;
use crate::error::{Error, Result};

impl GrayImage {
    /// Extract a rectangular region.
    ///
    /// The rectangle is clipped to the image bounds before copying, so a
    /// region that hangs over the right or bottom edge yields a smaller
    /// image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the region lies entirely
    /// outside the image.
    pub fn crop(&self, region: &Rect) -> Result<GrayImage> {
        let clipped = region.clip(self.width(), self.height()).ok_or_else(|| {
            Error::InvalidParameter(format!(
                "region origin ({}, {}) is outside image bounds ({}x{})",
                region.x,
                region.y,
                self.width(),
                self.height()
            ))
        })?;

        let mut data = Vec::with_capacity(clipped.area() as usize);
        for y in clipped.y..clipped.y + clipped.h {
            let row = self.row(y);
            data.extend_from_slice(&row[clipped.x as usize..(clipped.x + clipped.w) as usize]);
        }
        GrayImage::from_raw(clipped.w, clipped.h, data)
    }
}
