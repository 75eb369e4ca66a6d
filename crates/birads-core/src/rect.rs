//! Rectangle regions
//!
//! A `Rect` describes an axis-aligned region of an image. It is used to
//! select the part of an image that is cropped before classification.

use crate::error::{Error, Result};

/// Axis-aligned rectangle with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub w: u32,
    /// Height in pixels
    pub h: u32,
}

impl Rect {
    /// Create a new rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if `w` or `h` is zero.
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Result<Self> {
        if w == 0 || h == 0 {
            return Err(Error::InvalidDimension {
                width: w,
                height: h,
            });
        }
        Ok(Rect { x, y, w, h })
    }

    /// Create a square region of side `size` anchored at `(x, y)`.
    pub fn square(x: u32, y: u32, size: u32) -> Result<Self> {
        Self::new(x, y, size, size)
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> u64 {
        u64::from(self.x) + u64::from(self.w)
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> u64 {
        u64::from(self.y) + u64::from(self.h)
    }

    /// Number of pixels covered by the rectangle.
    pub fn area(&self) -> u64 {
        u64::from(self.w) * u64::from(self.h)
    }

    /// Check whether a point lies inside the rectangle.
    pub fn contains_point(&self, x: u32, y: u32) -> bool {
        x >= self.x && y >= self.y && u64::from(x) < self.right() && u64::from(y) < self.bottom()
    }

    /// Clip the rectangle to an image of the given size.
    ///
    /// Returns `None` if the rectangle lies entirely outside the image.
    pub fn clip(&self, width: u32, height: u32) -> Option<Rect> {
        if self.x >= width || self.y >= height {
            return None;
        }
        let w = (self.right().min(u64::from(width)) - u64::from(self.x)) as u32;
        let h = (self.bottom().min(u64::from(height)) - u64::from(self.y)) as u32;
        Some(Rect {
            x: self.x,
            y: self.y,
            w,
            h,
        })
    }
}

impl std::str::FromStr for Rect {
    type Err = Error;

    /// Parse `"x,y,w,h"`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(Error::InvalidParameter(format!(
                "expected x,y,w,h but got '{}'",
                s
            )));
        }
        let mut values = [0u32; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| {
                Error::InvalidParameter(format!("'{}' is not a non-negative integer", part))
            })?;
        }
        Rect::new(values[0], values[1], values[2], values[3])
    }
}
