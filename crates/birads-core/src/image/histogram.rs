//! Histogram generation
//!
//! Counts the occurrence of each intensity in an image.

use super::GrayImage;

/// Number of bins in an 8-bit intensity histogram.
pub const HISTOGRAM_BINS: usize = 256;

impl GrayImage {
    /// Get the intensity histogram of the image.
    ///
    /// Bin `v` holds the number of pixels whose value is `v`.
    pub fn histogram(&self) -> [u64; HISTOGRAM_BINS] {
        let mut hist = [0u64; HISTOGRAM_BINS];
        for &v in self.data() {
            hist[v as usize] += 1;
        }
        hist
    }

    /// Get the minimum and maximum intensity.
    pub fn min_max(&self) -> (u8, u8) {
        self.data()
            .iter()
            .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    /// Get the mean intensity.
    pub fn mean(&self) -> f64 {
        let sum: u64 = self.data().iter().map(|&v| u64::from(v)).sum();
        sum as f64 / self.pixel_count() as f64
    }
}
