//! Shannon entropy of quantized intensities

use crate::quantize::QuantizedImage;

/// Base-2 Shannon entropy of the level histogram of `img`.
///
/// Returns 0 for a constant image. The maximum is `log2(levels)`.
pub fn shannon_entropy(img: &QuantizedImage) -> f64 {
    histogram_entropy(&img.histogram())
}

/// Base-2 Shannon entropy of a histogram of counts.
pub fn histogram_entropy(hist: &[u64]) -> f64 {
    let total: u64 = hist.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    -hist
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            p * p.log2()
        })
        .sum::<f64>()
}
