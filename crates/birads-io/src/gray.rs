//! Reduction of decoded samples to 8-bit intensity
//!
//! Every decoder in this crate produces samples at their native depth;
//! these helpers bring them to the single 0-255 scale used downstream.

/// ITU-R BT.601 luma of an 8-bit RGB triple, rounded to nearest.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    y.round().clamp(0.0, 255.0) as u8
}

/// Reduce a 16-bit sample to 8 bits by keeping the high byte.
#[inline]
pub fn from_u16(val: u16) -> u8 {
    (val >> 8) as u8
}

/// Stretch a sample of `bits` bits (1, 2 or 4) to the full 0-255 range.
#[inline]
pub fn stretch_low_depth(val: u8, bits: u8) -> u8 {
    let max = (1u16 << bits) - 1;
    ((u16::from(val) * 255) / max) as u8
}

/// Extract the `x`-th packed sample of `bits` bits from an MSB-first row.
#[inline]
pub fn packed_sample(row: &[u8], x: usize, bits: u8) -> u8 {
    let per_byte = 8 / bits as usize;
    let byte = row[x / per_byte];
    let shift = 8 - bits as usize * (x % per_byte + 1);
    (byte >> shift) & ((1u8 << bits) - 1)
}
