//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate. Grayscale JPEGs are
//! taken as-is and color JPEGs are reduced to luma. Writing is not
//! supported since `jpeg-decoder` is decode-only and lossy output would
//! change texture statistics anyway.

use crate::gray::{from_u16, luma};
use crate::{IoError, IoResult};
use birads_core::GrayImage;
use jpeg_decoder::{Decoder, PixelFormat};
use std::io::Read;

/// Read a JPEG image as 8-bit grayscale.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<GrayImage> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing after decode".to_string()))?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);

    let data: Vec<u8> = match info.pixel_format {
        PixelFormat::L8 => pixels,
        PixelFormat::L16 => pixels
            .chunks_exact(2)
            .map(|px| from_u16(u16::from_be_bytes([px[0], px[1]])))
            .collect(),
        PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .map(|px| luma(px[0], px[1], px[2]))
            .collect(),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "{:?} JPEG cannot be converted to grayscale",
                other
            )));
        }
    };

    Ok(GrayImage::from_raw(width, height, data)?)
}
