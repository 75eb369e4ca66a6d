//! TIFF image format support
//!
//! Reads the first page of a TIFF file as 8-bit grayscale and writes
//! uncompressed 8-bit grayscale TIFFs.

use crate::gray::{from_u16, luma, packed_sample, stretch_low_depth};
use crate::{IoError, IoResult};
use birads_core::GrayImage;
use std::io::{Read, Seek, Write};
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::TiffEncoder;
use tiff::encoder::colortype::Gray8;

/// Photometric interpretation tag value for "white is zero".
const WHITE_IS_ZERO: u32 = 0;

/// Read the first page of a TIFF image as 8-bit grayscale.
///
/// Multi-page files are accepted; only the first page is decoded.
pub fn read_tiff<R: Read + Seek>(reader: R) -> IoResult<GrayImage> {
    let mut decoder = Decoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("TIFF decode error: {}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF dimensions: {}", e)))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF color type: {}", e)))?;
    let invert = decoder
        .get_tag_u32(tiff::tags::Tag::PhotometricInterpretation)
        .map(|v| v == WHITE_IS_ZERO)
        .unwrap_or(false);

    let image_data = decoder
        .read_image()
        .map_err(|e| IoError::DecodeError(format!("Failed to read TIFF image data: {}", e)))?;

    let w = width as usize;
    let h = height as usize;
    let mut out = Vec::with_capacity(w * h);

    match (image_data, color_type) {
        (DecodingResult::U8(data), ColorType::Gray(bits @ (1 | 2 | 4))) => {
            let bytes_per_row = (w * bits as usize).div_ceil(8);
            for y in 0..h {
                let row = row_slice(&data, y, bytes_per_row)?;
                for x in 0..w {
                    out.push(stretch_low_depth(packed_sample(row, x, bits), bits));
                }
            }
        }
        (DecodingResult::U8(data), ColorType::Gray(8)) => {
            out.extend_from_slice(data.get(..w * h).ok_or_else(short_data)?);
        }
        (DecodingResult::U8(data), ColorType::GrayA(8)) => {
            out.extend(data.chunks_exact(2).take(w * h).map(|px| px[0]));
        }
        (DecodingResult::U8(data), ColorType::RGB(8)) => {
            out.extend(
                data.chunks_exact(3)
                    .take(w * h)
                    .map(|px| luma(px[0], px[1], px[2])),
            );
        }
        (DecodingResult::U8(data), ColorType::RGBA(8)) => {
            out.extend(
                data.chunks_exact(4)
                    .take(w * h)
                    .map(|px| luma(px[0], px[1], px[2])),
            );
        }
        (DecodingResult::U16(data), ColorType::Gray(16)) => {
            out.extend(data.iter().take(w * h).map(|&v| from_u16(v)));
        }
        (DecodingResult::U16(data), ColorType::RGB(16)) => {
            out.extend(data.chunks_exact(3).take(w * h).map(|px| {
                luma(from_u16(px[0]), from_u16(px[1]), from_u16(px[2]))
            }));
        }
        (DecodingResult::U16(data), ColorType::RGBA(16)) => {
            out.extend(data.chunks_exact(4).take(w * h).map(|px| {
                luma(from_u16(px[0]), from_u16(px[1]), from_u16(px[2]))
            }));
        }
        (_, other) => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported TIFF color type: {:?}",
                other
            )));
        }
    }

    if out.len() != w * h {
        return Err(short_data());
    }
    if invert {
        out.iter_mut().for_each(|v| *v = 255 - *v);
    }

    Ok(GrayImage::from_raw(width, height, out)?)
}

fn row_slice(data: &[u8], y: usize, bytes_per_row: usize) -> IoResult<&[u8]> {
    data.get(y * bytes_per_row..(y + 1) * bytes_per_row)
        .ok_or_else(short_data)
}

fn short_data() -> IoError {
    IoError::InvalidData("TIFF strip data shorter than image".to_string())
}

/// Write an uncompressed 8-bit grayscale TIFF.
pub fn write_tiff<W: Write + Seek>(img: &GrayImage, writer: W) -> IoResult<()> {
    let mut encoder = TiffEncoder::new(writer)
        .map_err(|e| IoError::EncodeError(format!("TIFF encoder error: {}", e)))?;
    encoder
        .write_image::<Gray8>(img.width(), img.height(), img.data())
        .map_err(|e| IoError::EncodeError(format!("TIFF write error: {}", e)))?;
    Ok(())
}
