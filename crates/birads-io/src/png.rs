//! PNG image format support

use crate::gray::{from_u16, luma, packed_sample, stretch_low_depth};
use crate::{IoError, IoResult};
use birads_core::GrayImage;
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image as 8-bit grayscale.
///
/// Gray images below 8 bits are stretched to 0-255, 16-bit samples keep
/// their high byte, and color or palette images are reduced to luma.
/// Alpha is ignored.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<GrayImage> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let wide = bit_depth == BitDepth::Sixteen;

    let palette: Option<Vec<u8>> = reader.info().palette.as_ref().map(|p| p.to_vec());

    let mut out = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as usize {
        let row = &data[y * bytes_per_row..(y + 1) * bytes_per_row];
        for x in 0..width as usize {
            let val = match (color_type, bit_depth) {
                (ColorType::Grayscale, BitDepth::One) => {
                    stretch_low_depth(packed_sample(row, x, 1), 1)
                }
                (ColorType::Grayscale, BitDepth::Two) => {
                    stretch_low_depth(packed_sample(row, x, 2), 2)
                }
                (ColorType::Grayscale, BitDepth::Four) => {
                    stretch_low_depth(packed_sample(row, x, 4), 4)
                }
                (ColorType::Grayscale, BitDepth::Eight) => row[x],
                (ColorType::Grayscale, BitDepth::Sixteen) => {
                    from_u16(u16::from_be_bytes([row[2 * x], row[2 * x + 1]]))
                }
                (ColorType::GrayscaleAlpha, _) => {
                    if wide {
                        row[x * 4]
                    } else {
                        row[x * 2]
                    }
                }
                (ColorType::Rgb, _) => {
                    let (s, i) = if wide { (2, x * 6) } else { (1, x * 3) };
                    luma(row[i], row[i + s], row[i + 2 * s])
                }
                (ColorType::Rgba, _) => {
                    let (s, i) = if wide { (2, x * 8) } else { (1, x * 4) };
                    luma(row[i], row[i + s], row[i + 2 * s])
                }
                (ColorType::Indexed, depth) => {
                    let bits = match depth {
                        BitDepth::One => 1,
                        BitDepth::Two => 2,
                        BitDepth::Four => 4,
                        _ => 8,
                    };
                    let idx = if bits == 8 {
                        row[x]
                    } else {
                        packed_sample(row, x, bits)
                    } as usize;
                    let pal = palette.as_deref().ok_or_else(|| {
                        IoError::InvalidData("indexed PNG without palette".to_string())
                    })?;
                    let entry = pal.get(idx * 3..idx * 3 + 3).ok_or_else(|| {
                        IoError::InvalidData(format!("palette index {} out of range", idx))
                    })?;
                    luma(entry[0], entry[1], entry[2])
                }
            };
            out.push(val);
        }
    }

    Ok(GrayImage::from_raw(width, height, out)?)
}

/// Write an 8-bit grayscale PNG.
pub fn write_png<W: Write>(img: &GrayImage, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, img.width(), img.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(img.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;
    Ok(())
}
