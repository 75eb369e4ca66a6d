//! PNM (Portable Any Map) format support
//!
//! Reads binary PGM (P5, 8- or 16-bit) and PPM (P6, reduced to luma), and
//! writes 8-bit P5. ASCII variants are not supported.

use crate::gray::{from_u16, luma};
use crate::{IoError, IoResult};
use birads_core::GrayImage;
use std::io::{BufRead, Read, Write};

/// Read a binary PNM image as 8-bit grayscale.
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<GrayImage> {
    let magic = next_token(&mut reader)?;
    let channels = match magic.as_str() {
        "P5" => 1usize,
        "P6" => 3usize,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM type: {}",
                other
            )));
        }
    };
    let width = parse_header_value(&next_token(&mut reader)?)?;
    let height = parse_header_value(&next_token(&mut reader)?)?;
    let maxval = parse_header_value(&next_token(&mut reader)?)?;
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("invalid PNM maxval {}", maxval)));
    }
    let sample_bytes = if maxval > 255 { 2 } else { 1 };

    if width == 0 || height == 0 {
        return Err(IoError::InvalidData(format!(
            "invalid PNM dimensions {}x{}",
            width, height
        )));
    }
    let count = (width as usize).checked_mul(height as usize);
    let len = count.and_then(|n| n.checked_mul(channels * sample_bytes));
    let (count, len) = match (count, len) {
        (Some(count), Some(len)) => (count, len),
        _ => {
            return Err(IoError::InvalidData(format!(
                "PNM raster {}x{} is too large",
                width, height
            )));
        }
    };

    // Grow with the data actually present, not the header's claim.
    let mut raw = Vec::new();
    reader.take(len as u64).read_to_end(&mut raw)?;
    if raw.len() != len {
        return Err(IoError::InvalidData(format!(
            "truncated PNM raster: expected {} bytes, got {}",
            len,
            raw.len()
        )));
    }

    let sample = |i: usize| -> u8 {
        let v = if sample_bytes == 2 {
            u32::from(u16::from_be_bytes([raw[2 * i], raw[2 * i + 1]]))
        } else {
            u32::from(raw[i])
        };
        if maxval == 255 {
            v as u8
        } else if maxval == 65535 {
            from_u16(v as u16)
        } else {
            ((v * 255 + maxval / 2) / maxval) as u8
        }
    };

    let data: Vec<u8> = if channels == 1 {
        (0..count).map(sample).collect()
    } else {
        (0..count)
            .map(|p| luma(sample(3 * p), sample(3 * p + 1), sample(3 * p + 2)))
            .collect()
    };

    Ok(GrayImage::from_raw(width, height, data)?)
}

/// Write an 8-bit grayscale image as binary PGM (P5).
pub fn write_pnm<W: Write>(img: &GrayImage, mut writer: W) -> IoResult<()> {
    write!(writer, "P5\n{} {}\n255\n", img.width(), img.height())?;
    writer.write_all(img.data())?;
    writer.flush()?;
    Ok(())
}

fn parse_header_value(token: &str) -> IoResult<u32> {
    token
        .parse()
        .map_err(|_| IoError::InvalidData(format!("invalid PNM header value '{}'", token)))
}

/// Read one whitespace-delimited header token, skipping `#` comments.
///
/// Consumes exactly one whitespace byte after the token, which is where
/// the raster starts after the maxval.
fn next_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = String::new();
    let mut in_comment = false;
    let mut byte = [0u8; 1];
    loop {
        if reader.read(&mut byte)? == 0 {
            if token.is_empty() {
                return Err(IoError::InvalidData("truncated PNM header".to_string()));
            }
            return Ok(token);
        }
        let c = byte[0];
        if in_comment {
            in_comment = c != b'\n';
            continue;
        }
        if c == b'#' && token.is_empty() {
            in_comment = true;
        } else if c.is_ascii_whitespace() {
            if !token.is_empty() {
                return Ok(token);
            }
        } else {
            token.push(c as char);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_p5_roundtrip() {
        let img = GrayImage::from_fn(4, 3, |x, y| (x * 60 + y) as u8).unwrap();
        let mut buf = Vec::new();
        write_pnm(&img, &mut buf).unwrap();
        let back = read_pnm(Cursor::new(buf)).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_header_comment() {
        let mut data = b"P5\n# made by hand\n2 1\n255\n".to_vec();
        data.extend_from_slice(&[10, 20]);
        let img = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(img.data(), &[10, 20]);
    }

    #[test]
    fn test_p6_luma() {
        let mut data = b"P6 1 1 255\n".to_vec();
        data.extend_from_slice(&[0, 255, 0]);
        let img = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(img.data(), &[150]);
    }

    #[test]
    fn test_low_maxval_scaled() {
        let mut data = b"P5 2 1 15\n".to_vec();
        data.extend_from_slice(&[15, 0]);
        let img = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(img.data(), &[255, 0]);
    }

    #[test]
    fn test_truncated_raster() {
        let mut data = b"P5 4 4 255\n".to_vec();
        data.extend_from_slice(&[1, 2, 3]);
        assert!(read_pnm(Cursor::new(data)).is_err());
    }

    #[test]
    fn test_overflowing_header() {
        let mut data = b"P6\n4294967295 4294967295\n65535\n".to_vec();
        data.extend_from_slice(&[0; 16]);
        assert!(matches!(
            read_pnm(Cursor::new(data)),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_header_larger_than_data() {
        let mut data = b"P5 100000 100000 255\n".to_vec();
        data.extend_from_slice(&[7; 64]);
        assert!(matches!(
            read_pnm(Cursor::new(data)),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_zero_dimension() {
        assert!(matches!(
            read_pnm(Cursor::new(b"P5 0 4 255\n".to_vec())),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_ascii_rejected() {
        assert!(read_pnm(Cursor::new(b"P2 1 1 255 0".to_vec())).is_err());
    }
}
