//! birads-io - Image I/O and corpus loading
//!
//! Every reader in this crate produces a [`GrayImage`]: whatever the stored
//! depth or color model, pixels are reduced to 8-bit intensity on the way
//! in. Supported inputs:
//!
//! | Format | Read | Write | Feature |
//! |---|---|---|---|
//! | PNG | 1/2/4/8/16-bit gray, gray+alpha, RGB(A), palette | 8-bit gray | `png-format` |
//! | TIFF | 1/2/4/8/16-bit gray, gray+alpha, RGB(A) | 8-bit gray | `tiff-format` |
//! | JPEG | gray, RGB | - | `jpeg` |
//! | PNM | P5, P6 | P5 | `pnm` |
//!
//! The [`corpus`] module reads a labeled training directory into memory.

pub mod corpus;
mod error;
pub mod format;
mod gray;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;
#[cfg(feature = "tiff-format")]
pub mod tiff;

pub use corpus::{Corpus, CorpusOptions, TrainingImage, load_corpus};
pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use birads_core::GrayImage;
use std::io::Cursor;
use std::path::Path;

/// Read an image file as 8-bit grayscale.
///
/// The format is detected from the file contents, not the extension.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<GrayImage> {
    let data = std::fs::read(path)?;
    read_image_mem(&data)
}

/// Read an in-memory encoded image as 8-bit grayscale.
pub fn read_image_mem(data: &[u8]) -> IoResult<GrayImage> {
    let format = detect_format_from_bytes(data)?;
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => crate::png::read_png(Cursor::new(data)),
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => crate::tiff::read_tiff(Cursor::new(data)),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => crate::jpeg::read_jpeg(Cursor::new(data)),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => crate::pnm::read_pnm(Cursor::new(data)),
        other => Err(IoError::UnsupportedFormat(format!(
            "no decoder available for {:?}",
            other
        ))),
    }
}

/// Read an image file, reporting any failure as [`IoError::UnsupportedImage`].
///
/// This is the entry point used for classifier inputs: the caller only
/// needs to know which file could not be turned into a grayscale grid.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> IoResult<GrayImage> {
    let path = path.as_ref();
    read_image(path).map_err(|e| IoError::UnsupportedImage {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Write an image to a file in the given format.
pub fn write_image<P: AsRef<Path>>(img: &GrayImage, path: P, format: ImageFormat) -> IoResult<()> {
    let data = write_image_mem(img, format)?;
    std::fs::write(path, data)?;
    Ok(())
}

/// Encode an image into memory in the given format.
pub fn write_image_mem(img: &GrayImage, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => crate::png::write_png(img, &mut buf)?,
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => crate::tiff::write_tiff(img, &mut buf)?,
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => crate::pnm::write_pnm(img, &mut buf)?,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "no encoder available for {:?}",
                other
            )));
        }
    }
    Ok(buf.into_inner())
}
