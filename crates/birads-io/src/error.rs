//! I/O error types
//!
//! Provides a unified error type for all image I/O and corpus loading
//! operations. Each format-specific module maps its underlying library
//! errors into `IoError` variants so that callers only need to handle
//! one error type.

use thiserror::Error;

/// Error type for image I/O operations.
///
/// Wraps format-specific decoding/encoding errors as well as standard I/O
/// and core-library errors. The two path-carrying variants are the ones a
/// caller of the corpus loader is expected to act on.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image format is not supported or not enabled via features
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The image data is structurally invalid
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// A format-specific decoder returned an error
    #[error("decode error: {0}")]
    DecodeError(String),

    /// A format-specific encoder returned an error
    #[error("encode error: {0}")]
    EncodeError(String),

    /// An error from the core library (e.g. zero-sized image)
    #[error("core error: {0}")]
    Core(#[from] birads_core::Error),

    /// The corpus directory layout is unusable (missing or empty class)
    #[error("dataset error at '{path}': {message}")]
    Dataset { path: String, message: String },

    /// A file could not be read or converted to a grayscale image
    #[error("unsupported image '{path}': {message}")]
    UnsupportedImage { path: String, message: String },
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
