//! Error types for birads-texture

use thiserror::Error;

/// Errors that can occur during texture feature extraction
#[derive(Debug, Error)]
pub enum TextureError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] birads_core::Error),

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for texture operations
pub type TextureResult<T> = Result<T, TextureError>;
