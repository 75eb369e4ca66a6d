//! Error types for birads-classify

use birads_core::ClassId;
use birads_io::IoError;
use thiserror::Error;

/// Errors that can occur while training or applying the classifier
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The corpus layout is unusable (missing or empty class directory)
    #[error("dataset error at '{path}': {message}")]
    Dataset { path: String, message: String },

    /// A class covariance matrix could not be inverted
    #[error("covariance matrix of class {class} is singular")]
    SingularCovariance { class: ClassId },

    /// Classification was requested before a successful training run
    #[error("classifier has not been trained")]
    UntrainedModel,

    /// An input file could not be read as a grayscale image
    #[error("unsupported image '{path}': {message}")]
    UnsupportedImage { path: String, message: String },

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Texture library error
    #[error("texture error: {0}")]
    Texture(#[from] birads_texture::TextureError),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] birads_core::Error),
}

impl From<IoError> for ClassifyError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::Dataset { path, message } => ClassifyError::Dataset { path, message },
            IoError::UnsupportedImage { path, message } => {
                ClassifyError::UnsupportedImage { path, message }
            }
            other => ClassifyError::UnsupportedImage {
                path: "<memory>".to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// Result type for classifier operations
pub type ClassifyResult<T> = Result<T, ClassifyError>;
