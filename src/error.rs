//! Error types for the clinicpdf library.

use std::io;
use thiserror::Error;

/// Result type alias for clinicpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while assembling or serializing a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading a resource or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error decoding an embedded image resource.
    #[error("Image decoding error: {0}")]
    ImageDecode(String),

    /// The image uses a pixel format the writer cannot embed.
    #[error("Unsupported image format: {0}")]
    UnsupportedImage(String),

    /// An owner record failed validation before rendering.
    #[error("Invalid owner record: {0}")]
    InvalidRecord(String),

    /// A drawable was given geometry it cannot lay out.
    #[error("Layout error: {0}")]
    Layout(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Error::Io(e),
            _ => Error::ImageDecode(err.to_string()),
        }
    }
}
