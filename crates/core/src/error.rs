//! Error types for photo deck generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or writing a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read a file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The given image folder does not exist or is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// Failed to read image metadata.
    #[error("Image metadata error: {0}")]
    ImageError(String),

    /// ZIP archive error while writing the package.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML writing error while serializing a package part.
    #[error("XML writing error: {0}")]
    XmlError(String),
}
