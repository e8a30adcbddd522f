//! Error types for OOXML operations

use thiserror::Error;

/// Errors that can occur while writing or reading a DOCX package
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Error reading or writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Image data could not be decoded
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Required part not found in the package
    #[error("Required file not found: {0}")]
    MissingFile(String),
}

/// Result type for OOXML operations
pub type Result<T> = std::result::Result<T, OoxmlError>;
