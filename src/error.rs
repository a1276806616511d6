//! Error types for undocx library.

use std::io;
use thiserror::Error;

/// Result type alias for undocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not recognized as a Word package.
    #[error("Unknown file format: not a valid Word document")]
    UnknownFormat,

    /// The source document cannot be opened or parsed at all.
    #[error("Malformed source document: {0}")]
    MalformedSource(String),

    /// The bytes of a single embedded image could not be retrieved.
    #[error("Image extraction error: {0}")]
    ImageExtract(String),

    /// A column alignment outside of left/center/right was requested.
    #[error("Invalid column alignment: {0}")]
    InvalidAlignment(String),

    /// Error while writing an output archive.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error during rendering (Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error means the source document itself is unusable.
    pub fn is_malformed_source(&self) -> bool {
        matches!(self, Error::MalformedSource(_) | Error::UnknownFormat)
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::MalformedSource(format!("XML: {}", err))
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::MalformedSource(format!("XML attribute: {}", err))
    }
}
