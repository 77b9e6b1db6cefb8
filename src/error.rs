//! Error types for the redeck library.

use std::io;
use thiserror::Error;

/// Result type alias for redeck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, analyzing or rendering a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Error serializing or deserializing JSON.
    #[error("JSON error: {0}")]
    Json(String),

    /// The archive cannot be opened or lacks the presentation manifest.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// A single slide part could not be parsed.
    #[error("Unsupported slide content in {part}: {reason}")]
    UnsupportedSlideContent {
        /// Archive part name of the slide
        part: String,
        /// What went wrong
        reason: String,
    },

    /// An upload or asset exceeds a configured size ceiling.
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    /// A renderer could not produce a slide.
    #[error("Render error: {0}")]
    Render(String),

    /// The requested style preset does not exist.
    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    /// No session exists for the given identifier.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// A pipeline stage was requested before its inputs exist.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::Io(err.error)
    }
}
