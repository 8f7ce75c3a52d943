//! Error types for the svgtext library.

use std::io;
use thiserror::Error;

/// Result type alias for svgtext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while processing an SVG document.
///
/// Unresolved or empty field identifiers are deliberately *not* errors;
/// they are reported per field as [`FieldOutcome`](crate::FieldOutcome)
/// so the remaining fields still get processed.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not well-formed XML. Fatal, raised before any mutation.
    #[error("XML parse error: {0}")]
    Parse(String),

    /// Failure while writing the document back out.
    #[error("serialization error: {0}")]
    Serialize(String),

    /// A malformed `ID=VALUE` field specification.
    #[error("invalid field spec {0:?}: expected ID=VALUE")]
    InvalidFieldSpec(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Parse(err.to_string())
    }
}
