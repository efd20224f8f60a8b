use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or decoding a payment document
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source file could not be read
    #[error("failed to read file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The XML itself is malformed
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document ended before all open elements were closed
    #[error("failed to parse XML: unexpected end of document inside <{0}>")]
    UnexpectedEof(String),

    /// No root element was found at all
    #[error("failed to parse XML: document has no root element")]
    MissingRoot,

    /// The root element is not `Document`
    #[error("failed to parse XML: expected element type <Document> but have <{0}>")]
    UnexpectedRoot(String),
}

/// Type alias for cleaner function signatures
pub type Result<T> = std::result::Result<T, ParseError>;
