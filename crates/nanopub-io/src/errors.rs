use crate::format::RdfFormat;
use thiserror::Error;

/// Errors that can occur while reading or writing nanopublication documents.
#[derive(Error, Debug)]
pub enum IoError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The document is not valid in its format.
    #[error("{format} parse error: {reason}")]
    Parse {
        /// Format being parsed.
        format: RdfFormat,
        /// Parser message.
        reason: String,
    },
    /// File extension does not name a supported format.
    #[error("unsupported RDF format: {0}")]
    UnsupportedFormat(String),
    /// A term could not be written.
    #[error("serialization error: {0}")]
    Serialize(String),
    /// The document parsed but is not a nanopublication.
    #[error("malformed nanopublication: {0}")]
    Malformed(#[from] nanopub_core::MalformedNanopubError),
}
