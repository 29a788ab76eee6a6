//! TriG and N-Quads serialization for nanopublications.
//!
//! Parsing and serialization are delegated to `oxttl`; this crate maps between
//! its terms and the nanopub term model and adds nanopub-specific prefixes.
//! N-Quads is accepted as input only.
//!
#![deny(missing_docs)]

mod convert;
/// Error types for reading and writing documents.
pub mod errors;
/// Supported formats and extension detection.
pub mod format;
/// Document readers.
pub mod reader;
/// TriG writer.
pub mod writer;

pub use errors::IoError;
pub use format::RdfFormat;
pub use reader::{parse_str, read_dataset, read_file, read_nanopub};
pub use writer::{to_trig_string, write_file, write_nanopub, write_trig};
