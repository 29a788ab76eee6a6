use crate::errors::IoError;
use std::fmt;
use std::path::Path;

/// Serialization formats for nanopublication documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    /// TriG, the usual nanopublication format. Read and written.
    TriG,
    /// N-Quads. Read only.
    NQuads,
}

impl RdfFormat {
    /// Format named by a file extension (`trig`, `nq`, `nquads`).
    pub fn from_extension(extension: &str) -> Result<Self, IoError> {
        match extension.to_ascii_lowercase().as_str() {
            "trig" => Ok(RdfFormat::TriG),
            "nq" | "nquads" => Ok(RdfFormat::NQuads),
            other => Err(IoError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Format of a file, judged by its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| IoError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_extension(extension)
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            RdfFormat::TriG => "trig",
            RdfFormat::NQuads => "nq",
        }
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RdfFormat::TriG => "TriG",
            RdfFormat::NQuads => "N-Quads",
        })
    }
}
