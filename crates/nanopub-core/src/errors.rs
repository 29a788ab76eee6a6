use thiserror::Error;

/// Errors raised while building, identifying or signing a nanopublication.
#[derive(Error, Debug)]
pub enum NanopubError {
    /// The document does not have the shape of a nanopublication.
    #[error("malformed nanopublication: {0}")]
    Malformed(#[from] crate::verification::MalformedNanopubError),
    /// Key material is missing or unusable.
    #[error("key error: {0}")]
    Key(#[from] crate::signing::KeyError),
    /// The signer profile is missing or incomplete.
    #[error("profile error: {0}")]
    Profile(#[from] crate::profile::ProfileError),
    /// Configuration file could not be loaded.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Signing was requested for a document that already carries a signature.
    #[error("nanopublication is already signed")]
    AlreadySigned,
}
