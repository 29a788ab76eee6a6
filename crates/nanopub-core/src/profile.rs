use crate::signing::{KeyError, KeyPair};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or consulting a signer profile.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// No profile file at the given location.
    #[error("profile not found: {0}")]
    NotFound(PathBuf),
    /// Profile file could not be read.
    #[error("failed to read profile {path}: {source}")]
    Unreadable {
        /// Location of the profile.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Profile file is not valid JSON for a profile.
    #[error("invalid profile {path}: {reason}")]
    Invalid {
        /// Location of the profile.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },
    /// The configuration needs an ORCID iD the profile does not have.
    #[error("profile has no ORCID iD")]
    MissingOrcid,
}

/// Signer identity and key locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name.
    pub name: String,
    /// ORCID iD as a full IRI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orcid_id: Option<String>,
    /// Private key location.
    pub private_key: PathBuf,
    /// Public key location; derived from the private key when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<PathBuf>,
    /// Nanopub that introduced this key, if published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction_nanopub_uri: Option<String>,
}

impl Profile {
    /// Profile with a name and a private key location.
    pub fn new(name: impl Into<String>, private_key: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            orcid_id: None,
            private_key: private_key.into(),
            public_key: None,
            introduction_nanopub_uri: None,
        }
    }

    /// Sets the ORCID iD.
    pub fn with_orcid(mut self, orcid_id: impl Into<String>) -> Self {
        self.orcid_id = Some(orcid_id.into());
        self
    }

    /// Sets the public key location.
    pub fn with_public_key(mut self, public_key: impl Into<PathBuf>) -> Self {
        self.public_key = Some(public_key.into());
        self
    }

    /// Loads a JSON profile. Relative key paths resolve against the profile's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ProfileError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|source| ProfileError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let mut profile: Profile =
            serde_json::from_str(&text).map_err(|e| ProfileError::Invalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if let Some(dir) = path.parent() {
            profile.private_key = resolve(dir, &profile.private_key);
            profile.public_key = profile.public_key.as_deref().map(|p| resolve(dir, p));
        }
        Ok(profile)
    }

    /// Loads the profile's key pair.
    pub fn key_pair(&self) -> Result<KeyPair, KeyError> {
        KeyPair::load(&self.private_key, self.public_key.as_deref())
    }
}

fn resolve(dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        dir.join(path)
    }
}
