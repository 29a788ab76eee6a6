use base64::Engine;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256};
use std::fmt;

use crate::validation::ValidationError;

/// Trusty URI modules understood by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrustyModule {
    /// RDF graphs hashed with SHA-256 (`RA`).
    #[serde(rename = "RA")]
    Ra,
}

impl TrustyModule {
    /// Two-character module tag that prefixes every artifact code.
    pub fn tag(self) -> &'static str {
        match self {
            TrustyModule::Ra => "RA",
        }
    }
}

/// Length of an `RA` artifact code: tag plus 43 base64url characters.
pub const ARTIFACT_CODE_LEN: usize = 45;

/// Module tag + base64url (no padding) SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactCode(String);

impl ArtifactCode {
    /// Hashes canonical bytes into an `RA` artifact code.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nanopub_canonical::ArtifactCode;
    ///
    /// let code = ArtifactCode::compute(b"");
    /// assert_eq!(code.as_ref(), "RA47DEQpj8HBSa-_TImW-5JCeuQeRkm5NMpJWZG3hSuFU");
    /// ```
    pub fn compute(canonical_bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(canonical_bytes);
        let hash_bytes = hasher.finalize();

        let b64 = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hash_bytes);
        ArtifactCode(format!("{}{}", TrustyModule::Ra.tag(), b64))
    }

    /// Parses a validated artifact code.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let re = Regex::new(r"^RA[A-Za-z0-9_-]{43}$").expect("invalid regex");
        if !re.is_match(&s) {
            return Err(ValidationError::PatternMismatch {
                field: "artifact_code",
                value: s,
            });
        }
        Ok(ArtifactCode(s))
    }

    /// Module the code was produced with.
    pub fn module(&self) -> TrustyModule {
        TrustyModule::Ra
    }

    /// Base64url digest without the module tag.
    pub fn hash_part(&self) -> &str {
        &self.0[2..]
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ArtifactCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ArtifactCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ArtifactCode::parse(value)
    }
}

impl From<ArtifactCode> for String {
    fn from(code: ArtifactCode) -> Self {
        code.0
    }
}
