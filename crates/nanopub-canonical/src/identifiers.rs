use crate::digest::ArtifactCode;
use crate::validation::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Appends `.` to a base IRI that ends in a code character, so the artifact
/// code stays separable from the base.
pub fn expand_base(base: &str) -> String {
    match base.chars().last() {
        Some(c) if c.is_ascii_alphanumeric() || c == '-' || c == '_' => format!("{}.", base),
        _ => base.to_string(),
    }
}

/// Character placed between the artifact code and a sub-resource suffix.
pub fn post_artifact_char(base: &str) -> char {
    if base.contains('#') {
        '.'
    } else {
        '#'
    }
}

/// Sub-resource IRI of a not-yet-identified document (`base#suffix`).
pub fn sub_iri(base: &str, suffix: &str) -> String {
    if base.ends_with('#') || base.ends_with('/') {
        format!("{}{}", base, suffix)
    } else {
        format!("{}#{}", base, suffix)
    }
}

/// IRI ending in an artifact code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrustyUri {
    prefix: String,
    code: ArtifactCode,
}

impl TrustyUri {
    /// Joins an expanded base and a code.
    pub fn new(prefix: impl Into<String>, code: ArtifactCode) -> Self {
        Self {
            prefix: prefix.into(),
            code,
        }
    }

    /// Parses an IRI whose trailing code-character run is an artifact code.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.contains([' ', '\n', '\t']) {
            return Err(ValidationError::ReservedCharacter {
                field: "trusty_uri",
                value: s,
            });
        }
        let re = Regex::new(r"^(.*[^A-Za-z0-9_-])?(RA[A-Za-z0-9_-]{43})$").expect("invalid regex");
        let Some(caps) = re.captures(&s) else {
            return Err(ValidationError::PatternMismatch {
                field: "trusty_uri",
                value: s,
            });
        };
        let prefix = caps.get(1).map_or("", |m| m.as_str()).to_string();
        let code = ArtifactCode::parse(&caps[2])?;
        Ok(Self { prefix, code })
    }

    /// Everything before the artifact code (the expanded base).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The artifact code.
    pub fn code(&self) -> &ArtifactCode {
        &self.code
    }

    /// Sub-resource IRI such as `...RAxyz#assertion`.
    pub fn sub_uri(&self, suffix: &str) -> String {
        format!(
            "{}{}{}{}",
            self.prefix,
            self.code,
            post_artifact_char(&self.prefix),
            suffix
        )
    }

    /// Full IRI.
    pub fn as_string(&self) -> String {
        format!("{}{}", self.prefix, self.code)
    }
}

impl fmt::Display for TrustyUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.code)
    }
}

impl TryFrom<String> for TrustyUri {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TrustyUri::parse(value)
    }
}

impl From<TrustyUri> for String {
    fn from(uri: TrustyUri) -> Self {
        uri.as_string()
    }
}
