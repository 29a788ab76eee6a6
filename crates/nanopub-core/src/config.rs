use crate::errors::NanopubError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Publication server used when `use_test_server` is set.
pub const TEST_SERVER_URL: &str = "https://np.test.knowledgepixels.com/";
/// Default production publication server.
pub const SERVER_URL: &str = "https://np.knowledgepixels.com/";

/// Options controlling which statements the builder injects before hashing.
///
/// None of these options change the canonicalization or encoding scheme.
/// All toggles default to `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NanopubConfig {
    /// Adds `prov:wasAttributedTo <orcid>` for the assertion to the provenance.
    pub attribute_assertion_to_profile: bool,
    /// Adds `prov:wasAttributedTo <orcid>` for the nanopub to the publication info.
    pub attribute_publication_to_profile: bool,
    /// Adds `prov:generatedAtTime` for the assertion to the provenance.
    pub add_prov_generated_time: bool,
    /// Adds `dct:created` for the nanopub to the publication info.
    pub add_pubinfo_generated_time: bool,
    /// Publish to the test server. Identifiers are unaffected.
    pub use_test_server: bool,
    /// Explicit author of the assertion, independent of the profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertion_attributed_to: Option<String>,
    /// Explicit publisher of the nanopub, independent of the profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_attributed_to: Option<String>,
    /// Sources the assertion was derived from.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub derived_from: Vec<String>,
    /// Concept introduced by the nanopub (`npx:introduces`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduces_concept: Option<String>,
}

impl NanopubConfig {
    /// Loads a configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NanopubError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| NanopubError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&text)
            .map_err(|e| NanopubError::InvalidConfig(format!("{}: {}", path.display(), e)))
    }

    /// Server that publication requests would be sent to.
    pub fn server_url(&self) -> &'static str {
        if self.use_test_server {
            TEST_SERVER_URL
        } else {
            SERVER_URL
        }
    }

    /// Whether any option needs the profile's ORCID iD.
    pub fn requires_orcid(&self) -> bool {
        (self.attribute_assertion_to_profile && self.assertion_attributed_to.is_none())
            || (self.attribute_publication_to_profile && self.publication_attributed_to.is_none())
    }
}
