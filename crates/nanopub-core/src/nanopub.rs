//! The nanopublication aggregate and its builder.

use crate::config::NanopubConfig;
use crate::errors::NanopubError;
use crate::namespaces::{dct, np, npx, prov, rdf, xsd, RSA_ALGORITHM};
use crate::profile::{Profile, ProfileError};
use crate::signing::KeyPair;
use crate::verification::{self, MalformedNanopubError, ValidationReport};
use chrono::{DateTime, SecondsFormat, Utc};
use nanopub_canonical::{
    sub_iri, ArtifactCode, Canonicalizer, Dataset, Graph, GraphName, Quad, Rewriter, Term,
    Triple, TrustyUri,
};
use std::collections::BTreeMap;
use tracing::debug;

/// IRI used for nanopublications that have not been identified yet.
pub const DEFAULT_URI: &str = "http://purl.org/nanopub/temp/mynanopub";

/// A nanopublication: four named graphs and the IRI that ties them together.
///
/// The IRI is either the declared (temporary) one or, after
/// [`make_trusty`](Nanopub::make_trusty) or [`sign`](Nanopub::sign), a trusty
/// URI whose artifact code covers every statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nanopub {
    uri: String,
    head: Graph,
    assertion: Graph,
    provenance: Graph,
    pubinfo: Graph,
}

impl Nanopub {
    /// Starts building a nanopublication.
    pub fn builder(config: NanopubConfig) -> NanopubBuilder {
        NanopubBuilder::new(config)
    }

    /// Reads a nanopublication out of a dataset, checking its structure.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, MalformedNanopubError> {
        let structure = verification::check_structure(dataset)?;
        let graph = |name: &str| {
            let mut graph = Graph::new(name);
            graph.extend(
                dataset
                    .quads_in(&GraphName::iri(name))
                    .map(Quad::triple),
            );
            graph
        };
        Ok(Self {
            head: graph(&structure.head),
            assertion: graph(&structure.assertion),
            provenance: graph(&structure.provenance),
            pubinfo: graph(&structure.pubinfo),
            uri: structure.uri,
        })
    }

    /// All statements as quads.
    pub fn to_dataset(&self) -> Dataset {
        self.graphs().iter().flat_map(|g| g.quads()).collect()
    }

    /// Current IRI: declared, or trusty once identified.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Trusty URI, if the nanopublication has been identified.
    pub fn trusty_uri(&self) -> Option<TrustyUri> {
        TrustyUri::parse(self.uri.as_str()).ok()
    }

    /// Head graph.
    pub fn head(&self) -> &Graph {
        &self.head
    }

    /// Assertion graph.
    pub fn assertion(&self) -> &Graph {
        &self.assertion
    }

    /// Provenance graph.
    pub fn provenance(&self) -> &Graph {
        &self.provenance
    }

    /// Publication info graph.
    pub fn pubinfo(&self) -> &Graph {
        &self.pubinfo
    }

    /// Whether the publication info carries a signature.
    pub fn is_signed(&self) -> bool {
        self.pubinfo.iter().any(|t| t.predicate == npx::HAS_SIGNATURE)
    }

    /// `npx:signedBy` of the signature element.
    pub fn signer(&self) -> Option<&str> {
        self.pubinfo_object(npx::SIGNED_BY).and_then(Term::as_iri)
    }

    /// Embedded base64 public key.
    pub fn public_key(&self) -> Option<&str> {
        self.pubinfo_object(npx::HAS_PUBLIC_KEY)
            .and_then(Term::as_literal)
            .map(|l| l.value.as_str())
    }

    /// Canonical bytes of the current content, as hashed for the identifier.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let preform = self.canonicalizer().preprocess(&self.parts());
        Canonicalizer::canonical_bytes(&preform)
    }

    /// Assigns a trusty URI without signing.
    ///
    /// An already identified nanopublication keeps its code as long as its
    /// content is unchanged.
    pub fn make_trusty(&mut self) -> Result<TrustyUri, NanopubError> {
        verification::check_structure(&self.to_dataset())?;
        let canonicalizer = self.canonicalizer();
        let preform = canonicalizer.preprocess(&self.parts());
        let code = ArtifactCode::compute(&Canonicalizer::canonical_bytes(&preform));
        Ok(self.adopt(&canonicalizer, &preform, code))
    }

    /// Signs with the profile's keys, recording its ORCID iD as signer.
    pub fn sign(&mut self, profile: &Profile) -> Result<TrustyUri, NanopubError> {
        let keys = profile.key_pair()?;
        self.sign_with_key_pair(&keys, profile.orcid_id.as_deref())
    }

    /// Signs and assigns the trusty URI that covers the signature.
    ///
    /// The signature element is added to the pre-form, the signature is
    /// computed over its canonical bytes, and the document is hashed once more
    /// with `npx:hasSignature` included.
    ///
    /// # Errors
    ///
    /// [`NanopubError::AlreadySigned`] if a signature is present,
    /// [`NanopubError::Malformed`] for structural problems and
    /// [`NanopubError::Key`] if the key cannot sign. On error the
    /// nanopublication is left unchanged.
    pub fn sign_with_key_pair(
        &mut self,
        keys: &KeyPair,
        signer: Option<&str>,
    ) -> Result<TrustyUri, NanopubError> {
        if self.is_signed() {
            return Err(NanopubError::AlreadySigned);
        }
        verification::check_structure(&self.to_dataset())?;

        let canonicalizer = self.canonicalizer();
        let mut preform = canonicalizer.preprocess(&self.parts());
        let graph = GraphName::iri(canonicalizer.normalize_iri(self.pubinfo.name()));
        let element = Term::iri(canonicalizer.placeholder_sub_uri("sig"));
        let signature_quad = |predicate: &str, object: Term| {
            Quad::new(element.clone(), predicate, object, graph.clone())
        };

        preform.push(signature_quad(
            npx::HAS_SIGNATURE_TARGET,
            Term::iri(canonicalizer.placeholder_uri()),
        ));
        preform.push(signature_quad(npx::HAS_ALGORITHM, Term::literal(RSA_ALGORITHM)));
        preform.push(signature_quad(
            npx::HAS_PUBLIC_KEY,
            Term::literal(keys.public_key_base64()?),
        ));
        if let Some(signer) = signer {
            preform.push(signature_quad(npx::SIGNED_BY, Term::iri(signer)));
        }

        let signature = keys.sign(&Canonicalizer::canonical_bytes(&preform))?;
        preform.push(signature_quad(npx::HAS_SIGNATURE, Term::literal(signature)));

        let code = ArtifactCode::compute(&Canonicalizer::canonical_bytes(&preform));
        let uri = self.adopt(&canonicalizer, &preform, code);
        debug!(uri = %uri, signer = ?signer, "signed nanopublication");
        Ok(uri)
    }

    /// Runs every structural and integrity check.
    pub fn validate(&self) -> Result<ValidationReport, MalformedNanopubError> {
        verification::validate(&self.to_dataset())
    }

    /// Shorthand for a successful [`validate`](Nanopub::validate).
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn canonicalizer(&self) -> Canonicalizer {
        Canonicalizer::for_uri(&self.uri)
    }

    fn graphs(&self) -> [&Graph; 4] {
        [&self.head, &self.assertion, &self.provenance, &self.pubinfo]
    }

    fn parts(&self) -> Vec<Vec<Quad>> {
        self.graphs().iter().map(|g| g.quads()).collect()
    }

    fn pubinfo_object(&self, predicate: &str) -> Option<&Term> {
        self.pubinfo
            .iter()
            .find(|t| t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Replaces content and names with the finalized form of `preform`.
    fn adopt(
        &mut self,
        canonicalizer: &Canonicalizer,
        preform: &[Quad],
        code: ArtifactCode,
    ) -> TrustyUri {
        let uri = canonicalizer.trusty_uri(code.clone());
        let rewriter = Rewriter::new(code);
        let rename = |name: &str| rewriter.rewrite_iri(&canonicalizer.normalize_iri(name));

        let mut graphs: BTreeMap<String, Graph> = self
            .graphs()
            .iter()
            .map(|g| {
                let name = rename(g.name());
                (name.clone(), Graph::new(name))
            })
            .collect();
        for quad in preform.iter().map(|q| rewriter.rewrite_quad(q)) {
            if let Some(graph) = quad.graph.as_iri().and_then(|name| graphs.get_mut(name)) {
                graph.insert(quad.triple());
            }
        }
        let mut take = |name: &str| {
            let name = rename(name);
            graphs.remove(&name).unwrap_or_else(|| Graph::new(name))
        };

        let head = take(self.head.name());
        let assertion = take(self.assertion.name());
        let provenance = take(self.provenance.name());
        let pubinfo = take(self.pubinfo.name());
        *self = Nanopub {
            uri: uri.to_string(),
            head,
            assertion,
            provenance,
            pubinfo,
        };
        debug!(uri = %uri, "assigned trusty URI");
        uri
    }
}

/// Builds a nanopublication, injecting statements as configured.
#[derive(Debug, Clone)]
pub struct NanopubBuilder {
    config: NanopubConfig,
    uri: String,
    orcid_id: Option<String>,
    timestamp: Option<DateTime<Utc>>,
    assertion: Vec<Triple>,
    provenance: Vec<Triple>,
    pubinfo: Vec<Triple>,
}

impl NanopubBuilder {
    /// Builder with the default temporary IRI.
    pub fn new(config: NanopubConfig) -> Self {
        Self {
            config,
            uri: DEFAULT_URI.to_string(),
            orcid_id: None,
            timestamp: None,
            assertion: Vec::new(),
            provenance: Vec::new(),
            pubinfo: Vec::new(),
        }
    }

    /// Declared IRI of the nanopublication; parts are named `<uri>#Head` etc.
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    /// Profile whose ORCID iD is used for attribution.
    pub fn profile(mut self, profile: &Profile) -> Self {
        self.orcid_id = profile.orcid_id.clone();
        self
    }

    /// ORCID iD used for attribution, without a full profile.
    pub fn orcid_id(mut self, orcid_id: impl Into<String>) -> Self {
        self.orcid_id = Some(orcid_id.into());
        self
    }

    /// Fixed generation time; defaults to now.
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Adds an assertion statement.
    pub fn assertion(mut self, triple: Triple) -> Self {
        self.assertion.push(triple);
        self
    }

    /// Adds a provenance statement.
    pub fn provenance(mut self, triple: Triple) -> Self {
        self.provenance.push(triple);
        self
    }

    /// Adds a publication info statement.
    pub fn pubinfo(mut self, triple: Triple) -> Self {
        self.pubinfo.push(triple);
        self
    }

    /// IRI the assertion graph will get.
    pub fn assertion_uri(&self) -> String {
        sub_iri(&self.uri, "assertion")
    }

    /// Assembles the four graphs.
    ///
    /// # Errors
    ///
    /// [`ProfileError::MissingOrcid`] when attribution to the profile is
    /// requested without an ORCID iD.
    pub fn build(self) -> Result<Nanopub, NanopubError> {
        let config = &self.config;
        let assertion_uri = self.assertion_uri();
        let provenance_uri = sub_iri(&self.uri, "provenance");
        let pubinfo_uri = sub_iri(&self.uri, "pubinfo");

        if config.requires_orcid() && self.orcid_id.is_none() {
            return Err(ProfileError::MissingOrcid.into());
        }
        let orcid = self.orcid_id.as_deref().map(Term::iri);
        let stamp = || {
            let time = self.timestamp.unwrap_or_else(Utc::now);
            let value = time.to_rfc3339_opts(SecondsFormat::Millis, true);
            Term::typed_literal(value, xsd::DATE_TIME)
        };

        let np_uri = Term::iri(self.uri.clone());
        let about_np = |predicate: &str, object: Term| Triple::new(np_uri.clone(), predicate, object);
        let assertion_term = Term::iri(assertion_uri.clone());
        let about_assertion =
            |predicate: &str, object: Term| Triple::new(assertion_term.clone(), predicate, object);

        let mut head = Graph::new(sub_iri(&self.uri, "Head"));
        head.insert(about_np(rdf::TYPE, Term::iri(np::NANOPUBLICATION)));
        head.insert(about_np(np::HAS_ASSERTION, Term::iri(assertion_uri.clone())));
        head.insert(about_np(np::HAS_PROVENANCE, Term::iri(provenance_uri.clone())));
        head.insert(about_np(np::HAS_PUBLICATION_INFO, Term::iri(pubinfo_uri.clone())));

        let mut assertion = Graph::new(assertion_uri);
        assertion.extend(self.assertion.iter().cloned());

        let mut provenance = Graph::new(provenance_uri);
        provenance.extend(self.provenance.iter().cloned());
        if config.add_prov_generated_time {
            provenance.insert(about_assertion(prov::GENERATED_AT_TIME, stamp()));
        }
        if let Some(author) = &config.assertion_attributed_to {
            provenance.insert(about_assertion(prov::WAS_ATTRIBUTED_TO, Term::iri(author.as_str())));
        } else if config.attribute_assertion_to_profile {
            provenance.extend(orcid.clone().map(|id| about_assertion(prov::WAS_ATTRIBUTED_TO, id)));
        }
        for source in &config.derived_from {
            provenance.insert(about_assertion(prov::WAS_DERIVED_FROM, Term::iri(source.as_str())));
        }

        let mut pubinfo = Graph::new(pubinfo_uri);
        pubinfo.extend(self.pubinfo.iter().cloned());
        if config.add_pubinfo_generated_time {
            pubinfo.insert(about_np(dct::CREATED, stamp()));
        }
        if let Some(publisher) = &config.publication_attributed_to {
            pubinfo.insert(about_np(prov::WAS_ATTRIBUTED_TO, Term::iri(publisher.as_str())));
        } else if config.attribute_publication_to_profile {
            pubinfo.extend(orcid.map(|id| about_np(prov::WAS_ATTRIBUTED_TO, id)));
        }
        if let Some(concept) = &config.introduces_concept {
            pubinfo.insert(about_np(npx::INTRODUCES, Term::iri(concept.as_str())));
        }

        Ok(Nanopub {
            uri: self.uri,
            head,
            assertion,
            provenance,
            pubinfo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const ORCID: &str = "https://orcid.org/0000-0000-0000-0000";

    fn claim() -> Triple {
        Triple::new(Term::iri("http://test"), "http://example.org/claims", Term::literal("x"))
    }

    #[test]
    fn test_builder_links_parts_from_head() {
        let np = Nanopub::builder(NanopubConfig::default())
            .assertion(claim())
            .build()
            .unwrap();
        assert_eq!(np.uri(), DEFAULT_URI);
        assert_eq!(np.head().len(), 4);
        assert_eq!(np.assertion().name(), format!("{}#assertion", DEFAULT_URI));
        assert!(np.provenance().is_empty());
        assert!(np.pubinfo().is_empty());
    }

    #[test]
    fn test_builder_injects_configured_statements() {
        let config = NanopubConfig {
            attribute_assertion_to_profile: true,
            attribute_publication_to_profile: true,
            add_prov_generated_time: true,
            add_pubinfo_generated_time: true,
            derived_from: vec!["http://example.org/source".into()],
            introduces_concept: Some("http://example.org/concept".into()),
            ..Default::default()
        };
        let time = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let np = Nanopub::builder(config)
            .orcid_id(ORCID)
            .timestamp(time)
            .assertion(claim())
            .build()
            .unwrap();

        let stamp = Term::typed_literal("2024-01-02T03:04:05.000Z", xsd::DATE_TIME);
        let assertion = Term::iri(np.assertion().name());
        assert!(np.provenance().contains(&Triple::new(assertion.clone(), prov::GENERATED_AT_TIME, stamp.clone())));
        assert!(np.provenance().contains(&Triple::new(assertion.clone(), prov::WAS_ATTRIBUTED_TO, Term::iri(ORCID))));
        assert!(np.provenance().contains(&Triple::new(assertion, prov::WAS_DERIVED_FROM, Term::iri("http://example.org/source"))));
        let np_term = Term::iri(DEFAULT_URI);
        assert!(np.pubinfo().contains(&Triple::new(np_term.clone(), dct::CREATED, stamp)));
        assert!(np.pubinfo().contains(&Triple::new(np_term.clone(), prov::WAS_ATTRIBUTED_TO, Term::iri(ORCID))));
        assert!(np.pubinfo().contains(&Triple::new(np_term, npx::INTRODUCES, Term::iri("http://example.org/concept"))));
    }

    #[test]
    fn test_attribution_without_orcid_fails() {
        let config = NanopubConfig {
            attribute_publication_to_profile: true,
            ..Default::default()
        };
        let err = Nanopub::builder(config).assertion(claim()).build().unwrap_err();
        assert!(matches!(err, NanopubError::Profile(ProfileError::MissingOrcid)));
    }

    #[test]
    fn test_make_trusty_rejects_empty_parts() {
        let mut np = Nanopub::builder(NanopubConfig::default())
            .assertion(claim())
            .build()
            .unwrap();
        let err = np.make_trusty().unwrap_err();
        assert!(matches!(
            err,
            NanopubError::Malformed(MalformedNanopubError::EmptyPart(_))
        ));
        assert_eq!(np.uri(), DEFAULT_URI);
    }

    #[test]
    fn test_make_trusty_renames_parts() {
        let config = NanopubConfig {
            attribute_assertion_to_profile: true,
            attribute_publication_to_profile: true,
            ..Default::default()
        };
        let mut np = Nanopub::builder(config)
            .orcid_id(ORCID)
            .assertion(claim())
            .build()
            .unwrap();
        let uri = np.make_trusty().unwrap();
        assert!(uri.to_string().starts_with("http://purl.org/np/RA"));
        assert_eq!(np.assertion().name(), uri.sub_uri("assertion"));
        assert_eq!(np.head().name(), uri.sub_uri("Head"));
        assert!(np.is_valid());

        // Identifying again reproduces the same code.
        let again = np.make_trusty().unwrap();
        assert_eq!(again, uri);
    }
}
