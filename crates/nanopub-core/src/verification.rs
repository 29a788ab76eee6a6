//! Structural and integrity validation of nanopublications.
//!
//! Checks run in a fixed order and the first failure is reported:
//!
//! 1. Exactly one `np:Nanopublication` type statement, naming the head graph.
//! 2. Exactly four graphs, all IRI-named (linked but empty parts count).
//! 3. Head links present, distinct and the only statements in the head.
//! 4. No empty part.
//! 5. For trusty URIs, the artifact code matches the content.
//! 6. If a signature element is present, the signature verifies.

use crate::namespaces::{np, npx, rdf, RSA_ALGORITHM};
use crate::signing::{verify_signature, SignatureCheck};
use nanopub_canonical::{Canonicalizer, Dataset, GraphName, Quad, Term, TrustyUri};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// One of the four parts of a nanopublication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Part {
    /// Head graph linking the other parts.
    Head,
    /// Assertion graph.
    Assertion,
    /// Provenance of the assertion.
    Provenance,
    /// Publication info, including the signature.
    PubInfo,
}

impl Part {
    /// Parts linked from the head, in hashing order.
    pub const LINKED: [Part; 3] = [Part::Assertion, Part::Provenance, Part::PubInfo];

    /// Head predicate linking to this part.
    pub fn link_predicate(self) -> Option<&'static str> {
        match self {
            Part::Head => None,
            Part::Assertion => Some(np::HAS_ASSERTION),
            Part::Provenance => Some(np::HAS_PROVENANCE),
            Part::PubInfo => Some(np::HAS_PUBLICATION_INFO),
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Part::Head => "head",
            Part::Assertion => "assertion",
            Part::Provenance => "provenance",
            Part::PubInfo => "publication info",
        })
    }
}

/// Reasons a document is not a valid nanopublication.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedNanopubError {
    /// No `rdf:type np:Nanopublication` statement.
    #[error("no rdf:type np:Nanopublication statement")]
    MissingTypeStatement,
    /// More than one `rdf:type np:Nanopublication` statement.
    #[error("{0} rdf:type np:Nanopublication statements, expected one")]
    MultipleTypeStatements(usize),
    /// The nanopublication itself is a blank node.
    #[error("nanopublication must be identified by an IRI")]
    UnnamedNanopub,
    /// Not exactly four graphs.
    #[error("wrong part count: expected 4 graphs, found {found}")]
    WrongPartCount {
        /// Number of graphs found.
        found: usize,
    },
    /// A part lives in the default graph or a blank-named graph.
    #[error("nanopublication parts must be named by IRIs")]
    UnnamedPart,
    /// The head does not link the part.
    #[error("missing link: head has no {0} link")]
    MissingLink(Part),
    /// The head links the part more than once.
    #[error("head has more than one {0} link")]
    DuplicateLink(Part),
    /// The link does not reference a named graph.
    #[error("dangling link: {0} link does not reference a named graph")]
    DanglingLink(Part),
    /// Two parts share a graph.
    #[error("parts must be distinct graphs")]
    DuplicatePartName,
    /// The head holds more than the four required statements.
    #[error("unexpected statement in head: {0}")]
    UnexpectedHeadStatement(String),
    /// A linked part has no statements.
    #[error("{0} part is empty")]
    EmptyPart(Part),
    /// The artifact code does not match the content.
    #[error("hash mismatch: identifier has {expected} but content hashes to {actual}")]
    HashMismatch {
        /// Code carried by the identifier.
        expected: String,
        /// Code recomputed from content.
        actual: String,
    },
    /// Signature statements are missing or ambiguous.
    #[error("incomplete signature: {0}")]
    IncompleteSignature(String),
    /// The signature targets another resource.
    #[error("signature target {found} is not the nanopublication")]
    WrongSignatureTarget {
        /// Declared target.
        found: String,
    },
    /// Algorithm other than RSA.
    #[error("unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// Embedded public key cannot be decoded.
    #[error("invalid public key: {0}")]
    InvalidKey(String),
    /// Signature does not verify against the embedded public key.
    #[error("invalid signature")]
    InvalidSignature,
}

/// Graph names of a structurally valid nanopublication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NanopubStructure {
    /// Nanopublication IRI.
    pub uri: String,
    /// Head graph.
    pub head: String,
    /// Assertion graph.
    pub assertion: String,
    /// Provenance graph.
    pub provenance: String,
    /// Publication info graph.
    pub pubinfo: String,
}

impl NanopubStructure {
    /// Graph IRI of a part.
    pub fn graph(&self, part: Part) -> &str {
        match part {
            Part::Head => &self.head,
            Part::Assertion => &self.assertion,
            Part::Provenance => &self.provenance,
            Part::PubInfo => &self.pubinfo,
        }
    }

    /// Quads of each part, in hashing order.
    pub fn parts(&self, dataset: &Dataset) -> Vec<Vec<Quad>> {
        [Part::Head, Part::Assertion, Part::Provenance, Part::PubInfo]
            .iter()
            .map(|part| {
                let name = GraphName::iri(self.graph(*part));
                dataset.quads_in(&name).cloned().collect()
            })
            .collect()
    }
}

/// Outcome of a successful validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Nanopublication IRI.
    pub uri: String,
    /// Whether the IRI carries a verified artifact code.
    pub trusty: bool,
    /// Whether a signature was verified.
    pub signed: bool,
}

/// Validates a dataset as a nanopublication.
///
/// # Errors
///
/// Returns the first [`MalformedNanopubError`] encountered.
pub fn validate(dataset: &Dataset) -> Result<ValidationReport, MalformedNanopubError> {
    let result = run_checks(dataset);
    match &result {
        Ok(report) => debug!(uri = %report.uri, trusty = report.trusty, signed = report.signed, "nanopublication valid"),
        Err(e) => warn!(error = %e, "nanopublication rejected"),
    }
    result
}

fn run_checks(dataset: &Dataset) -> Result<ValidationReport, MalformedNanopubError> {
    let structure = check_structure(dataset)?;
    let parts = structure.parts(dataset);

    let trusty = TrustyUri::parse(structure.uri.as_str()).ok();
    if let Some(uri) = &trusty {
        let actual = Canonicalizer::for_trusty(uri).artifact_code(&parts);
        if &actual != uri.code() {
            return Err(MalformedNanopubError::HashMismatch {
                expected: uri.code().to_string(),
                actual: actual.to_string(),
            });
        }
    }

    let signed = check_signature(&structure, &parts, dataset)?;
    Ok(ValidationReport {
        uri: structure.uri,
        trusty: trusty.is_some(),
        signed,
    })
}

/// Locates the four parts and checks the shape of the document.
pub fn check_structure(dataset: &Dataset) -> Result<NanopubStructure, MalformedNanopubError> {
    // 1. Type statement
    let nanopub_type = Term::iri(np::NANOPUBLICATION);
    let types: Vec<&Quad> = dataset
        .iter()
        .filter(|q| q.predicate == rdf::TYPE && q.object == nanopub_type)
        .collect();
    let type_quad = match types.as_slice() {
        [] => return Err(MalformedNanopubError::MissingTypeStatement),
        [single] => *single,
        many => return Err(MalformedNanopubError::MultipleTypeStatements(many.len())),
    };
    let Term::Iri(uri) = &type_quad.subject else {
        return Err(MalformedNanopubError::UnnamedNanopub);
    };
    let GraphName::Iri(head) = &type_quad.graph else {
        return Err(MalformedNanopubError::UnnamedPart);
    };
    let head_graph = type_quad.graph.clone();
    let subject = type_quad.subject.clone();

    let mut links: BTreeMap<Part, &Quad> = BTreeMap::new();
    for part in Part::LINKED {
        let predicate = part.link_predicate().unwrap_or_default();
        let found: Vec<&Quad> = dataset
            .quads_in(&head_graph)
            .filter(|q| q.subject == subject && q.predicate == predicate)
            .collect();
        match found.as_slice() {
            [] => {}
            [single] => {
                links.insert(part, *single);
            }
            _ => return Err(MalformedNanopubError::DuplicateLink(part)),
        }
    }

    // 2. Part count; linked parts count even when they hold no statements
    let mut graphs: BTreeSet<GraphName> = dataset.graph_names().into_iter().cloned().collect();
    for link in links.values() {
        if let Term::Iri(target) = &link.object {
            graphs.insert(GraphName::iri(target.clone()));
        }
    }
    if graphs.len() != 4 {
        return Err(MalformedNanopubError::WrongPartCount {
            found: graphs.len(),
        });
    }
    if graphs.iter().any(|g| g.as_iri().is_none()) {
        return Err(MalformedNanopubError::UnnamedPart);
    }

    // 3. Head links
    let mut names: BTreeMap<Part, String> = BTreeMap::new();
    for part in Part::LINKED {
        let link = links
            .get(&part)
            .ok_or(MalformedNanopubError::MissingLink(part))?;
        let target = link
            .object
            .as_iri()
            .ok_or(MalformedNanopubError::DanglingLink(part))?;
        names.insert(part, target.to_string());
    }
    let distinct: BTreeSet<&String> = names.values().chain(std::iter::once(head)).collect();
    if distinct.len() != 4 {
        return Err(MalformedNanopubError::DuplicatePartName);
    }
    for quad in dataset.quads_in(&head_graph) {
        let expected = quad == type_quad || links.values().any(|link| *link == quad);
        if !expected {
            return Err(MalformedNanopubError::UnexpectedHeadStatement(quad.to_string()));
        }
    }

    // 4. Empty parts
    for (part, name) in &names {
        if dataset.quads_in(&GraphName::iri(name.clone())).next().is_none() {
            return Err(MalformedNanopubError::EmptyPart(*part));
        }
    }

    Ok(NanopubStructure {
        uri: uri.clone(),
        head: head.clone(),
        assertion: names[&Part::Assertion].clone(),
        provenance: names[&Part::Provenance].clone(),
        pubinfo: names[&Part::PubInfo].clone(),
    })
}

/// Verifies the signature element, if any. Returns whether one was verified.
fn check_signature(
    structure: &NanopubStructure,
    parts: &[Vec<Quad>],
    dataset: &Dataset,
) -> Result<bool, MalformedNanopubError> {
    let pubinfo = GraphName::iri(structure.pubinfo.clone());
    let signatures: Vec<&Quad> = dataset
        .quads_in(&pubinfo)
        .filter(|q| q.predicate == npx::HAS_SIGNATURE)
        .collect();
    let signature_quad = match signatures.as_slice() {
        [] => {
            let partial = dataset.quads_in(&pubinfo).any(|q| {
                q.predicate == npx::HAS_PUBLIC_KEY || q.predicate == npx::HAS_SIGNATURE_TARGET
            });
            if partial {
                return Err(MalformedNanopubError::IncompleteSignature(
                    "no npx:hasSignature statement".into(),
                ));
            }
            return Ok(false);
        }
        [single] => *single,
        many => {
            return Err(MalformedNanopubError::IncompleteSignature(format!(
                "{} npx:hasSignature statements",
                many.len()
            )))
        }
    };

    let element = &signature_quad.subject;
    let value_of = |predicate: &str| {
        dataset
            .quads_in(&pubinfo)
            .find(|q| &q.subject == element && q.predicate == predicate)
            .map(|q| &q.object)
    };
    let literal_of = |predicate: &'static str| {
        value_of(predicate)
            .and_then(Term::as_literal)
            .map(|l| l.value.clone())
            .ok_or_else(|| {
                MalformedNanopubError::IncompleteSignature(format!("missing literal for <{}>", predicate))
            })
    };

    let signature = literal_of(npx::HAS_SIGNATURE)?;
    let public_key = literal_of(npx::HAS_PUBLIC_KEY)?;
    let algorithm = literal_of(npx::HAS_ALGORITHM)?;
    if !algorithm.eq_ignore_ascii_case(RSA_ALGORITHM) {
        return Err(MalformedNanopubError::UnsupportedAlgorithm(algorithm));
    }
    let target = value_of(npx::HAS_SIGNATURE_TARGET).ok_or_else(|| {
        MalformedNanopubError::IncompleteSignature("no npx:hasSignatureTarget statement".into())
    })?;
    if target.as_iri() != Some(structure.uri.as_str()) {
        return Err(MalformedNanopubError::WrongSignatureTarget {
            found: target.to_string(),
        });
    }

    let canonicalizer = Canonicalizer::for_uri(&structure.uri);
    let signed_graph = GraphName::iri(canonicalizer.normalize_iri(&structure.pubinfo));
    let preform: Vec<Quad> = canonicalizer
        .preprocess(parts)
        .into_iter()
        .filter(|q| !(q.graph == signed_graph && q.predicate == npx::HAS_SIGNATURE))
        .collect();
    let message = Canonicalizer::canonical_bytes(&preform);

    match verify_signature(&public_key, &message, &signature) {
        Ok(SignatureCheck::Valid) => Ok(true),
        Ok(SignatureCheck::Invalid) => Err(MalformedNanopubError::InvalidSignature),
        Err(e) => Err(MalformedNanopubError::InvalidKey(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanopub_canonical::Triple;

    const NP: &str = "http://example.org/np1";

    fn g(suffix: &str) -> GraphName {
        GraphName::iri(format!("{}#{}", NP, suffix))
    }

    fn t(s: &str, p: &str, o: Term) -> Triple {
        Triple::new(Term::iri(s), p, o)
    }

    fn make_dataset() -> Dataset {
        let np_term = |s: &str| Term::iri(format!("{}#{}", NP, s));
        vec![
            t(NP, rdf::TYPE, Term::iri(np::NANOPUBLICATION)).in_graph(g("head")),
            t(NP, np::HAS_ASSERTION, np_term("assertion")).in_graph(g("head")),
            t(NP, np::HAS_PROVENANCE, np_term("provenance")).in_graph(g("head")),
            t(NP, np::HAS_PUBLICATION_INFO, np_term("pubinfo")).in_graph(g("head")),
            t("http://example.org/x", "http://example.org/says", Term::literal("hi")).in_graph(g("assertion")),
            t(&format!("{}#assertion", NP), "http://www.w3.org/ns/prov#wasDerivedFrom", Term::iri("http://example.org/src")).in_graph(g("provenance")),
            t(NP, "http://purl.org/dc/terms/created", Term::literal("2024")).in_graph(g("pubinfo")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_plain_nanopub_is_valid() {
        let report = validate(&make_dataset()).unwrap();
        assert_eq!(report.uri, NP);
        assert!(!report.trusty);
        assert!(!report.signed);
    }

    #[test]
    fn test_missing_type_statement() {
        let mut ds = make_dataset();
        ds.retain(|q| q.predicate != rdf::TYPE);
        assert_eq!(check_structure(&ds), Err(MalformedNanopubError::MissingTypeStatement));
    }

    #[test]
    fn test_missing_link_with_graph_present() {
        let mut ds = make_dataset();
        ds.retain(|q| q.predicate != np::HAS_PROVENANCE);
        assert_eq!(
            check_structure(&ds),
            Err(MalformedNanopubError::MissingLink(Part::Provenance))
        );
    }

    #[test]
    fn test_dangling_link() {
        let mut ds = make_dataset();
        ds.retain(|q| q.predicate != np::HAS_ASSERTION);
        ds.insert(t(NP, np::HAS_ASSERTION, Term::literal("assertion")).in_graph(g("head")));
        assert_eq!(
            check_structure(&ds),
            Err(MalformedNanopubError::DanglingLink(Part::Assertion))
        );
    }

    #[test]
    fn test_unexpected_head_statement() {
        let mut ds = make_dataset();
        ds.insert(t(NP, "http://example.org/extra", Term::literal("x")).in_graph(g("head")));
        assert!(matches!(
            check_structure(&ds),
            Err(MalformedNanopubError::UnexpectedHeadStatement(_))
        ));
    }

    #[test]
    fn test_default_graph_counts_as_part() {
        let mut ds = make_dataset();
        ds.insert(t(NP, "http://example.org/extra", Term::literal("x")).in_graph(GraphName::Default));
        assert_eq!(
            check_structure(&ds),
            Err(MalformedNanopubError::WrongPartCount { found: 5 })
        );
    }

    #[test]
    fn test_empty_provenance() {
        let mut ds = make_dataset();
        ds.retain(|q| q.graph != g("provenance"));
        assert_eq!(
            check_structure(&ds),
            Err(MalformedNanopubError::EmptyPart(Part::Provenance))
        );
    }

    #[test]
    fn test_duplicate_link() {
        let mut ds = make_dataset();
        ds.insert(t(NP, np::HAS_ASSERTION, Term::iri(format!("{}#other", NP))).in_graph(g("head")));
        assert_eq!(
            check_structure(&ds),
            Err(MalformedNanopubError::DuplicateLink(Part::Assertion))
        );
    }

    #[test]
    fn test_multiple_type_statements() {
        let mut ds = make_dataset();
        ds.insert(t("http://example.org/np2", rdf::TYPE, Term::iri(np::NANOPUBLICATION)).in_graph(g("head")));
        assert_eq!(
            check_structure(&ds),
            Err(MalformedNanopubError::MultipleTypeStatements(2))
        );
    }

    #[test]
    fn test_blank_nanopub_is_unnamed() {
        let mut ds = make_dataset();
        ds.retain(|q| q.predicate != rdf::TYPE);
        ds.insert(Quad::new(
            Term::blank("np"),
            rdf::TYPE,
            Term::iri(np::NANOPUBLICATION),
            g("head"),
        ));
        assert_eq!(check_structure(&ds), Err(MalformedNanopubError::UnnamedNanopub));
    }

    #[test]
    fn test_blank_head_graph_is_unnamed() {
        let mut ds = make_dataset();
        ds.retain(|q| q.predicate != rdf::TYPE);
        ds.insert(
            t(NP, rdf::TYPE, Term::iri(np::NANOPUBLICATION)).in_graph(GraphName::Blank("head".into())),
        );
        assert_eq!(check_structure(&ds), Err(MalformedNanopubError::UnnamedPart));
    }

    #[test]
    fn test_default_graph_in_place_of_a_part() {
        let mut ds = make_dataset();
        ds.retain(|q| q.predicate != np::HAS_PROVENANCE && q.graph != g("provenance"));
        ds.insert(t(NP, "http://example.org/extra", Term::literal("x")).in_graph(GraphName::Default));
        assert_eq!(check_structure(&ds), Err(MalformedNanopubError::UnnamedPart));
    }

    #[test]
    fn test_parts_sharing_a_graph() {
        let mut ds = make_dataset();
        ds.retain(|q| q.predicate != np::HAS_PUBLICATION_INFO);
        ds.insert(
            t(NP, np::HAS_PUBLICATION_INFO, Term::iri(format!("{}#provenance", NP))).in_graph(g("head")),
        );
        assert_eq!(check_structure(&ds), Err(MalformedNanopubError::DuplicatePartName));
    }

    #[test]
    fn test_partial_signature_is_rejected() {
        let mut ds = make_dataset();
        ds.insert(
            t(&format!("{}#sig", NP), npx::HAS_PUBLIC_KEY, Term::literal("AAAA")).in_graph(g("pubinfo")),
        );
        assert!(matches!(
            validate(&ds),
            Err(MalformedNanopubError::IncompleteSignature(_))
        ));
    }

    #[test]
    fn test_part_display() {
        assert_eq!(Part::PubInfo.to_string(), "publication info");
        assert_eq!(
            MalformedNanopubError::EmptyPart(Part::Assertion).to_string(),
            "assertion part is empty"
        );
    }
}
