//! Vocabulary IRIs used by nanopublications.

/// RDF syntax namespace.
pub mod rdf {
    /// Namespace IRI.
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// `rdf:type`.
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

/// XML Schema datatypes.
pub mod xsd {
    /// Namespace IRI.
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";
    /// `xsd:dateTime`.
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
}

/// Nanopublication schema.
pub mod np {
    /// Namespace IRI.
    pub const NS: &str = "http://www.nanopub.org/nschema#";
    /// `np:Nanopublication`.
    pub const NANOPUBLICATION: &str = "http://www.nanopub.org/nschema#Nanopublication";
    /// `np:hasAssertion`.
    pub const HAS_ASSERTION: &str = "http://www.nanopub.org/nschema#hasAssertion";
    /// `np:hasProvenance`.
    pub const HAS_PROVENANCE: &str = "http://www.nanopub.org/nschema#hasProvenance";
    /// `np:hasPublicationInfo`.
    pub const HAS_PUBLICATION_INFO: &str = "http://www.nanopub.org/nschema#hasPublicationInfo";
}

/// Nanopublication extension vocabulary (signatures, introductions).
pub mod npx {
    /// Namespace IRI.
    pub const NS: &str = "http://purl.org/nanopub/x/";
    /// `npx:hasAlgorithm`.
    pub const HAS_ALGORITHM: &str = "http://purl.org/nanopub/x/hasAlgorithm";
    /// `npx:hasPublicKey`.
    pub const HAS_PUBLIC_KEY: &str = "http://purl.org/nanopub/x/hasPublicKey";
    /// `npx:hasSignature`.
    pub const HAS_SIGNATURE: &str = "http://purl.org/nanopub/x/hasSignature";
    /// `npx:hasSignatureTarget`.
    pub const HAS_SIGNATURE_TARGET: &str = "http://purl.org/nanopub/x/hasSignatureTarget";
    /// `npx:signedBy`.
    pub const SIGNED_BY: &str = "http://purl.org/nanopub/x/signedBy";
    /// `npx:introduces`.
    pub const INTRODUCES: &str = "http://purl.org/nanopub/x/introduces";
}

/// W3C provenance ontology.
pub mod prov {
    /// Namespace IRI.
    pub const NS: &str = "http://www.w3.org/ns/prov#";
    /// `prov:generatedAtTime`.
    pub const GENERATED_AT_TIME: &str = "http://www.w3.org/ns/prov#generatedAtTime";
    /// `prov:wasAttributedTo`.
    pub const WAS_ATTRIBUTED_TO: &str = "http://www.w3.org/ns/prov#wasAttributedTo";
    /// `prov:wasDerivedFrom`.
    pub const WAS_DERIVED_FROM: &str = "http://www.w3.org/ns/prov#wasDerivedFrom";
}

/// Dublin Core terms.
pub mod dct {
    /// Namespace IRI.
    pub const NS: &str = "http://purl.org/dc/terms/";
    /// `dct:created`.
    pub const CREATED: &str = "http://purl.org/dc/terms/created";
}

/// Hypothesis and claim vocabulary.
pub mod hycl {
    /// Namespace IRI.
    pub const NS: &str = "http://purl.org/petapico/o/hycl#";
    /// `hycl:claims`.
    pub const CLAIMS: &str = "http://purl.org/petapico/o/hycl#claims";
}

/// Signature algorithm tag written into `npx:hasAlgorithm`.
pub const RSA_ALGORITHM: &str = "RSA";

/// Prefixes used when writing nanopublications.
pub const PREFIXES: &[(&str, &str)] = &[
    ("rdf", rdf::NS),
    ("xsd", xsd::NS),
    ("np", np::NS),
    ("npx", npx::NS),
    ("prov", prov::NS),
    ("dct", dct::NS),
    ("hycl", hycl::NS),
];
