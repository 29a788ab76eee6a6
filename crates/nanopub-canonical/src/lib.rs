//! Canonical form primitives for trusty nanopublications.
//!
//! A nanopublication is identified by an artifact code derived from its own
//! content. Because the identifier also appears inside the content, hashing
//! happens over a pre-form in which every occurrence of the identifier is
//! replaced by a placeholder:
//!
//! 1. [`Canonicalizer::preprocess`] maps the document's own IRIs and blank
//!    nodes onto the placeholder namespace.
//! 2. [`Canonicalizer::canonical_bytes`] sorts and serializes the pre-form.
//! 3. [`ArtifactCode::compute`] hashes the bytes into an `RA` code.
//! 4. [`rewriter::finalize`] substitutes the code for the placeholder.
//!
//! Every byte that participates in hashing is produced by this crate.
//!
#![deny(missing_docs)]

/// Pre-form construction and canonical byte serialization.
pub mod canonicalizer;
/// Artifact code computation.
pub mod digest;
/// Trusty URI parsing and sub-resource derivation.
pub mod identifiers;
/// Placeholder substitution once the artifact code is known.
pub mod rewriter;
/// RDF terms, statements, graphs and datasets.
pub mod term;
/// Validation helpers used by identifier types.
pub mod validation;

pub use canonicalizer::{Canonicalizer, DEFAULT_BASE, PLACEHOLDER, TEMP_NAMESPACE};
pub use digest::{ArtifactCode, TrustyModule};
pub use identifiers::{expand_base, post_artifact_char, sub_iri, TrustyUri};
pub use rewriter::{finalize, Rewriter};
pub use term::{Dataset, Graph, GraphName, Literal, Quad, Term, Triple};
pub use validation::ValidationError;
