//! Nanopublication model, signing and validation.
//!
//! This crate provides:
//! - The [`Nanopub`] aggregate of head, assertion, provenance and publication info graphs
//! - A builder that injects attribution and timestamps as configured
//! - Trusty URI assignment over the canonical form from `nanopub-canonical`
//! - RSA signatures embedded in the publication info
//! - Structural and integrity validation with typed rejection reasons
//!
//! Core invariants:
//! - A trusty URI's artifact code covers every statement, including the signature
//! - The signature covers the pre-form with everything but `npx:hasSignature`
//! - Validation is deterministic and offline
//!
#![deny(missing_docs)]

/// Options controlling injected statements.
pub mod config;
/// Error types for nanopublication operations.
pub mod errors;
/// Vocabulary IRIs.
pub mod namespaces;
/// The nanopublication aggregate and its builder.
pub mod nanopub;
/// Signer profiles.
pub mod profile;
/// RSA key material and signatures.
pub mod signing;
/// Structural and integrity validation.
pub mod verification;

pub use config::NanopubConfig;
pub use errors::NanopubError;
pub use nanopub::{Nanopub, NanopubBuilder, DEFAULT_URI};
pub use profile::{Profile, ProfileError};
pub use signing::{verify_signature, KeyError, KeyPair, SignatureCheck};
pub use verification::{
    check_structure, validate, MalformedNanopubError, NanopubStructure, Part, ValidationReport,
};
