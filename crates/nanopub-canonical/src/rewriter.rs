//! Substitutes the artifact code for the placeholder once it is known.

use crate::canonicalizer::PLACEHOLDER;
use crate::digest::ArtifactCode;
use crate::term::{GraphName, Quad, Term};

/// Rewrites pre-form IRIs into their final, identified form.
#[derive(Debug, Clone)]
pub struct Rewriter {
    placeholder: String,
    code: ArtifactCode,
}

impl Rewriter {
    /// Rewriter replacing [`PLACEHOLDER`] with `code`.
    pub fn new(code: ArtifactCode) -> Self {
        Self::with_placeholder(PLACEHOLDER, code)
    }

    /// Rewriter for a custom placeholder.
    pub fn with_placeholder(placeholder: impl Into<String>, code: ArtifactCode) -> Self {
        Self {
            placeholder: placeholder.into(),
            code,
        }
    }

    /// Rewrites one IRI.
    pub fn rewrite_iri(&self, iri: &str) -> String {
        iri.replace(&self.placeholder, self.code.as_str())
    }

    /// Rewrites every IRI of a statement. Literals are left untouched.
    pub fn rewrite_quad(&self, quad: &Quad) -> Quad {
        Quad {
            subject: self.rewrite_term(&quad.subject),
            predicate: self.rewrite_iri(&quad.predicate),
            object: self.rewrite_term(&quad.object),
            graph: match &quad.graph {
                GraphName::Iri(iri) => GraphName::Iri(self.rewrite_iri(iri)),
                other => other.clone(),
            },
        }
    }

    fn rewrite_term(&self, term: &Term) -> Term {
        match term {
            Term::Iri(iri) => Term::Iri(self.rewrite_iri(iri)),
            other => other.clone(),
        }
    }
}

/// Replaces `placeholder` with `code` in every IRI of every statement.
pub fn finalize(quads: &[Quad], placeholder: &str, code: &ArtifactCode) -> Vec<Quad> {
    let rewriter = Rewriter::with_placeholder(placeholder, code.clone());
    quads.iter().map(|q| rewriter.rewrite_quad(q)).collect()
}
