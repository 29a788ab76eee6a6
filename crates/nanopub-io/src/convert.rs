//! Mapping between `oxrdf` terms and nanopub terms.

use nanopub_canonical::{GraphName, Literal, Quad, Term};
use oxrdf::{BlankNode, NamedNode};

/// Converts a parsed quad. RDF-star quoted triples are rejected.
pub(crate) fn from_oxrdf(quad: oxrdf::Quad) -> Result<Quad, String> {
    let subject = match quad.subject {
        oxrdf::Subject::NamedNode(node) => Term::Iri(node.into_string()),
        oxrdf::Subject::BlankNode(node) => Term::Blank(node.into_string()),
        #[allow(unreachable_patterns)]
        _ => return Err("quoted triples are not supported".into()),
    };
    let object = match quad.object {
        oxrdf::Term::NamedNode(node) => Term::Iri(node.into_string()),
        oxrdf::Term::BlankNode(node) => Term::Blank(node.into_string()),
        oxrdf::Term::Literal(literal) => Term::Literal(match literal.language() {
            Some(language) => Literal::lang(literal.value(), language),
            None => Literal::typed(literal.value(), literal.datatype().as_str()),
        }),
        #[allow(unreachable_patterns)]
        _ => return Err("quoted triples are not supported".into()),
    };
    let graph = match quad.graph_name {
        oxrdf::GraphName::NamedNode(node) => GraphName::Iri(node.into_string()),
        oxrdf::GraphName::BlankNode(node) => GraphName::Blank(node.into_string()),
        oxrdf::GraphName::DefaultGraph => GraphName::Default,
    };
    Ok(Quad::new(subject, quad.predicate.into_string(), object, graph))
}

/// Converts a quad for serialization, checking IRIs and blank node labels.
pub(crate) fn to_oxrdf(quad: &Quad) -> Result<oxrdf::Quad, String> {
    let subject: oxrdf::Subject = match &quad.subject {
        Term::Iri(iri) => named(iri)?.into(),
        Term::Blank(label) => blank(label)?.into(),
        Term::Literal(_) => return Err(format!("literal in subject position: {}", quad)),
    };
    let object: oxrdf::Term = match &quad.object {
        Term::Iri(iri) => named(iri)?.into(),
        Term::Blank(label) => blank(label)?.into(),
        Term::Literal(literal) => match &literal.language {
            Some(language) => oxrdf::Literal::new_language_tagged_literal_unchecked(
                literal.value.as_str(),
                language.as_str(),
            ),
            None => oxrdf::Literal::new_typed_literal(literal.value.as_str(), named(&literal.datatype)?),
        }
        .into(),
    };
    let graph = match &quad.graph {
        GraphName::Default => oxrdf::GraphName::DefaultGraph,
        GraphName::Iri(iri) => named(iri)?.into(),
        GraphName::Blank(label) => blank(label)?.into(),
    };
    Ok(oxrdf::Quad::new(subject, named(&quad.predicate)?, object, graph))
}

fn named(iri: &str) -> Result<NamedNode, String> {
    NamedNode::new(iri).map_err(|e| format!("invalid IRI <{}>: {}", iri, e))
}

fn blank(label: &str) -> Result<BlankNode, String> {
    BlankNode::new(label).map_err(|e| format!("invalid blank node _:{}: {}", label, e))
}
