//! RDF data model used throughout the workspace.
//!
//! The derived `Ord` implementations only give collections a stable
//! iteration order. Canonical statement ordering lives in
//! [`Canonicalizer`](crate::Canonicalizer).

use std::collections::BTreeSet;
use std::fmt;

/// `xsd:string`, the datatype of plain literals.
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
/// `rdf:langString`, the datatype of language-tagged literals.
pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

/// Literal value with datatype and optional language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    /// Lexical form.
    pub value: String,
    /// Datatype IRI.
    pub datatype: String,
    /// Language tag, if any.
    pub language: Option<String>,
}

impl Literal {
    /// Plain `xsd:string` literal.
    pub fn simple(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: XSD_STRING.to_string(),
            language: None,
        }
    }

    /// Literal with an explicit datatype.
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: datatype.into(),
            language: None,
        }
    }

    /// Language-tagged literal.
    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: RDF_LANG_STRING.to_string(),
            language: Some(language.into()),
        }
    }
}

/// Subject or object position value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// Absolute IRI.
    Iri(String),
    /// Document-local blank node label.
    Blank(String),
    /// Literal value.
    Literal(Literal),
}

impl Term {
    /// IRI term.
    pub fn iri(value: impl Into<String>) -> Self {
        Term::Iri(value.into())
    }

    /// Blank node term.
    pub fn blank(label: impl Into<String>) -> Self {
        Term::Blank(label.into())
    }

    /// Plain `xsd:string` literal term.
    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal(Literal::simple(value))
    }

    /// Typed literal term.
    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal(Literal::typed(value, datatype))
    }

    /// Returns the IRI if this term is one.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Returns the literal if this term is one.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// Returns `true` for blank nodes.
    pub fn is_blank(&self) -> bool {
        matches!(self, Term::Blank(_))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::Blank(label) => write!(f, "_:{}", label),
            Term::Literal(Literal {
                value,
                language: Some(lang),
                ..
            }) => write!(f, "{:?}@{}", value, lang),
            Term::Literal(Literal {
                value, datatype, ..
            }) => write!(f, "{:?}^^<{}>", value, datatype),
        }
    }
}

/// Name of the graph a quad belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GraphName {
    /// The unnamed default graph.
    Default,
    /// Graph named by an IRI.
    Iri(String),
    /// Graph named by a blank node.
    Blank(String),
}

impl GraphName {
    /// Graph named by an IRI.
    pub fn iri(value: impl Into<String>) -> Self {
        GraphName::Iri(value.into())
    }

    /// Returns the IRI if the graph is IRI-named.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            GraphName::Iri(iri) => Some(iri),
            _ => None,
        }
    }
}

impl fmt::Display for GraphName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphName::Default => write!(f, "DEFAULT"),
            GraphName::Iri(iri) => write!(f, "<{}>", iri),
            GraphName::Blank(label) => write!(f, "_:{}", label),
        }
    }
}

/// Subject, predicate and object without a graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple {
    /// Subject (IRI or blank node).
    pub subject: Term,
    /// Predicate IRI.
    pub predicate: String,
    /// Object.
    pub object: Term,
}

impl Triple {
    /// Creates a triple.
    pub fn new(subject: Term, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }

    /// Places the triple into a graph.
    pub fn in_graph(self, graph: GraphName) -> Quad {
        Quad {
            subject: self.subject,
            predicate: self.predicate,
            object: self.object,
            graph,
        }
    }
}

/// Statement together with its owning graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quad {
    /// Subject (IRI or blank node).
    pub subject: Term,
    /// Predicate IRI.
    pub predicate: String,
    /// Object.
    pub object: Term,
    /// Owning graph.
    pub graph: GraphName,
}

impl Quad {
    /// Creates a quad.
    pub fn new(subject: Term, predicate: impl Into<String>, object: Term, graph: GraphName) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
            graph,
        }
    }

    /// Drops the graph component.
    pub fn triple(&self) -> Triple {
        Triple {
            subject: self.subject.clone(),
            predicate: self.predicate.clone(),
            object: self.object.clone(),
        }
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{}> {} {}",
            self.subject, self.predicate, self.object, self.graph
        )
    }
}

/// Named set of triples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    name: String,
    triples: BTreeSet<Triple>,
}

impl Graph {
    /// Creates an empty graph with the given IRI.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            triples: BTreeSet::new(),
        }
    }

    /// Graph IRI.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a triple; returns `false` if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    /// Removes a triple; returns `true` if it was present.
    pub fn remove(&mut self, triple: &Triple) -> bool {
        self.triples.remove(triple)
    }

    /// Returns `true` if the triple is present.
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Iterates over triples.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Number of triples.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns `true` if the graph holds no triples.
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Triples as quads in this graph.
    pub fn quads(&self) -> Vec<Quad> {
        let name = GraphName::Iri(self.name.clone());
        self.triples
            .iter()
            .cloned()
            .map(|t| t.in_graph(name.clone()))
            .collect()
    }
}

impl Extend<Triple> for Graph {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        self.triples.extend(iter);
    }
}

/// Arbitrary set of quads, possibly malformed as a nanopublication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    quads: BTreeSet<Quad>,
}

impl Dataset {
    /// Empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a quad; returns `false` if it was already present.
    pub fn insert(&mut self, quad: Quad) -> bool {
        self.quads.insert(quad)
    }

    /// Removes a quad; returns `true` if it was present.
    pub fn remove(&mut self, quad: &Quad) -> bool {
        self.quads.remove(quad)
    }

    /// Keeps only quads matching the predicate.
    pub fn retain(&mut self, f: impl FnMut(&Quad) -> bool) {
        self.quads.retain(f);
    }

    /// Iterates over quads.
    pub fn iter(&self) -> impl Iterator<Item = &Quad> {
        self.quads.iter()
    }

    /// Number of quads.
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    /// Returns `true` if the dataset holds no quads.
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Distinct graph names that hold at least one quad.
    pub fn graph_names(&self) -> BTreeSet<&GraphName> {
        self.quads.iter().map(|q| &q.graph).collect()
    }

    /// Quads belonging to one graph.
    pub fn quads_in<'a>(&'a self, graph: &'a GraphName) -> impl Iterator<Item = &'a Quad> + 'a {
        self.quads.iter().filter(move |q| &q.graph == graph)
    }
}

impl FromIterator<Quad> for Dataset {
    fn from_iter<T: IntoIterator<Item = Quad>>(iter: T) -> Self {
        Self {
            quads: iter.into_iter().collect(),
        }
    }
}

impl Extend<Quad> for Dataset {
    fn extend<T: IntoIterator<Item = Quad>>(&mut self, iter: T) {
        self.quads.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Quad;
    type IntoIter = std::collections::btree_set::Iter<'a, Quad>;

    fn into_iter(self) -> Self::IntoIter {
        self.quads.iter()
    }
}

impl IntoIterator for Dataset {
    type Item = Quad;
    type IntoIter = std::collections::btree_set::IntoIter<Quad>;

    fn into_iter(self) -> Self::IntoIter {
        self.quads.into_iter()
    }
}
