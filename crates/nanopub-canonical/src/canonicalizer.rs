use crate::digest::ArtifactCode;
use crate::identifiers::{expand_base, post_artifact_char, TrustyUri};
use crate::term::{GraphName, Literal, Quad, Term};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Sentinel standing in for the artifact code while hashing.
pub const PLACEHOLDER: &str = " ";
/// Namespace of locally minted, not yet published nanopublication IRIs.
pub const TEMP_NAMESPACE: &str = "http://purl.org/nanopub/temp/";
/// Base that temporary IRIs are rebased onto when identified.
pub const DEFAULT_BASE: &str = "http://purl.org/np/";

/// How the document's own IRIs are recognized.
#[derive(Debug, Clone)]
enum Scope {
    /// Not yet identified: IRIs under the declared root.
    Declared { root: String },
    /// Already identified: IRIs containing the artifact code.
    Assigned { code: ArtifactCode },
}

/// Builds the pre-form of a document and its canonical bytes.
///
/// The pre-form replaces the document's identifier with [`PLACEHOLDER`] and
/// skolemizes blank nodes, so hashing never depends on the identifier it
/// produces or on blank node spelling.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    scope: Scope,
    prefix: String,
    post: char,
}

impl Canonicalizer {
    /// Canonicalizer for a document declared under `uri` and not yet identified.
    ///
    /// IRIs under [`TEMP_NAMESPACE`] are rebased onto [`DEFAULT_BASE`].
    pub fn for_declared(uri: &str) -> Self {
        let root = uri.strip_suffix('#').unwrap_or(uri).to_string();
        let base = if root.starts_with(TEMP_NAMESPACE) {
            DEFAULT_BASE.to_string()
        } else {
            root.clone()
        };
        Self {
            prefix: expand_base(&base),
            post: post_artifact_char(&base),
            scope: Scope::Declared { root },
        }
    }

    /// Canonicalizer for a document that already carries a trusty URI.
    pub fn for_trusty(uri: &TrustyUri) -> Self {
        Self {
            prefix: uri.prefix().to_string(),
            post: post_artifact_char(uri.prefix()),
            scope: Scope::Assigned {
                code: uri.code().clone(),
            },
        }
    }

    /// Picks the scope from the IRI shape.
    pub fn for_uri(uri: &str) -> Self {
        match TrustyUri::parse(uri) {
            Ok(trusty) => Self::for_trusty(&trusty),
            Err(_) => Self::for_declared(uri),
        }
    }

    /// Expanded base the artifact code is appended to.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Pre-form IRI of the document itself.
    pub fn placeholder_uri(&self) -> String {
        format!("{}{}", self.prefix, PLACEHOLDER)
    }

    /// Pre-form IRI of a sub-resource (`assertion`, `sig`, ...).
    pub fn placeholder_sub_uri(&self, suffix: &str) -> String {
        format!("{}{}{}{}", self.prefix, PLACEHOLDER, self.post, suffix)
    }

    /// Trusty URI for a computed code.
    pub fn trusty_uri(&self, code: ArtifactCode) -> TrustyUri {
        TrustyUri::new(self.prefix.clone(), code)
    }

    /// Maps one IRI to its pre-form.
    pub fn normalize_iri(&self, iri: &str) -> String {
        match &self.scope {
            Scope::Assigned { code } => iri.replace(code.as_str(), PLACEHOLDER),
            Scope::Declared { root } => {
                let Some(rest) = iri.strip_prefix(root.as_str()) else {
                    return iri.to_string();
                };
                let suffix = rest.strip_prefix('#').unwrap_or(rest);
                if suffix.is_empty() {
                    return self.placeholder_uri();
                }
                let mut suffix = suffix.replace('#', "%23");
                if suffix.starts_with('_') {
                    suffix.insert(0, '_');
                }
                self.placeholder_sub_uri(&suffix)
            }
        }
    }

    /// Produces the pre-form of a document given as parts in hashing order
    /// (head, assertion, provenance, publication info, then anything else).
    ///
    /// Blank nodes are numbered by first appearance over the parts in order;
    /// within a part statements are visited sorted with blank nodes masked.
    pub fn preprocess(&self, parts: &[Vec<Quad>]) -> Vec<Quad> {
        let numbers = number_blank_nodes(parts);
        parts
            .iter()
            .flatten()
            .map(|quad| Quad {
                subject: self.normalize_term(&quad.subject, &numbers),
                predicate: self.normalize_iri(&quad.predicate),
                object: self.normalize_term(&quad.object, &numbers),
                graph: self.normalize_graph(&quad.graph, &numbers),
            })
            .collect()
    }

    /// Sorts, deduplicates and serializes pre-form statements.
    ///
    /// Each statement contributes four newline-terminated fields: graph,
    /// subject, predicate and object.
    pub fn canonical_bytes(quads: &[Quad]) -> Vec<u8> {
        let mut sorted: Vec<&Quad> = quads.iter().collect();
        sorted.sort_by(|a, b| compare_quads(a, b));
        sorted.dedup_by(|a, b| compare_quads(a, b) == Ordering::Equal);

        let mut out = String::new();
        for quad in sorted {
            write_graph(&mut out, &quad.graph);
            write_term(&mut out, &quad.subject);
            out.push_str(&quad.predicate);
            out.push('\n');
            write_term(&mut out, &quad.object);
        }
        out.into_bytes()
    }

    /// Pre-form, canonical bytes and artifact code in one step.
    pub fn artifact_code(&self, parts: &[Vec<Quad>]) -> ArtifactCode {
        let preform = self.preprocess(parts);
        ArtifactCode::compute(&Self::canonical_bytes(&preform))
    }

    fn skolem_iri(&self, n: usize) -> String {
        self.placeholder_sub_uri(&format!("_{}", n))
    }

    fn normalize_term(&self, term: &Term, numbers: &BTreeMap<String, usize>) -> Term {
        match term {
            Term::Iri(iri) => Term::Iri(self.normalize_iri(iri)),
            Term::Blank(label) => Term::Iri(self.skolem_iri(numbers[label])),
            Term::Literal(_) => term.clone(),
        }
    }

    fn normalize_graph(&self, graph: &GraphName, numbers: &BTreeMap<String, usize>) -> GraphName {
        match graph {
            GraphName::Default => GraphName::Default,
            GraphName::Iri(iri) => GraphName::Iri(self.normalize_iri(iri)),
            GraphName::Blank(label) => GraphName::Iri(self.skolem_iri(numbers[label])),
        }
    }
}

/// Assigns 1-based numbers to blank node labels in first-appearance order.
///
/// Statements that tie with blank nodes masked are ordered by the refined
/// rank of their blank nodes, so the spelling of a label only decides
/// between nodes that are indistinguishable anyway.
fn number_blank_nodes(parts: &[Vec<Quad>]) -> BTreeMap<String, usize> {
    let ranks = rank_blank_nodes(parts);
    let mut numbers = BTreeMap::new();
    for part in parts {
        let mut ordered: Vec<&Quad> = part.iter().collect();
        ordered.sort_by_cached_key(|q| {
            let labels = blank_labels(q);
            let label_ranks: Vec<usize> = labels.iter().map(|l| ranks[l]).collect();
            (
                mask_graph(&q.graph),
                mask_term(&q.subject),
                q.predicate.clone(),
                mask_term(&q.object),
                label_ranks,
                labels,
            )
        });
        for quad in ordered {
            for label in blank_labels(quad) {
                let next = numbers.len() + 1;
                numbers.entry(label).or_insert(next);
            }
        }
    }
    numbers
}

/// Ranks blank nodes by the statements they occur in, without using labels.
///
/// Every round describes a node by its previous rank and the sorted list of
/// its statements, where the node itself is written `*` and other blank
/// nodes by their previous rank. Rounds stop once no class splits further.
fn rank_blank_nodes(parts: &[Vec<Quad>]) -> BTreeMap<String, usize> {
    let mut occurrences: BTreeMap<String, Vec<&Quad>> = BTreeMap::new();
    for quad in parts.iter().flatten() {
        for label in blank_labels(quad) {
            let seen = occurrences.entry(label).or_default();
            if !seen.iter().any(|q| *q == quad) {
                seen.push(quad);
            }
        }
    }

    let mut ranks: BTreeMap<String, usize> = occurrences.keys().map(|l| (l.clone(), 0)).collect();
    let mut classes = 1;
    loop {
        let signatures: BTreeMap<&String, (usize, Vec<String>)> = occurrences
            .iter()
            .map(|(label, quads)| {
                let mut statements: Vec<String> =
                    quads.iter().map(|q| describe_quad(q, label, &ranks)).collect();
                statements.sort();
                (label, (ranks[label], statements))
            })
            .collect();
        let distinct: BTreeMap<&(usize, Vec<String>), usize> = signatures
            .values()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(rank, signature)| (signature, rank))
            .collect();
        let refined: BTreeMap<String, usize> = signatures
            .iter()
            .map(|(label, signature)| ((*label).clone(), distinct[signature]))
            .collect();
        ranks = refined;
        if distinct.len() <= classes {
            return ranks;
        }
        classes = distinct.len();
    }
}

fn describe_quad(quad: &Quad, own: &str, ranks: &BTreeMap<String, usize>) -> String {
    let blank = |label: &str| {
        if label == own {
            "*".to_string()
        } else {
            format!("_{}", ranks[label])
        }
    };
    let graph = match &quad.graph {
        GraphName::Blank(label) => blank(label.as_str()),
        other => mask_graph(other),
    };
    let term = |term: &Term| match term {
        Term::Blank(label) => blank(label.as_str()),
        other => mask_term(other),
    };
    format!(
        "{} {} <{}> {}",
        graph,
        term(&quad.subject),
        quad.predicate,
        term(&quad.object)
    )
}

fn blank_labels(quad: &Quad) -> Vec<String> {
    let mut labels = Vec::new();
    if let GraphName::Blank(label) = &quad.graph {
        labels.push(label.clone());
    }
    if let Term::Blank(label) = &quad.subject {
        labels.push(label.clone());
    }
    if let Term::Blank(label) = &quad.object {
        labels.push(label.clone());
    }
    labels
}

fn mask_term(term: &Term) -> String {
    match term {
        Term::Iri(iri) => format!("<{}>", iri),
        Term::Blank(_) => "_".to_string(),
        Term::Literal(l) => format!(
            "\"{}\"^^{}@{}",
            l.value,
            l.datatype,
            l.language.as_deref().unwrap_or("")
        ),
    }
}

fn mask_graph(graph: &GraphName) -> String {
    match graph {
        GraphName::Default => String::new(),
        GraphName::Iri(iri) => format!("<{}>", iri),
        GraphName::Blank(_) => "_".to_string(),
    }
}

/// String order over UTF-16 code units, matching the reference hasher.
fn compare_str(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

fn compare_quads(a: &Quad, b: &Quad) -> Ordering {
    compare_graphs(&a.graph, &b.graph)
        .then_with(|| compare_terms(&a.subject, &b.subject))
        .then_with(|| compare_str(&a.predicate, &b.predicate))
        .then_with(|| compare_terms(&a.object, &b.object))
}

fn compare_graphs(a: &GraphName, b: &GraphName) -> Ordering {
    match (graph_label(a), graph_label(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => compare_str(&x, &y),
    }
}

// Blank nodes never survive preprocessing; they sort with IRIs under their label.
fn compare_terms(a: &Term, b: &Term) -> Ordering {
    match (a, b) {
        (Term::Literal(x), Term::Literal(y)) => compare_literals(x, y),
        (Term::Literal(_), _) => Ordering::Greater,
        (_, Term::Literal(_)) => Ordering::Less,
        _ => compare_str(&resource_label(a), &resource_label(b)),
    }
}

fn compare_literals(a: &Literal, b: &Literal) -> Ordering {
    compare_str(&a.value, &b.value)
        .then_with(|| compare_str(&a.datatype, &b.datatype))
        .then_with(|| match (&a.language, &b.language) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => compare_str(x, y),
        })
}

fn resource_label(term: &Term) -> String {
    match term {
        Term::Iri(iri) => iri.clone(),
        Term::Blank(label) => format!("_:{}", label),
        Term::Literal(l) => l.value.clone(),
    }
}

fn graph_label(graph: &GraphName) -> Option<String> {
    match graph {
        GraphName::Default => None,
        GraphName::Iri(iri) => Some(iri.clone()),
        GraphName::Blank(label) => Some(format!("_:{}", label)),
    }
}

fn write_graph(out: &mut String, graph: &GraphName) {
    if let Some(label) = graph_label(graph) {
        out.push_str(&label);
    }
    out.push('\n');
}

fn write_term(out: &mut String, term: &Term) {
    match term {
        Term::Literal(l) => {
            match &l.language {
                Some(lang) => {
                    out.push('@');
                    out.push_str(&lang.to_lowercase());
                }
                None => {
                    out.push('^');
                    out.push_str(&l.datatype);
                }
            }
            out.push(' ');
            out.push_str(&escape(&l.value));
        }
        _ => out.push_str(&resource_label(term)),
    }
    out.push('\n');
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\n', "\\n")
}
