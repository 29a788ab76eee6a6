//! Document readers.

use crate::convert::from_oxrdf;
use crate::errors::IoError;
use crate::format::RdfFormat;
use nanopub_canonical::Dataset;
use nanopub_core::Nanopub;
use oxttl::{NQuadsParser, TriGParser};
use std::fmt::Display;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Parses a document held in memory.
pub fn parse_str(text: &str, format: RdfFormat) -> Result<Dataset, IoError> {
    read_dataset(text.as_bytes(), format)
}

/// Parses a document from a reader.
///
/// # Errors
///
/// Returns [`IoError::Parse`] on the first syntax error.
pub fn read_dataset<R: Read>(reader: R, format: RdfFormat) -> Result<Dataset, IoError> {
    match format {
        RdfFormat::TriG => collect(TriGParser::new().for_reader(reader), format),
        RdfFormat::NQuads => collect(NQuadsParser::new().for_reader(reader), format),
    }
}

/// Reads a document, choosing the format from the file extension.
pub fn read_file(path: impl AsRef<Path>) -> Result<Dataset, IoError> {
    let path = path.as_ref();
    let format = RdfFormat::from_path(path)?;
    let dataset = read_dataset(BufReader::new(File::open(path)?), format)?;
    debug!(path = %path.display(), %format, quads = dataset.len(), "read document");
    Ok(dataset)
}

/// Reads a document and checks that it is shaped like a nanopublication.
pub fn read_nanopub(path: impl AsRef<Path>) -> Result<Nanopub, IoError> {
    let dataset = read_file(path)?;
    Ok(Nanopub::from_dataset(&dataset)?)
}

fn collect<E: Display>(
    quads: impl Iterator<Item = Result<oxrdf::Quad, E>>,
    format: RdfFormat,
) -> Result<Dataset, IoError> {
    let parse_error = |reason: String| IoError::Parse { format, reason };
    let mut dataset = Dataset::new();
    for quad in quads {
        let quad = quad.map_err(|e| parse_error(e.to_string()))?;
        dataset.insert(from_oxrdf(quad).map_err(parse_error)?);
    }
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanopub_canonical::{GraphName, Literal, Quad, Term};

    #[test]
    fn test_parse_nquads_terms() {
        let text = concat!(
            "<http://example.org/s> <http://example.org/p> \"hi\"@EN <http://example.org/g> .\n",
            "_:b0 <http://example.org/p> \"1\"^^<http://www.w3.org/2001/XMLSchema#integer> .\n",
        );
        let dataset = parse_str(text, RdfFormat::NQuads).unwrap();
        assert_eq!(dataset.len(), 2);
        assert!(dataset.iter().any(|q| q.graph == GraphName::Default && q.subject.is_blank()));
        let tagged = dataset
            .iter()
            .find(|q| q.graph == GraphName::iri("http://example.org/g"))
            .unwrap();
        let literal = tagged.object.as_literal().unwrap();
        assert_eq!(literal.value, "hi");
        assert_eq!(literal.language.as_deref().map(str::to_ascii_lowercase), Some("en".to_string()));
    }

    #[test]
    fn test_parse_trig_with_prefixes() {
        let text = r#"
            @prefix ex: <http://example.org/> .
            ex:g { ex:s ex:p "v" . }
        "#;
        let dataset = parse_str(text, RdfFormat::TriG).unwrap();
        let expected = Quad::new(
            Term::iri("http://example.org/s"),
            "http://example.org/p",
            Term::Literal(Literal::simple("v")),
            GraphName::iri("http://example.org/g"),
        );
        assert_eq!(dataset.iter().collect::<Vec<_>>(), vec![&expected]);
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let err = parse_str("ex:g { broken", RdfFormat::TriG).unwrap_err();
        assert!(matches!(err, IoError::Parse { format: RdfFormat::TriG, .. }));
    }
}
