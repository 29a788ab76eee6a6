//! TriG writer.

use crate::convert::to_oxrdf;
use crate::errors::IoError;
use nanopub_canonical::{sub_iri, Dataset};
use nanopub_core::namespaces::PREFIXES;
use nanopub_core::Nanopub;
use oxttl::TriGSerializer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Writes a dataset as TriG, one graph block per graph.
///
/// Returns the writer once the document is complete.
pub fn write_trig<W: Write>(
    dataset: &Dataset,
    writer: W,
    prefixes: &[(&str, &str)],
) -> Result<W, IoError> {
    let mut serializer = TriGSerializer::new();
    for (name, iri) in prefixes {
        serializer = serializer
            .with_prefix(*name, *iri)
            .map_err(|e| IoError::Serialize(format!("prefix {}: {}", name, e)))?;
    }
    let mut serializer = serializer.for_writer(writer);
    for graph in dataset.graph_names() {
        for quad in dataset.quads_in(graph) {
            let quad = to_oxrdf(quad).map_err(IoError::Serialize)?;
            serializer.serialize_quad(&quad)?;
        }
    }
    Ok(serializer.finish()?)
}

/// Writes a nanopublication as TriG with `this:` and `sub:` prefixes for its own IRIs.
pub fn write_nanopub<W: Write>(nanopub: &Nanopub, writer: W) -> Result<W, IoError> {
    let this = nanopub.uri().to_string();
    let sub = match nanopub.trusty_uri() {
        Some(uri) => uri.sub_uri(""),
        None => sub_iri(&this, ""),
    };
    let mut prefixes = vec![("this", this.as_str()), ("sub", sub.as_str())];
    prefixes.extend_from_slice(PREFIXES);
    write_trig(&nanopub.to_dataset(), writer, &prefixes)
}

/// Renders a nanopublication as a TriG string.
pub fn to_trig_string(nanopub: &Nanopub) -> Result<String, IoError> {
    let bytes = write_nanopub(nanopub, Vec::new())?;
    String::from_utf8(bytes).map_err(|e| IoError::Serialize(e.to_string()))
}

/// Writes a nanopublication to a TriG file.
pub fn write_file(nanopub: &Nanopub, path: impl AsRef<Path>) -> Result<(), IoError> {
    let path = path.as_ref();
    let mut writer = write_nanopub(nanopub, BufWriter::new(File::create(path)?))?;
    writer.flush()?;
    debug!(path = %path.display(), uri = nanopub.uri(), "wrote nanopublication");
    Ok(())
}
