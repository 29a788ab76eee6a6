//! Canonicalize command implementation.

use nanopub_io::read_nanopub;
use std::io::{self, Write};
use std::path::PathBuf;

pub fn run(input: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let nanopub = read_nanopub(&input)
        .map_err(|e| format!("Failed to read {}: {}", input.display(), e))?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&nanopub.canonical_bytes())?;
    stdout.flush()?;
    Ok(())
}
