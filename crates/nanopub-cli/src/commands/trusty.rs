//! Trusty command implementation.

use nanopub_io::{read_nanopub, write_file};
use std::path::PathBuf;

pub fn run(input: PathBuf, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let mut nanopub = read_nanopub(&input)?;
    let uri = nanopub.make_trusty()?;

    if let Some(path) = output {
        write_file(&nanopub, &path)?;
    }
    println!("{}", uri);
    Ok(())
}
