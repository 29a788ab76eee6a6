//! Sign command implementation.

use nanopub_core::{KeyPair, Profile};
use nanopub_io::{read_nanopub, write_file};
use std::path::{Path, PathBuf};
use tracing::info;

/// Where the signing keys and signer identity come from.
pub struct KeySource {
    pub private_key: Option<PathBuf>,
    pub public_key: Option<PathBuf>,
    pub orcid: Option<String>,
    pub profile: Option<PathBuf>,
}

impl KeySource {
    fn resolve(self) -> Result<(KeyPair, Option<String>), Box<dyn std::error::Error>> {
        if let Some(path) = self.profile {
            let mut profile = Profile::load(&path)?;
            if let Some(public_key) = self.public_key {
                profile = profile.with_public_key(public_key);
            }
            let keys = profile.key_pair()?;
            return Ok((keys, self.orcid.or(profile.orcid_id)));
        }
        let private_key = self
            .private_key
            .ok_or("either --profile or --private-key is required")?;
        let keys = KeyPair::load(&private_key, self.public_key.as_deref())?;
        Ok((keys, self.orcid))
    }
}

pub fn run(
    input: PathBuf,
    keys: KeySource,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (keys, signer) = keys.resolve()?;
    let mut nanopub = read_nanopub(&input)?;
    let uri = nanopub.sign_with_key_pair(&keys, signer.as_deref())?;

    let output = output.unwrap_or_else(|| default_output(&input));
    write_file(&nanopub, &output)?;
    info!(uri = %uri, output = %output.display(), "signed nanopublication");

    println!("{}", uri);
    Ok(())
}

/// `dir/np.trig` becomes `dir/signed.np.trig`.
fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "nanopub".to_string());
    input.with_file_name(format!("signed.{}.trig", stem))
}
