//! Profile command implementation.

use crate::output::{format_profile, format_profile_json};
use nanopub_core::Profile;
use std::path::PathBuf;

pub fn run(path: PathBuf, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let profile = Profile::load(&path)?;
    let public_key = profile.key_pair()?.public_key_base64()?;

    if json_output {
        println!("{}", format_profile_json(&profile, &public_key)?);
    } else {
        println!("User profile in {}", path.display());
        println!("{}", format_profile(&profile, &public_key));
    }
    Ok(())
}
