//! Check command implementation.

use crate::output::{format_failure_json, format_report, format_report_json};
use nanopub_core::validate;
use nanopub_io::read_file;
use std::path::PathBuf;

pub fn run(input: PathBuf, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = read_file(&input)?;

    match validate(&dataset) {
        Ok(report) => {
            if json_output {
                println!("{}", format_report_json(&report)?);
            } else {
                println!("{}", format_report(&report));
            }
            Ok(())
        }
        Err(e) if json_output => {
            println!("{}", format_failure_json(&e)?);
            std::process::exit(1);
        }
        Err(e) => Err(format!("invalid nanopublication: {}", e).into()),
    }
}
