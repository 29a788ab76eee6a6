//! Nanopub CLI - sign, identify and check nanopublications.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{canonicalize, check, profile, sign, trusty};

#[derive(Parser)]
#[command(name = "nanopub")]
#[command(about = "Sign, identify and check nanopublications")]
struct Cli {
    /// Log progress (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a nanopublication and assign its trusty URI
    Sign {
        /// TriG or N-Quads file
        input: PathBuf,
        /// Private key file (PEM or base64 DER)
        #[arg(long, short = 'k')]
        private_key: Option<PathBuf>,
        /// Public key file; overrides the profile's and is derived from the private key when omitted
        #[arg(long)]
        public_key: Option<PathBuf>,
        /// ORCID iD recorded as signer
        #[arg(long)]
        orcid: Option<String>,
        /// Profile JSON with key locations and ORCID iD
        #[arg(long, conflicts_with = "private_key")]
        profile: Option<PathBuf>,
        /// Output file (default: signed.<input>.trig next to the input)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Validate structure, trusty URI and signature
    Check {
        /// TriG or N-Quads file
        input: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Assign a trusty URI without signing
    Trusty {
        /// TriG or N-Quads file
        input: PathBuf,
        /// Write the identified nanopublication as TriG
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Show a signer profile and its public key
    Profile {
        /// Profile JSON with key locations and ORCID iD
        #[arg(long)]
        profile: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the canonical bytes hashed for the identifier
    Canonicalize {
        /// TriG or N-Quads file
        input: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Sign {
            input,
            private_key,
            public_key,
            orcid,
            profile,
            output,
        } => sign::run(
            input,
            sign::KeySource {
                private_key,
                public_key,
                orcid,
                profile,
            },
            output,
        ),
        Commands::Check { input, json } => check::run(input, json),
        Commands::Trusty { input, output } => trusty::run(input, output),
        Commands::Profile { profile: path, json } => profile::run(path, json),
        Commands::Canonicalize { input } => canonicalize::run(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
