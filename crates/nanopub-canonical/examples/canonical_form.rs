use nanopub_canonical::{Canonicalizer, GraphName, Quad, Term};

fn main() {
    let declared = "http://purl.org/nanopub/temp/mynanopub";
    let graph = |suffix: &str| GraphName::iri(format!("{}#{}", declared, suffix));
    let parts = vec![
        vec![Quad::new(
            Term::iri(declared),
            "http://www.nanopub.org/nschema#hasAssertion",
            Term::iri(format!("{}#assertion", declared)),
            graph("Head"),
        )],
        vec![Quad::new(
            Term::blank("claim"),
            "http://purl.org/petapico/o/hycl#claims",
            Term::literal("Canonical forms are deterministic"),
            graph("assertion"),
        )],
    ];

    let canonicalizer = Canonicalizer::for_declared(declared);
    let preform = canonicalizer.preprocess(&parts);
    print!("{}", String::from_utf8_lossy(&Canonicalizer::canonical_bytes(&preform)));
    println!("{}", canonicalizer.trusty_uri(canonicalizer.artifact_code(&parts)));
}
