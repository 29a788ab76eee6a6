//! Integration tests for CLI commands.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const ORCID: &str = "https://orcid.org/0000-0000-0000-0000";
const SIGNED_URI: &str = "http://purl.org/np/RA-7jlV7HiXjG8zGf0ePqF6svhlXtrCnQ36BUoCS6HtgI";
const UNSIGNED_URI: &str = "http://purl.org/np/RACrKAZbkrPwRa33VmWjz7bBFjayHYZUVpRnItKCa-WiA";

const NANOPUB_TRIG: &str = r#"
@prefix : <http://purl.org/nanopub/temp/mynanopub#> .
@prefix np: <http://www.nanopub.org/nschema#> .
@prefix prov: <http://www.w3.org/ns/prov#> .
@prefix hycl: <http://purl.org/petapico/o/hycl#> .

:Head {
    <http://purl.org/nanopub/temp/mynanopub> a np:Nanopublication ;
        np:hasAssertion :assertion ;
        np:hasProvenance :provenance ;
        np:hasPublicationInfo :pubinfo .
}
:assertion { <http://test> hycl:claims "This is a test of nanopub-python" . }
:provenance { :assertion prov:wasAttributedTo <https://orcid.org/0000-0000-0000-0000> . }
:pubinfo { <http://purl.org/nanopub/temp/mynanopub> prov:wasAttributedTo <https://orcid.org/0000-0000-0000-0000> . }
"#;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../nanopub-core/tests/fixtures"
    ))
    .join(name)
}

fn create_test_nanopub() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("np.trig");
    fs::write(&path, NANOPUB_TRIG).unwrap();
    (temp_dir, path)
}

fn run_cli(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_nanopub"))
        .args(args)
        .output()
        .expect("Failed to execute CLI");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    (output.status.success(), stdout, stderr)
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn sign(input: &Path) -> PathBuf {
    let key = fixture("id_rsa");
    let (success, stdout, stderr) = run_cli(&[
        "sign",
        path_str(input),
        "--private-key",
        path_str(&key),
        "--orcid",
        ORCID,
    ]);
    assert!(success, "sign failed: {}", stderr);
    assert_eq!(stdout.trim(), SIGNED_URI);
    input.with_file_name("signed.np.trig")
}

#[test]
fn test_sign_command_writes_signed_file() {
    let (_temp_dir, input) = create_test_nanopub();
    let signed = sign(&input);
    let text = fs::read_to_string(&signed).unwrap();
    assert!(text.contains("RA-7jlV7HiXjG8zGf0ePqF6svhlXtrCnQ36BUoCS6HtgI"));
}

#[test]
fn test_sign_with_profile() {
    let (temp_dir, input) = create_test_nanopub();
    let profile = write_profile(temp_dir.path());
    let output = temp_dir.path().join("out.trig");

    let (success, stdout, stderr) = run_cli(&[
        "sign",
        path_str(&input),
        "--profile",
        path_str(&profile),
        "--output",
        path_str(&output),
    ]);
    assert!(success, "sign failed: {}", stderr);
    assert_eq!(stdout.trim(), SIGNED_URI);
    assert!(output.exists());
}

fn write_profile(dir: &Path) -> PathBuf {
    let profile = dir.join("profile.json");
    fs::write(
        &profile,
        format!(
            r#"{{"name": "Test", "orcid_id": "{}", "private_key": "{}"}}"#,
            ORCID,
            path_str(&fixture("id_rsa"))
        ),
    )
    .unwrap();
    profile
}

#[test]
fn test_profile_command() {
    let temp_dir = TempDir::new().unwrap();
    let profile = write_profile(temp_dir.path());
    let public_key = fs::read_to_string(fixture("id_rsa.pub")).unwrap();

    let (success, stdout, stderr) = run_cli(&["profile", "--profile", path_str(&profile)]);
    assert!(success, "profile failed: {}", stderr);
    assert!(stdout.contains("Name: Test"));
    assert!(stdout.contains(&format!("ORCID iD: {}", ORCID)));
    assert!(stdout.contains(&format!("Public key value: {}", public_key.trim())));

    let (success, stdout, _) = run_cli(&["profile", "--profile", path_str(&profile), "--json"]);
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["orcid_id"], ORCID);
    assert_eq!(parsed["public_key_value"], public_key.trim());
}

#[test]
fn test_missing_profile_fails() {
    let (success, _, stderr) = run_cli(&["profile", "--profile", "/nonexistent/profile.json"]);
    assert!(!success);
    assert!(stderr.contains("profile not found"));
}

#[test]
fn test_sign_without_keys_fails() {
    let (_temp_dir, input) = create_test_nanopub();
    let (success, _, stderr) = run_cli(&["sign", path_str(&input)]);
    assert!(!success);
    assert!(stderr.contains("Error"));
}

#[test]
fn test_check_command() {
    let (_temp_dir, input) = create_test_nanopub();
    let signed = sign(&input);

    let (success, stdout, _) = run_cli(&["check", path_str(&signed)]);
    assert!(success);
    assert!(stdout.contains("VALID"));
    assert!(stdout.contains(SIGNED_URI));

    let (success, stdout, _) = run_cli(&["check", path_str(&signed), "--json"]);
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["valid"], true);
    assert_eq!(parsed["signed"], true);
    assert_eq!(parsed["uri"], SIGNED_URI);
}

#[test]
fn test_check_detects_tampering() {
    let (_temp_dir, input) = create_test_nanopub();
    let signed = sign(&input);
    let text = fs::read_to_string(&signed).unwrap();
    fs::write(&signed, text.replace("This is a test", "This is a forged test")).unwrap();

    let (success, _, stderr) = run_cli(&["check", path_str(&signed)]);
    assert!(!success);
    assert!(stderr.contains("hash mismatch"));

    let (success, stdout, _) = run_cli(&["check", path_str(&signed), "--json"]);
    assert!(!success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["valid"], false);
}

#[test]
fn test_trusty_command() {
    let (temp_dir, input) = create_test_nanopub();
    let output = temp_dir.path().join("trusty.trig");
    let (success, stdout, _) = run_cli(&[
        "trusty",
        path_str(&input),
        "--output",
        path_str(&output),
    ]);
    assert!(success);
    assert_eq!(stdout.trim(), UNSIGNED_URI);

    let (success, stdout, _) = run_cli(&["check", path_str(&output)]);
    assert!(success);
    assert!(stdout.contains("trusty, unsigned"));
}

#[test]
fn test_canonicalize_command() {
    let (_temp_dir, input) = create_test_nanopub();
    let (success, stdout, _) = run_cli(&["canonicalize", path_str(&input)]);
    assert!(success);
    assert!(stdout.starts_with("http://purl.org/np/ #Head\n"));
    assert!(stdout.contains("\n^http://www.w3.org/2001/XMLSchema#string This is a test of nanopub-python\n"));
}
