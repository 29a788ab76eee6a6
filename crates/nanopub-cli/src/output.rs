//! Output formatting utilities.

use nanopub_core::{MalformedNanopubError, Profile, ValidationReport};
use serde_json::json;

/// Formats a successful validation as one line.
pub fn format_report(report: &ValidationReport) -> String {
    let kind = match (report.trusty, report.signed) {
        (true, true) => "trusty, signed",
        (true, false) => "trusty, unsigned",
        (false, true) => "not trusty, signed",
        (false, false) => "not trusty, unsigned",
    };
    format!("VALID {} ({})", report.uri, kind)
}

/// Formats a successful validation as JSON.
pub fn format_report_json(report: &ValidationReport) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(report)?;
    value["valid"] = json!(true);
    serde_json::to_string_pretty(&value)
}

/// Formats a rejection as JSON.
pub fn format_failure_json(error: &MalformedNanopubError) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&json!({
        "valid": false,
        "error": error.to_string(),
    }))
}

/// Formats a signer profile, one field per line.
pub fn format_profile(profile: &Profile, public_key: &str) -> String {
    let or_none = |value: Option<&str>| value.unwrap_or("(none)").to_string();
    let public_key_path = profile
        .public_key
        .as_ref()
        .map_or("(derived from private key)".to_string(), |p| p.display().to_string());
    [
        format!("Name: {}", profile.name),
        format!("ORCID iD: {}", or_none(profile.orcid_id.as_deref())),
        format!("Private key: {}", profile.private_key.display()),
        format!("Public key: {}", public_key_path),
        format!(
            "Introduction nanopub: {}",
            or_none(profile.introduction_nanopub_uri.as_deref())
        ),
        format!("Public key value: {}", public_key),
    ]
    .join("\n")
}

/// Formats a signer profile as JSON, including the encoded public key.
pub fn format_profile_json(profile: &Profile, public_key: &str) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(profile)?;
    value["public_key_value"] = json!(public_key);
    serde_json::to_string_pretty(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_line() {
        let report = ValidationReport {
            uri: "http://purl.org/np/RAx".into(),
            trusty: true,
            signed: false,
        };
        assert_eq!(format_report(&report), "VALID http://purl.org/np/RAx (trusty, unsigned)");
        let json: serde_json::Value = serde_json::from_str(&format_report_json(&report).unwrap()).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["trusty"], true);
    }

    #[test]
    fn test_profile_lines() {
        let profile = Profile::new("Test User", "/keys/id_rsa").with_orcid("https://orcid.org/0000-0000-0000-0000");
        let text = format_profile(&profile, "MIIB");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Name: Test User");
        assert_eq!(lines[1], "ORCID iD: https://orcid.org/0000-0000-0000-0000");
        assert_eq!(lines[3], "Public key: (derived from private key)");
        assert_eq!(lines[4], "Introduction nanopub: (none)");
        assert_eq!(lines[5], "Public key value: MIIB");

        let json: serde_json::Value = serde_json::from_str(&format_profile_json(&profile, "MIIB").unwrap()).unwrap();
        assert_eq!(json["name"], "Test User");
        assert_eq!(json["public_key_value"], "MIIB");
    }
}
