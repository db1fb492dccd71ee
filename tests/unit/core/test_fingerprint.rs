// Fingerprint tests: digest shape, determinism and exact-bytes semantics

use crate::common::*;
use record_integrity::core::constants::fingerprint::HEX_LENGTH;
use record_integrity::{fingerprint, Fingerprint};
use std::collections::HashSet;

#[test]
fn test_fingerprint_matches_known_digest() {
    assert_eq!(fingerprint("a@example.com").as_str(), A_EXAMPLE_COM_FINGERPRINT);
    assert_eq!(
        fingerprint("b@example.com").as_str(),
        "18ae88c1cefc8fc8e101351b76a4c5da7af02baf7cb7a2ccd6f943ea5880cb90e82e896b6bc65f53e8b7edea8295f19c"
    );
}

#[test]
fn test_fingerprint_is_deterministic() {
    assert_eq!(fingerprint("a@example.com"), fingerprint("a@example.com"));
}

#[test]
fn test_fingerprint_is_lowercase_hex() {
    for input in ["", "a@example.com", "ÜNÏCÖDÉ@example.com", "\0\n\t"] {
        let fp = fingerprint(input);
        assert_eq!(fp.as_str().len(), HEX_LENGTH);
        assert!(Fingerprint::is_well_formed(fp.as_str()));
    }
}

#[test]
fn test_fingerprint_does_not_normalize() {
    let base = fingerprint("a@example.com");
    assert_ne!(base, fingerprint("A@example.com"));
    assert_ne!(base, fingerprint("a@example.com "));
    assert_ne!(base, fingerprint("a@EXAMPLE.com"));
}

#[test]
fn test_distinct_inputs_give_distinct_fingerprints() {
    let fingerprints: HashSet<String> = (0..500)
        .map(|i| fingerprint(&format!("user{}@example.com", i)).into_string())
        .collect();
    assert_eq!(fingerprints.len(), 500);
}

#[test]
fn test_signed_bytes_are_hex_text() {
    let fp = fingerprint("a@example.com");
    assert_eq!(fp.as_bytes(), A_EXAMPLE_COM_FINGERPRINT.as_bytes());
    assert_eq!(fp.to_string(), A_EXAMPLE_COM_FINGERPRINT);
}

#[test]
fn test_parse_rejects_malformed_digests() {
    assert!(Fingerprint::parse(A_EXAMPLE_COM_FINGERPRINT).is_some());
    assert!(Fingerprint::parse(&A_EXAMPLE_COM_FINGERPRINT.to_uppercase()).is_none());
    assert!(Fingerprint::parse(&A_EXAMPLE_COM_FINGERPRINT[..64]).is_none());
    assert!(Fingerprint::parse(&format!("{}0", A_EXAMPLE_COM_FINGERPRINT)).is_none());
    assert!(Fingerprint::parse(&"g".repeat(HEX_LENGTH)).is_none());
}

#[test]
fn test_fingerprint_serializes_as_plain_string() {
    let fp = fingerprint("a@example.com");
    let json = serde_json::to_string(&fp).unwrap();
    assert_eq!(json, format!("\"{}\"", A_EXAMPLE_COM_FINGERPRINT));
}
