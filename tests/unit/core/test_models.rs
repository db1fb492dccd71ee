// ProtectedRecord lifecycle tests

use crate::common::*;
use record_integrity::core::binder::AuditVerdict;
use record_integrity::core::models::{RecordUpdate, Seal};
use record_integrity::{fingerprint, ProtectedRecord, Role, Signature, Status};
use std::str::FromStr;

#[test]
fn test_create_seals_email() {
    let binder = primary_binder();
    let record = ProtectedRecord::create(&binder, new_record("a@example.com")).unwrap();

    assert_eq!(record.email(), "a@example.com");
    assert_eq!(record.seal().fingerprint.as_str(), A_EXAMPLE_COM_FINGERPRINT);
    assert_eq!(record.audit(&binder), AuditVerdict::Verified);
    assert!(uuid::Uuid::parse_str(&record.id).is_ok());
}

#[test]
fn test_update_without_email_keeps_seal() {
    let binder = primary_binder();
    let mut record = ProtectedRecord::create(&binder, new_record("a@example.com")).unwrap();
    let before = record.seal().clone();

    let resealed = record
        .apply(
            &binder,
            RecordUpdate {
                full_name: Some("Grace Hopper".to_string()),
                role: Some(Role::Admin),
                status: Some(Status::Suspended),
                ..Default::default()
            },
        )
        .unwrap();

    assert!(!resealed);
    assert_eq!(record.seal(), &before);
    assert_eq!(record.full_name, "Grace Hopper");
    assert_eq!(record.role, Role::Admin);
    assert_eq!(record.status, Status::Suspended);
}

#[test]
fn test_update_with_same_email_keeps_seal() {
    let binder = primary_binder();
    let mut record = ProtectedRecord::create(&binder, new_record("a@example.com")).unwrap();
    let before = record.seal().clone();

    let resealed = record
        .apply(
            &binder,
            RecordUpdate {
                email: Some("a@example.com".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    assert!(!resealed);
    assert_eq!(record.seal(), &before);
}

#[test]
fn test_update_with_new_email_reseals() {
    let binder = primary_binder();
    let mut record = ProtectedRecord::create(&binder, new_record("a@example.com")).unwrap();
    let old_seal = record.seal().clone();

    let resealed = record
        .apply(
            &binder,
            RecordUpdate {
                email: Some("b@example.com".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    assert!(resealed);
    assert_eq!(record.email(), "b@example.com");
    assert_eq!(record.seal().fingerprint, fingerprint("b@example.com"));
    assert_ne!(record.seal(), &old_seal);
    assert_eq!(record.audit(&binder), AuditVerdict::Verified);

    // the old seal must not vouch for the new email
    assert_eq!(
        binder.audit(
            "b@example.com",
            old_seal.fingerprint.as_str(),
            old_seal.signature.as_str()
        ),
        AuditVerdict::FingerprintMismatch
    );
}

#[test]
fn test_tampered_storage_is_detected() {
    let binder = primary_binder();
    let original = ProtectedRecord::create(&binder, new_record("a@example.com")).unwrap();

    // someone edits the email column directly
    let tampered = ProtectedRecord::from_stored(
        original.id.clone(),
        "mallory@example.com".to_string(),
        original.full_name.clone(),
        original.role,
        original.status,
        original.seal().clone(),
        original.created_at,
    );
    assert_eq!(tampered.audit(&binder), AuditVerdict::FingerprintMismatch);

    // ... and recomputes the hash too, but cannot sign
    let forged = ProtectedRecord::from_stored(
        original.id.clone(),
        "mallory@example.com".to_string(),
        original.full_name.clone(),
        original.role,
        original.status,
        Seal {
            fingerprint: fingerprint("mallory@example.com"),
            signature: original.seal().signature.clone(),
        },
        original.created_at,
    );
    assert_eq!(forged.audit(&binder), AuditVerdict::SignatureInvalid);

    let unsigned = ProtectedRecord::from_stored(
        original.id.clone(),
        original.email().to_string(),
        original.full_name.clone(),
        original.role,
        original.status,
        Seal {
            fingerprint: original.seal().fingerprint.clone(),
            signature: Signature::new(""),
        },
        original.created_at,
    );
    assert_eq!(unsigned.audit(&binder), AuditVerdict::SignatureInvalid);
}

#[test]
fn test_record_json_shape() {
    let binder = primary_binder();
    let record = ProtectedRecord::create(&binder, new_record("a@example.com")).unwrap();
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["email"], "a@example.com");
    assert_eq!(json["fullName"], "Ada Lovelace");
    assert_eq!(json["role"], "user");
    assert_eq!(json["status"], "active");
    assert_eq!(json["emailHash"], A_EXAMPLE_COM_FINGERPRINT);
    assert!(json["signature"].is_string());
    assert!(json["createdAt"].is_string());

    let parsed: ProtectedRecord = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn test_role_and_status_strings() {
    for role in [Role::Admin, Role::User, Role::Moderator] {
        assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
    }
    for status in [Status::Active, Status::Inactive, Status::Suspended] {
        assert_eq!(Status::from_str(&status.to_string()).unwrap(), status);
    }
    assert!(Role::from_str("Admin").is_err());
    assert!(Status::from_str("deleted").is_err());
}
