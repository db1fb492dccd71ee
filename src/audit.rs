// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Offline audit of an export snapshot.
//!
//! Needs only the public key. Each record's fingerprint is recomputed from
//! its exported email before the signature is checked.

use crate::core::binder::{audit_triple, AuditVerdict};
use crate::core::constants::{fingerprint, signature};
use crate::core::errors::IntegrityError;
use crate::core::keys::PublicKey;
use crate::export::{decode, ExportRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub index: usize,
    pub id: String,
    pub verdict: AuditVerdict,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub key_id: String,
    pub fingerprint_algorithm: &'static str,
    pub signature_algorithm: &'static str,
    pub audited_at: DateTime<Utc>,
    pub total: usize,
    pub verified: usize,
    pub entries: Vec<AuditEntry>,
}

impl AuditReport {
    pub fn failed(&self) -> usize {
        self.total - self.verified
    }

    pub fn all_verified(&self) -> bool {
        self.verified == self.total
    }

    /// Entries that did not verify
    pub fn failures(&self) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter().filter(|e| !e.verdict.is_verified())
    }
}

pub fn audit_snapshot(records: &[ExportRecord], public_key: &PublicKey) -> AuditReport {
    let entries: Vec<AuditEntry> = records
        .iter()
        .enumerate()
        .map(|(index, record)| AuditEntry {
            index,
            id: record.id.clone(),
            verdict: audit_triple(
                &record.email,
                &record.email_hash,
                &record.signature,
                public_key,
            ),
        })
        .collect();

    let verified = entries.iter().filter(|e| e.verdict.is_verified()).count();
    let report = AuditReport {
        key_id: public_key.fingerprint(),
        fingerprint_algorithm: fingerprint::ALGORITHM,
        signature_algorithm: signature::ALGORITHM,
        audited_at: Utc::now(),
        total: entries.len(),
        verified,
        entries,
    };

    if report.all_verified() {
        info!(target: "audit", total = report.total, "Snapshot verified");
    } else {
        warn!(
            target: "audit",
            total = report.total,
            failed = report.failed(),
            "Snapshot contains records that do not verify"
        );
    }

    report
}

/// Decode an export buffer and audit every record in it
pub fn audit_export(bytes: &[u8], public_key: &PublicKey) -> Result<AuditReport, IntegrityError> {
    let records = decode(bytes)?;
    Ok(audit_snapshot(&records, public_key))
}
