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

//! Record integrity binder.
//!
//! The only place where a plaintext becomes a `(fingerprint, signature)`
//! seal. The storage layer must persist the plaintext and the returned seal
//! in one write.

use crate::core::errors::IntegrityError;
use crate::core::fingerprint::fingerprint;
use crate::core::keys::{KeyPair, PublicKey};
use crate::core::models::Seal;
use crate::core::signer::sign;
use crate::core::verifier::verify;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of re-checking a stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditVerdict {
    /// Stored hash matches the plaintext and the signature verifies
    Verified,
    /// Stored hash is not the fingerprint of the stored plaintext
    FingerprintMismatch,
    /// Signature does not verify over the recomputed fingerprint
    SignatureInvalid,
}

impl AuditVerdict {
    pub fn is_verified(self) -> bool {
        self == AuditVerdict::Verified
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AuditVerdict::Verified => "verified",
            AuditVerdict::FingerprintMismatch => "fingerprint_mismatch",
            AuditVerdict::SignatureInvalid => "signature_invalid",
        }
    }
}

impl fmt::Display for AuditVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of the public key endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyResponse {
    pub public_key: String,
}

/// Seals protected fields with the process-wide key pair
#[derive(Debug, Clone)]
pub struct RecordBinder {
    keys: Arc<KeyPair>,
}

impl RecordBinder {
    pub fn new(keys: Arc<KeyPair>) -> Self {
        Self { keys }
    }

    /// Fingerprint and sign `plaintext`
    pub fn bind(&self, plaintext: &str) -> Result<Seal, IntegrityError> {
        let fingerprint = fingerprint(plaintext);
        let signature = sign(&fingerprint, &self.keys)?;
        debug!(fingerprint = %fingerprint, "Protected field sealed");
        Ok(Seal {
            fingerprint,
            signature,
        })
    }

    /// Public key PEM, byte-for-byte as configured
    pub fn public_key(&self) -> &str {
        self.keys.public_key().to_pem()
    }

    pub fn public_key_response(&self) -> PublicKeyResponse {
        PublicKeyResponse {
            public_key: self.public_key().to_string(),
        }
    }

    pub fn key_pair(&self) -> &Arc<KeyPair> {
        &self.keys
    }

    /// Re-check a stored `(plaintext, fingerprint, signature)` triple
    ///
    /// The fingerprint is recomputed from `plaintext`; the stored one is only
    /// compared, never trusted.
    pub fn audit(
        &self,
        plaintext: &str,
        stored_fingerprint: &str,
        stored_signature: &str,
    ) -> AuditVerdict {
        audit_triple(
            plaintext,
            stored_fingerprint,
            stored_signature,
            self.keys.public_key(),
        )
    }
}

/// Shared by the binder and the offline snapshot audit
pub(crate) fn audit_triple(
    plaintext: &str,
    stored_fingerprint: &str,
    stored_signature: &str,
    public_key: &PublicKey,
) -> AuditVerdict {
    let recomputed = fingerprint(plaintext);

    if recomputed.as_str() != stored_fingerprint {
        warn!(
            stored = %stored_fingerprint,
            recomputed = %recomputed,
            "Stored fingerprint does not match plaintext"
        );
        return AuditVerdict::FingerprintMismatch;
    }

    if !verify(&recomputed, stored_signature, public_key) {
        warn!(fingerprint = %recomputed, "Stored signature does not verify");
        return AuditVerdict::SignatureInvalid;
    }

    AuditVerdict::Verified
}
