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

//! Fail-closed signature verification.
//!
//! Inputs here routinely come from records that may have been tampered
//! with. Every failure mode collapses to `false`; nothing in this module
//! returns an error or panics.

use crate::core::fingerprint::{fingerprint, Fingerprint};
use crate::core::keys::PublicKey;
use base64::{engine::general_purpose::STANDARD, Engine};
use ring::signature::{UnparsedPublicKey, RSA_PKCS1_2048_8192_SHA384};
use tracing::trace;

/// Check `signature` (base64) over `fingerprint` against `public_key`
pub fn verify(fingerprint: &Fingerprint, signature: &str, public_key: &PublicKey) -> bool {
    // Anything longer than the modulus cannot be a valid signature; skip the decode
    if signature.len() > public_key.modulus_len().div_ceil(3) * 4 {
        trace!(len = signature.len(), "Signature longer than modulus");
        return false;
    }

    let signature_bytes = match STANDARD.decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    if signature_bytes.len() != public_key.modulus_len() {
        return false;
    }

    UnparsedPublicKey::new(&RSA_PKCS1_2048_8192_SHA384, public_key.rsa_der())
        .verify(fingerprint.as_bytes(), &signature_bytes)
        .is_ok()
}

/// Recompute the fingerprint from `plaintext`, then verify
///
/// Audit entry point: a caller-supplied fingerprint is never trusted.
pub fn verify_plaintext(plaintext: &str, signature: &str, public_key: &PublicKey) -> bool {
    verify(&fingerprint(plaintext), signature, public_key)
}
