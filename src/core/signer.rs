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

//! RSASSA-PKCS1-v1_5 / SHA-384 signing of fingerprints.
//!
//! The signed message is the hex text of the fingerprint, so signatures are
//! interchangeable with `openssl dgst -sha384 -sign` over the same string.

use crate::core::errors::{CryptoError, IntegrityError};
use crate::core::fingerprint::Fingerprint;
use crate::core::keys::KeyPair;
use base64::{engine::general_purpose::STANDARD, Engine};
use ring::signature::RSA_PKCS1_SHA384;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base64 (standard alphabet, padded) RSA signature
///
/// Wraps stored values without validation; the verifier treats the content
/// as untrusted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Signature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Sign a fingerprint with the private half of `key_pair`
pub fn sign(fingerprint: &Fingerprint, key_pair: &KeyPair) -> Result<Signature, IntegrityError> {
    let signing_key = key_pair.signing_key();
    let mut signature = vec![0u8; signing_key.public_modulus_len()];

    signing_key
        .sign(
            &RSA_PKCS1_SHA384,
            key_pair.rng(),
            fingerprint.as_bytes(),
            &mut signature,
        )
        .map_err(|e| CryptoError::SigningError(e.to_string()))?;

    Ok(Signature(STANDARD.encode(&signature)))
}
