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

//! Canonical fingerprint of a protected field.
//!
//! The fingerprint is the lowercase hex SHA-384 digest of the exact UTF-8
//! bytes handed in. No normalization happens here: `"A@example.com"` and
//! `"a@example.com"` fingerprint differently. Callers that want
//! case-insensitive identity must normalize first.

use crate::core::constants::fingerprint::HEX_LENGTH;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha384};
use std::fmt;

/// Hex-encoded SHA-384 digest (96 characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wrap a stored digest, rejecting anything that is not 96 lowercase hex chars
    pub fn parse(value: &str) -> Option<Self> {
        if Self::is_well_formed(value) {
            Some(Self(value.to_string()))
        } else {
            None
        }
    }

    pub fn is_well_formed(value: &str) -> bool {
        value.len() == HEX_LENGTH
            && value
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bytes that get signed: the hex text itself, not the raw digest
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Fingerprint `input` exactly as given
pub fn fingerprint(input: &str) -> Fingerprint {
    let mut hasher = Sha384::new();
    hasher.update(input.as_bytes());
    Fingerprint(hex::encode(hasher.finalize()))
}
