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

//! Integrity constants - single source of truth for key, digest and wire values.

/// Environment variable names
pub mod config {
    /// Inline PKCS#8 PEM private key (escaped `\n` accepted)
    pub const ENV_PRIVATE_KEY: &str = "USER_DATA_PRIVATE_KEY";
    /// Inline SPKI PEM public key (escaped `\n` accepted)
    pub const ENV_PUBLIC_KEY: &str = "USER_DATA_PUBLIC_KEY";
    /// Path to a PKCS#8 PEM private key file
    pub const ENV_PRIVATE_KEY_PATH: &str = "USER_DATA_PRIVATE_KEY_PATH";
    /// Path to an SPKI PEM public key file
    pub const ENV_PUBLIC_KEY_PATH: &str = "USER_DATA_PUBLIC_KEY_PATH";
    /// Log level
    pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
    /// Log format ("json" or "text")
    pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

    pub const DEFAULT_LOG_LEVEL: &str = "info";
    pub const DEFAULT_LOG_FORMAT: &str = "text";
}

/// Key material constants
pub mod keys {
    /// PEM label of a PKCS#8 private key
    pub const PKCS8_PRIVATE_LABEL: &str = "PRIVATE KEY";
    /// PEM label of a PKCS#1 private key (rejected)
    pub const PKCS1_PRIVATE_LABEL: &str = "RSA PRIVATE KEY";
    /// PEM label of an SPKI public key
    pub const SPKI_PUBLIC_LABEL: &str = "PUBLIC KEY";
    /// rsaEncryption algorithm identifier
    pub const RSA_ENCRYPTION_OID: &str = "1.2.840.113549.1.1.1";
    /// Smallest accepted modulus
    pub const MIN_MODULUS_BITS: usize = 2048;
    /// Largest accepted modulus (ring's verification ceiling)
    pub const MAX_MODULUS_BITS: usize = 8192;
}

/// Fingerprint constants
pub mod fingerprint {
    /// Hex length of a SHA-384 digest
    pub const HEX_LENGTH: usize = 96;
    /// Digest name, reported in audit output
    pub const ALGORITHM: &str = "SHA-384";
}

/// Signature constants
pub mod signature {
    /// Scheme identifier, reported in audit output
    pub const ALGORITHM: &str = "RSASSA-PKCS1-v1_5/SHA-384";
}

/// Export wire constants
pub mod export {
    pub const CONTENT_TYPE: &str = "application/octet-stream";
    pub const EXPORT_FILENAME: &str = "users.bin";

    /// `UserList.users`
    pub const FIELD_USERS: u32 = 1;
    /// `User` fields, in wire order
    pub const FIELD_ID: u32 = 1;
    pub const FIELD_EMAIL: u32 = 2;
    pub const FIELD_ROLE: u32 = 3;
    pub const FIELD_STATUS: u32 = 4;
    pub const FIELD_EMAIL_HASH: u32 = 5;
    pub const FIELD_SIGNATURE: u32 = 6;
    pub const FIELD_CREATED_AT: u32 = 7;

    /// Varints never exceed 10 bytes for 64-bit values
    pub const MAX_VARINT_BYTES: usize = 10;
}
