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

// Domain error types - Secure error handling with no information disclosure

use thiserror::Error;

/// Main error type for the integrity subsystem
///
/// Signature mismatches are not errors; see `verifier::verify`.
#[derive(Error, Debug)]
pub enum IntegrityError {
    /// Missing or malformed key material (fatal, startup only)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Export payload violates the schema
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// Export buffer could not be decoded
    #[error("Decoding error: {0}")]
    Decoding(#[from] DecodeError),

    /// Cryptographic library failure while signing
    #[error("Cryptographic error: {0}")]
    Crypto(#[from] CryptoError),

    /// File access (CLI and file-backed configuration)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Cryptographic operation errors
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Failed to sign fingerprint
    #[error("Failed to sign fingerprint: {0}")]
    SigningError(String),
}

/// Schema violations found while encoding an export
///
/// `index` is the position of the offending record in the input slice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("record {index}: identifier is empty")]
    EmptyIdentifier { index: usize },

    #[error("record {index}: email hash is not a {expected}-character lowercase hex digest")]
    InvalidFingerprint { index: usize, expected: usize },

    #[error("record {index}: signature is not valid base64")]
    InvalidSignature { index: usize },

    #[error("record {index}: created_at '{value}' is not an ISO-8601 timestamp")]
    InvalidTimestamp { index: usize, value: String },
}

/// Malformed export buffers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of buffer at offset {offset}")]
    Truncated { offset: usize },

    #[error("varint at offset {offset} is too long")]
    VarintOverflow { offset: usize },

    #[error("unsupported wire type {wire_type} at offset {offset}")]
    UnsupportedWireType { wire_type: u8, offset: usize },

    #[error("field {field} has wire type {wire_type}, expected length-delimited")]
    UnexpectedWireType { field: u32, wire_type: u8 },

    #[error("field number 0 at offset {offset}")]
    InvalidFieldNumber { offset: usize },

    #[error("field {field} is not valid UTF-8")]
    InvalidUtf8 { field: u32 },
}

impl IntegrityError {
    /// Get user-friendly error message (no sensitive information)
    pub fn user_message(&self) -> String {
        match self {
            IntegrityError::ConfigurationError(_) => "Internal error".to_string(),
            IntegrityError::Encoding(_) => "Export failed".to_string(),
            IntegrityError::Decoding(_) => "Invalid export file".to_string(),
            IntegrityError::Crypto(_) => "Internal error".to_string(),
            IntegrityError::Io(_) => "Internal error".to_string(),
        }
    }

    /// Whether the process must stop serving (configuration is broken)
    pub fn is_fatal(&self) -> bool {
        matches!(self, IntegrityError::ConfigurationError(_))
    }
}
