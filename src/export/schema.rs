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

//! `UserList` export schema.
//!
//! ```proto
//! message User {
//!   string id = 1; string email = 2; string role = 3; string status = 4;
//!   string emailHash = 5; string signature = 6; string createdAt = 7;
//! }
//! message UserList { repeated User users = 1; }
//! ```
//!
//! Field numbers and types are the schema version: changing either breaks
//! every consumer holding an older decoder. New fields must take new numbers.

use crate::core::constants::export::{
    FIELD_CREATED_AT, FIELD_EMAIL, FIELD_EMAIL_HASH, FIELD_ID, FIELD_ROLE, FIELD_SIGNATURE,
    FIELD_STATUS, FIELD_USERS,
};
use crate::core::constants::fingerprint::HEX_LENGTH;
use crate::core::errors::{DecodeError, EncodingError, IntegrityError};
use crate::core::fingerprint::Fingerprint;
use crate::core::models::ProtectedRecord;
use crate::export::wire::{put_bytes_field, put_string_field, WireReader, WireType};
use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::BytesMut;
use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One user as it appears on the wire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub id: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub email_hash: String,
    pub signature: String,
    /// ISO-8601, millisecond precision, `Z` suffix
    pub created_at: String,
}

impl From<&ProtectedRecord> for ExportRecord {
    fn from(record: &ProtectedRecord) -> Self {
        Self {
            id: record.id.clone(),
            email: record.email().to_string(),
            role: record.role.to_string(),
            status: record.status.to_string(),
            email_hash: record.seal().fingerprint.to_string(),
            signature: record.seal().signature.to_string(),
            created_at: record
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl ExportRecord {
    fn validate(&self, index: usize) -> Result<(), EncodingError> {
        if self.id.is_empty() {
            return Err(EncodingError::EmptyIdentifier { index });
        }

        if !Fingerprint::is_well_formed(&self.email_hash) {
            return Err(EncodingError::InvalidFingerprint {
                index,
                expected: HEX_LENGTH,
            });
        }

        match STANDARD.decode(&self.signature) {
            Ok(bytes) if !bytes.is_empty() => {}
            _ => return Err(EncodingError::InvalidSignature { index }),
        }

        if DateTime::parse_from_rfc3339(&self.created_at).is_err() {
            return Err(EncodingError::InvalidTimestamp {
                index,
                value: self.created_at.clone(),
            });
        }

        Ok(())
    }

    fn encode_into(&self, buf: &mut BytesMut) {
        put_string_field(buf, FIELD_ID, &self.id);
        put_string_field(buf, FIELD_EMAIL, &self.email);
        put_string_field(buf, FIELD_ROLE, &self.role);
        put_string_field(buf, FIELD_STATUS, &self.status);
        put_string_field(buf, FIELD_EMAIL_HASH, &self.email_hash);
        put_string_field(buf, FIELD_SIGNATURE, &self.signature);
        put_string_field(buf, FIELD_CREATED_AT, &self.created_at);
    }

    fn decode_from(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = WireReader::new(bytes);
        let mut record = ExportRecord::default();

        while !reader.is_empty() {
            let (field, wire_type) = reader.read_key()?;
            let slot = match field {
                FIELD_ID => &mut record.id,
                FIELD_EMAIL => &mut record.email,
                FIELD_ROLE => &mut record.role,
                FIELD_STATUS => &mut record.status,
                FIELD_EMAIL_HASH => &mut record.email_hash,
                FIELD_SIGNATURE => &mut record.signature,
                FIELD_CREATED_AT => &mut record.created_at,
                _ => {
                    debug!(field, "Skipping unknown User field");
                    reader.skip(wire_type)?;
                    continue;
                }
            };

            if wire_type != WireType::LengthDelimited {
                return Err(DecodeError::UnexpectedWireType {
                    field,
                    wire_type: wire_type.as_raw(),
                });
            }
            *slot = reader.read_string(field)?;
        }

        Ok(record)
    }
}

/// Encode a snapshot into one contiguous buffer
///
/// Every record is validated before anything is written; one bad record
/// fails the whole export.
pub fn encode(records: &[ExportRecord]) -> Result<Vec<u8>, IntegrityError> {
    for (index, record) in records.iter().enumerate() {
        record.validate(index)?;
    }

    let mut out = BytesMut::new();
    let mut scratch = BytesMut::new();
    for record in records {
        scratch.clear();
        record.encode_into(&mut scratch);
        put_bytes_field(&mut out, FIELD_USERS, &scratch);
    }

    info!(records = records.len(), bytes = out.len(), "Export snapshot encoded");
    Ok(out.to_vec())
}

/// Project and encode protected records, in the order given
pub fn encode_records(records: &[ProtectedRecord]) -> Result<Vec<u8>, IntegrityError> {
    let projected: Vec<ExportRecord> = records.iter().map(ExportRecord::from).collect();
    encode(&projected)
}

/// Decode a snapshot, skipping fields this schema does not know
pub fn decode(bytes: &[u8]) -> Result<Vec<ExportRecord>, IntegrityError> {
    let mut reader = WireReader::new(bytes);
    let mut records = Vec::new();

    while !reader.is_empty() {
        let (field, wire_type) = reader.read_key()?;
        if field != FIELD_USERS {
            debug!(field, "Skipping unknown UserList field");
            reader.skip(wire_type)?;
            continue;
        }
        if wire_type != WireType::LengthDelimited {
            return Err(DecodeError::UnexpectedWireType {
                field,
                wire_type: wire_type.as_raw(),
            }
            .into());
        }
        let body = reader.read_length_delimited()?;
        records.push(ExportRecord::decode_from(body)?);
    }

    Ok(records)
}
