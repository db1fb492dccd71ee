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

use crate::core::binder::{AuditVerdict, RecordBinder};
use crate::core::errors::IntegrityError;
use crate::core::fingerprint::Fingerprint;
use crate::core::signer::Signature;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

/// Fingerprint and signature of a protected field, always produced together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seal {
    #[serde(rename = "emailHash")]
    pub fingerprint: Fingerprint,
    pub signature: Signature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    Moderator,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Moderator => "moderator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            "moderator" => Ok(Role::Moderator),
            other => Err(format!("Unknown role '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
    Suspended,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
            Status::Suspended => "suspended",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Status::Active),
            "inactive" => Ok(Status::Inactive),
            "suspended" => Ok(Status::Suspended),
            other => Err(format!("Unknown status '{}'", other)),
        }
    }
}

/// Fields supplied when a record is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub status: Status,
}

/// Partial update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordUpdate {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub status: Option<Status>,
}

/// A user record whose email is under integrity protection
///
/// `email` and `seal` are private: the only ways to change them go through
/// a `RecordBinder`, so the pair cannot drift apart in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedRecord {
    pub id: String,
    email: String,
    pub full_name: String,
    pub role: Role,
    pub status: Status,
    #[serde(flatten)]
    seal: Seal,
    pub created_at: DateTime<Utc>,
}

impl ProtectedRecord {
    /// Create a new record, sealing its email
    pub fn create(binder: &RecordBinder, new: NewRecord) -> Result<Self, IntegrityError> {
        let seal = binder.bind(&new.email)?;
        let record = Self {
            id: Uuid::new_v4().to_string(),
            email: new.email,
            full_name: new.full_name,
            role: new.role,
            status: new.status,
            seal,
            created_at: Utc::now(),
        };
        info!(record_id = %record.id, "Protected record created");
        Ok(record)
    }

    /// Rebuild a record from persisted columns without re-sealing
    ///
    /// Whatever was stored comes back as-is; use `audit` to find out whether
    /// it still verifies.
    pub fn from_stored(
        id: String,
        email: String,
        full_name: String,
        role: Role,
        status: Status,
        seal: Seal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            full_name,
            role,
            status,
            seal,
            created_at,
        }
    }

    /// Apply a partial update
    ///
    /// The seal is recomputed only when the email actually changes. Returns
    /// whether it was.
    pub fn apply(
        &mut self,
        binder: &RecordBinder,
        update: RecordUpdate,
    ) -> Result<bool, IntegrityError> {
        // Seal first so a signing failure leaves the record untouched
        let resealed = match update.email {
            Some(email) if email != self.email => {
                self.set_email(binder, email)?;
                true
            }
            _ => false,
        };

        if let Some(full_name) = update.full_name {
            self.full_name = full_name;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(status) = update.status {
            self.status = status;
        }

        Ok(resealed)
    }

    /// Replace the email together with its seal
    pub fn set_email(
        &mut self,
        binder: &RecordBinder,
        email: String,
    ) -> Result<(), IntegrityError> {
        let seal = binder.bind(&email)?;
        self.email = email;
        self.seal = seal;
        info!(record_id = %self.id, "Protected record resealed");
        Ok(())
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn seal(&self) -> &Seal {
        &self.seal
    }

    pub fn audit(&self, binder: &RecordBinder) -> AuditVerdict {
        binder.audit(
            &self.email,
            self.seal.fingerprint.as_str(),
            self.seal.signature.as_str(),
        )
    }
}
