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

//! record-integrity: tamper-evident protection for user record fields.
//!
//! A protected plaintext field (the user's email) is reduced to a SHA-384
//! fingerprint and signed with a long-lived RSA key. Anyone holding the
//! public key can later recompute the fingerprint from the stored plaintext
//! and check the stored signature, detecting edits that bypassed the service.

pub mod audit;
pub mod config;
pub mod core;
pub mod export;

pub use crate::core::binder::RecordBinder;
pub use crate::core::errors::IntegrityError;
pub use crate::core::fingerprint::{fingerprint, Fingerprint};
pub use crate::core::keys::{KeyPair, PublicKey};
pub use crate::core::models::{ProtectedRecord, Role, Seal, Status};
pub use crate::core::signer::{sign, Signature};
pub use crate::core::verifier::{verify, verify_plaintext};
