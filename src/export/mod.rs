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

//! Binary export of protected records for offline or bulk verification.

pub mod schema;
pub mod wire;

pub use crate::core::constants::export::{CONTENT_TYPE, EXPORT_FILENAME};
pub use schema::{decode, encode, encode_records, ExportRecord};

/// `Content-Disposition` header value for a download
pub fn content_disposition() -> String {
    format!("attachment; filename={}", EXPORT_FILENAME)
}
