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

// Configuration management

use crate::core::constants::config::{
    DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL, ENV_LOG_FORMAT, ENV_LOG_LEVEL, ENV_PRIVATE_KEY,
    ENV_PRIVATE_KEY_PATH, ENV_PUBLIC_KEY, ENV_PUBLIC_KEY_PATH,
};
use crate::core::errors::IntegrityError;
use secrecy::{Secret, SecretString};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration loaded from environment variables
///
/// Each key can be given inline (`USER_DATA_PRIVATE_KEY`) or as a file path
/// (`USER_DATA_PRIVATE_KEY_PATH`), not both. Inline values may carry
/// escaped `\n` sequences, the form the key bootstrap script writes into
/// `.env` files.
#[derive(Debug)]
pub struct Config {
    // Key material
    pub private_key_pem: SecretString,
    pub public_key_pem: String,

    // Logging configuration
    pub log_level: String,
    pub log_format: String, // "json" or "text"
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Supports `.env` file loading in development (via dotenv crate).
    /// Only checks that key material is present; `KeyPair::from_config`
    /// validates it.
    pub fn from_env() -> Result<Self, IntegrityError> {
        Self::load_dotenv();

        let config = Self {
            private_key_pem: Secret::new(Self::resolve_pem(
                ENV_PRIVATE_KEY,
                ENV_PRIVATE_KEY_PATH,
                "Private key",
            )?),
            public_key_pem: Self::public_key_from_env()?,
            log_level: Self::get_env_or_default(ENV_LOG_LEVEL, DEFAULT_LOG_LEVEL),
            log_format: Self::get_env_or_default(ENV_LOG_FORMAT, DEFAULT_LOG_FORMAT),
        };

        config.validate()?;

        Ok(config)
    }

    /// Load only the public key (auditors never see the private half)
    ///
    /// Reads `.env` like `from_env`, so both see the same environment.
    pub fn public_key_from_env() -> Result<String, IntegrityError> {
        Self::load_dotenv();
        Self::resolve_pem(ENV_PUBLIC_KEY, ENV_PUBLIC_KEY_PATH, "Public key")
    }

    /// Load `.env` from the working directory (or a parent) if present
    ///
    /// Variables already set in the process environment win.
    pub fn load_dotenv() {
        // Skip in test environment to avoid interfering with test environment variables
        #[cfg(not(test))]
        {
            dotenv::dotenv().ok(); // Ignore errors (file may not exist)
        }
    }

    /// Build configuration from PEM strings, bypassing the environment
    pub fn from_pem_strings(private_key_pem: &str, public_key_pem: &str) -> Self {
        Self {
            private_key_pem: Secret::new(private_key_pem.to_string()),
            public_key_pem: public_key_pem.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }

    /// Get environment variable or return default value
    fn get_env_or_default(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Get optional environment variable (empty counts as unset)
    fn get_optional_env(key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) if !value.trim().is_empty() => Some(value),
            _ => None,
        }
    }

    /// Resolve a PEM from its inline or path variable
    fn resolve_pem(
        inline_key: &str,
        path_key: &str,
        description: &str,
    ) -> Result<String, IntegrityError> {
        match (
            Self::get_optional_env(inline_key),
            Self::get_optional_env(path_key),
        ) {
            (Some(_), Some(_)) => Err(IntegrityError::ConfigurationError(format!(
                "Both {} and {} are set; use one",
                inline_key, path_key
            ))),
            (Some(inline), None) => Ok(unescape_newlines(&inline)),
            (None, Some(path)) => Self::read_pem_file(&PathBuf::from(path), description),
            (None, None) => Err(IntegrityError::ConfigurationError(format!(
                "{} not set: provide {} or {}",
                description, inline_key, path_key
            ))),
        }
    }

    /// Read a PEM file, with the same path checks as other required files
    fn read_pem_file(path: &Path, description: &str) -> Result<String, IntegrityError> {
        if !path.exists() {
            return Err(IntegrityError::ConfigurationError(format!(
                "{} file not found at {:?}",
                description, path
            )));
        }

        if !path.is_file() {
            return Err(IntegrityError::ConfigurationError(format!(
                "{} path is not a file: {:?}",
                description, path
            )));
        }

        fs::read_to_string(path).map_err(|e| {
            IntegrityError::ConfigurationError(format!(
                "Cannot read {} at {:?}: {}",
                description, path, e
            ))
        })
    }

    /// Validate all configuration values
    fn validate(&self) -> Result<(), IntegrityError> {
        Self::validate_log_level(&self.log_level)?;
        Self::validate_log_format(&self.log_format)?;
        Ok(())
    }

    /// Validate log level
    fn validate_log_level(level: &str) -> Result<(), IntegrityError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&level.to_lowercase().as_str()) {
            return Err(IntegrityError::ConfigurationError(format!(
                "Invalid LOG_LEVEL '{}': must be one of {}",
                level,
                valid_levels.join(", ")
            )));
        }
        Ok(())
    }

    /// Validate log format
    fn validate_log_format(format: &str) -> Result<(), IntegrityError> {
        if format != "json" && format != "text" {
            return Err(IntegrityError::ConfigurationError(format!(
                "Invalid LOG_FORMAT '{}': must be 'json' or 'text'",
                format
            )));
        }
        Ok(())
    }
}

/// Turn literal `\n` sequences back into newlines
pub fn unescape_newlines(value: &str) -> String {
    value.replace("\\n", "\n")
}
