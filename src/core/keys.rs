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

//! Key material provider.
//!
//! Loads the process-wide RSA key pair from PEM once at startup. Every
//! malformed input surfaces here as `ConfigurationError`; signing never sees
//! a bad key. Missing material is an error, never a freshly generated key:
//! a new key invalidates every signature already stored.

use crate::config::Config;
use crate::core::constants::keys::{
    MAX_MODULUS_BITS, MIN_MODULUS_BITS, PKCS1_PRIVATE_LABEL, PKCS8_PRIVATE_LABEL,
    RSA_ENCRYPTION_OID, SPKI_PUBLIC_LABEL,
};
use crate::core::errors::IntegrityError;
use der::asn1::{ObjectIdentifier, UintRef};
use der::{Decode, Reader, SliceReader};
use pkcs8::{PrivateKeyInfo, SubjectPublicKeyInfoRef};
use ring::rand::SystemRandom;
use ring::signature::{KeyPair as _, RsaKeyPair};
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::info;
use zeroize::Zeroizing;

const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap(RSA_ENCRYPTION_OID);

/// Public half of the signing key
///
/// Keeps the PEM exactly as configured so it can be handed out verbatim.
#[derive(Clone)]
pub struct PublicKey {
    pem: String,
    spki_der: Vec<u8>,
    rsa_der: Vec<u8>,
    modulus_bits: usize,
}

impl PublicKey {
    /// Load an SPKI (`-----BEGIN PUBLIC KEY-----`) RSA public key
    pub fn from_pem(public_pem: &str) -> Result<Self, IntegrityError> {
        if public_pem.trim().is_empty() {
            return Err(config_error("Public key is empty"));
        }

        let parsed = pem::parse(public_pem)
            .map_err(|e| config_error(format!("Failed to parse public key PEM: {}", e)))?;

        if parsed.tag() != SPKI_PUBLIC_LABEL {
            return Err(config_error(format!(
                "Unexpected public key PEM label '{}': expected '{}'",
                parsed.tag(),
                SPKI_PUBLIC_LABEL
            )));
        }

        let spki_der = parsed.into_contents();
        let rsa_der = {
            let spki = SubjectPublicKeyInfoRef::from_der(&spki_der)
                .map_err(|e| config_error(format!("Failed to parse SPKI DER: {}", e)))?;

            if spki.algorithm.oid != RSA_ENCRYPTION {
                return Err(config_error(format!(
                    "Public key algorithm {} is not RSA",
                    spki.algorithm.oid
                )));
            }

            spki.subject_public_key
                .as_bytes()
                .ok_or_else(|| config_error("Public key bit string has unused bits"))?
                .to_vec()
        };

        let modulus_bits = rsa_modulus_bits(&rsa_der)
            .map_err(|e| config_error(format!("Failed to parse RSA public key: {}", e)))?;
        check_modulus_bits(modulus_bits)?;

        Ok(Self {
            pem: public_pem.to_string(),
            spki_der,
            rsa_der,
            modulus_bits,
        })
    }

    /// The PEM as configured (bit-exact)
    pub fn to_pem(&self) -> &str {
        &self.pem
    }

    /// DER `RSAPublicKey`, the form ring verifies against
    pub fn rsa_der(&self) -> &[u8] {
        &self.rsa_der
    }

    pub fn modulus_bits(&self) -> usize {
        self.modulus_bits
    }

    /// Signature length in bytes
    pub fn modulus_len(&self) -> usize {
        self.modulus_bits.div_ceil(8)
    }

    /// SHA-256 of the SPKI DER, hex-encoded
    ///
    /// Identifies the key in logs and audit reports without printing it.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.spki_der);
        hex::encode(hasher.finalize())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("fingerprint", &self.fingerprint())
            .field("modulus_bits", &self.modulus_bits)
            .finish()
    }
}

/// The process-wide signing key pair
///
/// Built once and shared as `Arc<KeyPair>`. Nothing mutates it afterwards.
pub struct KeyPair {
    signing_key: RsaKeyPair,
    public_key: PublicKey,
    rng: SystemRandom,
}

impl KeyPair {
    /// Load a PKCS#8 private key and its SPKI public key
    ///
    /// Fails if either half is malformed, not RSA, outside the accepted
    /// modulus range, or if the two halves do not belong together.
    pub fn from_pem(private_pem: &str, public_pem: &str) -> Result<Self, IntegrityError> {
        if private_pem.trim().is_empty() {
            return Err(config_error("Private key is empty"));
        }

        let parsed = pem::parse(private_pem)
            .map_err(|e| config_error(format!("Failed to parse private key PEM: {}", e)))?;

        if parsed.tag() == PKCS1_PRIVATE_LABEL {
            return Err(config_error(
                "Private key is PKCS#1 ('RSA PRIVATE KEY'); convert it with `openssl pkcs8 -topk8 -nocrypt`",
            ));
        }
        if parsed.tag() != PKCS8_PRIVATE_LABEL {
            return Err(config_error(format!(
                "Unexpected private key PEM label '{}': expected '{}'",
                parsed.tag(),
                PKCS8_PRIVATE_LABEL
            )));
        }

        let pkcs8_der = Zeroizing::new(parsed.into_contents());

        let key_info = PrivateKeyInfo::from_der(&pkcs8_der)
            .map_err(|e| config_error(format!("Failed to parse PKCS8 DER: {}", e)))?;
        if key_info.algorithm.oid != RSA_ENCRYPTION {
            return Err(config_error(format!(
                "Private key algorithm {} is not RSA",
                key_info.algorithm.oid
            )));
        }

        let signing_key = RsaKeyPair::from_pkcs8(&pkcs8_der)
            .map_err(|e| config_error(format!("Rejected RSA private key: {}", e)))?;
        check_modulus_bits(signing_key.public_modulus_len() * 8)?;

        let public_key = PublicKey::from_pem(public_pem)?;
        if signing_key.public_key().as_ref() != public_key.rsa_der() {
            return Err(config_error(
                "Public key does not match private key",
            ));
        }

        info!(
            key_id = %public_key.fingerprint(),
            modulus_bits = public_key.modulus_bits(),
            "Record signing key loaded"
        );

        Ok(Self {
            signing_key,
            public_key,
            rng: SystemRandom::new(),
        })
    }

    /// Load the key pair named by configuration
    pub fn from_config(config: &Config) -> Result<Self, IntegrityError> {
        Self::from_pem(
            config.private_key_pem.expose_secret(),
            &config.public_key_pem,
        )
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub(crate) fn signing_key(&self) -> &RsaKeyPair {
        &self.signing_key
    }

    pub(crate) fn rng(&self) -> &SystemRandom {
        &self.rng
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

fn config_error(msg: impl Into<String>) -> IntegrityError {
    IntegrityError::ConfigurationError(msg.into())
}

fn check_modulus_bits(bits: usize) -> Result<(), IntegrityError> {
    if !(MIN_MODULUS_BITS..=MAX_MODULUS_BITS).contains(&bits) {
        return Err(config_error(format!(
            "RSA modulus is {} bits: must be between {} and {}",
            bits, MIN_MODULUS_BITS, MAX_MODULUS_BITS
        )));
    }
    Ok(())
}

/// Bit length of the modulus in a DER `RSAPublicKey { n, e }`
fn rsa_modulus_bits(rsa_der: &[u8]) -> der::Result<usize> {
    let mut reader = SliceReader::new(rsa_der)?;
    let (len, leading) = reader.sequence(|seq| {
        let modulus = UintRef::decode(seq)?;
        let _exponent = UintRef::decode(seq)?;
        let bytes = modulus.as_bytes();
        Ok((bytes.len(), bytes.first().copied().unwrap_or(0)))
    })?;

    if len == 0 {
        return Ok(0);
    }
    Ok((len - 1) * 8 + (8 - leading.leading_zeros() as usize))
}
