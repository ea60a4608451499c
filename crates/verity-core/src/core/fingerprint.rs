// crates/verity-core/src/core/fingerprint.rs
// ============================================================================
// Module: Verity Certificate Fingerprints
// Description: RFC 8785 canonical JSON digests for certificate payloads.
// Purpose: Detect payload tampering between issuance and verification.
// Dependencies: serde, serde_jcs, sha2
// ============================================================================

//! ## Overview
//! Certificate payloads are fingerprinted at issuance by hashing their
//! RFC 8785 (JCS) canonical JSON form with SHA-256. Verification recomputes
//! the digest and fails closed on mismatch, so a record altered at rest is
//! reported as corrupt rather than served as authentic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when computing payload fingerprints.
#[derive(Debug, Error)]
pub enum FingerprintError {
    /// JSON canonicalization failed.
    #[error("failed to canonicalize payload: {0}")]
    Canonicalization(String),
}

// ============================================================================
// SECTION: Fingerprint
// ============================================================================

/// SHA-256 digest over a payload's canonical JSON form.
///
/// Wire form: `sha256:<lowercase hex>`.
///
/// # Invariants
/// - Computed once at issuance; stored verbatim on the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Computes the fingerprint of a serializable payload.
    ///
    /// # Errors
    ///
    /// Returns [`FingerprintError::Canonicalization`] when the payload
    /// cannot be serialized to canonical JSON.
    pub fn compute<T: Serialize + ?Sized>(payload: &T) -> Result<Self, FingerprintError> {
        let bytes = serde_jcs::to_vec(payload)
            .map_err(|err| FingerprintError::Canonicalization(err.to_string()))?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hasher.finalize();
        Ok(Self(format!("sha256:{}", hex_encode(&digest))))
    }

    /// Recomputes the payload digest and compares it to this fingerprint.
    ///
    /// # Errors
    ///
    /// Returns [`FingerprintError::Canonicalization`] when the payload
    /// cannot be serialized to canonical JSON.
    pub fn matches<T: Serialize + ?Sized>(&self, payload: &T) -> Result<bool, FingerprintError> {
        Ok(Self::compute(payload)? == *self)
    }

    /// Returns the fingerprint as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Hex Encoding
// ============================================================================

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================
