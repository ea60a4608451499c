// crates/verity-core/src/core/identifiers.rs
// ============================================================================
// Module: Verity Identifiers
// Description: Canonical identifiers for issued documents and counters.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde, uuid
// ============================================================================

//! ## Overview
//! This module defines the identifiers used throughout Verity. Every issued
//! document carries two independent identities: a human-readable code that is
//! printed on the document (a public contract with a fixed shape), and an
//! opaque UUID used in verification links and QR payloads. Code parsers are
//! strict; verification uses them to classify raw tokens without ever
//! revealing to a caller whether a token was malformed or merely absent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when parsing identifier wire forms.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum CodeParseError {
    /// Input does not match the expected identifier shape.
    #[error("malformed identifier: expected {expected}")]
    Malformed {
        /// Human-readable description of the expected shape.
        expected: &'static str,
    },
}

// ============================================================================
// SECTION: Staff Codes
// ============================================================================

/// Human-readable employee or intern identifier.
///
/// Wire form: `PREFIX-YY-TAG-NNNN`, e.g. `SWT-25-EMP-0007`. The shape is a
/// public contract embedded in QR codes and printed ID cards.
///
/// # Invariants
/// - Constructed only by the issuer or via [`EmployeeCode::parse`].
/// - Immutable once assigned to a record; never reused after deletion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeCode(String);

impl EmployeeCode {
    /// Parses a raw string as an employee code, validating the shape.
    ///
    /// # Errors
    ///
    /// Returns [`CodeParseError::Malformed`] when the input does not match
    /// `PREFIX-YY-(EMP|INT)-NNNN`.
    pub fn parse(raw: &str) -> Result<Self, CodeParseError> {
        if is_staff_code(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(CodeParseError::Malformed {
                expected: "PREFIX-YY-(EMP|INT)-NNNN",
            })
        }
    }

    /// Wraps an already-formatted code produced by the issuer.
    pub(crate) fn from_formatted(code: String) -> Self {
        Self(code)
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Returns true when the input matches the staff code shape.
fn is_staff_code(raw: &str) -> bool {
    let mut parts = raw.split('-');
    let (Some(prefix), Some(year), Some(tag), Some(seq), None) =
        (parts.next(), parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    is_org_prefix(prefix)
        && is_digits(year, 2)
        && (tag == "EMP" || tag == "INT")
        && is_digits(seq, 4)
}

// ============================================================================
// SECTION: Certificate Codes
// ============================================================================

/// Human-readable certificate identifier.
///
/// Wire form: `CERT-YYYY-NNNNNN`, keyed by a certificate-only counter so
/// staff quota exhaustion never affects certificate numbering.
///
/// # Invariants
/// - Constructed only by the issuer or via [`CertificateCode::parse`].
/// - Immutable once assigned to a record; never reused after deletion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateCode(String);

impl CertificateCode {
    /// Parses a raw string as a certificate code, validating the shape.
    ///
    /// # Errors
    ///
    /// Returns [`CodeParseError::Malformed`] when the input does not match
    /// `CERT-YYYY-NNNNNN`.
    pub fn parse(raw: &str) -> Result<Self, CodeParseError> {
        if is_certificate_code(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(CodeParseError::Malformed {
                expected: "CERT-YYYY-NNNNNN",
            })
        }
    }

    /// Wraps an already-formatted code produced by the issuer.
    pub(crate) fn from_formatted(code: String) -> Self {
        Self(code)
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CertificateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Returns true when the input matches the certificate code shape.
fn is_certificate_code(raw: &str) -> bool {
    let mut parts = raw.split('-');
    let (Some(prefix), Some(year), Some(seq), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    prefix == "CERT" && is_digits(year, 4) && is_digits(seq, 6)
}

// ============================================================================
// SECTION: Offer Letter Numbers
// ============================================================================

/// Human-readable offer letter identifier.
///
/// Wire form: `OL-YYYY-NNNNNN`, keyed by an offer-letter-only counter.
///
/// # Invariants
/// - Constructed only by the issuer or via [`OfferLetterNumber::parse`].
/// - Immutable once assigned to a record; never reused after deletion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferLetterNumber(String);

impl OfferLetterNumber {
    /// Parses a raw string as an offer letter number, validating the shape.
    ///
    /// # Errors
    ///
    /// Returns [`CodeParseError::Malformed`] when the input does not match
    /// `OL-YYYY-NNNNNN`.
    pub fn parse(raw: &str) -> Result<Self, CodeParseError> {
        if is_offer_number(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(CodeParseError::Malformed {
                expected: "OL-YYYY-NNNNNN",
            })
        }
    }

    /// Wraps an already-formatted number produced by the issuer.
    pub(crate) fn from_formatted(number: String) -> Self {
        Self(number)
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OfferLetterNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Returns true when the input matches the offer letter number shape.
fn is_offer_number(raw: &str) -> bool {
    let mut parts = raw.split('-');
    let (Some(prefix), Some(year), Some(seq), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    prefix == "OL" && is_digits(year, 4) && is_digits(seq, 6)
}

// ============================================================================
// SECTION: Entity UUIDs
// ============================================================================

/// Opaque random identifier used for verification links and QR payloads.
///
/// Independent of the human-readable code sequence: the UUID reveals nothing
/// about issue order or volume.
///
/// # Invariants
/// - Immutable once assigned to a record.
/// - Generated from a cryptographically random source (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityUuid(Uuid);

impl EntityUuid {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID value.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses a raw string as a UUID.
    ///
    /// # Errors
    ///
    /// Returns [`CodeParseError::Malformed`] when the input is not a valid
    /// UUID wire form.
    pub fn parse(raw: &str) -> Result<Self, CodeParseError> {
        Uuid::parse_str(raw).map(Self).map_err(|_| CodeParseError::Malformed {
            expected: "UUID",
        })
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EntityUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Counter Names
// ============================================================================

/// Name key for a generic named sequence counter.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterName(String);

impl CounterName {
    /// Creates a new counter name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CounterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for CounterName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CounterName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Token Classification
// ============================================================================

/// A raw verification token classified by wire shape.
///
/// Verification accepts either a human-readable code or a UUID; the shapes
/// are disjoint, so classification picks the lookup index. Tokens matching
/// no known shape still flow through verification so that callers observe a
/// single uniform miss, never a format diagnosis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyToken {
    /// Employee or intern code.
    Staff(EmployeeCode),
    /// Certificate code.
    Certificate(CertificateCode),
    /// Offer letter number.
    OfferLetter(OfferLetterNumber),
    /// Opaque verification UUID.
    Uuid(EntityUuid),
    /// Input matching no known identifier shape.
    Unrecognized(String),
}

impl VerifyToken {
    /// Classifies a raw token by shape, trimming surrounding whitespace.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        let token = raw.trim();
        if let Ok(uuid) = EntityUuid::parse(token) {
            return Self::Uuid(uuid);
        }
        if let Ok(code) = EmployeeCode::parse(token) {
            return Self::Staff(code);
        }
        if let Ok(code) = CertificateCode::parse(token) {
            return Self::Certificate(code);
        }
        if let Ok(number) = OfferLetterNumber::parse(token) {
            return Self::OfferLetter(number);
        }
        Self::Unrecognized(token.to_string())
    }
}

impl From<&str> for VerifyToken {
    fn from(value: &str) -> Self {
        Self::classify(value)
    }
}

// ============================================================================
// SECTION: Shape Helpers
// ============================================================================

/// Returns true when the segment is exactly `len` ASCII digits.
fn is_digits(segment: &str, len: usize) -> bool {
    segment.len() == len && segment.bytes().all(|byte| byte.is_ascii_digit())
}

/// Returns true when the segment is a plausible organization prefix.
fn is_org_prefix(segment: &str) -> bool {
    (2..=5).contains(&segment.len()) && segment.bytes().all(|byte| byte.is_ascii_uppercase())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        reason = "Test-only assertions and helpers are permitted."
    )]

    use super::*;

    #[test]
    fn staff_code_parses_both_tags() {
        assert!(EmployeeCode::parse("SWT-25-EMP-0007").is_ok());
        assert!(EmployeeCode::parse("SWT-25-INT-9999").is_ok());
    }

    #[test]
    fn staff_code_rejects_wrong_widths() {
        assert!(EmployeeCode::parse("SWT-2025-EMP-0007").is_err());
        assert!(EmployeeCode::parse("SWT-25-EMP-007").is_err());
        assert!(EmployeeCode::parse("SWT-25-MGR-0007").is_err());
        assert!(EmployeeCode::parse("swt-25-emp-0007").is_err());
        assert!(EmployeeCode::parse("SWT-25-EMP-0007-X").is_err());
    }

    #[test]
    fn certificate_and_offer_shapes_are_disjoint() {
        assert!(CertificateCode::parse("CERT-2025-000123").is_ok());
        assert!(OfferLetterNumber::parse("OL-2025-000123").is_ok());
        assert!(CertificateCode::parse("OL-2025-000123").is_err());
        assert!(OfferLetterNumber::parse("CERT-2025-000123").is_err());
    }

    #[test]
    fn classify_picks_the_matching_shape() {
        let uuid = EntityUuid::random();
        assert_eq!(VerifyToken::classify(&uuid.to_string()), VerifyToken::Uuid(uuid));
        assert!(matches!(VerifyToken::classify(" SWT-25-EMP-0001 "), VerifyToken::Staff(_)));
        assert!(matches!(VerifyToken::classify("CERT-2025-000001"), VerifyToken::Certificate(_)));
        assert!(matches!(VerifyToken::classify("OL-2024-123456"), VerifyToken::OfferLetter(_)));
        assert!(matches!(VerifyToken::classify("garbage"), VerifyToken::Unrecognized(_)));
    }
}
