// crates/verity-core/src/core/codegen.rs
// ============================================================================
// Module: Verity Code Generation
// Description: Composition of human-readable document codes from sequences.
// Purpose: Turn counter values into formatted codes with hard yearly ceilings.
// Dependencies: crate::core::{identifiers, time}, serde, thiserror
// ============================================================================

//! ## Overview
//! Document codes compose a prefix, an epoch year, and a zero-padded
//! sequence value drawn from a composite counter keyed by `(lane, year)`.
//! The key space itself encodes the epoch: a new year lazily starts a new
//! counter, so sequences reset without any scheduled rollover. Each lane has
//! a hard ceiling fixed by the printed field width; exceeding it is a fatal,
//! non-retryable error because the yearly quota is exhausted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::CertificateCode;
use crate::core::identifiers::EmployeeCode;
use crate::core::identifiers::OfferLetterNumber;
use crate::core::time::IssueDate;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Hard ceiling for staff codes (4-digit printed field).
pub const STAFF_SEQUENCE_CEILING: u64 = 9_999;
/// Hard ceiling for certificate codes and offer letter numbers (6 digits).
pub const DOCUMENT_SEQUENCE_CEILING: u64 = 999_999;
/// Default organization prefix for staff codes.
pub const DEFAULT_ORG_PREFIX: &str = "SWT";
/// Fixed prefix for certificate codes.
pub const CERTIFICATE_CODE_PREFIX: &str = "CERT";
/// Fixed prefix for offer letter numbers.
pub const OFFER_NUMBER_PREFIX: &str = "OL";

// ============================================================================
// SECTION: Staff Kinds
// ============================================================================

/// Kind of staff member a staff code is issued for.
///
/// # Invariants
/// - Wire form is `employee` or `intern`; anything else normalizes to employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffKind {
    /// Regular employee (`EMP` tag).
    Employee,
    /// Intern (`INT` tag).
    Intern,
}

impl StaffKind {
    /// Normalizes a raw kind string; unknown inputs fall back to employee.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("intern") {
            Self::Intern
        } else {
            Self::Employee
        }
    }

    /// Returns the canonical code tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Employee => "EMP",
            Self::Intern => "INT",
        }
    }

    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Intern => "intern",
        }
    }
}

impl fmt::Display for StaffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Document Kinds
// ============================================================================

/// Kind of identity document, used for counter naming and telemetry labels.
///
/// # Invariants
/// - Variants are stable for labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Employee or intern ID card.
    EmployeeId,
    /// Training or service certificate.
    Certificate,
    /// Offer letter.
    OfferLetter,
}

impl DocumentKind {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmployeeId => "employee_id",
            Self::Certificate => "certificate",
            Self::OfferLetter => "offer_letter",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Issue Lanes
// ============================================================================

/// Counter lane for composite `(lane, year)` sequence keys.
///
/// Lanes are independent: exhausting the employee quota never affects
/// certificate or offer letter numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueLane {
    /// Employee staff codes.
    Employee,
    /// Intern staff codes.
    Intern,
    /// Certificate codes.
    Certificate,
    /// Offer letter numbers.
    OfferLetter,
}

impl IssueLane {
    /// Returns the stable counter key label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Intern => "intern",
            Self::Certificate => "certificate",
            Self::OfferLetter => "offer_letter",
        }
    }

    /// Returns the hard sequence ceiling for the lane.
    #[must_use]
    pub const fn ceiling(self) -> u64 {
        match self {
            Self::Employee | Self::Intern => STAFF_SEQUENCE_CEILING,
            Self::Certificate | Self::OfferLetter => DOCUMENT_SEQUENCE_CEILING,
        }
    }
}

impl fmt::Display for IssueLane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<StaffKind> for IssueLane {
    fn from(value: StaffKind) -> Self {
        match value {
            StaffKind::Employee => Self::Employee,
            StaffKind::Intern => Self::Intern,
        }
    }
}

// ============================================================================
// SECTION: Epoch Years
// ============================================================================

/// Epoch component of a composite counter key.
///
/// Staff codes use the two-digit year; certificates and offer letters use
/// the four-digit year. The stored form is the exact printed form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpochYear(String);

impl EpochYear {
    /// Derives the two-digit epoch for staff codes.
    #[must_use]
    pub fn short(date: IssueDate) -> Self {
        Self(format!("{:02}", date.full_year().rem_euclid(100)))
    }

    /// Derives the four-digit epoch for certificates and offer letters.
    #[must_use]
    pub fn full(date: IssueDate) -> Self {
        Self(format!("{:04}", date.full_year()))
    }

    /// Returns the epoch as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EpochYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Composite counter key: lane plus epoch year.
///
/// # Invariants
/// - Counters keyed by a series are monotonic, never deleted, never decremented.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueSeries {
    /// Counter lane.
    pub lane: IssueLane,
    /// Epoch year in printed form.
    pub year: EpochYear,
}

impl IssueSeries {
    /// Creates a series key from explicit parts.
    #[must_use]
    pub const fn new(lane: IssueLane, year: EpochYear) -> Self {
        Self {
            lane,
            year,
        }
    }

    /// Derives the series for staff codes of the given kind and date.
    #[must_use]
    pub fn staff(kind: StaffKind, date: IssueDate) -> Self {
        Self::new(kind.into(), EpochYear::short(date))
    }

    /// Derives the series for certificate codes of the given date.
    #[must_use]
    pub fn certificate(date: IssueDate) -> Self {
        Self::new(IssueLane::Certificate, EpochYear::full(date))
    }

    /// Derives the series for offer letter numbers of the given date.
    #[must_use]
    pub fn offer_letter(date: IssueDate) -> Self {
        Self::new(IssueLane::OfferLetter, EpochYear::full(date))
    }
}

// ============================================================================
// SECTION: Organization Prefix
// ============================================================================

/// Organization prefix printed at the front of staff codes.
///
/// # Invariants
/// - 2 to 5 uppercase ASCII letters; the shape is a public contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OrgPrefix(String);

impl OrgPrefix {
    /// Validates and wraps an organization prefix.
    ///
    /// # Errors
    ///
    /// Returns [`CodeError::InvalidPrefix`] when the prefix is not 2-5
    /// uppercase ASCII letters.
    pub fn new(raw: &str) -> Result<Self, CodeError> {
        let ok = (2..=5).contains(&raw.len())
            && raw.bytes().all(|byte| byte.is_ascii_uppercase());
        if ok {
            Ok(Self(raw.to_string()))
        } else {
            Err(CodeError::InvalidPrefix(raw.to_string()))
        }
    }

    /// Returns the prefix as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OrgPrefix {
    fn default() -> Self {
        Self(DEFAULT_ORG_PREFIX.to_string())
    }
}

impl fmt::Display for OrgPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when composing document codes.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum CodeError {
    /// The yearly sequence for a lane is exhausted; callers must escalate.
    #[error("yearly sequence exhausted for {lane} {year}: limit {ceiling}")]
    LimitExceeded {
        /// Counter lane that ran out.
        lane: IssueLane,
        /// Epoch year in printed form.
        year: String,
        /// Hard ceiling for the lane.
        ceiling: u64,
    },
    /// The organization prefix does not match the printed contract.
    #[error("invalid organization prefix: {0:?} (expected 2-5 uppercase letters)")]
    InvalidPrefix(String),
}

// ============================================================================
// SECTION: Code Composition
// ============================================================================

/// Composes a staff code from a drawn sequence value.
///
/// # Errors
///
/// Returns [`CodeError::LimitExceeded`] when the value is above the 4-digit
/// ceiling. The counter has already advanced; slots are never reclaimed.
pub fn staff_code(
    prefix: &OrgPrefix,
    kind: StaffKind,
    date: IssueDate,
    sequence: u64,
) -> Result<EmployeeCode, CodeError> {
    let year = EpochYear::short(date);
    if sequence > STAFF_SEQUENCE_CEILING {
        return Err(CodeError::LimitExceeded {
            lane: kind.into(),
            year: year.as_str().to_string(),
            ceiling: STAFF_SEQUENCE_CEILING,
        });
    }
    Ok(EmployeeCode::from_formatted(format!(
        "{prefix}-{year}-{tag}-{sequence:04}",
        tag = kind.tag()
    )))
}

/// Composes a certificate code from a drawn sequence value.
///
/// # Errors
///
/// Returns [`CodeError::LimitExceeded`] when the value is above the 6-digit
/// ceiling.
pub fn certificate_code(date: IssueDate, sequence: u64) -> Result<CertificateCode, CodeError> {
    let year = EpochYear::full(date);
    if sequence > DOCUMENT_SEQUENCE_CEILING {
        return Err(CodeError::LimitExceeded {
            lane: IssueLane::Certificate,
            year: year.as_str().to_string(),
            ceiling: DOCUMENT_SEQUENCE_CEILING,
        });
    }
    Ok(CertificateCode::from_formatted(format!(
        "{CERTIFICATE_CODE_PREFIX}-{year}-{sequence:06}"
    )))
}

/// Composes an offer letter number from a drawn sequence value.
///
/// # Errors
///
/// Returns [`CodeError::LimitExceeded`] when the value is above the 6-digit
/// ceiling.
pub fn offer_number(date: IssueDate, sequence: u64) -> Result<OfferLetterNumber, CodeError> {
    let year = EpochYear::full(date);
    if sequence > DOCUMENT_SEQUENCE_CEILING {
        return Err(CodeError::LimitExceeded {
            lane: IssueLane::OfferLetter,
            year: year.as_str().to_string(),
            ceiling: DOCUMENT_SEQUENCE_CEILING,
        });
    }
    Ok(OfferLetterNumber::from_formatted(format!(
        "{OFFER_NUMBER_PREFIX}-{year}-{sequence:06}"
    )))
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

    use time::macros::date;

    use super::*;

    #[test]
    fn staff_code_formats_with_zero_padding() {
        let prefix = OrgPrefix::default();
        let code =
            staff_code(&prefix, StaffKind::Employee, IssueDate::new(date!(2025 - 06 - 01)), 7)
                .unwrap();
        assert_eq!(code.as_str(), "SWT-25-EMP-0007");
    }

    #[test]
    fn staff_code_uses_intern_tag() {
        let prefix = OrgPrefix::default();
        let code = staff_code(&prefix, StaffKind::Intern, IssueDate::new(date!(2031 - 01 - 02)), 42)
            .unwrap();
        assert_eq!(code.as_str(), "SWT-31-INT-0042");
    }

    #[test]
    fn staff_code_enforces_ceiling() {
        let prefix = OrgPrefix::default();
        let date = IssueDate::new(date!(2025 - 06 - 01));
        assert!(staff_code(&prefix, StaffKind::Employee, date, 9_999).is_ok());
        let err = staff_code(&prefix, StaffKind::Employee, date, 10_000).unwrap_err();
        assert!(matches!(err, CodeError::LimitExceeded { ceiling: 9_999, .. }));
    }

    #[test]
    fn document_codes_use_full_year_and_six_digits() {
        let date = IssueDate::new(date!(2025 - 06 - 01));
        assert_eq!(certificate_code(date, 123).unwrap().as_str(), "CERT-2025-000123");
        assert_eq!(offer_number(date, 123_456).unwrap().as_str(), "OL-2025-123456");
        assert!(offer_number(date, 1_000_000).is_err());
    }

    #[test]
    fn normalize_defaults_unknown_kinds_to_employee() {
        assert_eq!(StaffKind::normalize("intern"), StaffKind::Intern);
        assert_eq!(StaffKind::normalize("Intern "), StaffKind::Intern);
        assert_eq!(StaffKind::normalize("employee"), StaffKind::Employee);
        assert_eq!(StaffKind::normalize("contractor"), StaffKind::Employee);
    }

    #[test]
    fn org_prefix_rejects_bad_shapes() {
        assert!(OrgPrefix::new("SWT").is_ok());
        assert!(OrgPrefix::new("AB").is_ok());
        assert!(OrgPrefix::new("A").is_err());
        assert!(OrgPrefix::new("TOOLONG").is_err());
        assert!(OrgPrefix::new("swt").is_err());
        assert!(OrgPrefix::new("SW1").is_err());
    }

    #[test]
    fn series_keys_split_by_lane_and_year() {
        let date = IssueDate::new(date!(2025 - 06 - 01));
        let employee = IssueSeries::staff(StaffKind::Employee, date);
        let intern = IssueSeries::staff(StaffKind::Intern, date);
        assert_ne!(employee, intern);
        assert_eq!(employee.year.as_str(), "25");
        assert_eq!(IssueSeries::certificate(date).year.as_str(), "2025");
    }
}
