// crates/verity-core/src/core/view.rs
// ============================================================================
// Module: Verity Public Views
// Description: Redacted projections served to unauthenticated verifiers.
// Purpose: Expose only trust-relevant fields, never payroll or contact data.
// Dependencies: crate::core::{codegen, identifiers, records}, serde
// ============================================================================

//! ## Overview
//! Verification answers one question for an untrusted caller: is this
//! document genuine, and what is its current standing. Projections therefore
//! carry identity, type, organizational placement, and status, and exclude
//! salary, bank details, government identifiers, and contact information in
//! every record state. Revoked and expired records still project, with the
//! status field carrying the state, so a revoked credential can never pass
//! itself off as merely unknown.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use time::Date;

use crate::core::codegen::StaffKind;
use crate::core::identifiers::CertificateCode;
use crate::core::identifiers::EmployeeCode;
use crate::core::identifiers::OfferLetterNumber;
use crate::core::records::CertificateRecord;
use crate::core::records::CredentialStatus;
use crate::core::records::EmployeeRecord;
use crate::core::records::OfferLetterRecord;

// ============================================================================
// SECTION: Employee View
// ============================================================================

/// Redacted employee ID projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeePublicView {
    /// Full name.
    pub name: String,
    /// Human-readable staff code.
    pub code: EmployeeCode,
    /// Staff kind, serialized as `type` to match the printed card.
    #[serde(rename = "type")]
    pub kind: StaffKind,
    /// Department name.
    pub department: String,
    /// Job title.
    pub designation: String,
    /// Lifecycle status.
    pub status: CredentialStatus,
    /// Joining date, when recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<Date>,
}

impl From<&EmployeeRecord> for EmployeePublicView {
    fn from(record: &EmployeeRecord) -> Self {
        Self {
            name: record.name.clone(),
            code: record.code.clone(),
            kind: record.kind,
            department: record.department.clone(),
            designation: record.designation.clone(),
            status: record.status,
            joining_date: record.joining_date,
        }
    }
}

// ============================================================================
// SECTION: Certificate View
// ============================================================================

/// Redacted certificate projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificatePublicView {
    /// Name of the certificate holder.
    pub holder_name: String,
    /// Human-readable certificate code.
    pub code: CertificateCode,
    /// Certificate type label.
    pub certificate_type: String,
    /// Domain field from the payload, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Technology field from the payload, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,
    /// Calendar year of issue.
    pub issue_year: i32,
    /// Lifecycle status.
    pub status: CredentialStatus,
}

impl From<&CertificateRecord> for CertificatePublicView {
    fn from(record: &CertificateRecord) -> Self {
        Self {
            holder_name: record.holder_name.clone(),
            code: record.code.clone(),
            certificate_type: record.certificate_type.clone(),
            domain: payload_string(record, "domain"),
            technology: payload_string(record, "technology"),
            issue_year: record.issue_date.year(),
            status: record.status,
        }
    }
}

/// Extracts a string field from the certificate payload.
fn payload_string(record: &CertificateRecord, key: &str) -> Option<String> {
    record.payload.get(key).and_then(|value| value.as_str()).map(ToString::to_string)
}

// ============================================================================
// SECTION: Offer Letter View
// ============================================================================

/// Redacted offer letter projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferLetterPublicView {
    /// Candidate name.
    pub candidate_name: String,
    /// Human-readable offer letter number.
    pub number: OfferLetterNumber,
    /// Offered designation, when recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    /// Validity period as printed on the letter, when recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_period: Option<String>,
    /// Calendar year of issue.
    pub issue_year: i32,
    /// Status as observed on the verification date.
    pub status: CredentialStatus,
}

impl OfferLetterPublicView {
    /// Projects an offer letter record, computing expiry as of `today`.
    #[must_use]
    pub fn from_record(record: &OfferLetterRecord, today: Date) -> Self {
        Self {
            candidate_name: record.candidate_name.clone(),
            number: record.number.clone(),
            designation: record.designation.clone(),
            validity_period: record.validity_period.clone(),
            issue_year: record.issue_year,
            status: record.effective_status(today),
        }
    }
}

// ============================================================================
// SECTION: Combined View
// ============================================================================

/// Verification result for any document kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PublicView {
    /// Employee or intern ID.
    EmployeeId(EmployeePublicView),
    /// Certificate.
    Certificate(CertificatePublicView),
    /// Offer letter.
    OfferLetter(OfferLetterPublicView),
}

impl PublicView {
    /// Returns the projected lifecycle status.
    #[must_use]
    pub const fn status(&self) -> CredentialStatus {
        match self {
            Self::EmployeeId(view) => view.status,
            Self::Certificate(view) => view.status,
            Self::OfferLetter(view) => view.status,
        }
    }
}
