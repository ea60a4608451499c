// crates/verity-core/src/core/records.rs
// ============================================================================
// Module: Verity Identity Records
// Description: Persistent record shapes for employees, certificates, offers.
// Purpose: Define typed records with dual identity and one-way revocation.
// Dependencies: crate::core::{codegen, fingerprint, identifiers, time}, serde
// ============================================================================

//! ## Overview
//! Each identity record carries a write-once human-readable code and a
//! write-once verification UUID, a mutable status, and mutable domain
//! fields. Statuses follow a one-way machine: an active record may be
//! revoked (with a mandatory reason) or expired, and revocation is terminal.
//! Records replace the original system's loosely shaped documents with
//! explicit structs validated at the boundary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use time::Date;

use crate::core::codegen::StaffKind;
use crate::core::fingerprint::Fingerprint;
use crate::core::identifiers::CertificateCode;
use crate::core::identifiers::EmployeeCode;
use crate::core::identifiers::EntityUuid;
use crate::core::identifiers::OfferLetterNumber;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Status Machine
// ============================================================================

/// Lifecycle status of an issued document.
///
/// # Invariants
/// - `Revoked` is terminal; no transition reverses it.
/// - Transitions into `Revoked` require a recorded reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialStatus {
    /// Document is valid and in force.
    Active,
    /// Document is suspended but may be reactivated.
    Inactive,
    /// Document is issued but not yet in force.
    Pending,
    /// Document was revoked; terminal.
    Revoked,
    /// Document lapsed by time.
    Expired,
}

impl CredentialStatus {
    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
            Self::Revoked => "revoked",
            Self::Expired => "expired",
        }
    }

    /// Applies a status transition, enforcing the one-way machine.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidTransition`] when the transition is not
    /// permitted (in particular, any transition out of `Revoked`).
    pub fn transition(self, to: Self) -> Result<Self, RecordError> {
        if self == to {
            return Ok(to);
        }
        match (self, to) {
            (Self::Active, Self::Revoked | Self::Expired | Self::Inactive)
            | (Self::Inactive | Self::Pending, Self::Active)
            | (Self::Pending | Self::Inactive, Self::Revoked) => Ok(to),
            (from, to) => Err(RecordError::InvalidTransition {
                from,
                to,
            }),
        }
    }
}

impl fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employment arrangement recorded on employee IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    /// Full-time employment.
    FullTime,
    /// Part-time employment.
    PartTime,
    /// Fixed-term contract.
    Contract,
    /// Internship.
    Intern,
}

impl EmploymentType {
    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullTime => "full_time",
            Self::PartTime => "part_time",
            Self::Contract => "contract",
            Self::Intern => "intern",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by record state changes.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The requested status transition is not permitted.
    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: CredentialStatus,
        /// Requested status.
        to: CredentialStatus,
    },
    /// Revocation was requested without a reason.
    #[error("revocation requires a non-empty reason")]
    MissingRevocationReason,
}

// ============================================================================
// SECTION: Employee Records
// ============================================================================

/// Persistent employee or intern ID record.
///
/// # Invariants
/// - `code` and `uuid` are write-once; updates never touch them.
/// - Sensitive payroll fields never appear in public projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Numeric record identifier drawn from the generic counter.
    pub id: u64,
    /// Human-readable staff code (write-once).
    pub code: EmployeeCode,
    /// Opaque verification UUID (write-once).
    pub uuid: EntityUuid,
    /// Staff kind the code was issued for.
    pub kind: StaffKind,
    /// Lifecycle status.
    pub status: CredentialStatus,
    /// Full name.
    pub name: String,
    /// Job title.
    pub designation: String,
    /// Department name.
    pub department: String,
    /// Employment arrangement.
    pub employment_type: EmploymentType,
    /// Work location.
    pub work_location: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Postal address (sensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Emergency contact name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    /// Emergency contact phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_phone: Option<String>,
    /// Date of birth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<Date>,
    /// Joining date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<Date>,
    /// Salary figure (sensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    /// Bank account number (sensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<String>,
    /// Aadhar number (sensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aadhar_number: Option<String>,
    /// PAN number (sensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_number: Option<String>,
    /// Blood group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    /// Reporting manager name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    /// Stored photo reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// Verification URL embedded in the printed QR code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_payload: Option<String>,
    /// Revocation timestamp, when revoked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoked_at: Option<Timestamp>,
    /// Revocation reason, when revoked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revocation_reason: Option<String>,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Last update timestamp.
    pub updated_at: Timestamp,
}

impl EmployeeRecord {
    /// Revokes the record with a mandatory reason.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::MissingRevocationReason`] for an empty reason
    /// and [`RecordError::InvalidTransition`] when the record is already
    /// revoked or otherwise cannot transition.
    pub fn revoke(&mut self, reason: &str, now: Timestamp) -> Result<(), RecordError> {
        apply_revocation(
            &mut self.status,
            &mut self.revoked_at,
            &mut self.revocation_reason,
            reason,
            now,
        )?;
        self.updated_at = now;
        Ok(())
    }

    /// Applies a field patch; identity fields are untouchable by construction.
    pub fn apply_update(&mut self, patch: EmployeeUpdate, now: Timestamp) {
        if let Some(designation) = patch.designation {
            self.designation = designation;
        }
        if let Some(department) = patch.department {
            self.department = department;
        }
        if let Some(work_location) = patch.work_location {
            self.work_location = work_location;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(manager) = patch.manager {
            self.manager = Some(manager);
        }
        if let Some(photo) = patch.photo {
            self.photo = Some(photo);
        }
        self.updated_at = now;
    }
}

/// Mutable-field patch for an employee record.
///
/// The patch deliberately has no code or uuid fields: identity is
/// write-once, enforced by construction rather than by a runtime check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    /// New job title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    /// New department.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// New work location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_location: Option<String>,
    /// New contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New contact phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// New reporting manager.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    /// New photo reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// Input shape for registering a new employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Full name.
    pub name: String,
    /// Job title.
    pub designation: String,
    /// Department name.
    pub department: String,
    /// Staff kind to issue the code for.
    pub kind: StaffKind,
    /// Employment arrangement.
    pub employment_type: EmploymentType,
    /// Work location.
    pub work_location: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Postal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Emergency contact name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    /// Emergency contact phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_phone: Option<String>,
    /// Date of birth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<Date>,
    /// Joining date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<Date>,
    /// Salary figure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    /// Bank account number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<String>,
    /// Aadhar number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aadhar_number: Option<String>,
    /// PAN number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_number: Option<String>,
    /// Blood group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    /// Reporting manager name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    /// Stored photo reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

// ============================================================================
// SECTION: Certificate Records
// ============================================================================

/// Persistent certificate record.
///
/// # Invariants
/// - `code` and `uuid` are write-once.
/// - `fingerprint` covers the canonical JSON form of `payload` and is
///   verified before the record is served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateRecord {
    /// Numeric record identifier drawn from the generic counter.
    pub id: u64,
    /// Human-readable certificate code (write-once).
    pub code: CertificateCode,
    /// Opaque verification UUID (write-once).
    pub uuid: EntityUuid,
    /// Name of the certificate holder.
    pub holder_name: String,
    /// Verification UUID of the holder's ID record, when linked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder_uuid: Option<EntityUuid>,
    /// Certificate type label.
    pub certificate_type: String,
    /// Certificate payload fields.
    pub payload: serde_json::Value,
    /// Digest over the canonical payload form.
    pub fingerprint: Fingerprint,
    /// Import batch identifier, when batch-issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    /// Payload schema version.
    pub schema_version: u32,
    /// Issue date.
    pub issue_date: Date,
    /// Operator who issued the certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_by: Option<String>,
    /// Lifecycle status.
    pub status: CredentialStatus,
    /// Revocation timestamp, when revoked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoked_at: Option<Timestamp>,
    /// Revocation reason, when revoked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revocation_reason: Option<String>,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Last update timestamp.
    pub updated_at: Timestamp,
}

impl CertificateRecord {
    /// Revokes the record with a mandatory reason.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::MissingRevocationReason`] for an empty reason
    /// and [`RecordError::InvalidTransition`] when the record cannot
    /// transition.
    pub fn revoke(&mut self, reason: &str, now: Timestamp) -> Result<(), RecordError> {
        apply_revocation(
            &mut self.status,
            &mut self.revoked_at,
            &mut self.revocation_reason,
            reason,
            now,
        )?;
        self.updated_at = now;
        Ok(())
    }
}

/// Input shape for issuing a new certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCertificate {
    /// Name of the certificate holder.
    pub holder_name: String,
    /// Verification UUID of the holder's ID record, when linked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder_uuid: Option<EntityUuid>,
    /// Certificate type label.
    pub certificate_type: String,
    /// Certificate payload fields.
    pub payload: serde_json::Value,
    /// Import batch identifier, when batch-issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    /// Operator issuing the certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_by: Option<String>,
}

// ============================================================================
// SECTION: Offer Letter Records
// ============================================================================

/// Persistent offer letter record.
///
/// # Invariants
/// - `number` and `uuid` are write-once.
/// - Expiry is computed at read time from `valid_until`; the stored status
///   is not rewritten by the passage of time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferLetterRecord {
    /// Numeric record identifier drawn from the generic counter.
    pub id: u64,
    /// Human-readable offer letter number (write-once).
    pub number: OfferLetterNumber,
    /// Opaque verification UUID (write-once).
    pub uuid: EntityUuid,
    /// Candidate name.
    pub candidate_name: String,
    /// Hiring company name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// Offered designation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    /// Offered department.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Offered salary (sensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    /// Proposed joining date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<Date>,
    /// Human-readable validity period as printed on the letter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validity_period: Option<String>,
    /// Date the offer lapses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<Date>,
    /// Work location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Candidate email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Candidate phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Import batch identifier, when batch-generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    /// Calendar year the offer was issued in.
    pub issue_year: i32,
    /// Operator who generated the letter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_by: Option<String>,
    /// Lifecycle status.
    pub status: CredentialStatus,
    /// Revocation timestamp, when revoked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoked_at: Option<Timestamp>,
    /// Revocation reason, when revoked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revocation_reason: Option<String>,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Last update timestamp.
    pub updated_at: Timestamp,
}

impl OfferLetterRecord {
    /// Revokes the record with a mandatory reason.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::MissingRevocationReason`] for an empty reason
    /// and [`RecordError::InvalidTransition`] when the record cannot
    /// transition.
    pub fn revoke(&mut self, reason: &str, now: Timestamp) -> Result<(), RecordError> {
        apply_revocation(
            &mut self.status,
            &mut self.revoked_at,
            &mut self.revocation_reason,
            reason,
            now,
        )?;
        self.updated_at = now;
        Ok(())
    }

    /// Returns the status as observed on `today`.
    ///
    /// An active offer past its `valid_until` date reads as expired; the
    /// stored status is left untouched so revocations remain visible.
    #[must_use]
    pub fn effective_status(&self, today: Date) -> CredentialStatus {
        match (self.status, self.valid_until) {
            (CredentialStatus::Active, Some(valid_until)) if today > valid_until => {
                CredentialStatus::Expired
            }
            (status, _) => status,
        }
    }
}

/// Input shape for issuing a new offer letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOfferLetter {
    /// Candidate name.
    pub candidate_name: String,
    /// Hiring company name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// Offered designation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    /// Offered department.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Offered salary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    /// Proposed joining date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<Date>,
    /// Human-readable validity period as printed on the letter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validity_period: Option<String>,
    /// Date the offer lapses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<Date>,
    /// Work location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Candidate email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Candidate phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Import batch identifier, when batch-generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    /// Operator generating the letter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_by: Option<String>,
}

// ============================================================================
// SECTION: Revocation Helper
// ============================================================================

/// Applies a revocation to status fields shared by all record kinds.
fn apply_revocation(
    status: &mut CredentialStatus,
    revoked_at: &mut Option<Timestamp>,
    revocation_reason: &mut Option<String>,
    reason: &str,
    now: Timestamp,
) -> Result<(), RecordError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(RecordError::MissingRevocationReason);
    }
    *status = status.transition(CredentialStatus::Revoked)?;
    *revoked_at = Some(now);
    *revocation_reason = Some(reason.to_string());
    Ok(())
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
    fn revoked_is_terminal() {
        let status = CredentialStatus::Active.transition(CredentialStatus::Revoked).unwrap();
        assert_eq!(status, CredentialStatus::Revoked);
        assert!(status.transition(CredentialStatus::Active).is_err());
        assert!(status.transition(CredentialStatus::Expired).is_err());
    }

    #[test]
    fn active_can_expire_or_suspend() {
        assert!(CredentialStatus::Active.transition(CredentialStatus::Expired).is_ok());
        assert!(CredentialStatus::Active.transition(CredentialStatus::Inactive).is_ok());
        assert!(CredentialStatus::Inactive.transition(CredentialStatus::Active).is_ok());
        assert!(CredentialStatus::Expired.transition(CredentialStatus::Active).is_err());
    }

    #[test]
    fn offer_expiry_is_computed_at_read_time() {
        let record = sample_offer(Some(date!(2025 - 03 - 31)));
        assert_eq!(record.effective_status(date!(2025 - 03 - 31)), CredentialStatus::Active);
        assert_eq!(record.effective_status(date!(2025 - 04 - 01)), CredentialStatus::Expired);
        assert_eq!(record.status, CredentialStatus::Active);
    }

    #[test]
    fn revoked_offer_stays_revoked_past_validity() {
        let mut record = sample_offer(Some(date!(2025 - 03 - 31)));
        record.revoke("issued in error", Timestamp::from_unix_millis(0)).unwrap();
        assert_eq!(record.effective_status(date!(2025 - 04 - 01)), CredentialStatus::Revoked);
        assert_eq!(record.revocation_reason.as_deref(), Some("issued in error"));
    }

    #[test]
    fn revocation_requires_reason() {
        let mut record = sample_offer(None);
        let err = record.revoke("   ", Timestamp::from_unix_millis(0)).unwrap_err();
        assert!(matches!(err, RecordError::MissingRevocationReason));
        assert_eq!(record.status, CredentialStatus::Active);
    }

    fn sample_offer(valid_until: Option<Date>) -> OfferLetterRecord {
        OfferLetterRecord {
            id: 1,
            number: OfferLetterNumber::parse("OL-2025-000001").unwrap(),
            uuid: EntityUuid::random(),
            candidate_name: "Test Candidate".to_string(),
            company_name: None,
            designation: None,
            department: None,
            salary: None,
            joining_date: None,
            validity_period: None,
            valid_until,
            location: None,
            email: None,
            phone: None,
            batch_id: None,
            issue_year: 2025,
            generated_by: None,
            status: CredentialStatus::Active,
            revoked_at: None,
            revocation_reason: None,
            created_at: Timestamp::from_unix_millis(0),
            updated_at: Timestamp::from_unix_millis(0),
        }
    }
}
