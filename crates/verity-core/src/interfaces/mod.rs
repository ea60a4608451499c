// crates/verity-core/src/interfaces/mod.rs
// ============================================================================
// Module: Verity Interfaces
// Description: Backend-agnostic interfaces for counters, records, telemetry.
// Purpose: Define the contract surfaces used by the Verity registry runtime.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how the registry integrates with storage and
//! observability without embedding backend-specific details. The sequence
//! store contract is the correctness linchpin: every draw must be a single
//! atomic read-modify-write at the storage layer so that two concurrent
//! callers can never observe the same value. Record stores enforce unique
//! indexes on both identity fields and surface violations as typed
//! duplicates rather than silently overwriting.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

use crate::core::codegen::DocumentKind;
use crate::core::codegen::IssueSeries;
use crate::core::identifiers::CertificateCode;
use crate::core::identifiers::CounterName;
use crate::core::identifiers::EmployeeCode;
use crate::core::identifiers::EntityUuid;
use crate::core::identifiers::OfferLetterNumber;
use crate::core::records::CertificateRecord;
use crate::core::records::EmployeeRecord;
use crate::core::records::OfferLetterRecord;

// ============================================================================
// SECTION: Store Errors
// ============================================================================

/// Identity field involved in a unique-index violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    /// Human-readable code or number.
    Code,
    /// Verification UUID.
    Uuid,
}

impl DuplicateField {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Uuid => "uuid",
        }
    }
}

impl fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage layer errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `Duplicate` is the only retryable variant, and only by regenerating
///   the colliding field.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("record store io error: {0}")]
    Io(String),
    /// Unique-index violation on an identity field.
    #[error("duplicate {field} violates unique index")]
    Duplicate {
        /// Identity field that collided.
        field: DuplicateField,
    },
    /// Store data is corrupted or fails integrity checks.
    #[error("record store corruption: {0}")]
    Corrupt(String),
    /// Store schema version is incompatible.
    #[error("record store version mismatch: {0}")]
    VersionMismatch(String),
    /// Store data is invalid.
    #[error("record store invalid data: {0}")]
    Invalid(String),
    /// Store reported an error.
    #[error("record store error: {0}")]
    Store(String),
}

// ============================================================================
// SECTION: Sequence Store
// ============================================================================

/// Durable, atomically incrementable named counters.
///
/// Both operations are exactly-once: each returned integer is delivered to
/// precisely one caller, even under concurrency, because the increment is a
/// single atomic read-modify-write in the storage layer. Counters are
/// created lazily at zero (the first draw returns 1), never deleted, and
/// never decremented.
pub trait SequenceStore {
    /// Atomically increments the named counter and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the storage layer fails.
    fn next_value(&self, name: &CounterName) -> Result<u64, StoreError>;

    /// Atomically increments the composite `(lane, year)` counter and
    /// returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the storage layer fails.
    fn next_issue_number(&self, series: &IssueSeries) -> Result<u64, StoreError>;
}

// ============================================================================
// SECTION: Record Store
// ============================================================================

/// Persistent identity records with unique indexes on code and uuid.
///
/// Inserts enforce both unique indexes independently and fail with
/// [`StoreError::Duplicate`] on violation. Updates match records by uuid
/// and refuse to touch identity fields; deletes never free a code for
/// reuse because counters do not rewind.
pub trait RecordStore {
    /// Inserts a new employee record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] on unique-index violation.
    fn insert_employee(&self, record: &EmployeeRecord) -> Result<(), StoreError>;

    /// Loads an employee record by staff code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the storage layer fails.
    fn employee_by_code(&self, code: &EmployeeCode) -> Result<Option<EmployeeRecord>, StoreError>;

    /// Loads an employee record by verification UUID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the storage layer fails.
    fn employee_by_uuid(&self, uuid: &EntityUuid) -> Result<Option<EmployeeRecord>, StoreError>;

    /// Replaces the mutable fields of an employee record, matching by uuid.
    /// Returns false when no record with that uuid exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] when the stored identity fields do
    /// not match the record (identity is write-once).
    fn update_employee(&self, record: &EmployeeRecord) -> Result<bool, StoreError>;

    /// Deletes an employee record by uuid. Returns false when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the storage layer fails.
    fn delete_employee(&self, uuid: &EntityUuid) -> Result<bool, StoreError>;

    /// Lists all employee records ordered by numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the storage layer fails.
    fn list_employees(&self) -> Result<Vec<EmployeeRecord>, StoreError>;

    /// Inserts a new certificate record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] on unique-index violation.
    fn insert_certificate(&self, record: &CertificateRecord) -> Result<(), StoreError>;

    /// Loads a certificate record by certificate code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the storage layer fails.
    fn certificate_by_code(
        &self,
        code: &CertificateCode,
    ) -> Result<Option<CertificateRecord>, StoreError>;

    /// Loads a certificate record by verification UUID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the storage layer fails.
    fn certificate_by_uuid(
        &self,
        uuid: &EntityUuid,
    ) -> Result<Option<CertificateRecord>, StoreError>;

    /// Replaces the mutable fields of a certificate record, matching by
    /// uuid. Returns false when no record with that uuid exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] when the stored identity fields do
    /// not match the record.
    fn update_certificate(&self, record: &CertificateRecord) -> Result<bool, StoreError>;

    /// Deletes a certificate record by uuid. Returns false when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the storage layer fails.
    fn delete_certificate(&self, uuid: &EntityUuid) -> Result<bool, StoreError>;

    /// Lists all certificate records ordered by numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the storage layer fails.
    fn list_certificates(&self) -> Result<Vec<CertificateRecord>, StoreError>;

    /// Inserts a new offer letter record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] on unique-index violation.
    fn insert_offer_letter(&self, record: &OfferLetterRecord) -> Result<(), StoreError>;

    /// Loads an offer letter record by number.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the storage layer fails.
    fn offer_letter_by_number(
        &self,
        number: &OfferLetterNumber,
    ) -> Result<Option<OfferLetterRecord>, StoreError>;

    /// Loads an offer letter record by verification UUID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the storage layer fails.
    fn offer_letter_by_uuid(
        &self,
        uuid: &EntityUuid,
    ) -> Result<Option<OfferLetterRecord>, StoreError>;

    /// Replaces the mutable fields of an offer letter record, matching by
    /// uuid. Returns false when no record with that uuid exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] when the stored identity fields do
    /// not match the record.
    fn update_offer_letter(&self, record: &OfferLetterRecord) -> Result<bool, StoreError>;

    /// Deletes an offer letter record by uuid. Returns false when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the storage layer fails.
    fn delete_offer_letter(&self, uuid: &EntityUuid) -> Result<bool, StoreError>;

    /// Lists all offer letter records ordered by numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the storage layer fails.
    fn list_offer_letters(&self) -> Result<Vec<OfferLetterRecord>, StoreError>;
}

// ============================================================================
// SECTION: Telemetry
// ============================================================================

/// Verification outcome classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Token resolved to a record.
    Hit,
    /// Token resolved to nothing.
    Miss,
}

impl VerifyOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
        }
    }
}

/// Metrics sink for registry operations.
///
/// Intentionally dependency-light so deployments can plug in Prometheus or
/// OpenTelemetry without redesign. Labels must never carry record contents.
pub trait RegistryMetrics: Send + Sync {
    /// Records a successfully issued document.
    fn record_issued(&self, kind: DocumentKind);
    /// Records a rejected issuance with a normalized reason label.
    fn record_issue_rejected(&self, kind: DocumentKind, reason: &'static str);
    /// Records a verification attempt outcome.
    fn record_verification(&self, outcome: VerifyOutcome);
    /// Records a UUID-collision retry during insert.
    fn record_duplicate_retry(&self, kind: DocumentKind);
}

/// No-op metrics sink.
///
/// # Invariants
/// - Metrics are intentionally discarded.
pub struct NoopMetrics;

impl RegistryMetrics for NoopMetrics {
    fn record_issued(&self, _kind: DocumentKind) {}

    fn record_issue_rejected(&self, _kind: DocumentKind, _reason: &'static str) {}

    fn record_verification(&self, _outcome: VerifyOutcome) {}

    fn record_duplicate_retry(&self, _kind: DocumentKind) {}
}
