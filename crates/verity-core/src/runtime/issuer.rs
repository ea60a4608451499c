// crates/verity-core/src/runtime/issuer.rs
// ============================================================================
// Module: Verity Code Issuer
// Description: Draws sequence values and composes document codes.
// Purpose: Bridge the sequence store to formatted, ceiling-checked codes.
// Dependencies: crate::core, crate::interfaces, crate::runtime::store
// ============================================================================

//! ## Overview
//! The issuer is pure orchestration: it derives the composite counter key
//! from the staff kind and issue date, draws the next value atomically from
//! the sequence store, and formats the code. A draw above the lane ceiling
//! fails without retry; the consumed slot stays consumed, which keeps every
//! successfully issued code unique for all time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::codegen::CodeError;
use crate::core::codegen::IssueSeries;
use crate::core::codegen::OrgPrefix;
use crate::core::codegen::StaffKind;
use crate::core::codegen::certificate_code;
use crate::core::codegen::offer_number;
use crate::core::codegen::staff_code;
use crate::core::identifiers::CertificateCode;
use crate::core::identifiers::EmployeeCode;
use crate::core::identifiers::OfferLetterNumber;
use crate::core::time::IssueDate;
use crate::interfaces::SequenceStore;
use crate::interfaces::StoreError;
use crate::runtime::store::SharedSequenceStore;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while issuing a code.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum IssueError {
    /// The yearly sequence is exhausted or the prefix is invalid.
    #[error(transparent)]
    Code(#[from] CodeError),
    /// The sequence store failed.
    #[error("sequence store error: {0}")]
    Store(#[from] StoreError),
}

// ============================================================================
// SECTION: Issuer
// ============================================================================

/// Issues formatted document codes backed by atomic counters.
#[derive(Clone)]
pub struct CodeIssuer {
    /// Shared sequence store.
    sequences: SharedSequenceStore,
    /// Organization prefix for staff codes.
    prefix: OrgPrefix,
}

impl CodeIssuer {
    /// Creates a new issuer over a shared sequence store.
    #[must_use]
    pub const fn new(sequences: SharedSequenceStore, prefix: OrgPrefix) -> Self {
        Self {
            sequences,
            prefix,
        }
    }

    /// Returns the configured organization prefix.
    #[must_use]
    pub const fn prefix(&self) -> &OrgPrefix {
        &self.prefix
    }

    /// Issues the next staff code for the given kind and date.
    ///
    /// # Errors
    ///
    /// Returns [`IssueError::Code`] when the yearly quota is exhausted and
    /// [`IssueError::Store`] when the sequence store fails.
    pub fn next_staff_code(
        &self,
        kind: StaffKind,
        date: IssueDate,
    ) -> Result<EmployeeCode, IssueError> {
        let series = IssueSeries::staff(kind, date);
        let sequence = self.sequences.next_issue_number(&series)?;
        Ok(staff_code(&self.prefix, kind, date, sequence)?)
    }

    /// Issues the next certificate code for the given date.
    ///
    /// # Errors
    ///
    /// Returns [`IssueError::Code`] when the yearly quota is exhausted and
    /// [`IssueError::Store`] when the sequence store fails.
    pub fn next_certificate_code(&self, date: IssueDate) -> Result<CertificateCode, IssueError> {
        let series = IssueSeries::certificate(date);
        let sequence = self.sequences.next_issue_number(&series)?;
        Ok(certificate_code(date, sequence)?)
    }

    /// Issues the next offer letter number for the given date.
    ///
    /// # Errors
    ///
    /// Returns [`IssueError::Code`] when the yearly quota is exhausted and
    /// [`IssueError::Store`] when the sequence store fails.
    pub fn next_offer_number(&self, date: IssueDate) -> Result<OfferLetterNumber, IssueError> {
        let series = IssueSeries::offer_letter(date);
        let sequence = self.sequences.next_issue_number(&series)?;
        Ok(offer_number(date, sequence)?)
    }
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
    use crate::runtime::store::InMemorySequenceStore;

    #[test]
    fn issuer_draws_sequential_codes() {
        let issuer = CodeIssuer::new(
            SharedSequenceStore::from_store(InMemorySequenceStore::new()),
            OrgPrefix::default(),
        );
        let date = IssueDate::new(date!(2025 - 06 - 01));
        assert_eq!(
            issuer.next_staff_code(StaffKind::Employee, date).unwrap().as_str(),
            "SWT-25-EMP-0001"
        );
        assert_eq!(
            issuer.next_staff_code(StaffKind::Employee, date).unwrap().as_str(),
            "SWT-25-EMP-0002"
        );
        assert_eq!(
            issuer.next_staff_code(StaffKind::Intern, date).unwrap().as_str(),
            "SWT-25-INT-0001"
        );
        assert_eq!(issuer.next_certificate_code(date).unwrap().as_str(), "CERT-2025-000001");
        assert_eq!(issuer.next_offer_number(date).unwrap().as_str(), "OL-2025-000001");
    }
}
