// crates/verity-core/src/core/mod.rs
// ============================================================================
// Module: Verity Core Domain
// Description: Domain model for identity documents and their identifiers.
// Purpose: Group identifier, record, validation, and projection types.
// Dependencies: crate::core submodules
// ============================================================================

//! ## Overview
//! The core domain model: strongly typed document identifiers, code
//! generation with hard yearly ceilings, identity records with one-way
//! revocation, boundary validation, certificate fingerprints, and redacted
//! public projections for unauthenticated verification.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod codegen;
pub mod fingerprint;
pub mod identifiers;
pub mod records;
pub mod time;
pub mod validation;
pub mod view;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use codegen::CERTIFICATE_CODE_PREFIX;
pub use codegen::CodeError;
pub use codegen::DEFAULT_ORG_PREFIX;
pub use codegen::DOCUMENT_SEQUENCE_CEILING;
pub use codegen::DocumentKind;
pub use codegen::EpochYear;
pub use codegen::IssueLane;
pub use codegen::IssueSeries;
pub use codegen::OFFER_NUMBER_PREFIX;
pub use codegen::OrgPrefix;
pub use codegen::STAFF_SEQUENCE_CEILING;
pub use codegen::StaffKind;
pub use codegen::certificate_code;
pub use codegen::offer_number;
pub use codegen::staff_code;
pub use fingerprint::Fingerprint;
pub use fingerprint::FingerprintError;
pub use identifiers::CertificateCode;
pub use identifiers::CodeParseError;
pub use identifiers::CounterName;
pub use identifiers::EmployeeCode;
pub use identifiers::EntityUuid;
pub use identifiers::OfferLetterNumber;
pub use identifiers::VerifyToken;
pub use records::CredentialStatus;
pub use records::CertificateRecord;
pub use records::EmployeeRecord;
pub use records::EmployeeUpdate;
pub use records::EmploymentType;
pub use records::NewCertificate;
pub use records::NewEmployee;
pub use records::NewOfferLetter;
pub use records::OfferLetterRecord;
pub use records::RecordError;
pub use time::IssueDate;
pub use time::IssueInstant;
pub use time::Timestamp;
pub use validation::ValidationError;
pub use validation::ValidationIssue;
pub use validation::sanitize;
pub use validation::validate_new_certificate;
pub use validation::validate_new_employee;
pub use validation::validate_new_offer_letter;
pub use view::CertificatePublicView;
pub use view::EmployeePublicView;
pub use view::OfferLetterPublicView;
pub use view::PublicView;
