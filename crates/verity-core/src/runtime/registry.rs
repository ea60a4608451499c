// crates/verity-core/src/runtime/registry.rs
// ============================================================================
// Module: Verity Identity Registry
// Description: Issuance, verification, and revocation workflows.
// Purpose: Compose counters, stores, and projections into the public API.
// Dependencies: crate::core, crate::interfaces, crate::runtime
// ============================================================================

//! ## Overview
//! The registry is the workflow layer: it validates inputs before any
//! counter slot is consumed, draws identifiers, persists records, and
//! resolves verification tokens to redacted views. Code generation and
//! record persistence are not atomic with each other; a failure between the
//! two burns a sequence slot, which is accepted because slots are never
//! reclaimed. UUID collisions on insert are retried with a fresh UUID; code
//! collisions propagate, since redrawing a code consumes another slot and is
//! a caller decision. Lookup misses are reported with one uniform error that
//! never distinguishes a malformed token from an absent one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use url::Url;

use crate::core::codegen::CodeError;
use crate::core::codegen::DocumentKind;
use crate::core::codegen::IssueLane;
use crate::core::codegen::OrgPrefix;
use crate::core::fingerprint::Fingerprint;
use crate::core::fingerprint::FingerprintError;
use crate::core::identifiers::CounterName;
use crate::core::identifiers::EntityUuid;
use crate::core::identifiers::VerifyToken;
use crate::core::records::CertificateRecord;
use crate::core::records::CredentialStatus;
use crate::core::records::EmployeeRecord;
use crate::core::records::EmployeeUpdate;
use crate::core::records::NewCertificate;
use crate::core::records::NewEmployee;
use crate::core::records::NewOfferLetter;
use crate::core::records::OfferLetterRecord;
use crate::core::records::RecordError;
use crate::core::time::IssueDate;
use crate::core::time::IssueInstant;
use crate::core::time::Timestamp;
use crate::core::validation::ValidationError;
use crate::core::validation::sanitize;
use crate::core::validation::validate_new_certificate;
use crate::core::validation::validate_new_employee;
use crate::core::validation::validate_new_offer_letter;
use crate::core::view::OfferLetterPublicView;
use crate::core::view::PublicView;
use crate::interfaces::DuplicateField;
use crate::interfaces::NoopMetrics;
use crate::interfaces::RecordStore;
use crate::interfaces::RegistryMetrics;
use crate::interfaces::SequenceStore;
use crate::interfaces::StoreError;
use crate::interfaces::VerifyOutcome;
use crate::runtime::issuer::CodeIssuer;
use crate::runtime::issuer::IssueError;
use crate::runtime::store::SharedMetrics;
use crate::runtime::store::SharedRecordStore;
use crate::runtime::store::SharedSequenceStore;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum insert attempts before a UUID collision is reported to the caller.
pub const MAX_UUID_ATTEMPTS: usize = 3;
/// Generic counter backing employee record ids.
const EMPLOYEE_ID_COUNTER: &str = "employees";
/// Generic counter backing certificate record ids.
const CERTIFICATE_ID_COUNTER: &str = "certificates";
/// Generic counter backing offer letter record ids.
const OFFER_ID_COUNTER: &str = "offer_letters";
/// Current certificate payload schema version.
const CERTIFICATE_SCHEMA_VERSION: u32 = 1;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by registry workflows.
///
/// # Invariants
/// - `NotFound` carries one uniform message for every kind of lookup miss.
/// - `LimitExceeded` is fatal to the request and must not be retried.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Input rejected at the boundary; no counter slot was consumed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Yearly sequence exhausted; the caller must escalate to an operator.
    #[error("yearly sequence exhausted for {lane} {year}: limit {ceiling}")]
    LimitExceeded {
        /// Counter lane that ran out.
        lane: IssueLane,
        /// Epoch year in printed form.
        year: String,
        /// Hard ceiling for the lane.
        ceiling: u64,
    },
    /// Unique-index violation that could not be resolved by regeneration.
    #[error("duplicate {field} violates unique index")]
    Duplicate {
        /// Identity field that collided.
        field: DuplicateField,
    },
    /// Lookup miss; deliberately indistinguishable from a malformed token.
    #[error("identifier is invalid or not found")]
    NotFound,
    /// Illegal status transition.
    #[error(transparent)]
    State(#[from] RecordError),
    /// Certificate payload could not be fingerprinted.
    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),
    /// Storage layer failure.
    #[error("record store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for RegistryError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Duplicate {
                field,
            } => Self::Duplicate {
                field,
            },
            other => Self::Store(other),
        }
    }
}

impl From<IssueError> for RegistryError {
    fn from(error: IssueError) -> Self {
        match error {
            IssueError::Code(CodeError::LimitExceeded {
                lane,
                year,
                ceiling,
            }) => Self::LimitExceeded {
                lane,
                year,
                ceiling,
            },
            IssueError::Code(other) => Self::Store(StoreError::Invalid(other.to_string())),
            IssueError::Store(store) => store.into(),
        }
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Identity-document registry over shared sequence and record stores.
#[derive(Clone)]
pub struct IdentityRegistry {
    /// Code issuer over the sequence store.
    issuer: CodeIssuer,
    /// Shared sequence store for generic record-id counters.
    sequences: SharedSequenceStore,
    /// Shared record store.
    records: SharedRecordStore,
    /// Metrics sink.
    metrics: SharedMetrics,
    /// Verification portal base for QR payloads, when configured.
    portal_base: Option<Url>,
}

impl IdentityRegistry {
    /// Creates a registry with a no-op metrics sink and no portal base.
    #[must_use]
    pub fn new(
        sequences: SharedSequenceStore,
        records: SharedRecordStore,
        prefix: OrgPrefix,
    ) -> Self {
        Self {
            issuer: CodeIssuer::new(sequences.clone(), prefix),
            sequences,
            records,
            metrics: SharedMetrics::from_metrics(NoopMetrics),
            portal_base: None,
        }
    }

    /// Replaces the metrics sink.
    #[must_use]
    pub fn with_metrics(mut self, metrics: SharedMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Sets the verification portal base used for QR payloads.
    #[must_use]
    pub fn with_portal_base(mut self, base: Url) -> Self {
        self.portal_base = Some(base);
        self
    }

    // ========================================================================
    // SECTION: Issuance
    // ========================================================================

    /// Registers a new employee or intern and issues their ID record.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] before any slot is consumed,
    /// [`RegistryError::LimitExceeded`] when the yearly quota is exhausted,
    /// [`RegistryError::Duplicate`] when identity collisions cannot be
    /// resolved, and [`RegistryError::Store`] on storage failure.
    pub fn register_employee(
        &self,
        input: NewEmployee,
        issued_at: IssueInstant,
    ) -> Result<EmployeeRecord, RegistryError> {
        let input = sanitized_employee(input);
        if let Err(error) = validate_new_employee(&input, issued_at.date.date()) {
            self.metrics.record_issue_rejected(DocumentKind::EmployeeId, "validation");
            return Err(error.into());
        }
        let id = self.sequences.next_value(&CounterName::new(EMPLOYEE_ID_COUNTER))?;
        let code = self.issuer.next_staff_code(input.kind, issued_at.date).map_err(|error| {
            if matches!(error, IssueError::Code(CodeError::LimitExceeded { .. })) {
                self.metrics.record_issue_rejected(DocumentKind::EmployeeId, "limit_exceeded");
            }
            RegistryError::from(error)
        })?;
        let mut record = EmployeeRecord {
            id,
            code,
            uuid: EntityUuid::random(),
            kind: input.kind,
            status: CredentialStatus::Active,
            name: input.name,
            designation: input.designation,
            department: input.department,
            employment_type: input.employment_type,
            work_location: input.work_location,
            email: input.email,
            phone: input.phone,
            address: input.address,
            emergency_contact: input.emergency_contact,
            emergency_phone: input.emergency_phone,
            date_of_birth: input.date_of_birth,
            joining_date: input.joining_date,
            salary: input.salary,
            bank_account: input.bank_account,
            aadhar_number: input.aadhar_number,
            pan_number: input.pan_number,
            blood_group: input.blood_group,
            manager: input.manager,
            photo: input.photo,
            qr_payload: None,
            revoked_at: None,
            revocation_reason: None,
            created_at: issued_at.at,
            updated_at: issued_at.at,
        };
        for attempt in 0..MAX_UUID_ATTEMPTS {
            if attempt > 0 {
                record.uuid = EntityUuid::random();
            }
            record.qr_payload =
                self.portal_base.as_ref().map(|base| verify_url(base, &record.uuid));
            match self.records.insert_employee(&record) {
                Ok(()) => {
                    self.metrics.record_issued(DocumentKind::EmployeeId);
                    return Ok(record);
                }
                Err(StoreError::Duplicate {
                    field: DuplicateField::Uuid,
                }) => {
                    self.metrics.record_duplicate_retry(DocumentKind::EmployeeId);
                }
                Err(error) => return Err(error.into()),
            }
        }
        Err(RegistryError::Duplicate {
            field: DuplicateField::Uuid,
        })
    }

    /// Issues a new certificate with a fingerprinted payload.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`IdentityRegistry::register_employee`], plus
    /// [`RegistryError::Fingerprint`] when the payload cannot be hashed.
    pub fn issue_certificate(
        &self,
        input: NewCertificate,
        issued_at: IssueInstant,
    ) -> Result<CertificateRecord, RegistryError> {
        if let Err(error) = validate_new_certificate(&input) {
            self.metrics.record_issue_rejected(DocumentKind::Certificate, "validation");
            return Err(error.into());
        }
        let fingerprint = Fingerprint::compute(&input.payload)?;
        let id = self.sequences.next_value(&CounterName::new(CERTIFICATE_ID_COUNTER))?;
        let code = self.issuer.next_certificate_code(issued_at.date).map_err(|error| {
            if matches!(error, IssueError::Code(CodeError::LimitExceeded { .. })) {
                self.metrics.record_issue_rejected(DocumentKind::Certificate, "limit_exceeded");
            }
            RegistryError::from(error)
        })?;
        let mut record = CertificateRecord {
            id,
            code,
            uuid: EntityUuid::random(),
            holder_name: sanitize(&input.holder_name),
            holder_uuid: input.holder_uuid,
            certificate_type: sanitize(&input.certificate_type),
            payload: input.payload,
            fingerprint,
            batch_id: input.batch_id,
            schema_version: CERTIFICATE_SCHEMA_VERSION,
            issue_date: issued_at.date.date(),
            issued_by: input.issued_by,
            status: CredentialStatus::Active,
            revoked_at: None,
            revocation_reason: None,
            created_at: issued_at.at,
            updated_at: issued_at.at,
        };
        for attempt in 0..MAX_UUID_ATTEMPTS {
            if attempt > 0 {
                record.uuid = EntityUuid::random();
            }
            match self.records.insert_certificate(&record) {
                Ok(()) => {
                    self.metrics.record_issued(DocumentKind::Certificate);
                    return Ok(record);
                }
                Err(StoreError::Duplicate {
                    field: DuplicateField::Uuid,
                }) => {
                    self.metrics.record_duplicate_retry(DocumentKind::Certificate);
                }
                Err(error) => return Err(error.into()),
            }
        }
        Err(RegistryError::Duplicate {
            field: DuplicateField::Uuid,
        })
    }

    /// Issues a new offer letter.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`IdentityRegistry::register_employee`].
    pub fn issue_offer_letter(
        &self,
        input: NewOfferLetter,
        issued_at: IssueInstant,
    ) -> Result<OfferLetterRecord, RegistryError> {
        if let Err(error) = validate_new_offer_letter(&input, issued_at.date.date()) {
            self.metrics.record_issue_rejected(DocumentKind::OfferLetter, "validation");
            return Err(error.into());
        }
        let id = self.sequences.next_value(&CounterName::new(OFFER_ID_COUNTER))?;
        let number = self.issuer.next_offer_number(issued_at.date).map_err(|error| {
            if matches!(error, IssueError::Code(CodeError::LimitExceeded { .. })) {
                self.metrics.record_issue_rejected(DocumentKind::OfferLetter, "limit_exceeded");
            }
            RegistryError::from(error)
        })?;
        let mut record = OfferLetterRecord {
            id,
            number,
            uuid: EntityUuid::random(),
            candidate_name: sanitize(&input.candidate_name),
            company_name: sanitize_opt(input.company_name),
            designation: sanitize_opt(input.designation),
            department: sanitize_opt(input.department),
            salary: input.salary,
            joining_date: input.joining_date,
            validity_period: sanitize_opt(input.validity_period),
            valid_until: input.valid_until,
            location: sanitize_opt(input.location),
            email: input.email,
            phone: input.phone,
            batch_id: input.batch_id,
            issue_year: issued_at.date.full_year(),
            generated_by: input.generated_by,
            status: CredentialStatus::Active,
            revoked_at: None,
            revocation_reason: None,
            created_at: issued_at.at,
            updated_at: issued_at.at,
        };
        for attempt in 0..MAX_UUID_ATTEMPTS {
            if attempt > 0 {
                record.uuid = EntityUuid::random();
            }
            match self.records.insert_offer_letter(&record) {
                Ok(()) => {
                    self.metrics.record_issued(DocumentKind::OfferLetter);
                    return Ok(record);
                }
                Err(StoreError::Duplicate {
                    field: DuplicateField::Uuid,
                }) => {
                    self.metrics.record_duplicate_retry(DocumentKind::OfferLetter);
                }
                Err(error) => return Err(error.into()),
            }
        }
        Err(RegistryError::Duplicate {
            field: DuplicateField::Uuid,
        })
    }

    // ========================================================================
    // SECTION: Verification
    // ========================================================================

    /// Resolves a verification token to a redacted public view.
    ///
    /// The token may be a human-readable code or a verification UUID.
    /// Revoked and expired records still resolve, with the status carrying
    /// the state.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for any miss and
    /// [`RegistryError::Store`] when storage fails or a certificate payload
    /// fails its fingerprint check.
    pub fn verify(&self, raw_token: &str, today: IssueDate) -> Result<PublicView, RegistryError> {
        match self.resolve(raw_token, today)? {
            Some(view) => {
                self.metrics.record_verification(VerifyOutcome::Hit);
                Ok(view)
            }
            None => {
                self.metrics.record_verification(VerifyOutcome::Miss);
                Err(RegistryError::NotFound)
            }
        }
    }

    /// Resolves a token to a view without emitting telemetry.
    fn resolve(
        &self,
        raw_token: &str,
        today: IssueDate,
    ) -> Result<Option<PublicView>, RegistryError> {
        match VerifyToken::classify(raw_token) {
            VerifyToken::Staff(code) => Ok(self
                .records
                .employee_by_code(&code)?
                .map(|record| PublicView::EmployeeId((&record).into()))),
            VerifyToken::Certificate(code) => match self.records.certificate_by_code(&code)? {
                Some(record) => self.certificate_view(record).map(Some),
                None => Ok(None),
            },
            VerifyToken::OfferLetter(number) => {
                Ok(self.records.offer_letter_by_number(&number)?.map(|record| {
                    PublicView::OfferLetter(OfferLetterPublicView::from_record(
                        &record,
                        today.date(),
                    ))
                }))
            }
            VerifyToken::Uuid(uuid) => self.resolve_uuid(&uuid, today),
            VerifyToken::Unrecognized(_) => Ok(None),
        }
    }

    /// Tries every record kind for a UUID token.
    fn resolve_uuid(
        &self,
        uuid: &EntityUuid,
        today: IssueDate,
    ) -> Result<Option<PublicView>, RegistryError> {
        if let Some(record) = self.records.employee_by_uuid(uuid)? {
            return Ok(Some(PublicView::EmployeeId((&record).into())));
        }
        if let Some(record) = self.records.certificate_by_uuid(uuid)? {
            return self.certificate_view(record).map(Some);
        }
        if let Some(record) = self.records.offer_letter_by_uuid(uuid)? {
            return Ok(Some(PublicView::OfferLetter(OfferLetterPublicView::from_record(
                &record,
                today.date(),
            ))));
        }
        Ok(None)
    }

    /// Projects a certificate after verifying its payload fingerprint.
    fn certificate_view(&self, record: CertificateRecord) -> Result<PublicView, RegistryError> {
        if !record.fingerprint.matches(&record.payload)? {
            return Err(RegistryError::Store(StoreError::Corrupt(format!(
                "certificate {} payload does not match its fingerprint",
                record.code
            ))));
        }
        Ok(PublicView::Certificate((&record).into()))
    }

    // ========================================================================
    // SECTION: Lifecycle
    // ========================================================================

    /// Revokes the record a token resolves to; revocation is one-way.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for a miss,
    /// [`RegistryError::State`] for an empty reason or illegal transition,
    /// and [`RegistryError::Store`] when storage fails.
    pub fn revoke(
        &self,
        raw_token: &str,
        reason: &str,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        match VerifyToken::classify(raw_token) {
            VerifyToken::Staff(code) => {
                let Some(mut record) = self.records.employee_by_code(&code)? else {
                    return Err(RegistryError::NotFound);
                };
                record.revoke(reason, now)?;
                self.persist_employee(&record)
            }
            VerifyToken::Certificate(code) => {
                let Some(mut record) = self.records.certificate_by_code(&code)? else {
                    return Err(RegistryError::NotFound);
                };
                record.revoke(reason, now)?;
                self.persist_certificate(&record)
            }
            VerifyToken::OfferLetter(number) => {
                let Some(mut record) = self.records.offer_letter_by_number(&number)? else {
                    return Err(RegistryError::NotFound);
                };
                record.revoke(reason, now)?;
                self.persist_offer_letter(&record)
            }
            VerifyToken::Uuid(uuid) => self.revoke_by_uuid(&uuid, reason, now),
            VerifyToken::Unrecognized(_) => Err(RegistryError::NotFound),
        }
    }

    /// Revokes whichever record kind holds the UUID.
    fn revoke_by_uuid(
        &self,
        uuid: &EntityUuid,
        reason: &str,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        if let Some(mut record) = self.records.employee_by_uuid(uuid)? {
            record.revoke(reason, now)?;
            return self.persist_employee(&record);
        }
        if let Some(mut record) = self.records.certificate_by_uuid(uuid)? {
            record.revoke(reason, now)?;
            return self.persist_certificate(&record);
        }
        if let Some(mut record) = self.records.offer_letter_by_uuid(uuid)? {
            record.revoke(reason, now)?;
            return self.persist_offer_letter(&record);
        }
        Err(RegistryError::NotFound)
    }

    /// Applies a mutable-field patch to an employee record.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for a miss and
    /// [`RegistryError::Store`] when storage fails.
    pub fn update_employee(
        &self,
        uuid: &EntityUuid,
        patch: EmployeeUpdate,
        now: Timestamp,
    ) -> Result<EmployeeRecord, RegistryError> {
        let Some(mut record) = self.records.employee_by_uuid(uuid)? else {
            return Err(RegistryError::NotFound);
        };
        record.apply_update(sanitized_patch(patch), now);
        if self.records.update_employee(&record)? {
            Ok(record)
        } else {
            Err(RegistryError::NotFound)
        }
    }

    /// Deletes an employee record; its code is never reissued.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for a miss.
    pub fn delete_employee(&self, uuid: &EntityUuid) -> Result<(), RegistryError> {
        if self.records.delete_employee(uuid)? {
            Ok(())
        } else {
            Err(RegistryError::NotFound)
        }
    }

    /// Deletes a certificate record; its code is never reissued.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for a miss.
    pub fn delete_certificate(&self, uuid: &EntityUuid) -> Result<(), RegistryError> {
        if self.records.delete_certificate(uuid)? {
            Ok(())
        } else {
            Err(RegistryError::NotFound)
        }
    }

    /// Deletes an offer letter record; its number is never reissued.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for a miss.
    pub fn delete_offer_letter(&self, uuid: &EntityUuid) -> Result<(), RegistryError> {
        if self.records.delete_offer_letter(uuid)? {
            Ok(())
        } else {
            Err(RegistryError::NotFound)
        }
    }

    /// Lists all employee records.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Store`] when storage fails.
    pub fn list_employees(&self) -> Result<Vec<EmployeeRecord>, RegistryError> {
        Ok(self.records.list_employees()?)
    }

    /// Lists all certificate records.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Store`] when storage fails.
    pub fn list_certificates(&self) -> Result<Vec<CertificateRecord>, RegistryError> {
        Ok(self.records.list_certificates()?)
    }

    /// Lists all offer letter records.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Store`] when storage fails.
    pub fn list_offer_letters(&self) -> Result<Vec<OfferLetterRecord>, RegistryError> {
        Ok(self.records.list_offer_letters()?)
    }

    /// Persists an employee update, mapping a vanished row to not-found.
    fn persist_employee(&self, record: &EmployeeRecord) -> Result<(), RegistryError> {
        if self.records.update_employee(record)? {
            Ok(())
        } else {
            Err(RegistryError::NotFound)
        }
    }

    /// Persists a certificate update, mapping a vanished row to not-found.
    fn persist_certificate(&self, record: &CertificateRecord) -> Result<(), RegistryError> {
        if self.records.update_certificate(record)? {
            Ok(())
        } else {
            Err(RegistryError::NotFound)
        }
    }

    /// Persists an offer letter update, mapping a vanished row to not-found.
    fn persist_offer_letter(&self, record: &OfferLetterRecord) -> Result<(), RegistryError> {
        if self.records.update_offer_letter(record)? {
            Ok(())
        } else {
            Err(RegistryError::NotFound)
        }
    }
}

// ============================================================================
// SECTION: Verify URLs
// ============================================================================

/// Builds the verification portal URL embedded in QR payloads.
#[must_use]
pub fn verify_url(portal_base: &Url, uuid: &EntityUuid) -> String {
    format!("{}/verify/{uuid}", portal_base.as_str().trim_end_matches('/'))
}

// ============================================================================
// SECTION: Sanitization Helpers
// ============================================================================

/// Sanitizes the free-text fields of a new-employee input.
fn sanitized_employee(mut input: NewEmployee) -> NewEmployee {
    input.name = sanitize(&input.name);
    input.designation = sanitize(&input.designation);
    input.department = sanitize(&input.department);
    input.work_location = sanitize(&input.work_location);
    input.email = input.email.trim().to_string();
    input.phone = input.phone.trim().to_string();
    input.address = sanitize_opt(input.address);
    input.emergency_contact = sanitize_opt(input.emergency_contact);
    input.manager = sanitize_opt(input.manager);
    input.blood_group = sanitize_opt(input.blood_group);
    input
}

/// Sanitizes the free-text fields of an employee patch.
fn sanitized_patch(mut patch: EmployeeUpdate) -> EmployeeUpdate {
    patch.designation = sanitize_opt(patch.designation);
    patch.department = sanitize_opt(patch.department);
    patch.work_location = sanitize_opt(patch.work_location);
    patch.email = patch.email.map(|value| value.trim().to_string());
    patch.phone = patch.phone.map(|value| value.trim().to_string());
    patch.manager = sanitize_opt(patch.manager);
    patch
}

/// Sanitizes an optional free-text value.
fn sanitize_opt(value: Option<String>) -> Option<String> {
    value.map(|inner| sanitize(&inner))
}
