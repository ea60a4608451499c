// crates/verity-core/src/runtime/store.rs
// ============================================================================
// Module: Verity In-Memory Stores
// Description: In-memory sequence and record stores for tests and examples.
// Purpose: Provide deterministic store implementations without external deps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! This module provides in-memory implementations of [`SequenceStore`] and
//! [`RecordStore`] for tests and local demos, plus shared `Arc` wrappers
//! used to hand one store to several consumers. The in-memory stores mirror
//! the durable stores' contracts exactly: increments are atomic under the
//! interior mutex, and both unique indexes are enforced on insert. They are
//! not intended for production use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::codegen::IssueSeries;
use crate::core::identifiers::CertificateCode;
use crate::core::identifiers::CounterName;
use crate::core::identifiers::EmployeeCode;
use crate::core::identifiers::EntityUuid;
use crate::core::identifiers::OfferLetterNumber;
use crate::core::records::CertificateRecord;
use crate::core::records::EmployeeRecord;
use crate::core::records::OfferLetterRecord;
use crate::interfaces::DuplicateField;
use crate::interfaces::RecordStore;
use crate::interfaces::RegistryMetrics;
use crate::interfaces::SequenceStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Sequence Store
// ============================================================================

/// In-memory sequence counter store for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemorySequenceStore {
    /// Counter map protected by a mutex.
    counters: Arc<Mutex<BTreeMap<String, u64>>>,
}

impl InMemorySequenceStore {
    /// Creates a new in-memory sequence store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            counters: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Draws the next value for the given map key.
    fn draw(&self, key: String) -> Result<u64, StoreError> {
        let mut guard = self
            .counters
            .lock()
            .map_err(|_| StoreError::Store("sequence store mutex poisoned".to_string()))?;
        let value = guard.entry(key).or_insert(0);
        *value += 1;
        Ok(*value)
    }
}

impl SequenceStore for InMemorySequenceStore {
    fn next_value(&self, name: &CounterName) -> Result<u64, StoreError> {
        self.draw(format!("name/{name}"))
    }

    fn next_issue_number(&self, series: &IssueSeries) -> Result<u64, StoreError> {
        self.draw(format!("series/{}/{}", series.lane, series.year))
    }
}

// ============================================================================
// SECTION: In-Memory Record Store
// ============================================================================

/// Record maps for one entity kind, keyed by uuid with a code index.
#[derive(Debug)]
struct Table<T> {
    /// Records keyed by uuid wire form.
    by_uuid: BTreeMap<String, T>,
    /// Code index mapping code wire form to uuid wire form.
    code_index: BTreeMap<String, String>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            by_uuid: BTreeMap::new(),
            code_index: BTreeMap::new(),
        }
    }
}

impl<T: Clone> Table<T> {
    /// Inserts a record after checking both unique indexes.
    fn insert(&mut self, uuid: &EntityUuid, code: &str, record: T) -> Result<(), StoreError> {
        let uuid_key = uuid.to_string();
        if self.by_uuid.contains_key(&uuid_key) {
            return Err(StoreError::Duplicate {
                field: DuplicateField::Uuid,
            });
        }
        if self.code_index.contains_key(code) {
            return Err(StoreError::Duplicate {
                field: DuplicateField::Code,
            });
        }
        self.code_index.insert(code.to_string(), uuid_key.clone());
        self.by_uuid.insert(uuid_key, record);
        Ok(())
    }

    /// Loads a record by code.
    fn by_code(&self, code: &str) -> Option<T> {
        let uuid_key = self.code_index.get(code)?;
        self.by_uuid.get(uuid_key).cloned()
    }

    /// Replaces a record matching by uuid, verifying the stored code.
    fn update(&mut self, uuid: &EntityUuid, code: &str, record: T) -> Result<bool, StoreError> {
        let uuid_key = uuid.to_string();
        let Some(existing_uuid) = self.code_index.get(code) else {
            if self.by_uuid.contains_key(&uuid_key) {
                return Err(StoreError::Invalid(
                    "identity fields are write-once and cannot change".to_string(),
                ));
            }
            return Ok(false);
        };
        if *existing_uuid != uuid_key {
            return Err(StoreError::Invalid(
                "identity fields are write-once and cannot change".to_string(),
            ));
        }
        self.by_uuid.insert(uuid_key, record);
        Ok(true)
    }

    /// Removes a record by uuid, cleaning the code index.
    fn delete(&mut self, uuid: &EntityUuid) -> bool {
        let uuid_key = uuid.to_string();
        if self.by_uuid.remove(&uuid_key).is_none() {
            return false;
        }
        self.code_index.retain(|_, mapped| *mapped != uuid_key);
        true
    }
}

/// In-memory record store for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRecordStore {
    /// Entity tables protected by one mutex.
    inner: Arc<Mutex<Tables>>,
}

/// All entity tables.
#[derive(Debug, Default)]
struct Tables {
    /// Employee records.
    employees: Table<EmployeeRecord>,
    /// Certificate records.
    certificates: Table<CertificateRecord>,
    /// Offer letter records.
    offer_letters: Table<OfferLetterRecord>,
}

impl InMemoryRecordStore {
    /// Creates a new in-memory record store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Tables::default())),
        }
    }

    /// Locks the tables, mapping poisoning to a store error.
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Tables>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Store("record store mutex poisoned".to_string()))
    }
}

impl RecordStore for InMemoryRecordStore {
    fn insert_employee(&self, record: &EmployeeRecord) -> Result<(), StoreError> {
        self.lock()?.employees.insert(&record.uuid, record.code.as_str(), record.clone())
    }

    fn employee_by_code(&self, code: &EmployeeCode) -> Result<Option<EmployeeRecord>, StoreError> {
        Ok(self.lock()?.employees.by_code(code.as_str()))
    }

    fn employee_by_uuid(&self, uuid: &EntityUuid) -> Result<Option<EmployeeRecord>, StoreError> {
        Ok(self.lock()?.employees.by_uuid.get(&uuid.to_string()).cloned())
    }

    fn update_employee(&self, record: &EmployeeRecord) -> Result<bool, StoreError> {
        self.lock()?.employees.update(&record.uuid, record.code.as_str(), record.clone())
    }

    fn delete_employee(&self, uuid: &EntityUuid) -> Result<bool, StoreError> {
        Ok(self.lock()?.employees.delete(uuid))
    }

    fn list_employees(&self) -> Result<Vec<EmployeeRecord>, StoreError> {
        let mut records: Vec<EmployeeRecord> =
            self.lock()?.employees.by_uuid.values().cloned().collect();
        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    fn insert_certificate(&self, record: &CertificateRecord) -> Result<(), StoreError> {
        self.lock()?.certificates.insert(&record.uuid, record.code.as_str(), record.clone())
    }

    fn certificate_by_code(
        &self,
        code: &CertificateCode,
    ) -> Result<Option<CertificateRecord>, StoreError> {
        Ok(self.lock()?.certificates.by_code(code.as_str()))
    }

    fn certificate_by_uuid(
        &self,
        uuid: &EntityUuid,
    ) -> Result<Option<CertificateRecord>, StoreError> {
        Ok(self.lock()?.certificates.by_uuid.get(&uuid.to_string()).cloned())
    }

    fn update_certificate(&self, record: &CertificateRecord) -> Result<bool, StoreError> {
        self.lock()?.certificates.update(&record.uuid, record.code.as_str(), record.clone())
    }

    fn delete_certificate(&self, uuid: &EntityUuid) -> Result<bool, StoreError> {
        Ok(self.lock()?.certificates.delete(uuid))
    }

    fn list_certificates(&self) -> Result<Vec<CertificateRecord>, StoreError> {
        let mut records: Vec<CertificateRecord> =
            self.lock()?.certificates.by_uuid.values().cloned().collect();
        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    fn insert_offer_letter(&self, record: &OfferLetterRecord) -> Result<(), StoreError> {
        self.lock()?.offer_letters.insert(&record.uuid, record.number.as_str(), record.clone())
    }

    fn offer_letter_by_number(
        &self,
        number: &OfferLetterNumber,
    ) -> Result<Option<OfferLetterRecord>, StoreError> {
        Ok(self.lock()?.offer_letters.by_code(number.as_str()))
    }

    fn offer_letter_by_uuid(
        &self,
        uuid: &EntityUuid,
    ) -> Result<Option<OfferLetterRecord>, StoreError> {
        Ok(self.lock()?.offer_letters.by_uuid.get(&uuid.to_string()).cloned())
    }

    fn update_offer_letter(&self, record: &OfferLetterRecord) -> Result<bool, StoreError> {
        self.lock()?.offer_letters.update(&record.uuid, record.number.as_str(), record.clone())
    }

    fn delete_offer_letter(&self, uuid: &EntityUuid) -> Result<bool, StoreError> {
        Ok(self.lock()?.offer_letters.delete(uuid))
    }

    fn list_offer_letters(&self) -> Result<Vec<OfferLetterRecord>, StoreError> {
        let mut records: Vec<OfferLetterRecord> =
            self.lock()?.offer_letters.by_uuid.values().cloned().collect();
        records.sort_by_key(|record| record.id);
        Ok(records)
    }
}

// ============================================================================
// SECTION: Shared Store Wrappers
// ============================================================================

/// Shared sequence store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedSequenceStore {
    /// Inner store implementation.
    inner: Arc<dyn SequenceStore + Send + Sync>,
}

impl SharedSequenceStore {
    /// Wraps a sequence store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl SequenceStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn SequenceStore + Send + Sync>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl SequenceStore for SharedSequenceStore {
    fn next_value(&self, name: &CounterName) -> Result<u64, StoreError> {
        self.inner.next_value(name)
    }

    fn next_issue_number(&self, series: &IssueSeries) -> Result<u64, StoreError> {
        self.inner.next_issue_number(series)
    }
}

/// Shared record store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedRecordStore {
    /// Inner store implementation.
    inner: Arc<dyn RecordStore + Send + Sync>,
}

impl SharedRecordStore {
    /// Wraps a record store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl RecordStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn RecordStore + Send + Sync>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl RecordStore for SharedRecordStore {
    fn insert_employee(&self, record: &EmployeeRecord) -> Result<(), StoreError> {
        self.inner.insert_employee(record)
    }

    fn employee_by_code(&self, code: &EmployeeCode) -> Result<Option<EmployeeRecord>, StoreError> {
        self.inner.employee_by_code(code)
    }

    fn employee_by_uuid(&self, uuid: &EntityUuid) -> Result<Option<EmployeeRecord>, StoreError> {
        self.inner.employee_by_uuid(uuid)
    }

    fn update_employee(&self, record: &EmployeeRecord) -> Result<bool, StoreError> {
        self.inner.update_employee(record)
    }

    fn delete_employee(&self, uuid: &EntityUuid) -> Result<bool, StoreError> {
        self.inner.delete_employee(uuid)
    }

    fn list_employees(&self) -> Result<Vec<EmployeeRecord>, StoreError> {
        self.inner.list_employees()
    }

    fn insert_certificate(&self, record: &CertificateRecord) -> Result<(), StoreError> {
        self.inner.insert_certificate(record)
    }

    fn certificate_by_code(
        &self,
        code: &CertificateCode,
    ) -> Result<Option<CertificateRecord>, StoreError> {
        self.inner.certificate_by_code(code)
    }

    fn certificate_by_uuid(
        &self,
        uuid: &EntityUuid,
    ) -> Result<Option<CertificateRecord>, StoreError> {
        self.inner.certificate_by_uuid(uuid)
    }

    fn update_certificate(&self, record: &CertificateRecord) -> Result<bool, StoreError> {
        self.inner.update_certificate(record)
    }

    fn delete_certificate(&self, uuid: &EntityUuid) -> Result<bool, StoreError> {
        self.inner.delete_certificate(uuid)
    }

    fn list_certificates(&self) -> Result<Vec<CertificateRecord>, StoreError> {
        self.inner.list_certificates()
    }

    fn insert_offer_letter(&self, record: &OfferLetterRecord) -> Result<(), StoreError> {
        self.inner.insert_offer_letter(record)
    }

    fn offer_letter_by_number(
        &self,
        number: &OfferLetterNumber,
    ) -> Result<Option<OfferLetterRecord>, StoreError> {
        self.inner.offer_letter_by_number(number)
    }

    fn offer_letter_by_uuid(
        &self,
        uuid: &EntityUuid,
    ) -> Result<Option<OfferLetterRecord>, StoreError> {
        self.inner.offer_letter_by_uuid(uuid)
    }

    fn update_offer_letter(&self, record: &OfferLetterRecord) -> Result<bool, StoreError> {
        self.inner.update_offer_letter(record)
    }

    fn delete_offer_letter(&self, uuid: &EntityUuid) -> Result<bool, StoreError> {
        self.inner.delete_offer_letter(uuid)
    }

    fn list_offer_letters(&self) -> Result<Vec<OfferLetterRecord>, StoreError> {
        self.inner.list_offer_letters()
    }
}

/// Shared metrics sink backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedMetrics {
    /// Inner metrics implementation.
    inner: Arc<dyn RegistryMetrics>,
}

impl SharedMetrics {
    /// Wraps a metrics sink in a shared, clonable wrapper.
    #[must_use]
    pub fn from_metrics(metrics: impl RegistryMetrics + 'static) -> Self {
        Self {
            inner: Arc::new(metrics),
        }
    }

    /// Wraps an existing shared metrics sink.
    #[must_use]
    pub const fn new(metrics: Arc<dyn RegistryMetrics>) -> Self {
        Self {
            inner: metrics,
        }
    }
}

impl RegistryMetrics for SharedMetrics {
    fn record_issued(&self, kind: crate::core::codegen::DocumentKind) {
        self.inner.record_issued(kind);
    }

    fn record_issue_rejected(
        &self,
        kind: crate::core::codegen::DocumentKind,
        reason: &'static str,
    ) {
        self.inner.record_issue_rejected(kind, reason);
    }

    fn record_verification(&self, outcome: crate::interfaces::VerifyOutcome) {
        self.inner.record_verification(outcome);
    }

    fn record_duplicate_retry(&self, kind: crate::core::codegen::DocumentKind) {
        self.inner.record_duplicate_retry(kind);
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
    use crate::core::codegen::IssueLane;
    use crate::core::codegen::StaffKind;
    use crate::core::time::IssueDate;

    #[test]
    fn counters_start_at_one_and_stay_contiguous() {
        let store = InMemorySequenceStore::new();
        let name = CounterName::new("employees");
        assert_eq!(store.next_value(&name).unwrap(), 1);
        assert_eq!(store.next_value(&name).unwrap(), 2);
        assert_eq!(store.next_value(&name).unwrap(), 3);
    }

    #[test]
    fn series_counters_are_independent() {
        let store = InMemorySequenceStore::new();
        let date = IssueDate::new(date!(2025 - 06 - 01));
        let employees = IssueSeries::staff(StaffKind::Employee, date);
        let interns = IssueSeries::staff(StaffKind::Intern, date);
        assert_eq!(store.next_issue_number(&employees).unwrap(), 1);
        assert_eq!(store.next_issue_number(&employees).unwrap(), 2);
        assert_eq!(store.next_issue_number(&interns).unwrap(), 1);
        let next_year =
            IssueSeries::new(IssueLane::Employee, crate::core::codegen::EpochYear::short(
                IssueDate::new(date!(2026 - 01 - 01)),
            ));
        assert_eq!(store.next_issue_number(&next_year).unwrap(), 1);
    }

    #[test]
    fn name_and_series_keys_do_not_collide() {
        let store = InMemorySequenceStore::new();
        let date = IssueDate::new(date!(2025 - 06 - 01));
        let series = IssueSeries::staff(StaffKind::Employee, date);
        assert_eq!(store.next_issue_number(&series).unwrap(), 1);
        assert_eq!(store.next_value(&CounterName::new("employee/25")).unwrap(), 1);
        assert_eq!(store.next_issue_number(&series).unwrap(), 2);
    }
}
