// crates/verity-store-sqlite/tests/sqlite_store.rs
// ============================================================================
// Module: SQLite Store Tests
// Description: Validate atomic counters and unique-indexed record tables.
// Purpose: Ensure durability and exactly-once delivery across reopen.
// Dependencies: verity-store-sqlite, verity-core, serde_json, tempfile, time
// ============================================================================

//! ## Overview
//! Conformance tests for the SQLite-backed registry store: counter draws are
//! exactly-once under threads and across separate connections to the same
//! file, records survive reopen, unique violations surface as typed
//! duplicates, identity columns are write-once, and unsupported schema
//! versions are rejected on open.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::path::Path;
use std::thread;

use tempfile::TempDir;
use time::macros::date;
use verity_core::CounterName;
use verity_core::CredentialStatus;
use verity_core::DuplicateField;
use verity_core::EmployeeCode;
use verity_core::EmployeeRecord;
use verity_core::EmploymentType;
use verity_core::EntityUuid;
use verity_core::IssueDate;
use verity_core::IssueSeries;
use verity_core::RecordStore;
use verity_core::SequenceStore;
use verity_core::StaffKind;
use verity_core::StoreError;
use verity_core::Timestamp;
use verity_store_sqlite::SqliteRegistryStore;
use verity_store_sqlite::SqliteStoreConfig;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn store_for(path: &Path) -> SqliteRegistryStore {
    SqliteRegistryStore::open(&SqliteStoreConfig::at(path)).expect("store init")
}

fn sample_employee(id: u64, code: &str) -> EmployeeRecord {
    EmployeeRecord {
        id,
        code: EmployeeCode::parse(code).unwrap(),
        uuid: EntityUuid::random(),
        kind: StaffKind::Employee,
        status: CredentialStatus::Active,
        name: "Asha Verma".to_string(),
        designation: "Engineer".to_string(),
        department: "Platform".to_string(),
        employment_type: EmploymentType::FullTime,
        work_location: "Pune".to_string(),
        email: "asha@example.com".to_string(),
        phone: "9876543210".to_string(),
        address: None,
        emergency_contact: None,
        emergency_phone: None,
        date_of_birth: None,
        joining_date: Some(date!(2025 - 05 - 01)),
        salary: Some("85000".to_string()),
        bank_account: None,
        aadhar_number: None,
        pan_number: None,
        blood_group: None,
        manager: None,
        photo: None,
        qr_payload: None,
        revoked_at: None,
        revocation_reason: None,
        created_at: Timestamp::from_unix_millis(1_748_800_000_000),
        updated_at: Timestamp::from_unix_millis(1_748_800_000_000),
    }
}

// ============================================================================
// SECTION: Counter Tests
// ============================================================================

#[test]
fn counters_start_at_one_and_persist_across_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("registry.sqlite");
    let name = CounterName::new("employees");
    {
        let store = store_for(&path);
        assert_eq!(store.next_value(&name).unwrap(), 1);
        assert_eq!(store.next_value(&name).unwrap(), 2);
    }
    let store = store_for(&path);
    assert_eq!(store.next_value(&name).unwrap(), 3);
}

#[test]
fn issue_counters_are_keyed_by_lane_and_year() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("registry.sqlite"));
    let date = IssueDate::new(date!(2025 - 06 - 01));
    let employees = IssueSeries::staff(StaffKind::Employee, date);
    let interns = IssueSeries::staff(StaffKind::Intern, date);
    let certificates = IssueSeries::certificate(date);
    assert_eq!(store.next_issue_number(&employees).unwrap(), 1);
    assert_eq!(store.next_issue_number(&employees).unwrap(), 2);
    assert_eq!(store.next_issue_number(&interns).unwrap(), 1);
    assert_eq!(store.next_issue_number(&certificates).unwrap(), 1);
    let next_year = IssueSeries::staff(StaffKind::Employee, IssueDate::new(date!(2026 - 01 - 01)));
    assert_eq!(store.next_issue_number(&next_year).unwrap(), 1);
}

#[test]
fn threaded_draws_on_one_handle_are_exactly_once() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("registry.sqlite"));
    let date = IssueDate::new(date!(2025 - 06 - 01));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                let series = IssueSeries::staff(StaffKind::Employee, date);
                (0..25).map(|_| store.next_issue_number(&series).unwrap()).collect::<Vec<u64>>()
            })
        })
        .collect();
    let mut values = BTreeSet::new();
    for handle in handles {
        for value in handle.join().unwrap() {
            assert!(values.insert(value), "value {value} delivered twice");
        }
    }
    assert_eq!(values.len(), 100);
    assert_eq!(values.last().copied(), Some(100));
}

#[test]
fn separate_connections_to_one_file_never_share_a_value() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("registry.sqlite");
    let first = store_for(&path);
    let second = store_for(&path);
    let name = CounterName::new("shared");
    let mut values = BTreeSet::new();
    for _ in 0..20 {
        assert!(values.insert(first.next_value(&name).unwrap()));
        assert!(values.insert(second.next_value(&name).unwrap()));
    }
    assert_eq!(values.len(), 40);
    assert_eq!(values.last().copied(), Some(40));
}

// ============================================================================
// SECTION: Record Tests
// ============================================================================

#[test]
fn records_roundtrip_and_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("registry.sqlite");
    let record = sample_employee(1, "SWT-25-EMP-0001");
    {
        let store = store_for(&path);
        store.insert_employee(&record).unwrap();
    }
    let store = store_for(&path);
    let by_code = store.employee_by_code(&record.code).unwrap();
    let by_uuid = store.employee_by_uuid(&record.uuid).unwrap();
    assert_eq!(by_code, Some(record.clone()));
    assert_eq!(by_uuid, Some(record));
}

#[test]
fn duplicate_code_and_uuid_surface_as_typed_errors() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("registry.sqlite"));
    let record = sample_employee(1, "SWT-25-EMP-0001");
    store.insert_employee(&record).unwrap();

    let mut same_code = sample_employee(2, "SWT-25-EMP-0001");
    same_code.uuid = EntityUuid::random();
    let error = store.insert_employee(&same_code).unwrap_err();
    assert!(matches!(
        error,
        StoreError::Duplicate {
            field: DuplicateField::Code
        }
    ));

    let mut same_uuid = sample_employee(3, "SWT-25-EMP-0002");
    same_uuid.uuid = record.uuid;
    let error = store.insert_employee(&same_uuid).unwrap_err();
    assert!(matches!(
        error,
        StoreError::Duplicate {
            field: DuplicateField::Uuid
        }
    ));
}

#[test]
fn updates_replace_mutable_fields_but_not_identity() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("registry.sqlite"));
    let mut record = sample_employee(1, "SWT-25-EMP-0001");
    store.insert_employee(&record).unwrap();

    record.designation = "Senior Engineer".to_string();
    record.status = CredentialStatus::Inactive;
    assert!(store.update_employee(&record).unwrap());
    let loaded = store.employee_by_uuid(&record.uuid).unwrap().unwrap();
    assert_eq!(loaded.designation, "Senior Engineer");
    assert_eq!(loaded.status, CredentialStatus::Inactive);

    let mut moved = loaded;
    moved.code = EmployeeCode::parse("SWT-25-EMP-0009").unwrap();
    let error = store.update_employee(&moved).unwrap_err();
    assert!(matches!(error, StoreError::Invalid(_)));

    let absent = sample_employee(9, "SWT-25-EMP-0042");
    assert!(!store.update_employee(&absent).unwrap());
}

#[test]
fn deletes_remove_the_row_without_freeing_the_counter() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("registry.sqlite"));
    let record = sample_employee(1, "SWT-25-EMP-0001");
    store.insert_employee(&record).unwrap();
    assert!(store.delete_employee(&record.uuid).unwrap());
    assert!(!store.delete_employee(&record.uuid).unwrap());
    assert_eq!(store.employee_by_code(&record.code).unwrap(), None);

    let series = IssueSeries::staff(StaffKind::Employee, IssueDate::new(date!(2025 - 06 - 01)));
    assert_eq!(store.next_issue_number(&series).unwrap(), 1);
}

#[test]
fn lists_are_ordered_by_record_id() {
    let temp = TempDir::new().unwrap();
    let store = store_for(&temp.path().join("registry.sqlite"));
    for (id, code) in [(3, "SWT-25-EMP-0003"), (1, "SWT-25-EMP-0001"), (2, "SWT-25-EMP-0002")] {
        store.insert_employee(&sample_employee(id, code)).unwrap();
    }
    let ids: Vec<u64> = store.list_employees().unwrap().iter().map(|record| record.id).collect();
    assert_eq!(ids, [1, 2, 3]);
}

// ============================================================================
// SECTION: Schema Tests
// ============================================================================

#[test]
fn unsupported_schema_version_is_rejected_on_open() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("registry.sqlite");
    {
        let _store = store_for(&path);
    }
    {
        let connection = rusqlite::Connection::open(&path).unwrap();
        connection.execute("UPDATE store_meta SET version = 99", []).unwrap();
    }
    assert!(SqliteRegistryStore::open(&SqliteStoreConfig::at(&path)).is_err());
}

#[test]
fn directory_store_paths_are_rejected() {
    let temp = TempDir::new().unwrap();
    assert!(SqliteRegistryStore::open(&SqliteStoreConfig::at(temp.path())).is_err());
}
