// crates/verity-core/tests/concurrency.rs
// ============================================================================
// Module: Concurrency Tests
// Description: Validate exactly-once sequence delivery under parallel draws.
// Purpose: Ensure concurrent issuance never yields duplicate identifiers.
// Dependencies: verity-core, time
// ============================================================================

//! ## Overview
//! The uniqueness invariant rests entirely on the sequence store's atomic
//! read-modify-write. These tests hammer one store from many threads and
//! assert that every drawn value is distinct and the final set is a
//! contiguous run, then repeat the exercise through the full registration
//! workflow.

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
use std::thread;

use time::macros::date;
use verity_core::CodeIssuer;
use verity_core::EmploymentType;
use verity_core::IdentityRegistry;
use verity_core::InMemoryRecordStore;
use verity_core::InMemorySequenceStore;
use verity_core::IssueDate;
use verity_core::IssueInstant;
use verity_core::IssueSeries;
use verity_core::NewEmployee;
use verity_core::OrgPrefix;
use verity_core::SequenceStore;
use verity_core::SharedRecordStore;
use verity_core::SharedSequenceStore;
use verity_core::StaffKind;
use verity_core::Timestamp;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Worker threads per test.
const THREADS: usize = 8;
/// Draws per worker thread.
const DRAWS_PER_THREAD: usize = 50;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn concurrent_draws_deliver_each_value_exactly_once() {
    let store = SharedSequenceStore::from_store(InMemorySequenceStore::new());
    let date = IssueDate::new(date!(2025 - 06 - 01));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                let series = IssueSeries::staff(StaffKind::Employee, date);
                (0..DRAWS_PER_THREAD)
                    .map(|_| store.next_issue_number(&series).unwrap())
                    .collect::<Vec<u64>>()
            })
        })
        .collect();

    let mut values = BTreeSet::new();
    for handle in handles {
        for value in handle.join().unwrap() {
            assert!(values.insert(value), "value {value} delivered twice");
        }
    }
    let total = u64::try_from(THREADS * DRAWS_PER_THREAD).unwrap();
    assert_eq!(values.len(), THREADS * DRAWS_PER_THREAD);
    assert_eq!(values.first().copied(), Some(1));
    assert_eq!(values.last().copied(), Some(total));
}

#[test]
fn concurrent_issuers_never_format_the_same_code() {
    let store = SharedSequenceStore::from_store(InMemorySequenceStore::new());
    let date = IssueDate::new(date!(2025 - 06 - 01));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let issuer = CodeIssuer::new(store.clone(), OrgPrefix::default());
            thread::spawn(move || {
                (0..DRAWS_PER_THREAD)
                    .map(|_| issuer.next_staff_code(StaffKind::Employee, date).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut codes = BTreeSet::new();
    for handle in handles {
        for code in handle.join().unwrap() {
            assert!(codes.insert(code.as_str().to_string()), "code {code} issued twice");
        }
    }
    assert_eq!(codes.len(), THREADS * DRAWS_PER_THREAD);
}

#[test]
fn concurrent_registrations_yield_distinct_codes_and_uuids() {
    let registry = IdentityRegistry::new(
        SharedSequenceStore::from_store(InMemorySequenceStore::new()),
        SharedRecordStore::from_store(InMemoryRecordStore::new()),
        OrgPrefix::default(),
    );
    let issued_at = IssueInstant::new(
        IssueDate::new(date!(2025 - 06 - 01)),
        Timestamp::from_unix_millis(1_748_800_000_000),
    );
    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let registry = registry.clone();
            thread::spawn(move || {
                (0..10)
                    .map(|i| {
                        registry
                            .register_employee(worker_input(worker, i), issued_at)
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut codes = BTreeSet::new();
    let mut uuids = BTreeSet::new();
    for handle in handles {
        for record in handle.join().unwrap() {
            assert!(codes.insert(record.code.as_str().to_string()));
            assert!(uuids.insert(record.uuid.to_string()));
        }
    }
    assert_eq!(codes.len(), THREADS * 10);
    assert_eq!(uuids.len(), THREADS * 10);
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn worker_input(worker: usize, index: usize) -> NewEmployee {
    NewEmployee {
        name: format!("Worker {} Index {}", name_word(worker), name_word(index)),
        designation: "Engineer".to_string(),
        department: "Platform".to_string(),
        kind: StaffKind::Employee,
        employment_type: EmploymentType::FullTime,
        work_location: "Pune".to_string(),
        email: format!("worker{worker}.{index}@example.com"),
        phone: "9876543210".to_string(),
        address: None,
        emergency_contact: None,
        emergency_phone: None,
        date_of_birth: None,
        joining_date: None,
        salary: None,
        bank_account: None,
        aadhar_number: None,
        pan_number: None,
        blood_group: None,
        manager: None,
        photo: None,
    }
}

/// Spells a small number as a word so names stay letters-only.
fn name_word(value: usize) -> &'static str {
    const WORDS: &[&str] = &["zero", "one", "two", "three", "four", "five", "six", "seven",
        "eight", "nine", "ten"];
    WORDS.get(value).copied().unwrap_or("many")
}
