// crates/verity-core/tests/validation.rs
// ============================================================================
// Module: Boundary Validation Tests
// Description: Validate per-field issuance rules and sanitization.
// Purpose: Ensure malformed inputs are rejected before counters are touched.
// Dependencies: verity-core, serde_json, time
// ============================================================================

//! ## Overview
//! Conformance tests for the boundary validation rules: charset and length
//! bounds, contact and government-identifier shapes, date policies, and the
//! aggregate error listing every rejected field.

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

use serde_json::json;
use time::macros::date;
use verity_core::EmploymentType;
use verity_core::NewCertificate;
use verity_core::NewEmployee;
use verity_core::NewOfferLetter;
use verity_core::StaffKind;
use verity_core::validate_new_certificate;
use verity_core::validate_new_employee;
use verity_core::validate_new_offer_letter;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn valid_employee() -> NewEmployee {
    NewEmployee {
        name: "Asha Verma".to_string(),
        designation: "Software Engineer".to_string(),
        department: "Platform".to_string(),
        kind: StaffKind::Employee,
        employment_type: EmploymentType::FullTime,
        work_location: "Pune".to_string(),
        email: "asha@example.com".to_string(),
        phone: "9876543210".to_string(),
        address: None,
        emergency_contact: None,
        emergency_phone: None,
        date_of_birth: Some(date!(1992 - 02 - 14)),
        joining_date: Some(date!(2025 - 05 - 01)),
        salary: Some("85000".to_string()),
        bank_account: Some("123456789".to_string()),
        aadhar_number: Some("123456789012".to_string()),
        pan_number: Some("ABCDE1234F".to_string()),
        blood_group: None,
        manager: None,
        photo: None,
    }
}

const TODAY: time::Date = date!(2025 - 06 - 01);

// ============================================================================
// SECTION: Employee Rules
// ============================================================================

#[test]
fn valid_input_passes() {
    assert!(validate_new_employee(&valid_employee(), TODAY).is_ok());
}

#[test]
fn name_charset_and_length_are_enforced() {
    let mut input = valid_employee();
    input.name = "X".to_string();
    assert!(validate_new_employee(&input, TODAY).is_err());
    input.name = "Asha123".to_string();
    assert!(validate_new_employee(&input, TODAY).is_err());
    input.name = "a".repeat(101);
    assert!(validate_new_employee(&input, TODAY).is_err());
}

#[test]
fn designation_allows_hyphens_but_department_does_not() {
    let mut input = valid_employee();
    input.designation = "Co-Founder".to_string();
    assert!(validate_new_employee(&input, TODAY).is_ok());
    input.department = "R-and-D".to_string();
    assert!(validate_new_employee(&input, TODAY).is_err());
}

#[test]
fn phone_must_be_indian_mobile() {
    let mut input = valid_employee();
    input.phone = "1234567890".to_string();
    assert!(validate_new_employee(&input, TODAY).is_err());
    input.phone = "98765".to_string();
    assert!(validate_new_employee(&input, TODAY).is_err());
    input.phone = "98765-43210".to_string();
    assert!(validate_new_employee(&input, TODAY).is_ok());
}

#[test]
fn government_identifiers_have_fixed_shapes() {
    let mut input = valid_employee();
    input.aadhar_number = Some("12345".to_string());
    assert!(validate_new_employee(&input, TODAY).is_err());
    input.aadhar_number = Some("123456789012".to_string());
    input.pan_number = Some("abcde1234f".to_string());
    assert!(validate_new_employee(&input, TODAY).is_err());
}

#[test]
fn date_policies_are_enforced() {
    let mut input = valid_employee();
    input.date_of_birth = Some(date!(2015 - 01 - 01));
    assert!(validate_new_employee(&input, TODAY).is_err());
    input.date_of_birth = Some(date!(1990 - 01 - 01));
    input.joining_date = Some(date!(2026 - 01 - 01));
    assert!(validate_new_employee(&input, TODAY).is_err());
}

#[test]
fn optional_fields_skip_validation_when_absent() {
    let mut input = valid_employee();
    input.date_of_birth = None;
    input.joining_date = None;
    input.salary = None;
    input.bank_account = None;
    input.aadhar_number = None;
    input.pan_number = None;
    assert!(validate_new_employee(&input, TODAY).is_ok());
}

#[test]
fn aggregate_error_lists_every_rejected_field() {
    let mut input = valid_employee();
    input.name = "X".to_string();
    input.phone = "12345".to_string();
    input.pan_number = Some("nope".to_string());
    let error = validate_new_employee(&input, TODAY).unwrap_err();
    let fields: Vec<&str> = error.issues.iter().map(|issue| issue.field).collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"phone"));
    assert!(fields.contains(&"pan_number"));
}

// ============================================================================
// SECTION: Certificate and Offer Rules
// ============================================================================

#[test]
fn certificate_payload_must_be_an_object() {
    let mut input = NewCertificate {
        holder_name: "Asha Verma".to_string(),
        holder_uuid: None,
        certificate_type: "internship".to_string(),
        payload: json!(["not", "an", "object"]),
        batch_id: None,
        issued_by: None,
    };
    assert!(validate_new_certificate(&input).is_err());
    input.payload = json!({"domain": "data"});
    assert!(validate_new_certificate(&input).is_ok());
}

#[test]
fn offer_letters_need_a_candidate_and_future_validity() {
    let mut input = NewOfferLetter {
        candidate_name: "  ".to_string(),
        company_name: None,
        designation: None,
        department: None,
        salary: None,
        joining_date: None,
        validity_period: None,
        valid_until: None,
        location: None,
        email: None,
        phone: None,
        batch_id: None,
        generated_by: None,
    };
    assert!(validate_new_offer_letter(&input, TODAY).is_err());
    input.candidate_name = "Kiran Rao".to_string();
    assert!(validate_new_offer_letter(&input, TODAY).is_ok());
    input.valid_until = Some(date!(2025 - 01 - 01));
    assert!(validate_new_offer_letter(&input, TODAY).is_err());
}
