// crates/verity-core/src/core/validation.rs
// ============================================================================
// Module: Verity Boundary Validation
// Description: Explicit per-field validation for issuance inputs.
// Purpose: Reject malformed inputs before any counter slot is consumed.
// Dependencies: crate::core::records, thiserror, time
// ============================================================================

//! ## Overview
//! Issuance inputs are validated against explicit per-field rules before the
//! identifier pipeline runs, so a rejected request never burns a sequence
//! slot. Rules mirror the issuing organization's data policy: names and
//! departments are plain text, phone numbers are 10-digit Indian mobiles,
//! and government identifiers (Aadhar, PAN) have fixed shapes. Free-text
//! inputs are additionally sanitized to strip markup-significant characters.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;
use time::Date;

use crate::core::records::NewCertificate;
use crate::core::records::NewEmployee;
use crate::core::records::NewOfferLetter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum length of any sanitized free-text input.
const MAX_TEXT_LENGTH: usize = 500;
/// Minimum accepted age in full calendar years.
const MIN_AGE_YEARS: i32 = 18;
/// Maximum accepted age in full calendar years.
const MAX_AGE_YEARS: i32 = 100;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// A single rejected field with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Field name that failed validation.
    pub field: &'static str,
    /// User-facing message describing the rule.
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Aggregate validation failure across one or more fields.
#[derive(Debug, Error)]
#[error("validation failed: {}", joined_fields(.issues))]
pub struct ValidationError {
    /// All rejected fields.
    pub issues: Vec<ValidationIssue>,
}

/// Joins issue field names for the aggregate error message.
fn joined_fields(issues: &[ValidationIssue]) -> String {
    issues.iter().map(|issue| issue.field).collect::<Vec<_>>().join(", ")
}

// ============================================================================
// SECTION: Employee Validation
// ============================================================================

/// Validates a new-employee input against all field rules.
///
/// # Errors
///
/// Returns [`ValidationError`] listing every rejected field.
pub fn validate_new_employee(input: &NewEmployee, today: Date) -> Result<(), ValidationError> {
    let mut issues = Vec::new();
    check_text(&mut issues, "name", &input.name, 2, 100, false);
    check_text(&mut issues, "designation", &input.designation, 2, 50, true);
    check_text(&mut issues, "department", &input.department, 2, 50, false);
    check_text(&mut issues, "work_location", &input.work_location, 2, 50, true);
    if !is_email(&input.email) {
        issues.push(issue("email", "must be a valid email address"));
    }
    if !is_mobile(&input.phone) {
        issues.push(issue("phone", "must be a valid 10-digit mobile number starting with 6-9"));
    }
    if let Some(emergency_phone) = &input.emergency_phone
        && !is_mobile(emergency_phone)
    {
        issues.push(issue(
            "emergency_phone",
            "must be a valid 10-digit mobile number starting with 6-9",
        ));
    }
    if let Some(aadhar) = &input.aadhar_number
        && !is_exact_digits(aadhar, 12)
    {
        issues.push(issue("aadhar_number", "must be exactly 12 digits"));
    }
    if let Some(pan) = &input.pan_number
        && !is_pan(pan)
    {
        issues.push(issue("pan_number", "must be in format: ABCDE1234F"));
    }
    if let Some(bank_account) = &input.bank_account
        && !is_bank_account(bank_account)
    {
        issues.push(issue("bank_account", "must be 9-18 digits"));
    }
    if let Some(salary) = &input.salary
        && !is_decimal_amount(salary)
    {
        issues.push(issue("salary", "must be a valid number"));
    }
    if let Some(date_of_birth) = input.date_of_birth {
        let age = today.year() - date_of_birth.year();
        if !(MIN_AGE_YEARS..=MAX_AGE_YEARS).contains(&age) {
            issues.push(issue("date_of_birth", "person must be at least 18 years old"));
        }
    }
    if let Some(joining_date) = input.joining_date
        && joining_date > today
    {
        issues.push(issue("joining_date", "cannot be in the future"));
    }
    finish(issues)
}

// ============================================================================
// SECTION: Certificate Validation
// ============================================================================

/// Validates a new-certificate input.
///
/// # Errors
///
/// Returns [`ValidationError`] listing every rejected field.
pub fn validate_new_certificate(input: &NewCertificate) -> Result<(), ValidationError> {
    let mut issues = Vec::new();
    if input.holder_name.trim().is_empty() || input.holder_name.len() > 100 {
        issues.push(issue("holder_name", "must be 1-100 characters"));
    }
    if input.certificate_type.trim().is_empty() || input.certificate_type.len() > 50 {
        issues.push(issue("certificate_type", "must be 1-50 characters"));
    }
    if !input.payload.is_object() {
        issues.push(issue("payload", "must be a JSON object"));
    }
    finish(issues)
}

// ============================================================================
// SECTION: Offer Letter Validation
// ============================================================================

/// Validates a new-offer-letter input.
///
/// # Errors
///
/// Returns [`ValidationError`] listing every rejected field.
pub fn validate_new_offer_letter(
    input: &NewOfferLetter,
    today: Date,
) -> Result<(), ValidationError> {
    let mut issues = Vec::new();
    if input.candidate_name.trim().is_empty() || input.candidate_name.len() > 100 {
        issues.push(issue("candidate_name", "must be 1-100 characters"));
    }
    if let Some(email) = &input.email
        && !is_email(email)
    {
        issues.push(issue("email", "must be a valid email address"));
    }
    if let Some(valid_until) = input.valid_until
        && valid_until < today
    {
        issues.push(issue("valid_until", "cannot be in the past at issuance"));
    }
    finish(issues)
}

// ============================================================================
// SECTION: Sanitization
// ============================================================================

/// Sanitizes a free-text input: trims, strips markup-significant characters,
/// and caps the length.
#[must_use]
pub fn sanitize(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '<' | '>' | '"' | '\'' | '&'))
        .take(MAX_TEXT_LENGTH)
        .collect()
}

// ============================================================================
// SECTION: Field Rules
// ============================================================================

/// Builds a validation issue for a field.
fn issue(field: &'static str, message: &str) -> ValidationIssue {
    ValidationIssue {
        field,
        message: message.to_string(),
    }
}

/// Converts accumulated issues into a result.
fn finish(issues: Vec<ValidationIssue>) -> Result<(), ValidationError> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError {
            issues,
        })
    }
}

/// Checks a plain-text field for length bounds and charset.
fn check_text(
    issues: &mut Vec<ValidationIssue>,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
    allow_hyphen: bool,
) {
    let charset_ok = value
        .chars()
        .all(|ch| ch.is_ascii_alphabetic() || ch == ' ' || (allow_hyphen && ch == '-'));
    if value.len() < min || value.len() > max || !charset_ok {
        let extra = if allow_hyphen { ", spaces, and hyphens" } else { " and spaces" };
        issues.push(ValidationIssue {
            field,
            message: format!("must be {min}-{max} characters and contain only letters{extra}"),
        });
    }
}

/// Returns true for a plausible email address shape.
fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

/// Returns true for a 10-digit Indian mobile number starting with 6-9.
fn is_mobile(value: &str) -> bool {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    digits.len() == 10 && digits.starts_with(['6', '7', '8', '9'])
}

/// Returns true when the value is exactly `len` ASCII digits.
fn is_exact_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|byte| byte.is_ascii_digit())
}

/// Returns true for the PAN shape `AAAAA9999A`.
fn is_pan(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[..5].iter().all(u8::is_ascii_uppercase)
        && bytes[5..9].iter().all(u8::is_ascii_digit)
        && bytes[9].is_ascii_uppercase()
}

/// Returns true for a 9-18 digit bank account number.
fn is_bank_account(value: &str) -> bool {
    (9..=18).contains(&value.len()) && value.bytes().all(|byte| byte.is_ascii_digit())
}

/// Returns true for a decimal amount with at most two fraction digits.
fn is_decimal_amount(value: &str) -> bool {
    match value.split_once('.') {
        Some((integer, fraction)) => {
            !integer.is_empty()
                && integer.bytes().all(|byte| byte.is_ascii_digit())
                && (1..=2).contains(&fraction.len())
                && fraction.bytes().all(|byte| byte.is_ascii_digit())
        }
        None => !value.is_empty() && value.bytes().all(|byte| byte.is_ascii_digit()),
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

    use super::*;

    #[test]
    fn email_rules_follow_policy() {
        assert!(is_email("a@b.co"));
        assert!(is_email("first.last@sub.domain.org"));
        assert!(!is_email("no-at.example.com"));
        assert!(!is_email("two@@b.co"));
        assert!(!is_email("spaces in@b.co"));
        assert!(!is_email("a@nodot"));
        assert!(!is_email("a@.x"));
    }

    #[test]
    fn mobile_rules_accept_formatting_noise() {
        assert!(is_mobile("9876543210"));
        assert!(is_mobile("+91 98765-43210".trim_start_matches("+91 ")));
        assert!(!is_mobile("1234567890"));
        assert!(!is_mobile("98765"));
    }

    #[test]
    fn pan_shape_is_strict() {
        assert!(is_pan("ABCDE1234F"));
        assert!(!is_pan("abcde1234f"));
        assert!(!is_pan("ABCDE12345"));
        assert!(!is_pan("ABCD1234FX"));
    }

    #[test]
    fn decimal_amounts_allow_two_places() {
        assert!(is_decimal_amount("50000"));
        assert!(is_decimal_amount("50000.5"));
        assert!(is_decimal_amount("50000.50"));
        assert!(!is_decimal_amount("50000.500"));
        assert!(!is_decimal_amount(".5"));
        assert!(!is_decimal_amount("50,000"));
    }

    #[test]
    fn sanitize_strips_markup_and_caps_length() {
        assert_eq!(sanitize("  <b>Jane</b> & Co  "), "bJane/b  Co");
        let long = "x".repeat(600);
        assert_eq!(sanitize(&long).len(), MAX_TEXT_LENGTH);
    }
}
