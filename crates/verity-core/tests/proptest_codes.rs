// crates/verity-core/tests/proptest_codes.rs
// ============================================================================
// Module: Code Format Property Tests
// Description: Property-based checks for identifier wire forms.
// Purpose: Ensure every composable code parses back under its own contract.
// Dependencies: verity-core, proptest, time
// ============================================================================

//! ## Overview
//! Property tests over the full sequence and year ranges: any code the
//! composer can produce must round-trip through the strict parser, and the
//! parsers must reject off-by-one widths.

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

use proptest::prelude::*;
use time::Date;
use time::Month;
use verity_core::CertificateCode;
use verity_core::EmployeeCode;
use verity_core::IssueDate;
use verity_core::OfferLetterNumber;
use verity_core::OrgPrefix;
use verity_core::StaffKind;
use verity_core::certificate_code;
use verity_core::offer_number;
use verity_core::staff_code;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn issue_date(year: i32) -> IssueDate {
    IssueDate::new(Date::from_calendar_date(year, Month::June, 15).unwrap())
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn composed_staff_codes_always_parse(
        sequence in 1u64..=9_999,
        year in 2000i32..=2099,
        intern in any::<bool>(),
    ) {
        let kind = if intern { StaffKind::Intern } else { StaffKind::Employee };
        let code = staff_code(&OrgPrefix::default(), kind, issue_date(year), sequence).unwrap();
        prop_assert!(EmployeeCode::parse(code.as_str()).is_ok());
    }

    #[test]
    fn composed_certificate_codes_always_parse(
        sequence in 1u64..=999_999,
        year in 2000i32..=2099,
    ) {
        let code = certificate_code(issue_date(year), sequence).unwrap();
        prop_assert!(CertificateCode::parse(code.as_str()).is_ok());
    }

    #[test]
    fn composed_offer_numbers_always_parse(
        sequence in 1u64..=999_999,
        year in 2000i32..=2099,
    ) {
        let number = offer_number(issue_date(year), sequence).unwrap();
        prop_assert!(OfferLetterNumber::parse(number.as_str()).is_ok());
    }

    #[test]
    fn over_ceiling_sequences_never_format(
        sequence in 10_000u64..=1_000_000,
        year in 2000i32..=2099,
    ) {
        prop_assert!(
            staff_code(&OrgPrefix::default(), StaffKind::Employee, issue_date(year), sequence)
                .is_err()
        );
    }

    #[test]
    fn staff_parser_rejects_width_mutations(sequence in 1u64..=9_999, year in 0i32..=99) {
        let five_wide = format!("SWT-{year:02}-EMP-{sequence:05}");
        let three_wide = format!("SWT-{year:02}-EMP-{sequence:03}");
        prop_assert!(EmployeeCode::parse(&five_wide).is_err());
        if sequence <= 999 {
            prop_assert!(EmployeeCode::parse(&three_wide).is_err());
        }
    }
}
