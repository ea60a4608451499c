// crates/verity-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Unit Tests
// Description: Validate argument parsing and input helpers.
// Purpose: Ensure command shapes and date/uuid parsing stay stable.
// Dependencies: clap, verity-core
// ============================================================================

//! ## Overview
//! Unit tests for the CLI surface: subcommand shapes, enum argument
//! mappings, and the strict date and UUID input parsers.

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

use clap::Parser;
use verity_core::EntityUuid;
use verity_core::StaffKind;

use crate::Cli;
use crate::Commands;
use crate::EmployeeCommand;
use crate::KindArg;
use crate::parse_date;
use crate::parse_optional_date;
use crate::parse_uuid;

// ============================================================================
// SECTION: Parsing Tests
// ============================================================================

#[test]
fn employee_add_parses_required_flags() {
    let cli = Cli::try_parse_from([
        "verity",
        "employee",
        "add",
        "--name",
        "Asha Verma",
        "--designation",
        "Engineer",
        "--department",
        "Platform",
        "--work-location",
        "Pune",
        "--email",
        "asha@example.com",
        "--phone",
        "9876543210",
        "--kind",
        "intern",
    ])
    .unwrap();
    let Commands::Employee {
        command: EmployeeCommand::Add(command),
    } = cli.command
    else {
        panic!("expected employee add");
    };
    assert_eq!(command.name, "Asha Verma");
    assert_eq!(StaffKind::from(command.kind), StaffKind::Intern);
}

#[test]
fn kind_defaults_to_employee() {
    assert_eq!(StaffKind::from(KindArg::default()), StaffKind::Employee);
}

#[test]
fn verify_takes_a_positional_token() {
    let cli = Cli::try_parse_from(["verity", "verify", "SWT-25-EMP-0001"]).unwrap();
    let Commands::Verify(command) = cli.command else {
        panic!("expected verify");
    };
    assert_eq!(command.token, "SWT-25-EMP-0001");
}

#[test]
fn revoke_requires_a_reason() {
    assert!(Cli::try_parse_from(["verity", "revoke", "SWT-25-EMP-0001"]).is_err());
    let cli = Cli::try_parse_from([
        "verity",
        "revoke",
        "SWT-25-EMP-0001",
        "--reason",
        "reported stolen",
    ])
    .unwrap();
    let Commands::Revoke(command) = cli.command else {
        panic!("expected revoke");
    };
    assert_eq!(command.reason, "reported stolen");
}

#[test]
fn global_config_flag_is_accepted_anywhere() {
    let cli =
        Cli::try_parse_from(["verity", "employee", "list", "--config", "/tmp/verity.toml"])
            .unwrap();
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/verity.toml")));
}

// ============================================================================
// SECTION: Input Helper Tests
// ============================================================================

#[test]
fn dates_parse_iso_8601_only() {
    let date = parse_date("2025-06-01").unwrap();
    assert_eq!(date.year(), 2025);
    assert!(parse_date("01/06/2025").is_err());
    assert!(parse_date("not-a-date").is_err());
    assert_eq!(parse_optional_date(None).unwrap(), None);
}

#[test]
fn uuids_parse_and_reject_noise() {
    let uuid = EntityUuid::random();
    assert_eq!(parse_uuid(&format!(" {uuid} ")).unwrap(), uuid);
    assert!(parse_uuid("SWT-25-EMP-0001").is_err());
}
