// crates/verity-cli/src/main.rs
// ============================================================================
// Module: Verity CLI Entry Point
// Description: Command dispatcher for issuance, verification, and revocation.
// Purpose: Provide an operator shell over the registry and SQLite store.
// Dependencies: clap, serde_json, time, verity-config, verity-core,
//               verity-store-sqlite
// ============================================================================

//! ## Overview
//! The Verity CLI wires configuration, the SQLite store, and the registry
//! into operator commands: registering employees, issuing certificates and
//! offer letters, resolving verification tokens, and revoking documents.
//! The wall clock is read exactly once per invocation at this boundary; the
//! core receives explicit dates and timestamps.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde_json::json;
use time::Date;
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;
use verity_config::ConfigError;
use verity_config::RegistryConfig;
use verity_core::EmployeeUpdate;
use verity_core::EmploymentType;
use verity_core::EntityUuid;
use verity_core::IdentityRegistry;
use verity_core::IssueInstant;
use verity_core::NewCertificate;
use verity_core::NewEmployee;
use verity_core::NewOfferLetter;
use verity_core::RegistryError;
use verity_core::SharedRecordStore;
use verity_core::SharedSequenceStore;
use verity_core::StaffKind;
use verity_core::verify_url;
use verity_store_sqlite::SqliteRegistryStore;
use verity_store_sqlite::SqliteStoreError;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "verity", version, disable_help_subcommand = true)]
struct Cli {
    /// Optional config file path (defaults to verity.toml or env override).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Employee ID records.
    Employee {
        /// Selected employee subcommand.
        #[command(subcommand)]
        command: EmployeeCommand,
    },
    /// Certificates.
    Certificate {
        /// Selected certificate subcommand.
        #[command(subcommand)]
        command: CertificateCommand,
    },
    /// Offer letters.
    Offer {
        /// Selected offer letter subcommand.
        #[command(subcommand)]
        command: OfferCommand,
    },
    /// Resolve a verification token to its public view.
    Verify(VerifyCommand),
    /// Revoke the document a token resolves to.
    Revoke(RevokeCommand),
    /// Print the verification portal URL for a document UUID.
    VerifyUrl(VerifyUrlCommand),
}

/// Employee subcommands.
#[derive(Subcommand, Debug)]
enum EmployeeCommand {
    /// Register a new employee or intern and issue their ID.
    Add(EmployeeAddCommand),
    /// List all employee records.
    List,
    /// Update mutable fields of an employee record.
    Update(EmployeeUpdateCommand),
    /// Delete an employee record (its code is never reissued).
    Delete(DeleteCommand),
}

/// Certificate subcommands.
#[derive(Subcommand, Debug)]
enum CertificateCommand {
    /// Issue a new certificate.
    Issue(CertificateIssueCommand),
    /// List all certificate records.
    List,
}

/// Offer letter subcommands.
#[derive(Subcommand, Debug)]
enum OfferCommand {
    /// Issue a new offer letter.
    Issue(OfferIssueCommand),
    /// List all offer letter records.
    List,
}

/// Staff kind CLI argument.
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum KindArg {
    /// Regular employee.
    #[default]
    Employee,
    /// Intern.
    Intern,
}

impl From<KindArg> for StaffKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Employee => Self::Employee,
            KindArg::Intern => Self::Intern,
        }
    }
}

/// Employment type CLI argument.
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum EmploymentTypeArg {
    /// Full-time employment.
    #[default]
    FullTime,
    /// Part-time employment.
    PartTime,
    /// Fixed-term contract.
    Contract,
    /// Internship.
    Intern,
}

impl From<EmploymentTypeArg> for EmploymentType {
    fn from(value: EmploymentTypeArg) -> Self {
        match value {
            EmploymentTypeArg::FullTime => Self::FullTime,
            EmploymentTypeArg::PartTime => Self::PartTime,
            EmploymentTypeArg::Contract => Self::Contract,
            EmploymentTypeArg::Intern => Self::Intern,
        }
    }
}

/// Arguments for `employee add`.
#[derive(Args, Debug)]
struct EmployeeAddCommand {
    /// Full name.
    #[arg(long)]
    name: String,
    /// Job title.
    #[arg(long)]
    designation: String,
    /// Department name.
    #[arg(long)]
    department: String,
    /// Staff kind to issue the code for.
    #[arg(long, value_enum, default_value_t = KindArg::Employee)]
    kind: KindArg,
    /// Employment arrangement.
    #[arg(long = "employment-type", value_enum, default_value_t = EmploymentTypeArg::FullTime)]
    employment_type: EmploymentTypeArg,
    /// Work location.
    #[arg(long = "work-location")]
    work_location: String,
    /// Contact email.
    #[arg(long)]
    email: String,
    /// Contact phone number.
    #[arg(long)]
    phone: String,
    /// Postal address.
    #[arg(long)]
    address: Option<String>,
    /// Date of birth (ISO 8601, e.g. 1992-02-14).
    #[arg(long = "date-of-birth", value_name = "DATE")]
    date_of_birth: Option<String>,
    /// Joining date (ISO 8601).
    #[arg(long = "joining-date", value_name = "DATE")]
    joining_date: Option<String>,
    /// Salary figure.
    #[arg(long)]
    salary: Option<String>,
    /// Bank account number.
    #[arg(long = "bank-account")]
    bank_account: Option<String>,
    /// Aadhar number.
    #[arg(long = "aadhar-number")]
    aadhar_number: Option<String>,
    /// PAN number.
    #[arg(long = "pan-number")]
    pan_number: Option<String>,
    /// Blood group.
    #[arg(long = "blood-group")]
    blood_group: Option<String>,
    /// Reporting manager name.
    #[arg(long)]
    manager: Option<String>,
}

/// Arguments for `employee update`.
#[derive(Args, Debug)]
struct EmployeeUpdateCommand {
    /// Verification UUID of the record to update.
    #[arg(long)]
    uuid: String,
    /// New job title.
    #[arg(long)]
    designation: Option<String>,
    /// New department.
    #[arg(long)]
    department: Option<String>,
    /// New work location.
    #[arg(long = "work-location")]
    work_location: Option<String>,
    /// New contact email.
    #[arg(long)]
    email: Option<String>,
    /// New contact phone.
    #[arg(long)]
    phone: Option<String>,
    /// New reporting manager.
    #[arg(long)]
    manager: Option<String>,
}

/// Arguments for delete subcommands.
#[derive(Args, Debug)]
struct DeleteCommand {
    /// Verification UUID of the record to delete.
    #[arg(long)]
    uuid: String,
}

/// Arguments for `certificate issue`.
#[derive(Args, Debug)]
struct CertificateIssueCommand {
    /// Name of the certificate holder.
    #[arg(long = "holder-name")]
    holder_name: String,
    /// Verification UUID of the holder's ID record, when linked.
    #[arg(long = "holder-uuid")]
    holder_uuid: Option<String>,
    /// Certificate type label.
    #[arg(long = "type")]
    certificate_type: String,
    /// Certificate payload as an inline JSON object.
    #[arg(long, value_name = "JSON")]
    payload: String,
    /// Import batch identifier.
    #[arg(long = "batch-id")]
    batch_id: Option<String>,
    /// Operator issuing the certificate.
    #[arg(long = "issued-by")]
    issued_by: Option<String>,
}

/// Arguments for `offer issue`.
#[derive(Args, Debug)]
struct OfferIssueCommand {
    /// Candidate name.
    #[arg(long = "candidate-name")]
    candidate_name: String,
    /// Hiring company name.
    #[arg(long = "company-name")]
    company_name: Option<String>,
    /// Offered designation.
    #[arg(long)]
    designation: Option<String>,
    /// Offered department.
    #[arg(long)]
    department: Option<String>,
    /// Offered salary.
    #[arg(long)]
    salary: Option<String>,
    /// Proposed joining date (ISO 8601).
    #[arg(long = "joining-date", value_name = "DATE")]
    joining_date: Option<String>,
    /// Human-readable validity period printed on the letter.
    #[arg(long = "validity-period")]
    validity_period: Option<String>,
    /// Date the offer lapses (ISO 8601).
    #[arg(long = "valid-until", value_name = "DATE")]
    valid_until: Option<String>,
    /// Work location.
    #[arg(long)]
    location: Option<String>,
    /// Candidate email.
    #[arg(long)]
    email: Option<String>,
    /// Candidate phone.
    #[arg(long)]
    phone: Option<String>,
    /// Operator generating the letter.
    #[arg(long = "generated-by")]
    generated_by: Option<String>,
}

/// Arguments for `verify`.
#[derive(Args, Debug)]
struct VerifyCommand {
    /// Human-readable code or verification UUID.
    token: String,
}

/// Arguments for `revoke`.
#[derive(Args, Debug)]
struct RevokeCommand {
    /// Human-readable code or verification UUID.
    token: String,
    /// Reason recorded with the revocation.
    #[arg(long)]
    reason: String,
}

/// Arguments for `verify-url`.
#[derive(Args, Debug)]
struct VerifyUrlCommand {
    /// Verification UUID of the document.
    uuid: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error carrying a user-facing message.
#[derive(Debug)]
struct CliError {
    /// User-facing message.
    message: String,
}

impl CliError {
    /// Creates a CLI error from a message.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result alias for CLI handlers.
type CliResult<T> = Result<T, CliError>;

impl From<RegistryError> for CliError {
    fn from(error: RegistryError) -> Self {
        Self::new(error.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        Self::new(error.to_string())
    }
}

impl From<SqliteStoreError> for CliError {
    fn from(error: SqliteStoreError) -> Self {
        Self::new(error.to_string())
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => emit_error(&error.message),
    }
}

/// Dispatches the parsed command.
fn run(cli: Cli) -> CliResult<()> {
    let config = RegistryConfig::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Employee {
            command,
        } => match command {
            EmployeeCommand::Add(command) => {
                handle_employee_add(&build_registry(&config)?, command)
            }
            EmployeeCommand::List => handle_employee_list(&build_registry(&config)?),
            EmployeeCommand::Update(command) => {
                handle_employee_update(&build_registry(&config)?, command)
            }
            EmployeeCommand::Delete(command) => {
                handle_employee_delete(&build_registry(&config)?, &command)
            }
        },
        Commands::Certificate {
            command,
        } => match command {
            CertificateCommand::Issue(command) => {
                handle_certificate_issue(&build_registry(&config)?, command)
            }
            CertificateCommand::List => handle_certificate_list(&build_registry(&config)?),
        },
        Commands::Offer {
            command,
        } => match command {
            OfferCommand::Issue(command) => handle_offer_issue(&build_registry(&config)?, command),
            OfferCommand::List => handle_offer_list(&build_registry(&config)?),
        },
        Commands::Verify(command) => handle_verify(&build_registry(&config)?, &command),
        Commands::Revoke(command) => handle_revoke(&build_registry(&config)?, &command),
        Commands::VerifyUrl(command) => handle_verify_url(&config, &command),
    }
}

/// Opens the store and wires the registry from config.
fn build_registry(config: &RegistryConfig) -> CliResult<IdentityRegistry> {
    let store = Arc::new(SqliteRegistryStore::open(&config.store.to_store_config())?);
    let registry = IdentityRegistry::new(
        SharedSequenceStore::new(store.clone()),
        SharedRecordStore::new(store),
        config.issuer.org_prefix()?,
    )
    .with_portal_base(config.verify.portal_base()?);
    Ok(registry)
}

// ============================================================================
// SECTION: Employee Handlers
// ============================================================================

/// Handles `employee add`.
fn handle_employee_add(registry: &IdentityRegistry, command: EmployeeAddCommand) -> CliResult<()> {
    let input = NewEmployee {
        name: command.name,
        designation: command.designation,
        department: command.department,
        kind: command.kind.into(),
        employment_type: command.employment_type.into(),
        work_location: command.work_location,
        email: command.email,
        phone: command.phone,
        address: command.address,
        emergency_contact: None,
        emergency_phone: None,
        date_of_birth: parse_optional_date(command.date_of_birth.as_deref())?,
        joining_date: parse_optional_date(command.joining_date.as_deref())?,
        salary: command.salary,
        bank_account: command.bank_account,
        aadhar_number: command.aadhar_number,
        pan_number: command.pan_number,
        blood_group: command.blood_group,
        manager: command.manager,
        photo: None,
    };
    let record = registry.register_employee(input, now_instant())?;
    write_json(&json!({
        "code": record.code.as_str(),
        "uuid": record.uuid.to_string(),
        "status": record.status.as_str(),
        "verify_url": record.qr_payload,
    }))
}

/// Handles `employee list`.
fn handle_employee_list(registry: &IdentityRegistry) -> CliResult<()> {
    let rows: Vec<serde_json::Value> = registry
        .list_employees()?
        .iter()
        .map(|record| {
            json!({
                "id": record.id,
                "code": record.code.as_str(),
                "uuid": record.uuid.to_string(),
                "name": record.name,
                "department": record.department,
                "status": record.status.as_str(),
            })
        })
        .collect();
    write_json(&serde_json::Value::Array(rows))
}

/// Handles `employee update`.
fn handle_employee_update(
    registry: &IdentityRegistry,
    command: EmployeeUpdateCommand,
) -> CliResult<()> {
    let uuid = parse_uuid(&command.uuid)?;
    let patch = EmployeeUpdate {
        designation: command.designation,
        department: command.department,
        work_location: command.work_location,
        email: command.email,
        phone: command.phone,
        manager: command.manager,
        photo: None,
    };
    let record = registry.update_employee(&uuid, patch, now_instant().at)?;
    write_json(&json!({
        "code": record.code.as_str(),
        "uuid": record.uuid.to_string(),
        "designation": record.designation,
        "department": record.department,
        "status": record.status.as_str(),
    }))
}

/// Handles `employee delete`.
fn handle_employee_delete(registry: &IdentityRegistry, command: &DeleteCommand) -> CliResult<()> {
    let uuid = parse_uuid(&command.uuid)?;
    registry.delete_employee(&uuid)?;
    write_json(&json!({ "deleted": true, "uuid": uuid.to_string() }))
}

// ============================================================================
// SECTION: Certificate Handlers
// ============================================================================

/// Handles `certificate issue`.
fn handle_certificate_issue(
    registry: &IdentityRegistry,
    command: CertificateIssueCommand,
) -> CliResult<()> {
    let payload: serde_json::Value = serde_json::from_str(&command.payload)
        .map_err(|err| CliError::new(format!("payload is not valid JSON: {err}")))?;
    let holder_uuid = match command.holder_uuid.as_deref() {
        Some(raw) => Some(parse_uuid(raw)?),
        None => None,
    };
    let input = NewCertificate {
        holder_name: command.holder_name,
        holder_uuid,
        certificate_type: command.certificate_type,
        payload,
        batch_id: command.batch_id,
        issued_by: command.issued_by,
    };
    let record = registry.issue_certificate(input, now_instant())?;
    write_json(&json!({
        "code": record.code.as_str(),
        "uuid": record.uuid.to_string(),
        "fingerprint": record.fingerprint.as_str(),
        "status": record.status.as_str(),
    }))
}

/// Handles `certificate list`.
fn handle_certificate_list(registry: &IdentityRegistry) -> CliResult<()> {
    let rows: Vec<serde_json::Value> = registry
        .list_certificates()?
        .iter()
        .map(|record| {
            json!({
                "id": record.id,
                "code": record.code.as_str(),
                "uuid": record.uuid.to_string(),
                "holder_name": record.holder_name,
                "certificate_type": record.certificate_type,
                "status": record.status.as_str(),
            })
        })
        .collect();
    write_json(&serde_json::Value::Array(rows))
}

// ============================================================================
// SECTION: Offer Letter Handlers
// ============================================================================

/// Handles `offer issue`.
fn handle_offer_issue(registry: &IdentityRegistry, command: OfferIssueCommand) -> CliResult<()> {
    let input = NewOfferLetter {
        candidate_name: command.candidate_name,
        company_name: command.company_name,
        designation: command.designation,
        department: command.department,
        salary: command.salary,
        joining_date: parse_optional_date(command.joining_date.as_deref())?,
        validity_period: command.validity_period,
        valid_until: parse_optional_date(command.valid_until.as_deref())?,
        location: command.location,
        email: command.email,
        phone: command.phone,
        batch_id: None,
        generated_by: command.generated_by,
    };
    let record = registry.issue_offer_letter(input, now_instant())?;
    write_json(&json!({
        "number": record.number.as_str(),
        "uuid": record.uuid.to_string(),
        "status": record.status.as_str(),
    }))
}

/// Handles `offer list`.
fn handle_offer_list(registry: &IdentityRegistry) -> CliResult<()> {
    let rows: Vec<serde_json::Value> = registry
        .list_offer_letters()?
        .iter()
        .map(|record| {
            json!({
                "id": record.id,
                "number": record.number.as_str(),
                "uuid": record.uuid.to_string(),
                "candidate_name": record.candidate_name,
                "status": record.status.as_str(),
            })
        })
        .collect();
    write_json(&serde_json::Value::Array(rows))
}

// ============================================================================
// SECTION: Verification Handlers
// ============================================================================

/// Handles `verify`.
fn handle_verify(registry: &IdentityRegistry, command: &VerifyCommand) -> CliResult<()> {
    let view = registry.verify(&command.token, now_instant().date)?;
    let value = serde_json::to_value(&view)
        .map_err(|err| CliError::new(format!("failed to serialize view: {err}")))?;
    write_json(&value)
}

/// Handles `revoke`.
fn handle_revoke(registry: &IdentityRegistry, command: &RevokeCommand) -> CliResult<()> {
    registry.revoke(&command.token, &command.reason, now_instant().at)?;
    write_json(&json!({ "revoked": true }))
}

/// Handles `verify-url`.
fn handle_verify_url(config: &RegistryConfig, command: &VerifyUrlCommand) -> CliResult<()> {
    let uuid = parse_uuid(&command.uuid)?;
    let base = config.verify.portal_base()?;
    write_stdout_line(&verify_url(&base, &uuid))
        .map_err(|err| CliError::new(format!("failed to write to stdout: {err}")))
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Captures the wall clock once for this invocation.
fn now_instant() -> IssueInstant {
    IssueInstant::from_utc(OffsetDateTime::now_utc())
}

/// Parses an ISO 8601 calendar date argument.
fn parse_date(raw: &str) -> CliResult<Date> {
    Date::parse(raw.trim(), &Iso8601::DEFAULT)
        .map_err(|_| CliError::new(format!("invalid date {raw:?}: expected ISO 8601, e.g. 2025-06-01")))
}

/// Parses an optional ISO 8601 date argument.
fn parse_optional_date(raw: Option<&str>) -> CliResult<Option<Date>> {
    raw.map(parse_date).transpose()
}

/// Parses a verification UUID argument.
fn parse_uuid(raw: &str) -> CliResult<EntityUuid> {
    EntityUuid::parse(raw.trim()).map_err(|_| CliError::new(format!("invalid uuid {raw:?}")))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes pretty JSON to stdout.
fn write_json(value: &serde_json::Value) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(format!("failed to render output: {err}")))?;
    write_stdout_line(&rendered)
        .map_err(|err| CliError::new(format!("failed to write to stdout: {err}")))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
