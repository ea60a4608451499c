// crates/verity-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Registry Store
// Description: Durable SequenceStore and RecordStore backed by SQLite WAL.
// Purpose: Provide storage-layer atomic counters and unique-indexed records.
// Dependencies: verity-core, rusqlite, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This module implements both core storage interfaces over one SQLite
//! database. Counter draws execute a single upsert-increment statement with
//! a `RETURNING` clause, so the read-modify-write is atomic inside the
//! storage engine and two callers can never observe the same value, even
//! from separate processes sharing the file. Record tables index code and
//! uuid independently with UNIQUE constraints; violations surface as typed
//! duplicates and never overwrite. Records round-trip as JSON with their
//! identity columns kept consistent, failing closed on mismatch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::params;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use verity_core::CertificateCode;
use verity_core::CertificateRecord;
use verity_core::CounterName;
use verity_core::DuplicateField;
use verity_core::EmployeeCode;
use verity_core::EmployeeRecord;
use verity_core::EntityUuid;
use verity_core::IssueSeries;
use verity_core::OfferLetterNumber;
use verity_core::OfferLetterRecord;
use verity_core::RecordStore;
use verity_core::SequenceStore;
use verity_core::StoreError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Employee record table.
const EMPLOYEES_TABLE: &str = "employees";
/// Certificate record table.
const CERTIFICATES_TABLE: &str = "certificates";
/// Offer letter record table.
const OFFER_LETTERS_TABLE: &str = "offer_letters";

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JournalMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl JournalMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` registry store.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: JournalMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SyncMode,
}

impl SqliteStoreConfig {
    /// Creates a config with default pragmas for the given path.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: JournalMode::default(),
            sync_mode: SyncMode::default(),
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store open and configuration errors.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Invalid store configuration or data.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Store(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
            SqliteStoreError::VersionMismatch(message) => Self::VersionMismatch(message),
        }
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed sequence and record store with WAL support.
#[derive(Clone)]
pub struct SqliteRegistryStore {
    /// Shared `SQLite` connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteRegistryStore {
    /// Opens an `SQLite`-backed registry store.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened or
    /// initialized, or when the on-disk schema version is unsupported.
    pub fn open(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let mut connection = open_connection(config)?;
        initialize_schema(&mut connection)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Locks the connection, mapping poisoning to a store error.
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.connection
            .lock()
            .map_err(|_| StoreError::Store("sqlite connection mutex poisoned".to_string()))
    }

    // ========================================================================
    // SECTION: Generic Row Operations
    // ========================================================================

    /// Inserts a record row, mapping unique violations to typed duplicates.
    #[allow(
        clippy::too_many_arguments,
        reason = "Column values map one-to-one onto the insert statement."
    )]
    fn insert_row(
        &self,
        table: &str,
        uuid: &EntityUuid,
        code: &str,
        record_id: u64,
        status: &str,
        created_at: i64,
        updated_at: i64,
        record_json: &[u8],
    ) -> Result<(), StoreError> {
        let record_id = i64::try_from(record_id)
            .map_err(|_| StoreError::Invalid("record id exceeds storage range".to_string()))?;
        let guard = self.lock()?;
        guard
            .execute(
                &format!(
                    "INSERT INTO {table} (uuid, code, record_id, status, record_json, \
                     created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
                ),
                params![
                    uuid.to_string(),
                    code,
                    record_id,
                    status,
                    record_json,
                    created_at,
                    updated_at
                ],
            )
            .map(drop)
            .map_err(map_record_error)
    }

    /// Loads one record by an indexed column value.
    fn row_by_column<T: DeserializeOwned>(
        &self,
        table: &str,
        column: &str,
        key: &str,
    ) -> Result<Option<T>, StoreError> {
        let guard = self.lock()?;
        let bytes: Option<Vec<u8>> = guard
            .query_row(
                &format!("SELECT record_json FROM {table} WHERE {column} = ?1"),
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(db_error)?;
        drop(guard);
        bytes.map(|bytes| decode_record(&bytes)).transpose()
    }

    /// Replaces the mutable columns of a row, matching on both identity
    /// columns. Returns false when the uuid is absent entirely.
    fn update_row(
        &self,
        table: &str,
        uuid: &EntityUuid,
        code: &str,
        status: &str,
        updated_at: i64,
        record_json: &[u8],
    ) -> Result<bool, StoreError> {
        let guard = self.lock()?;
        let rows = guard
            .execute(
                &format!(
                    "UPDATE {table} SET status = ?3, record_json = ?4, updated_at = ?5 \
                     WHERE uuid = ?1 AND code = ?2"
                ),
                params![uuid.to_string(), code, status, record_json, updated_at],
            )
            .map_err(db_error)?;
        if rows > 0 {
            return Ok(true);
        }
        let exists: Option<i64> = guard
            .query_row(
                &format!("SELECT 1 FROM {table} WHERE uuid = ?1"),
                params![uuid.to_string()],
                |row| row.get(0),
            )
            .optional()
            .map_err(db_error)?;
        if exists.is_some() {
            return Err(StoreError::Invalid(
                "identity fields are write-once and cannot change".to_string(),
            ));
        }
        Ok(false)
    }

    /// Deletes a row by uuid. Returns false when absent.
    fn delete_row(&self, table: &str, uuid: &EntityUuid) -> Result<bool, StoreError> {
        let guard = self.lock()?;
        let rows = guard
            .execute(&format!("DELETE FROM {table} WHERE uuid = ?1"), params![uuid.to_string()])
            .map_err(db_error)?;
        Ok(rows > 0)
    }

    /// Lists all rows of a table ordered by record id.
    fn list_rows<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, StoreError> {
        let guard = self.lock()?;
        let mut statement = guard
            .prepare(&format!("SELECT record_json FROM {table} ORDER BY record_id"))
            .map_err(db_error)?;
        let rows = statement.query_map([], |row| row.get::<_, Vec<u8>>(0)).map_err(db_error)?;
        let mut records = Vec::new();
        for row in rows {
            let bytes = row.map_err(db_error)?;
            records.push(decode_record(&bytes)?);
        }
        Ok(records)
    }
}

// ============================================================================
// SECTION: Sequence Store Impl
// ============================================================================

impl SequenceStore for SqliteRegistryStore {
    fn next_value(&self, name: &CounterName) -> Result<u64, StoreError> {
        let guard = self.lock()?;
        let value: i64 = guard
            .query_row(
                "INSERT INTO sequence_counters (name, value) VALUES (?1, 1) \
                 ON CONFLICT(name) DO UPDATE SET value = value + 1 \
                 RETURNING value",
                params![name.as_str()],
                |row| row.get(0),
            )
            .map_err(db_error)?;
        drop(guard);
        u64::try_from(value)
            .map_err(|_| StoreError::Corrupt(format!("counter {name} holds negative value")))
    }

    fn next_issue_number(&self, series: &IssueSeries) -> Result<u64, StoreError> {
        let guard = self.lock()?;
        let value: i64 = guard
            .query_row(
                "INSERT INTO issue_counters (lane, year, counter) VALUES (?1, ?2, 1) \
                 ON CONFLICT(lane, year) DO UPDATE SET counter = counter + 1 \
                 RETURNING counter",
                params![series.lane.as_str(), series.year.as_str()],
                |row| row.get(0),
            )
            .map_err(db_error)?;
        drop(guard);
        u64::try_from(value).map_err(|_| {
            StoreError::Corrupt(format!(
                "issue counter {}/{} holds negative value",
                series.lane, series.year
            ))
        })
    }
}

// ============================================================================
// SECTION: Record Store Impl
// ============================================================================

impl RecordStore for SqliteRegistryStore {
    fn insert_employee(&self, record: &EmployeeRecord) -> Result<(), StoreError> {
        let json = encode_record(record)?;
        self.insert_row(
            EMPLOYEES_TABLE,
            &record.uuid,
            record.code.as_str(),
            record.id,
            record.status.as_str(),
            record.created_at.unix_millis(),
            record.updated_at.unix_millis(),
            &json,
        )
    }

    fn employee_by_code(&self, code: &EmployeeCode) -> Result<Option<EmployeeRecord>, StoreError> {
        let record: Option<EmployeeRecord> =
            self.row_by_column(EMPLOYEES_TABLE, "code", code.as_str())?;
        check_key(record, |found: &EmployeeRecord| found.code == *code)
    }

    fn employee_by_uuid(&self, uuid: &EntityUuid) -> Result<Option<EmployeeRecord>, StoreError> {
        let record: Option<EmployeeRecord> =
            self.row_by_column(EMPLOYEES_TABLE, "uuid", &uuid.to_string())?;
        check_key(record, |found: &EmployeeRecord| found.uuid == *uuid)
    }

    fn update_employee(&self, record: &EmployeeRecord) -> Result<bool, StoreError> {
        let json = encode_record(record)?;
        self.update_row(
            EMPLOYEES_TABLE,
            &record.uuid,
            record.code.as_str(),
            record.status.as_str(),
            record.updated_at.unix_millis(),
            &json,
        )
    }

    fn delete_employee(&self, uuid: &EntityUuid) -> Result<bool, StoreError> {
        self.delete_row(EMPLOYEES_TABLE, uuid)
    }

    fn list_employees(&self) -> Result<Vec<EmployeeRecord>, StoreError> {
        self.list_rows(EMPLOYEES_TABLE)
    }

    fn insert_certificate(&self, record: &CertificateRecord) -> Result<(), StoreError> {
        let json = encode_record(record)?;
        self.insert_row(
            CERTIFICATES_TABLE,
            &record.uuid,
            record.code.as_str(),
            record.id,
            record.status.as_str(),
            record.created_at.unix_millis(),
            record.updated_at.unix_millis(),
            &json,
        )
    }

    fn certificate_by_code(
        &self,
        code: &CertificateCode,
    ) -> Result<Option<CertificateRecord>, StoreError> {
        let record: Option<CertificateRecord> =
            self.row_by_column(CERTIFICATES_TABLE, "code", code.as_str())?;
        check_key(record, |found: &CertificateRecord| found.code == *code)
    }

    fn certificate_by_uuid(
        &self,
        uuid: &EntityUuid,
    ) -> Result<Option<CertificateRecord>, StoreError> {
        let record: Option<CertificateRecord> =
            self.row_by_column(CERTIFICATES_TABLE, "uuid", &uuid.to_string())?;
        check_key(record, |found: &CertificateRecord| found.uuid == *uuid)
    }

    fn update_certificate(&self, record: &CertificateRecord) -> Result<bool, StoreError> {
        let json = encode_record(record)?;
        self.update_row(
            CERTIFICATES_TABLE,
            &record.uuid,
            record.code.as_str(),
            record.status.as_str(),
            record.updated_at.unix_millis(),
            &json,
        )
    }

    fn delete_certificate(&self, uuid: &EntityUuid) -> Result<bool, StoreError> {
        self.delete_row(CERTIFICATES_TABLE, uuid)
    }

    fn list_certificates(&self) -> Result<Vec<CertificateRecord>, StoreError> {
        self.list_rows(CERTIFICATES_TABLE)
    }

    fn insert_offer_letter(&self, record: &OfferLetterRecord) -> Result<(), StoreError> {
        let json = encode_record(record)?;
        self.insert_row(
            OFFER_LETTERS_TABLE,
            &record.uuid,
            record.number.as_str(),
            record.id,
            record.status.as_str(),
            record.created_at.unix_millis(),
            record.updated_at.unix_millis(),
            &json,
        )
    }

    fn offer_letter_by_number(
        &self,
        number: &OfferLetterNumber,
    ) -> Result<Option<OfferLetterRecord>, StoreError> {
        let record: Option<OfferLetterRecord> =
            self.row_by_column(OFFER_LETTERS_TABLE, "code", number.as_str())?;
        check_key(record, |found: &OfferLetterRecord| found.number == *number)
    }

    fn offer_letter_by_uuid(
        &self,
        uuid: &EntityUuid,
    ) -> Result<Option<OfferLetterRecord>, StoreError> {
        let record: Option<OfferLetterRecord> =
            self.row_by_column(OFFER_LETTERS_TABLE, "uuid", &uuid.to_string())?;
        check_key(record, |found: &OfferLetterRecord| found.uuid == *uuid)
    }

    fn update_offer_letter(&self, record: &OfferLetterRecord) -> Result<bool, StoreError> {
        let json = encode_record(record)?;
        self.update_row(
            OFFER_LETTERS_TABLE,
            &record.uuid,
            record.number.as_str(),
            record.status.as_str(),
            record.updated_at.unix_millis(),
            &json,
        )
    }

    fn delete_offer_letter(&self, uuid: &EntityUuid) -> Result<bool, StoreError> {
        self.delete_row(OFFER_LETTERS_TABLE, uuid)
    }

    fn list_offer_letters(&self) -> Result<Vec<OfferLetterRecord>, StoreError> {
        self.list_rows(OFFER_LETTERS_TABLE)
    }
}

// ============================================================================
// SECTION: Encoding Helpers
// ============================================================================

/// Serializes a record payload for storage.
fn encode_record<T: serde::Serialize>(record: &T) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(record).map_err(|err| StoreError::Invalid(err.to_string()))
}

/// Deserializes a stored record payload.
fn decode_record<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    serde_json::from_slice(bytes).map_err(|err| StoreError::Invalid(err.to_string()))
}

/// Fails closed when a decoded record disagrees with its lookup key.
fn check_key<T>(
    record: Option<T>,
    matches_key: impl Fn(&T) -> bool,
) -> Result<Option<T>, StoreError> {
    match record {
        Some(found) if !matches_key(&found) => Err(StoreError::Corrupt(
            "stored record identity disagrees with its indexed column".to_string(),
        )),
        other => Ok(other),
    }
}

/// Maps a `SQLite` error on insert to a typed duplicate where applicable.
fn map_record_error(error: rusqlite::Error) -> StoreError {
    if let rusqlite::Error::SqliteFailure(ffi_error, Some(ref message)) = error
        && ffi_error.code == rusqlite::ErrorCode::ConstraintViolation
    {
        if message.contains(".uuid") {
            return StoreError::Duplicate {
                field: DuplicateField::Uuid,
            };
        }
        if message.contains(".code") {
            return StoreError::Duplicate {
                field: DuplicateField::Code,
            };
        }
    }
    db_error(error)
}

/// Maps a `SQLite` error to a generic store error.
fn db_error(error: rusqlite::Error) -> StoreError {
    StoreError::Store(error.to_string())
}

// ============================================================================
// SECTION: Open Helpers
// ============================================================================

/// Ensures the parent directory for the store exists.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    let Some(parent) = path.parent() else {
        return Err(SqliteStoreError::Io("store path missing parent directory".to_string()));
    };
    std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))
}

/// Validates store paths for safety limits.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    let path_string = path.display().to_string();
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteStoreError::Invalid(
                "store path contains an overlong component".to_string(),
            ));
        }
    }
    if path.exists() && path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Opens an `SQLite` connection with durable defaults.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags)
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies `SQLite` pragmas required for durability.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}

/// Initializes the `SQLite` schema or validates the existing version.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
                .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS sequence_counters (
                    name TEXT PRIMARY KEY,
                    value INTEGER NOT NULL
                );
                CREATE TABLE IF NOT EXISTS issue_counters (
                    lane TEXT NOT NULL,
                    year TEXT NOT NULL,
                    counter INTEGER NOT NULL,
                    PRIMARY KEY (lane, year)
                );
                CREATE TABLE IF NOT EXISTS employees (
                    uuid TEXT PRIMARY KEY,
                    code TEXT NOT NULL UNIQUE,
                    record_id INTEGER NOT NULL,
                    status TEXT NOT NULL,
                    record_json BLOB NOT NULL,
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_employees_status ON employees (status);
                CREATE TABLE IF NOT EXISTS certificates (
                    uuid TEXT PRIMARY KEY,
                    code TEXT NOT NULL UNIQUE,
                    record_id INTEGER NOT NULL,
                    status TEXT NOT NULL,
                    record_json BLOB NOT NULL,
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_certificates_status ON certificates (status);
                CREATE TABLE IF NOT EXISTS offer_letters (
                    uuid TEXT PRIMARY KEY,
                    code TEXT NOT NULL UNIQUE,
                    record_id INTEGER NOT NULL,
                    status TEXT NOT NULL,
                    record_json BLOB NOT NULL,
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_offer_letters_status ON offer_letters (status);",
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        }
        Some(value) if value == SCHEMA_VERSION => {}
        Some(value) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "unsupported schema version: {value}"
            )));
        }
    }
    tx.commit().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}
