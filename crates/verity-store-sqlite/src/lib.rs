// crates/verity-store-sqlite/src/lib.rs
// ============================================================================
// Module: Verity SQLite Store Library
// Description: Durable sequence counters and record tables over SQLite.
// Purpose: Expose the SQLite-backed implementation of the core interfaces.
// Dependencies: crate::store
// ============================================================================

//! ## Overview
//! This crate persists Verity's counters and identity records in a single
//! SQLite database. Counter draws are single-statement atomic upserts, so
//! exactly-once delivery holds across every process sharing the file, and
//! record tables carry independent unique indexes on code and uuid.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::JournalMode;
pub use store::SqliteRegistryStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SyncMode;
