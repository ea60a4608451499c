// crates/verity-core/src/core/time.rs
// ============================================================================
// Module: Verity Time Model
// Description: Explicit time values for issuance and audit stamps.
// Purpose: Keep the core deterministic; hosts supply all time values.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Verity derives code epochs (two- and four-digit years) from an explicit
//! issue date and stamps records with explicit timestamps. The core never
//! reads wall-clock time; hosts construct an [`IssueInstant`] at the
//! boundary, which keeps issuance replayable in tests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::Date;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Timestamps
// ============================================================================

/// Audit timestamp in unix epoch milliseconds.
///
/// # Invariants
/// - Values are explicitly provided by callers; the core never reads the clock.
/// - No validation is performed; monotonicity is a caller responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from unix epoch milliseconds.
    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as unix epoch milliseconds.
    #[must_use]
    pub const fn unix_millis(self) -> i64 {
        self.0
    }

    /// Derives a timestamp from an explicit UTC moment.
    #[must_use]
    pub fn from_utc(moment: OffsetDateTime) -> Self {
        let millis = moment
            .unix_timestamp()
            .saturating_mul(1_000)
            .saturating_add(i64::from(moment.millisecond()));
        Self(millis)
    }
}

// ============================================================================
// SECTION: Issue Dates
// ============================================================================

/// Calendar date a document is issued on.
///
/// The date drives epoch derivation for composite counters: a new calendar
/// year starts a fresh `(kind, year)` counter key, so sequences reset
/// implicitly without any rollover job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueDate(Date);

impl IssueDate {
    /// Creates an issue date from an explicit calendar date.
    #[must_use]
    pub const fn new(date: Date) -> Self {
        Self(date)
    }

    /// Returns the underlying calendar date.
    #[must_use]
    pub const fn date(self) -> Date {
        self.0
    }

    /// Returns the full calendar year.
    #[must_use]
    pub const fn full_year(self) -> i32 {
        self.0.year()
    }
}

impl From<Date> for IssueDate {
    fn from(value: Date) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Issue Instants
// ============================================================================

/// Issue date plus audit timestamp, captured once at the host boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueInstant {
    /// Calendar date used for epoch derivation.
    pub date: IssueDate,
    /// Audit timestamp stamped onto the record.
    pub at: Timestamp,
}

impl IssueInstant {
    /// Creates an issue instant from explicit parts.
    #[must_use]
    pub const fn new(date: IssueDate, at: Timestamp) -> Self {
        Self {
            date,
            at,
        }
    }

    /// Derives both parts from an explicit UTC moment.
    #[must_use]
    pub fn from_utc(moment: OffsetDateTime) -> Self {
        Self {
            date: IssueDate::new(moment.date()),
            at: Timestamp::from_utc(moment),
        }
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

    use time::macros::datetime;

    use super::*;

    #[test]
    fn timestamp_from_utc_includes_millis() {
        let moment = datetime!(2025-06-01 12:00:00.250 UTC);
        let stamp = Timestamp::from_utc(moment);
        assert_eq!(stamp.unix_millis() % 1_000, 250);
    }

    #[test]
    fn issue_instant_splits_date_and_stamp() {
        let moment = datetime!(2025-06-01 12:00:00 UTC);
        let instant = IssueInstant::from_utc(moment);
        assert_eq!(instant.date.full_year(), 2025);
        assert_eq!(instant.at, Timestamp::from_utc(moment));
    }
}
