//! Shift persistence.
//!
//! A [`ShiftStore`] owns the shift records and performs every write as one
//! read-validate-write step: version checks and placement conflict checks run
//! inside the same critical section as the write they guard.

mod memory;

pub use memory::InMemoryShiftStore;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::RosterResult;
use crate::models::{ShiftDraft, ShiftRecord, ShiftState};
use crate::roster::DateRange;

/// Transactional storage for shift records.
pub trait ShiftStore: Send + Sync {
    /// Writes a new record, failing with a conflict if its cell is already held.
    fn insert(&self, record: ShiftRecord) -> RosterResult<ShiftRecord>;

    /// Replaces a live record with `draft`.
    ///
    /// Fails with `NotFound` for unknown or cancelled records, `StaleVersion`
    /// when `expected_version` is not the stored version, and `Conflict` when
    /// the new placement collides with another shift.
    fn replace(
        &self,
        id: Uuid,
        expected_version: u64,
        draft: ShiftDraft,
        now: DateTime<Utc>,
    ) -> RosterResult<ShiftRecord>;

    /// Moves a live record to `next`, checking the version when one is given.
    fn transition(
        &self,
        id: Uuid,
        expected_version: Option<u64>,
        next: ShiftState,
        now: DateTime<Utc>,
    ) -> RosterResult<ShiftRecord>;

    /// Fetches a record by id, cancelled records included.
    fn get(&self, id: Uuid) -> RosterResult<Option<ShiftRecord>>;

    /// Non-cancelled records for `venue_id` dated within `range`.
    fn query(&self, venue_id: &str, range: DateRange) -> RosterResult<Vec<ShiftRecord>>;
}
