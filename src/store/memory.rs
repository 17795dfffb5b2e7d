//! In-process shift store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{RosterError, RosterResult};
use crate::models::{ShiftDraft, ShiftRecord, ShiftState};
use crate::roster::{DateRange, conflict_error, find_conflict};

/// Shift store backed by a mutex-guarded map.
///
/// The lock is held for the whole of each write, which makes the placement and
/// version checks atomic with the write itself.
#[derive(Debug, Default)]
pub struct InMemoryShiftStore {
    shifts: Mutex<HashMap<Uuid, ShiftRecord>>,
}

impl InMemoryShiftStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> RosterResult<MutexGuard<'_, HashMap<Uuid, ShiftRecord>>> {
        self.shifts.lock().map_err(|_| RosterError::Store {
            message: "shift store lock poisoned".to_string(),
        })
    }

    fn live<'a>(
        shifts: &'a HashMap<Uuid, ShiftRecord>,
        id: Uuid,
    ) -> RosterResult<&'a ShiftRecord> {
        shifts
            .get(&id)
            .filter(|shift| !shift.is_cancelled())
            .ok_or(RosterError::NotFound { shift_id: id })
    }

    fn check_version(current: &ShiftRecord, expected: u64) -> RosterResult<()> {
        if current.version != expected {
            return Err(RosterError::StaleVersion {
                shift_id: current.id,
                expected,
                actual: current.version,
            });
        }
        Ok(())
    }
}

impl super::ShiftStore for InMemoryShiftStore {
    fn insert(&self, record: ShiftRecord) -> RosterResult<ShiftRecord> {
        let mut shifts = self.lock()?;
        if let Some(occupant) = find_conflict(shifts.values(), &record) {
            return Err(conflict_error(occupant, &record));
        }
        shifts.insert(record.id, record.clone());
        Ok(record)
    }

    fn replace(
        &self,
        id: Uuid,
        expected_version: u64,
        draft: ShiftDraft,
        now: DateTime<Utc>,
    ) -> RosterResult<ShiftRecord> {
        let mut shifts = self.lock()?;
        let current = Self::live(&shifts, id)?;
        Self::check_version(current, expected_version)?;

        let updated = current.replaced_by(draft, now)?;
        if let Some(occupant) = find_conflict(shifts.values(), &updated) {
            return Err(conflict_error(occupant, &updated));
        }
        shifts.insert(id, updated.clone());
        Ok(updated)
    }

    fn transition(
        &self,
        id: Uuid,
        expected_version: Option<u64>,
        next: ShiftState,
        now: DateTime<Utc>,
    ) -> RosterResult<ShiftRecord> {
        let mut shifts = self.lock()?;
        let current = Self::live(&shifts, id)?;
        if let Some(expected) = expected_version {
            Self::check_version(current, expected)?;
        }
        if !current.state.can_transition_to(next) {
            return Err(RosterError::InvalidTransition {
                shift_id: id,
                from: current.state,
                to: next,
            });
        }

        let mut updated = current.clone();
        updated.state = next;
        updated.version += 1;
        updated.updated_at = now;
        shifts.insert(id, updated.clone());
        Ok(updated)
    }

    fn get(&self, id: Uuid) -> RosterResult<Option<ShiftRecord>> {
        Ok(self.lock()?.get(&id).cloned())
    }

    fn query(&self, venue_id: &str, range: DateRange) -> RosterResult<Vec<ShiftRecord>> {
        let shifts = self.lock()?;
        let mut found: Vec<ShiftRecord> = shifts
            .values()
            .filter(|s| !s.is_cancelled() && s.venue_id == venue_id && range.contains(s.date))
            .cloned()
            .collect();
        found.sort_by_key(|s| s.ordering_key());
        Ok(found)
    }
}
