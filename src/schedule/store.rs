//! Date-keyed schedule store with merge-by-key semantics.
//!
//! The store is the only client-side persistence the schedule has: what is
//! rendered is whatever the latest successful merges produced. A merge
//! either contributes zero or more complete days, each atomically replacing
//! any prior entry with the same date — never a field-level splice.

use std::collections::BTreeMap;

use super::ScheduleDay;

/// The client-side collection of planned days, keyed by ISO date.
///
/// Iteration order is ascending by date string; lexicographic order is
/// correct because the date format is fixed-width ISO. Incoming days always
/// win on collision, which lets the user revise a subset of days without
/// resending the untouched ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleStore {
    days: BTreeMap<String, ScheduleDay>,
}

impl ScheduleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an initial set of days (later duplicates win).
    pub fn from_days(days: Vec<ScheduleDay>) -> Self {
        let mut store = Self::new();
        store.merge(days);
        store
    }

    /// Merge incoming days into the store, incoming wins on collision.
    ///
    /// Pure and total over well-typed input: an empty `incoming` is a no-op.
    /// Returns the dates that were inserted or replaced, in input order.
    pub fn merge(&mut self, incoming: Vec<ScheduleDay>) -> Vec<String> {
        let mut touched = Vec::with_capacity(incoming.len());
        for day in incoming {
            touched.push(day.date.clone());
            self.days.insert(day.date.clone(), day);
        }
        touched
    }

    /// The day stored for `date`, if any.
    pub fn get(&self, date: &str) -> Option<&ScheduleDay> {
        self.days.get(date)
    }

    /// All days, ascending by date.
    pub fn days(&self) -> impl Iterator<Item = &ScheduleDay> {
        self.days.values()
    }

    /// An owned snapshot of all days, ascending by date.
    pub fn snapshot(&self) -> Vec<ScheduleDay> {
        self.days.values().cloned().collect()
    }

    /// Number of stored days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the store holds no days.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
