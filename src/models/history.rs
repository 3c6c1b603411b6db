//! Rotation history.
//!
//! Counts how many times each worker has held each shift template across
//! generations. The allocator reads it to spread shift types fairly and
//! writes to it on every assignment; the caller persists it between runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Assignment counts: worker → shift template → count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftHistory {
    counts: BTreeMap<String, BTreeMap<String, u32>>,
}

impl ShiftHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a count (builder form, for seeding prior history).
    pub fn with_count(
        mut self,
        worker_id: impl Into<String>,
        shift_id: impl Into<String>,
        count: u32,
    ) -> Self {
        self.counts
            .entry(worker_id.into())
            .or_default()
            .insert(shift_id.into(), count);
        self
    }

    /// Times `worker_id` has held `shift_id`.
    pub fn count(&self, worker_id: &str, shift_id: &str) -> u32 {
        self.counts
            .get(worker_id)
            .and_then(|shifts| shifts.get(shift_id))
            .copied()
            .unwrap_or(0)
    }

    /// Total assignments of `worker_id` across all templates.
    pub fn total(&self, worker_id: &str) -> u32 {
        self.counts
            .get(worker_id)
            .map(|shifts| shifts.values().sum())
            .unwrap_or(0)
    }

    /// Records one assignment.
    pub fn record(&mut self, worker_id: &str, shift_id: &str) {
        *self
            .counts
            .entry(worker_id.to_string())
            .or_default()
            .entry(shift_id.to_string())
            .or_insert(0) += 1;
    }

    /// Adds every count from `other` into this history.
    pub fn merge(&mut self, other: &ShiftHistory) {
        for (worker, shifts) in &other.counts {
            let entry = self.counts.entry(worker.clone()).or_default();
            for (shift, count) in shifts {
                *entry.entry(shift.clone()).or_insert(0) += count;
            }
        }
    }

    /// Per-template counts for one worker.
    pub fn shifts_of(&self, worker_id: &str) -> Option<&BTreeMap<String, u32>> {
        self.counts.get(worker_id)
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
