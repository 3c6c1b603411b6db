//! Per-generation mutable allocation state.

use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

use crate::models::ShiftHistory;

/// Hours and shift ids a worker holds on one date.
#[derive(Debug, Clone, Default)]
struct DayLoad {
    hours: f64,
    shifts: Vec<String>,
}

/// Live counters threaded through every allocation phase.
///
/// Created at the start of a generation call and dropped at its end. It is
/// the only place allocation state is mutated; the borrowed
/// [`ShiftHistory`] is updated in lockstep with the weekly counters.
#[derive(Debug)]
pub struct AllocationContext<'h> {
    history: &'h mut ShiftHistory,
    weekly: HashMap<String, u32>,
    days: HashMap<String, HashMap<NaiveDate, DayLoad>>,
    relaxed: BTreeSet<String>,
}

impl<'h> AllocationContext<'h> {
    /// Starts a fresh week over the given rotation history.
    pub fn new(history: &'h mut ShiftHistory) -> Self {
        Self {
            history,
            weekly: HashMap::new(),
            days: HashMap::new(),
            relaxed: BTreeSet::new(),
        }
    }

    /// Shifts assigned to the worker so far this week.
    pub fn assigned(&self, worker_id: &str) -> u32 {
        self.weekly.get(worker_id).copied().unwrap_or(0)
    }

    /// Hours assigned to the worker on `date`.
    pub fn hours_on(&self, worker_id: &str, date: NaiveDate) -> f64 {
        self.day(worker_id, date).map_or(0.0, |d| d.hours)
    }

    /// Whether the worker already holds `shift_id` on `date`.
    pub fn holds(&self, worker_id: &str, date: NaiveDate, shift_id: &str) -> bool {
        self.day(worker_id, date)
            .is_some_and(|d| d.shifts.iter().any(|s| s == shift_id))
    }

    /// Rotation history, including assignments made during this call.
    pub fn history(&self) -> &ShiftHistory {
        self.history
    }

    /// Records an assignment in the weekly counters and rotation history.
    ///
    /// `relaxed` marks assignments made with the weekly quota cap lifted.
    pub fn record(
        &mut self,
        worker_id: &str,
        date: NaiveDate,
        shift_id: &str,
        hours: f64,
        relaxed: bool,
    ) {
        *self.weekly.entry(worker_id.to_string()).or_insert(0) += 1;
        let day = self
            .days
            .entry(worker_id.to_string())
            .or_default()
            .entry(date)
            .or_default();
        day.hours += hours;
        day.shifts.push(shift_id.to_string());
        self.history.record(worker_id, shift_id);
        if relaxed {
            self.relaxed.insert(worker_id.to_string());
        }
    }

    /// Workers that received at least one relaxed-pool assignment.
    pub fn relaxed_workers(&self) -> &BTreeSet<String> {
        &self.relaxed
    }

    /// Consumes the context, returning the relaxed-worker set.
    pub fn into_relaxed_workers(self) -> BTreeSet<String> {
        self.relaxed
    }

    fn day(&self, worker_id: &str, date: NaiveDate) -> Option<&DayLoad> {
        self.days.get(worker_id).and_then(|days| days.get(&date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_record_updates_counters_and_history() {
        let mut history = ShiftHistory::new().with_count("W1", "S1", 3);
        {
            let mut ctx = AllocationContext::new(&mut history);
            ctx.record("W1", d(4), "S1", 8.0, false);
            ctx.record("W1", d(5), "S2", 4.0, true);

            assert_eq!(ctx.assigned("W1"), 2);
            assert_eq!(ctx.assigned("W2"), 0);
            assert!((ctx.hours_on("W1", d(4)) - 8.0).abs() < 1e-10);
            assert_eq!(ctx.hours_on("W1", d(6)), 0.0);
            assert!(ctx.holds("W1", d(4), "S1"));
            assert!(!ctx.holds("W1", d(4), "S2"));
            assert_eq!(ctx.history().count("W1", "S1"), 4);
            assert!(ctx.relaxed_workers().contains("W1"));
        }
        assert_eq!(history.count("W1", "S1"), 4);
        assert_eq!(history.count("W1", "S2"), 1);
    }

    #[test]
    fn test_hours_accumulate_per_day() {
        let mut history = ShiftHistory::new();
        let mut ctx = AllocationContext::new(&mut history);
        ctx.record("W1", d(4), "EARLY", 4.0, false);
        ctx.record("W1", d(4), "LATE", 3.5, false);
        assert!((ctx.hours_on("W1", d(4)) - 7.5).abs() < 1e-10);
        assert!(ctx.into_relaxed_workers().is_empty());
    }
}
