//! Weekly schedule (allocation output).
//!
//! A schedule maps each date to the workers on duty and the shift
//! templates each of them holds that day. Dates with no assignments are
//! absent; an unfilled slot leaves no trace here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Role, ShiftTemplate};

/// Assigned shifts: date → worker → templates (ordered by start time).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekSchedule {
    days: BTreeMap<NaiveDate, BTreeMap<String, Vec<ShiftTemplate>>>,
}

impl WeekSchedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shift for a worker on a date, keeping start-time order.
    pub fn add(&mut self, date: NaiveDate, worker_id: impl Into<String>, shift: ShiftTemplate) {
        let shifts = self
            .days
            .entry(date)
            .or_default()
            .entry(worker_id.into())
            .or_default();
        let pos = shifts
            .iter()
            .position(|s| (s.start_time, &s.id) > (shift.start_time, &shift.id))
            .unwrap_or(shifts.len());
        shifts.insert(pos, shift);
    }

    /// Shifts held by `worker_id` on `date`.
    pub fn shifts_for(&self, date: NaiveDate, worker_id: &str) -> &[ShiftTemplate] {
        self.days
            .get(&date)
            .and_then(|workers| workers.get(worker_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The template `shift_id` if `worker_id` holds it on `date`.
    pub fn find_shift(
        &self,
        date: NaiveDate,
        worker_id: &str,
        shift_id: &str,
    ) -> Option<&ShiftTemplate> {
        self.shifts_for(date, worker_id)
            .iter()
            .find(|s| s.id == shift_id)
    }

    /// Workers on duty on `date`.
    pub fn workers_on(&self, date: NaiveDate) -> Option<&BTreeMap<String, Vec<ShiftTemplate>>> {
        self.days.get(&date)
    }

    /// All (date, template) pairs held by a worker, in date order.
    pub fn assignments_for_worker(&self, worker_id: &str) -> Vec<(NaiveDate, &ShiftTemplate)> {
        self.days
            .iter()
            .filter_map(|(date, workers)| workers.get(worker_id).map(|s| (*date, s)))
            .flat_map(|(date, shifts)| shifts.iter().map(move |s| (date, s)))
            .collect()
    }

    /// Number of shifts a worker holds this week.
    pub fn shift_count(&self, worker_id: &str) -> usize {
        self.days
            .values()
            .filter_map(|workers| workers.get(worker_id))
            .map(Vec::len)
            .sum()
    }

    /// Paid hours a worker holds on `date`, using each template's role break.
    pub fn hours_on(&self, date: NaiveDate, worker_id: &str, roles: &[Role]) -> f64 {
        self.shifts_for(date, worker_id)
            .iter()
            .map(|s| {
                let break_minutes = roles
                    .iter()
                    .find(|r| r.id == s.role_id)
                    .map_or(0, |r| r.break_minutes);
                s.hours(break_minutes)
            })
            .sum()
    }

    /// Total number of (date, worker, shift) assignments.
    pub fn assignment_count(&self) -> usize {
        self.days
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Dates that have at least one assignment.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Iterates (date, worker, template) in date then worker order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &str, &ShiftTemplate)> + '_ {
        self.days.iter().flat_map(|(date, workers)| {
            workers.iter().flat_map(move |(worker, shifts)| {
                shifts.iter().map(move |s| (*date, worker.as_str(), s))
            })
        })
    }

    /// Whether nothing is assigned.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
