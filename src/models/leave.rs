//! Leave requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A full-day leave for one worker on one date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Worker on leave.
    pub worker_id: String,
    /// Date of absence.
    pub date: NaiveDate,
}

impl LeaveRequest {
    /// Creates a leave request.
    pub fn new(worker_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            worker_id: worker_id.into(),
            date,
        }
    }
}

/// Set of leave requests keyed by (worker, date).
///
/// Presence of an entry means the worker is unavailable all day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveCalendar {
    by_worker: HashMap<String, HashSet<NaiveDate>>,
}

impl LeaveCalendar {
    /// Creates an empty calendar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a leave request. Duplicates collapse.
    pub fn add(&mut self, request: LeaveRequest) {
        self.by_worker
            .entry(request.worker_id)
            .or_default()
            .insert(request.date);
    }

    /// Adds a leave request (builder form).
    pub fn with_leave(mut self, worker_id: impl Into<String>, date: NaiveDate) -> Self {
        self.add(LeaveRequest::new(worker_id, date));
        self
    }

    /// Whether the worker is on leave on `date`.
    pub fn is_on_leave(&self, worker_id: &str, date: NaiveDate) -> bool {
        self.by_worker
            .get(worker_id)
            .is_some_and(|dates| dates.contains(&date))
    }

    /// Number of leave entries.
    pub fn len(&self) -> usize {
        self.by_worker.values().map(HashSet::len).sum()
    }

    /// Whether no leave is recorded.
    pub fn is_empty(&self) -> bool {
        self.by_worker.values().all(HashSet::is_empty)
    }
}

impl FromIterator<LeaveRequest> for LeaveCalendar {
    fn from_iter<I: IntoIterator<Item = LeaveRequest>>(iter: I) -> Self {
        let mut calendar = Self::new();
        for request in iter {
            calendar.add(request);
        }
        calendar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_is_on_leave() {
        let leave = LeaveCalendar::new().with_leave("W1", d(5));
        assert!(leave.is_on_leave("W1", d(5)));
        assert!(!leave.is_on_leave("W1", d(6)));
        assert!(!leave.is_on_leave("W2", d(5)));
    }

    #[test]
    fn test_duplicates_collapse() {
        let leave: LeaveCalendar = vec![
            LeaveRequest::new("W1", d(5)),
            LeaveRequest::new("W1", d(5)),
        ]
        .into_iter()
        .collect();
        assert_eq!(leave.len(), 1);
    }
}
