//! Attendance records.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Clock-in punctuality relative to a shift's nominal start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Punctuality {
    /// Clocked in at or before the nominal start.
    OnTime,
    /// Clocked in after the start but within the grace window.
    Correct,
    /// Clocked in after the grace window.
    Late,
}

impl Punctuality {
    /// Stable lowercase label (`on-time`, `correct`, `late`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Punctuality::OnTime => "on-time",
            Punctuality::Correct => "correct",
            Punctuality::Late => "late",
        }
    }
}

impl fmt::Display for Punctuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified clock-in, keyed by (worker, date, shift).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Worker who clocked in.
    pub worker_id: String,
    /// Shift date.
    pub date: NaiveDate,
    /// Shift template the clock-in belongs to.
    pub shift_id: String,
    /// Observed clock-in time.
    pub clock_in: NaiveTime,
    /// Signed minutes after the nominal start (negative = early).
    pub delta_minutes: i64,
    /// Classification.
    pub status: Punctuality,
}
