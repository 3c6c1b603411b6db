//! Error types.
//!
//! Allocation itself never fails: coverage gaps are reported as data on
//! the generation outcome. The only rejected inputs are attendance
//! clock-ins.

use chrono::NaiveDate;
use thiserror::Error;

/// Invalid input to the attendance entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// No clock-in time was supplied.
    #[error("clock-in time is required")]
    MissingClockIn,
    /// The supplied clock-in text is not a valid time of day.
    #[error("invalid clock-in time '{value}': expected HH:MM or HH:MM:SS")]
    InvalidClockTime {
        /// The rejected text.
        value: String,
    },
    /// The worker does not hold that shift on that date.
    #[error("worker '{worker_id}' has no shift '{shift_id}' on {date}")]
    ShiftNotScheduled {
        /// Worker in the request.
        worker_id: String,
        /// Date in the request.
        date: NaiveDate,
        /// Shift template in the request.
        shift_id: String,
    },
}
