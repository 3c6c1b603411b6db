//! Clock-in punctuality.
//!
//! A clock-in is classified on the whole minutes between the nominal start
//! of the shift the worker holds that day and the clock-in:
//!
//! | Clock-in | Status |
//! |----------|--------|
//! | at or before start | `on-time` |
//! | within `late_after_minutes` after start | `correct` |
//! | later | `late` |
//!
//! Times are compared within the same calendar day; a clock-in after
//! midnight for a shift that started the evening before counts as early.

use chrono::{NaiveDate, NaiveTime};

use crate::config::PunctualityPolicy;
use crate::error::InputError;
use crate::models::{AttendanceRecord, Punctuality, WeekSchedule};

/// Classifies a clock-in against a shift start.
///
/// # Errors
/// [`InputError::MissingClockIn`] if `clock_in` is `None`.
///
/// # Example
/// ```
/// use chrono::NaiveTime;
/// use u_roster::attendance::classify_punctuality;
/// use u_roster::config::PunctualityPolicy;
/// use u_roster::models::Punctuality;
///
/// let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let clock_in = NaiveTime::from_hms_opt(9, 10, 0);
/// let status = classify_punctuality(start, clock_in, &PunctualityPolicy::default()).unwrap();
/// assert_eq!(status, Punctuality::Correct);
/// ```
pub fn classify_punctuality(
    start: NaiveTime,
    clock_in: Option<NaiveTime>,
    policy: &PunctualityPolicy,
) -> Result<Punctuality, InputError> {
    let clock_in = clock_in.ok_or(InputError::MissingClockIn)?;
    Ok(classify_delta((clock_in - start).num_minutes(), policy))
}

fn classify_delta(delta_minutes: i64, policy: &PunctualityPolicy) -> Punctuality {
    if delta_minutes <= 0 {
        Punctuality::OnTime
    } else if delta_minutes <= policy.late_after_minutes {
        Punctuality::Correct
    } else {
        Punctuality::Late
    }
}

/// Parses a wall-clock time in `HH:MM` or `HH:MM:SS` form.
///
/// # Errors
/// [`InputError::MissingClockIn`] for blank input,
/// [`InputError::InvalidClockTime`] for anything else unparseable.
pub fn parse_clock_time(value: &str) -> Result<NaiveTime, InputError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InputError::MissingClockIn);
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| InputError::InvalidClockTime {
            value: trimmed.to_string(),
        })
}

/// Classifies clock-ins against a generated schedule.
///
/// Holds only shared references, so it can be used from many threads.
#[derive(Debug, Clone)]
pub struct AttendanceClassifier<'s> {
    schedule: &'s WeekSchedule,
    policy: PunctualityPolicy,
}

impl<'s> AttendanceClassifier<'s> {
    /// Creates a classifier with the default policy.
    pub fn new(schedule: &'s WeekSchedule) -> Self {
        Self {
            schedule,
            policy: PunctualityPolicy::default(),
        }
    }

    /// Sets the punctuality policy.
    pub fn with_policy(mut self, policy: PunctualityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Classifies one clock-in.
    ///
    /// Calling again for the same (worker, date, shift) yields the same
    /// record for the same clock-in; callers that store records overwrite.
    ///
    /// # Errors
    /// - [`InputError::ShiftNotScheduled`] if the worker does not hold
    ///   `shift_id` on `date`
    /// - [`InputError::MissingClockIn`] if `clock_in` is `None`
    pub fn record(
        &self,
        worker_id: &str,
        date: NaiveDate,
        shift_id: &str,
        clock_in: Option<NaiveTime>,
    ) -> Result<AttendanceRecord, InputError> {
        let shift = self
            .schedule
            .find_shift(date, worker_id, shift_id)
            .ok_or_else(|| InputError::ShiftNotScheduled {
                worker_id: worker_id.to_string(),
                date,
                shift_id: shift_id.to_string(),
            })?;
        let clock_in = clock_in.ok_or(InputError::MissingClockIn)?;
        let delta_minutes = (clock_in - shift.start_time).num_minutes();

        Ok(AttendanceRecord {
            worker_id: worker_id.to_string(),
            date,
            shift_id: shift_id.to_string(),
            clock_in,
            delta_minutes,
            status: classify_delta(delta_minutes, &self.policy),
        })
    }
}
