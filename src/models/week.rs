//! Week window model.
//!
//! The planning horizon is always one calendar week: seven consecutive
//! dates, Monday first.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationErrorKind};

/// Seven consecutive dates, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    dates: [NaiveDate; 7],
}

impl WeekWindow {
    /// Builds the week starting on `monday`.
    ///
    /// Returns an error if `monday` is not a Monday or the week runs past
    /// the supported date range.
    pub fn starting_on(monday: NaiveDate) -> Result<Self, ValidationError> {
        if monday.weekday() != Weekday::Mon {
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidWeek,
                format!("Week must start on a Monday, got {monday} ({})", monday.weekday()),
            ));
        }
        let mut dates = [monday; 7];
        for (offset, slot) in dates.iter_mut().enumerate() {
            *slot = monday.checked_add_days(Days::new(offset as u64)).ok_or_else(|| {
                ValidationError::new(
                    ValidationErrorKind::InvalidWeek,
                    format!("Date overflow building week from {monday}"),
                )
            })?;
        }
        Ok(Self { dates })
    }

    /// Accepts a caller-supplied sequence after checking it is a Monday-first week.
    pub fn from_dates(dates: [NaiveDate; 7]) -> Result<Self, ValidationError> {
        let expected = Self::starting_on(dates[0])?;
        if expected.dates != dates {
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidWeek,
                format!("Week dates starting {} are not consecutive", dates[0]),
            ));
        }
        Ok(expected)
    }

    /// The seven dates, Monday first.
    #[inline]
    pub fn dates(&self) -> &[NaiveDate; 7] {
        &self.dates
    }

    /// First date (Monday).
    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.dates[0]
    }

    /// Zero-based index of `date` within the week (Monday = 0).
    pub fn weekday_index(&self, date: NaiveDate) -> Option<usize> {
        self.dates.iter().position(|d| *d == date)
    }

    /// Whether `date` falls inside this week.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.weekday_index(date).is_some()
    }
}
