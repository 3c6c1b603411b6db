//! Shift template model.
//!
//! A shift template is a recurring shift definition (start/end clock
//! times, operating weekdays) owned by a role. The allocator expands
//! templates into dated slots each week.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Priority weight applied to templates without an explicit one.
pub const DEFAULT_PRIORITY: u32 = 50;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// A recurring shift definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    /// Unique template identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Nominal start (clock time).
    pub start_time: NaiveTime,
    /// Nominal end (clock time). Earlier than `start_time` = overnight.
    pub end_time: NaiveTime,
    /// Owning role.
    pub role_id: String,
    /// Weekdays on which this shift runs.
    pub days_of_week: HashSet<Weekday>,
    /// Relative weight used to divide role capacity. `None` = default (50).
    pub priority: Option<u32>,
}

impl ShiftTemplate {
    /// Creates a template with no operating days.
    pub fn new(
        id: impl Into<String>,
        role_id: impl Into<String>,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            start_time,
            end_time,
            role_id: role_id.into(),
            days_of_week: HashSet::new(),
            priority: None,
        }
    }

    /// Sets the template name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds operating weekdays.
    pub fn with_days(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.days_of_week.extend(days);
        self
    }

    /// Sets the priority weight.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Priority weight, falling back to `default_priority` when unset.
    #[inline]
    pub fn weight(&self, default_priority: u32) -> u32 {
        self.priority.unwrap_or(default_priority)
    }

    /// Whether the shift runs on the given weekday.
    #[inline]
    pub fn operates_on(&self, weekday: Weekday) -> bool {
        self.days_of_week.contains(&weekday)
    }

    /// Span from start to end in minutes, wrapping past midnight.
    pub fn span_minutes(&self) -> i64 {
        let raw = self
            .end_time
            .signed_duration_since(self.start_time)
            .num_minutes();
        if raw < 0 {
            raw + MINUTES_PER_DAY
        } else {
            raw
        }
    }

    /// Paid hours after deducting the role's break. Never negative.
    pub fn hours(&self, break_minutes: u32) -> f64 {
        let paid = self.span_minutes() - i64::from(break_minutes);
        paid.max(0) as f64 / 60.0
    }
}

/// Parses an English weekday name, full or abbreviated, any case.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    name.trim().parse::<Weekday>().ok()
}

/// Saturday or Sunday.
#[inline]
pub fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}
