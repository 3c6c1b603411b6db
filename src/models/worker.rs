//! Worker model.
//!
//! Workers are the people shifts are allocated to. Each worker belongs to
//! exactly one role and carries weekly and daily hour limits from which the
//! weekly shift quota is derived.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A worker that can be assigned to shifts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    /// Unique worker identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Role this worker belongs to.
    pub role_id: String,
    /// Contracted hours per week.
    pub weekly_hours: f64,
    /// Maximum hours that may be worked on a single date.
    pub daily_max_hours: f64,
    /// Explicit weekly shift quota. `None` = derived from hours.
    pub shifts_per_week_override: Option<u32>,
    /// Skill tags.
    pub skills: BTreeSet<String>,
}

impl Worker {
    /// Creates a worker in the given role with zero hours.
    pub fn new(id: impl Into<String>, role_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            role_id: role_id.into(),
            weekly_hours: 0.0,
            daily_max_hours: 0.0,
            shifts_per_week_override: None,
            skills: BTreeSet::new(),
        }
    }

    /// Sets the worker name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets weekly and daily hour limits.
    pub fn with_hours(mut self, weekly_hours: f64, daily_max_hours: f64) -> Self {
        self.weekly_hours = weekly_hours;
        self.daily_max_hours = daily_max_hours;
        self
    }

    /// Overrides the derived weekly shift quota.
    pub fn with_shifts_per_week(mut self, shifts: u32) -> Self {
        self.shifts_per_week_override = Some(shifts);
        self
    }

    /// Adds a skill tag.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.insert(skill.into());
        self
    }

    /// Weekly shift quota.
    ///
    /// `ceil(weekly_hours / daily_max_hours)` unless explicitly overridden.
    /// Non-positive hour limits yield 0.
    pub fn shifts_per_week(&self) -> u32 {
        if let Some(shifts) = self.shifts_per_week_override {
            return shifts;
        }
        if self.daily_max_hours <= 0.0 || self.weekly_hours <= 0.0 {
            return 0;
        }
        (self.weekly_hours / self.daily_max_hours).ceil() as u32
    }

    /// Whether the worker holds every listed skill.
    pub fn has_skills<'a>(&self, required: impl IntoIterator<Item = &'a String>) -> bool {
        required.into_iter().all(|s| self.skills.contains(s))
    }
}
