//! Role model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A job role grouping workers and shift templates.
///
/// Weekend (Saturday/Sunday) slots of a role's templates can only be
/// filled when `weekend_required` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Unique role identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether this role staffs weekend shifts.
    pub weekend_required: bool,
    /// Skills every worker of this role is expected to hold.
    pub required_skills: BTreeSet<String>,
    /// Unpaid break deducted from each shift (minutes).
    pub break_minutes: u32,
}

impl Role {
    /// Creates a weekday-only role with no break.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            weekend_required: false,
            required_skills: BTreeSet::new(),
            break_minutes: 0,
        }
    }

    /// Sets the role name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets whether the role staffs weekends.
    pub fn with_weekend_required(mut self, required: bool) -> Self {
        self.weekend_required = required;
        self
    }

    /// Adds a required skill.
    pub fn with_required_skill(mut self, skill: impl Into<String>) -> Self {
        self.required_skills.insert(skill.into());
        self
    }

    /// Sets the per-shift break.
    pub fn with_break_minutes(mut self, minutes: u32) -> Self {
        self.break_minutes = minutes;
        self
    }
}
