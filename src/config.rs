//! Engine configuration.
//!
//! Both config types derive serde with field defaults so callers can load
//! partial documents (JSON, TOML, ...) and get the standard behavior for
//! anything omitted.

use serde::{Deserialize, Serialize};

use crate::models::DEFAULT_PRIORITY;

/// Tuning knobs for weekly allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// Maximum global gap-filling passes after the main sweep.
    pub gap_fill_passes: u32,
    /// Weight for templates that carry no priority.
    pub default_priority: u32,
    /// Tolerance when comparing summed daily hours against a cap.
    pub hour_epsilon: f64,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            gap_fill_passes: 5,
            default_priority: DEFAULT_PRIORITY,
            hour_epsilon: 1e-9,
        }
    }
}

impl AllocationConfig {
    /// Sets the number of gap-filling passes.
    pub fn with_gap_fill_passes(mut self, passes: u32) -> Self {
        self.gap_fill_passes = passes;
        self
    }

    /// Sets the fallback template weight.
    pub fn with_default_priority(mut self, priority: u32) -> Self {
        self.default_priority = priority;
        self
    }

    /// Sets the hour comparison tolerance.
    pub fn with_hour_epsilon(mut self, epsilon: f64) -> Self {
        self.hour_epsilon = epsilon;
        self
    }
}

/// Grace window for clock-in classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PunctualityPolicy {
    /// Minutes after nominal start still counted as `correct`.
    pub late_after_minutes: i64,
}

impl Default for PunctualityPolicy {
    fn default() -> Self {
        Self {
            late_after_minutes: 15,
        }
    }
}

impl PunctualityPolicy {
    /// Sets the grace window.
    pub fn with_late_after_minutes(mut self, minutes: i64) -> Self {
        self.late_after_minutes = minutes;
        self
    }
}
