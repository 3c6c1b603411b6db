//! Slot generation.
//!
//! Expands a shift template and its weekly quota into dated, unassigned
//! slots spread across the template's operating days.
//!
//! # Algorithm
//!
//! 1. Operating days = week dates whose weekday the template runs on.
//! 2. `base = quota / days`, `remainder = quota % days`.
//! 3. A uniformly random subset of `remainder` days gets one extra slot.
//! 4. Any operating day left at zero gets one slot anyway if the role has
//!    at least one worker eligible for it that date.

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{ShiftTemplate, WeekWindow};

/// Why a slot exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotOrigin {
    /// Generated from a template quota.
    Demand,
    /// Created by gap filling to top up a worker's weekly quota.
    GapFill,
}

/// One (date, shift template) unit of coverage, filled by at most one worker.
///
/// Slots only live for the duration of a generation call and reference
/// templates, roles, and workers by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    /// Slot date.
    pub date: NaiveDate,
    /// Index within the week (Monday = 0).
    pub weekday_index: usize,
    /// Shift template.
    pub shift_id: String,
    /// Role of the shift template.
    pub role_id: String,
    /// Assigned worker, if filled.
    pub worker_id: Option<String>,
    /// Why the slot exists.
    pub origin: SlotOrigin,
}

impl ScheduleSlot {
    /// Creates an unassigned demand slot.
    pub fn open(date: NaiveDate, weekday_index: usize, shift: &ShiftTemplate) -> Self {
        Self {
            date,
            weekday_index,
            shift_id: shift.id.clone(),
            role_id: shift.role_id.clone(),
            worker_id: None,
            origin: SlotOrigin::Demand,
        }
    }

    /// Creates an already-filled gap-fill slot.
    pub fn gap_fill(
        date: NaiveDate,
        weekday_index: usize,
        shift: &ShiftTemplate,
        worker_id: impl Into<String>,
    ) -> Self {
        Self {
            worker_id: Some(worker_id.into()),
            origin: SlotOrigin::GapFill,
            ..Self::open(date, weekday_index, shift)
        }
    }

    /// Marks the slot filled by `worker_id`.
    pub fn assign(&mut self, worker_id: impl Into<String>) {
        self.worker_id = Some(worker_id.into());
    }

    /// Whether a worker holds this slot.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.worker_id.is_some()
    }
}

/// Expands one template's quota into open slots for the week.
///
/// `has_staff_on` reports whether at least one worker of the template's
/// role could take the shift on a date (weekend rule, leave, daily hour
/// cap); such days always get at least one slot.
pub fn generate_slots<R, F>(
    shift: &ShiftTemplate,
    quota: u32,
    week: &WeekWindow,
    has_staff_on: F,
    rng: &mut R,
) -> Vec<ScheduleSlot>
where
    R: Rng + ?Sized,
    F: Fn(NaiveDate) -> bool,
{
    let operating: Vec<(usize, NaiveDate)> = week
        .dates()
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, date)| shift.operates_on(date.weekday()))
        .collect();
    if operating.is_empty() {
        return Vec::new();
    }

    let day_count = operating.len();
    let quota = quota as usize;
    let base = quota / day_count;
    let remainder = quota % day_count;

    let mut per_day = vec![base; day_count];
    for idx in rand::seq::index::sample(rng, day_count, remainder).iter() {
        per_day[idx] += 1;
    }

    let mut slots = Vec::with_capacity(quota.max(day_count));
    for ((weekday_index, date), count) in operating.into_iter().zip(per_day) {
        let count = if count == 0 && has_staff_on(date) {
            1
        } else {
            count
        };
        slots.extend((0..count).map(|_| ScheduleSlot::open(date, weekday_index, shift)));
    }
    slots
}
