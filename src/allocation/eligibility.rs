//! Per-slot worker eligibility.
//!
//! Hard constraints (never relaxed):
//! - no leave on the slot date;
//! - daily hours after taking the slot stay within `daily_max_hours`;
//! - the worker does not already hold the same template that date;
//! - weekend slots only for roles with `weekend_required`.
//!
//! Soft constraint (strict pool only): assigned-so-far < `shifts_per_week`.
//! When the strict pool is empty the relaxed pool drops it, so demand is
//! covered even if someone goes over quota.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::context::AllocationContext;
use super::roster::Roster;
use super::slots::ScheduleSlot;
use crate::config::AllocationConfig;
use crate::models::{is_weekend, Role, ShiftTemplate, Worker};

/// Which constraint set produced a candidate pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EligibilityMode {
    /// All constraints, including the weekly quota cap.
    Strict,
    /// Weekly quota cap lifted.
    Relaxed,
}

/// Evaluates which workers may take a slot.
#[derive(Debug)]
pub(crate) struct EligibilityFilter<'r, 'a> {
    roster: &'r Roster<'a>,
    hour_epsilon: f64,
}

impl<'r, 'a> EligibilityFilter<'r, 'a> {
    pub(crate) fn new(roster: &'r Roster<'a>, config: &AllocationConfig) -> Self {
        Self {
            roster,
            hour_epsilon: config.hour_epsilon,
        }
    }

    /// Leave, hours, duplicate-shift, and weekend checks.
    pub(crate) fn passes_hard_constraints(
        &self,
        worker: &Worker,
        role: &Role,
        shift: &ShiftTemplate,
        date: NaiveDate,
        ctx: &AllocationContext<'_>,
    ) -> bool {
        if is_weekend(date.weekday()) && !role.weekend_required {
            return false;
        }
        if self.roster.leave().is_on_leave(&worker.id, date) {
            return false;
        }
        if ctx.holds(&worker.id, date, &shift.id) {
            return false;
        }
        let projected = ctx.hours_on(&worker.id, date) + self.roster.hours(&shift.id);
        projected <= worker.daily_max_hours + self.hour_epsilon
    }

    /// Whether `worker` may take `slot` under `mode`.
    pub(crate) fn is_eligible(
        &self,
        worker: &Worker,
        slot: &ScheduleSlot,
        ctx: &AllocationContext<'_>,
        mode: EligibilityMode,
    ) -> bool {
        let (Some(role), Some(shift)) = (
            self.roster.role(&slot.role_id),
            self.roster.template(&slot.shift_id),
        ) else {
            return false;
        };
        if mode == EligibilityMode::Strict && ctx.assigned(&worker.id) >= worker.shifts_per_week()
        {
            return false;
        }
        self.passes_hard_constraints(worker, role, shift, slot.date, ctx)
    }

    /// Candidate pool for a slot: strict first, relaxed if strict is empty.
    ///
    /// Returns `None` when nobody qualifies even with the cap lifted.
    pub(crate) fn pool_for(
        &self,
        slot: &ScheduleSlot,
        ctx: &AllocationContext<'_>,
    ) -> Option<(Vec<&'a Worker>, EligibilityMode)> {
        let workers = self.roster.workers_of(&slot.role_id);
        for mode in [EligibilityMode::Strict, EligibilityMode::Relaxed] {
            let pool: Vec<&'a Worker> = workers
                .iter()
                .copied()
                .filter(|w| self.is_eligible(w, slot, ctx, mode))
                .collect();
            if !pool.is_empty() {
                return Some((pool, mode));
            }
        }
        None
    }
}
