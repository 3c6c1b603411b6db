//! Weekly shift generation.
//!
//! # Algorithm
//!
//! 1. For each role with templates and workers: capacity = Σ worker quota,
//!    split across templates by priority weight.
//! 2. Expand each template quota into dated open slots.
//! 3. Sweep slots in date order (random within a date). For each slot,
//!    pick from the strict pool, or the relaxed pool if strict is empty.
//! 4. Top up under-quota workers with bounded gap-filling passes.
//! 5. Collapse filled slots into a [`WeekSchedule`].
//!
//! The run is single-threaded and always completes. All randomness comes
//! from the caller's `Rng`, so a seeded generator reproduces a run exactly.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::assembler::assemble;
use super::capacity::{divide_capacity, plan_capacity};
use super::context::AllocationContext;
use super::eligibility::{EligibilityFilter, EligibilityMode};
use super::gap_fill::GapFiller;
use super::roster::Roster;
use super::selector::AssignmentSelector;
use super::slots::{generate_slots, ScheduleSlot};
use crate::config::AllocationConfig;
use crate::models::{
    is_weekend, LeaveCalendar, Role, ShiftHistory, ShiftTemplate, WeekSchedule, WeekWindow, Worker,
};

/// Input snapshot for one generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Target week (Monday first).
    pub week: WeekWindow,
    /// Workers, in the order gap filling visits them.
    pub workers: Vec<Worker>,
    /// Roles, in the order they are planned.
    pub roles: Vec<Role>,
    /// Shift templates.
    pub templates: Vec<ShiftTemplate>,
    /// Leave for the week.
    pub leave: LeaveCalendar,
}

impl GenerationRequest {
    /// Creates an empty request for the given week.
    pub fn new(week: WeekWindow) -> Self {
        Self {
            week,
            workers: Vec::new(),
            roles: Vec::new(),
            templates: Vec::new(),
            leave: LeaveCalendar::new(),
        }
    }

    /// Sets the workers.
    pub fn with_workers(mut self, workers: Vec<Worker>) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the roles.
    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = roles;
        self
    }

    /// Sets the shift templates.
    pub fn with_templates(mut self, templates: Vec<ShiftTemplate>) -> Self {
        self.templates = templates;
        self
    }

    /// Sets the leave calendar.
    pub fn with_leave(mut self, leave: LeaveCalendar) -> Self {
        self.leave = leave;
        self
    }
}

/// A demand slot nobody could take, even with the quota cap lifted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageGap {
    /// Slot date.
    pub date: NaiveDate,
    /// Shift template left uncovered.
    pub shift_id: String,
    /// Role of the template.
    pub role_id: String,
}

/// Result of a generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// The assembled schedule.
    pub schedule: WeekSchedule,
    /// Demand slots left unfilled.
    pub coverage_gaps: Vec<CoverageGap>,
    /// Roles with templates but no workers (no slots were generated).
    pub skipped_roles: Vec<String>,
    /// Workers that took at least one slot from the relaxed pool.
    pub relaxed_workers: BTreeSet<String>,
    /// Demand slots generated from template quotas.
    pub demand_slots: usize,
    /// Extra assignments created by gap filling.
    pub gap_fill_assignments: usize,
}

/// Weekly shift allocator.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime, Weekday};
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use u_roster::allocation::{GenerationRequest, ShiftGenerator};
/// use u_roster::models::{Role, ShiftHistory, ShiftTemplate, WeekWindow, Worker};
///
/// let week = WeekWindow::starting_on(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()).unwrap();
/// let request = GenerationRequest::new(week)
///     .with_roles(vec![Role::new("cashier")])
///     .with_workers(vec![Worker::new("ana", "cashier").with_hours(40.0, 8.0)])
///     .with_templates(vec![ShiftTemplate::new(
///         "day",
///         "cashier",
///         NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///         NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     )
///     .with_days([Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri])]);
///
/// let mut history = ShiftHistory::new();
/// let mut rng = SmallRng::seed_from_u64(7);
/// let outcome = ShiftGenerator::new().generate(&request, &mut history, &mut rng);
///
/// assert_eq!(outcome.schedule.shift_count("ana"), 5);
/// assert_eq!(history.count("ana", "day"), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShiftGenerator {
    config: AllocationConfig,
    selector: AssignmentSelector,
}

impl ShiftGenerator {
    /// Creates a generator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the allocation configuration.
    pub fn with_config(mut self, config: AllocationConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the candidate selector.
    pub fn with_selector(mut self, selector: AssignmentSelector) -> Self {
        self.selector = selector;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Generates a schedule, updating `history` with every assignment.
    ///
    /// Concurrent calls must not share one `history`; the `&mut` borrow
    /// enforces that within a process.
    #[instrument(skip_all, fields(
        week = %request.week.start(),
        workers = request.workers.len(),
        templates = request.templates.len()
    ))]
    pub fn generate<R: Rng + ?Sized>(
        &self,
        request: &GenerationRequest,
        history: &mut ShiftHistory,
        rng: &mut R,
    ) -> GenerationOutcome {
        let roster = Roster::new(request);
        let mut ctx = AllocationContext::new(history);

        let (mut slots, skipped_roles) = self.plan_slots(&roster, rng);
        let demand_slots = slots.len();

        // Date order; random order within a date.
        slots.shuffle(rng);
        slots.sort_by_key(|s| s.date);

        let coverage_gaps = self.sweep(&roster, &mut ctx, &mut slots, rng);
        let gap_fill_assignments = GapFiller::new(&roster, &self.config).fill(&mut ctx, &mut slots);
        let schedule = assemble(&slots, &roster);

        info!(
            demand_slots,
            filled = demand_slots - coverage_gaps.len(),
            unfilled = coverage_gaps.len(),
            gap_fill_assignments,
            "schedule generated"
        );

        GenerationOutcome {
            schedule,
            coverage_gaps,
            skipped_roles,
            relaxed_workers: ctx.into_relaxed_workers(),
            demand_slots,
            gap_fill_assignments,
        }
    }

    /// Generates with a thread-local entropy source.
    pub fn generate_with_thread_rng(
        &self,
        request: &GenerationRequest,
        history: &mut ShiftHistory,
    ) -> GenerationOutcome {
        self.generate(request, history, &mut rand::rng())
    }

    /// Capacity → division → slot expansion for every role.
    fn plan_slots<R: Rng + ?Sized>(
        &self,
        roster: &Roster<'_>,
        rng: &mut R,
    ) -> (Vec<ScheduleSlot>, Vec<String>) {
        let mut slots = Vec::new();
        let mut skipped = Vec::new();

        for role in roster.roles() {
            let templates = roster.templates_of(&role.id);
            if templates.is_empty() {
                continue;
            }
            let workers = roster.workers_of(&role.id);
            if workers.is_empty() {
                warn!(role = %role.id, templates = templates.len(), "role has shift templates but no workers");
                skipped.push(role.id.clone());
                continue;
            }

            let capacity = plan_capacity(workers.iter().copied());
            let quotas = divide_capacity(capacity, templates, self.config.default_priority);
            let leave = roster.leave();
            let epsilon = self.config.hour_epsilon;

            for (template, quota) in templates.iter().zip(&quotas) {
                let hours = roster.hours(&template.id);
                // Floor slots only where someone could actually take the shift.
                let has_staff_on = |date: NaiveDate| {
                    (role.weekend_required || !is_weekend(date.weekday()))
                        && workers.iter().any(|w| {
                            !leave.is_on_leave(&w.id, date) && hours <= w.daily_max_hours + epsilon
                        })
                };
                let generated =
                    generate_slots(template, quota.quota, roster.week(), has_staff_on, rng);
                debug!(
                    role = %role.id,
                    shift = %template.id,
                    capacity,
                    weight = quota.weight,
                    quota = quota.quota,
                    slots = generated.len(),
                    "template slots planned"
                );
                slots.extend(generated);
            }
        }

        (slots, skipped)
    }

    /// Main assignment sweep. Returns the slots left unfilled.
    fn sweep<R: Rng + ?Sized>(
        &self,
        roster: &Roster<'_>,
        ctx: &mut AllocationContext<'_>,
        slots: &mut [ScheduleSlot],
        rng: &mut R,
    ) -> Vec<CoverageGap> {
        let filter = EligibilityFilter::new(roster, &self.config);
        let mut gaps = Vec::new();

        for slot in slots.iter_mut() {
            let picked = filter.pool_for(slot, ctx).and_then(|(pool, mode)| {
                self.selector
                    .select(&pool, &slot.shift_id, ctx, rng)
                    .map(|w| (w, mode))
            });
            let Some((worker, mode)) = picked else {
                warn!(date = %slot.date, shift = %slot.shift_id, "slot left unfilled");
                gaps.push(CoverageGap {
                    date: slot.date,
                    shift_id: slot.shift_id.clone(),
                    role_id: slot.role_id.clone(),
                });
                continue;
            };

            let relaxed = mode == EligibilityMode::Relaxed;
            if relaxed {
                debug!(worker = %worker.id, date = %slot.date, shift = %slot.shift_id, "assigned from relaxed pool");
            }
            ctx.record(
                &worker.id,
                slot.date,
                &slot.shift_id,
                roster.hours(&slot.shift_id),
                relaxed,
            );
            slot.assign(worker.id.as_str());
        }

        gaps
    }
}
