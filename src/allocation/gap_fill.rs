//! Quota top-up after the main sweep.
//!
//! # Algorithm
//!
//! Up to `gap_fill_passes` global passes. In each pass, every worker still
//! below `shifts_per_week` gets at most one new shift:
//!
//! 1. Order the worker's role templates by the worker's own history count
//!    (ascending), then priority (descending).
//! 2. For each template, scan all seven days of the week in date order and
//!    take the first day that passes the hard constraints. A template's
//!    operating days bound demand, not top-up, so a worker on leave midweek
//!    can make up the shift on another free day.
//! 3. Record a new filled [`SlotOrigin::GapFill`](super::SlotOrigin) slot.
//!
//! A pass that places nothing ends the loop early.

use tracing::debug;

use super::context::AllocationContext;
use super::eligibility::EligibilityFilter;
use super::roster::Roster;
use super::slots::ScheduleSlot;
use crate::config::AllocationConfig;
use crate::models::{Role, ShiftTemplate, Worker};

/// Bounded iterative quota top-up.
#[derive(Debug)]
pub(crate) struct GapFiller<'r, 'a> {
    roster: &'r Roster<'a>,
    filter: EligibilityFilter<'r, 'a>,
    passes: u32,
    default_priority: u32,
}

impl<'r, 'a> GapFiller<'r, 'a> {
    pub(crate) fn new(roster: &'r Roster<'a>, config: &AllocationConfig) -> Self {
        Self {
            roster,
            filter: EligibilityFilter::new(roster, config),
            passes: config.gap_fill_passes,
            default_priority: config.default_priority,
        }
    }

    /// Runs the passes, appending new slots. Returns how many were added.
    pub(crate) fn fill(
        &self,
        ctx: &mut AllocationContext<'_>,
        slots: &mut Vec<ScheduleSlot>,
    ) -> usize {
        let mut added = 0;
        for pass in 0..self.passes {
            let mut placed = 0;
            for worker in self.roster.workers() {
                if ctx.assigned(&worker.id) >= worker.shifts_per_week() {
                    continue;
                }
                if let Some(slot) = self.place_one(worker, ctx) {
                    slots.push(slot);
                    placed += 1;
                }
            }
            debug!(pass, placed, "gap-fill pass");
            added += placed;
            if placed == 0 {
                break;
            }
        }
        added
    }

    fn place_one(&self, worker: &Worker, ctx: &mut AllocationContext<'_>) -> Option<ScheduleSlot> {
        let role = self.roster.role(&worker.role_id)?;
        let (shift, date_index) = self.find_opening(worker, role, ctx)?;
        let date = self.roster.week().dates()[date_index];
        ctx.record(
            &worker.id,
            date,
            &shift.id,
            self.roster.hours(&shift.id),
            false,
        );
        Some(ScheduleSlot::gap_fill(date, date_index, shift, worker.id.as_str()))
    }

    fn find_opening(
        &self,
        worker: &Worker,
        role: &Role,
        ctx: &AllocationContext<'_>,
    ) -> Option<(&'a ShiftTemplate, usize)> {
        let mut templates = self.roster.templates_of(&role.id).to_vec();
        templates.sort_by(|a, b| {
            let ha = ctx.history().count(&worker.id, &a.id);
            let hb = ctx.history().count(&worker.id, &b.id);
            ha.cmp(&hb).then_with(|| {
                b.weight(self.default_priority)
                    .cmp(&a.weight(self.default_priority))
            })
        });

        templates.into_iter().find_map(|shift| {
            self.roster
                .week()
                .dates()
                .iter()
                .enumerate()
                .find(|(_, date)| {
                    self.filter
                        .passes_hard_constraints(worker, role, shift, **date, ctx)
                })
                .map(|(idx, _)| (shift, idx))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::{GenerationRequest, SlotOrigin};
    use crate::models::{LeaveCalendar, ShiftHistory, WeekWindow};
    use chrono::{NaiveDate, NaiveTime, Weekday};

    const WEEKDAYS: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn request(templates: Vec<ShiftTemplate>, leave: LeaveCalendar) -> GenerationRequest {
        GenerationRequest::new(WeekWindow::starting_on(d(4)).unwrap())
            .with_roles(vec![Role::new("R1")])
            .with_workers(vec![Worker::new("W1", "R1").with_hours(40.0, 8.0)])
            .with_templates(templates)
            .with_leave(leave)
    }

    #[test]
    fn test_fills_to_quota() {
        let req = request(
            vec![ShiftTemplate::new("DAY", "R1", t(9), t(17)).with_days(WEEKDAYS)],
            LeaveCalendar::new(),
        );
        let roster = Roster::new(&req);
        let mut history = ShiftHistory::new();
        let mut ctx = AllocationContext::new(&mut history);
        ctx.record("W1", d(4), "DAY", 8.0, false);
        ctx.record("W1", d(5), "DAY", 8.0, false);
        let mut slots = Vec::new();

        let added = GapFiller::new(&roster, &AllocationConfig::default()).fill(&mut ctx, &mut slots);
        assert_eq!(added, 3);
        assert_eq!(ctx.assigned("W1"), 5);
        assert!(slots.iter().all(|s| s.origin == SlotOrigin::GapFill));
        let dates: Vec<NaiveDate> = slots.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![d(6), d(7), d(8)]);
    }

    #[test]
    fn test_skips_leave_days() {
        let req = request(
            vec![ShiftTemplate::new("DAY", "R1", t(9), t(17)).with_days(WEEKDAYS)],
            LeaveCalendar::new().with_leave("W1", d(4)).with_leave("W1", d(5)),
        );
        let roster = Roster::new(&req);
        let mut history = ShiftHistory::new();
        let mut ctx = AllocationContext::new(&mut history);
        let mut slots = Vec::new();

        let added = GapFiller::new(&roster, &AllocationConfig::default()).fill(&mut ctx, &mut slots);
        // Only Wed–Fri remain.
        assert_eq!(added, 3);
        assert!(slots.iter().all(|s| s.date >= d(6)));
    }

    #[test]
    fn test_respects_pass_limit() {
        let req = request(
            vec![ShiftTemplate::new("DAY", "R1", t(9), t(17)).with_days(WEEKDAYS)],
            LeaveCalendar::new(),
        );
        let roster = Roster::new(&req);
        let mut history = ShiftHistory::new();
        let mut ctx = AllocationContext::new(&mut history);
        let mut slots = Vec::new();

        let config = AllocationConfig::default().with_gap_fill_passes(2);
        let added = GapFiller::new(&roster, &config).fill(&mut ctx, &mut slots);
        assert_eq!(added, 2);
    }

    #[test]
    fn test_prefers_least_held_template() {
        let req = request(
            vec![
                ShiftTemplate::new("EARLY", "R1", t(6), t(14)).with_days(WEEKDAYS),
                ShiftTemplate::new("LATE", "R1", t(14), t(22)).with_days(WEEKDAYS),
            ],
            LeaveCalendar::new(),
        );
        let roster = Roster::new(&req);
        let mut history = ShiftHistory::new().with_count("W1", "EARLY", 10);
        let mut ctx = AllocationContext::new(&mut history);
        ctx.record("W1", d(4), "EARLY", 8.0, false);
        ctx.record("W1", d(5), "EARLY", 8.0, false);
        ctx.record("W1", d(6), "EARLY", 8.0, false);
        ctx.record("W1", d(7), "EARLY", 8.0, false);
        let mut slots = Vec::new();

        GapFiller::new(&roster, &AllocationConfig::default()).fill(&mut ctx, &mut slots);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].shift_id, "LATE");
        // Mon–Thu already at 8h; LATE lands on Friday.
        assert_eq!(slots[0].date, d(8));
    }

    #[test]
    fn test_priority_breaks_history_tie() {
        let req = request(
            vec![
                ShiftTemplate::new("LOW", "R1", t(6), t(14))
                    .with_days(WEEKDAYS)
                    .with_priority(10),
                ShiftTemplate::new("HIGH", "R1", t(14), t(22))
                    .with_days(WEEKDAYS)
                    .with_priority(90),
            ],
            LeaveCalendar::new(),
        );
        let roster = Roster::new(&req);
        let mut history = ShiftHistory::new();
        let mut ctx = AllocationContext::new(&mut history);
        let mut slots = Vec::new();

        let config = AllocationConfig::default().with_gap_fill_passes(1);
        GapFiller::new(&roster, &config).fill(&mut ctx, &mut slots);
        assert_eq!(slots[0].shift_id, "HIGH");
    }

    #[test]
    fn test_weekend_skipped_without_flag() {
        let req = request(
            vec![ShiftTemplate::new("DAY", "R1", t(9), t(17)).with_days(WEEKDAYS)],
            LeaveCalendar::new().with_leave("W1", d(6)),
        );
        let roster = Roster::new(&req);
        let mut history = ShiftHistory::new();
        let mut ctx = AllocationContext::new(&mut history);
        for day in [4, 5, 7, 8] {
            ctx.record("W1", d(day), "DAY", 8.0, false);
        }
        let mut slots = Vec::new();

        let added = GapFiller::new(&roster, &AllocationConfig::default()).fill(&mut ctx, &mut slots);
        assert_eq!(added, 0);
        assert_eq!(ctx.assigned("W1"), 4);
    }

    #[test]
    fn test_makes_up_leave_day_on_weekend() {
        let mut req = request(
            vec![ShiftTemplate::new("DAY", "R1", t(9), t(17)).with_days(WEEKDAYS)],
            LeaveCalendar::new().with_leave("W1", d(6)),
        );
        req.roles = vec![Role::new("R1").with_weekend_required(true)];
        let roster = Roster::new(&req);
        let mut history = ShiftHistory::new();
        let mut ctx = AllocationContext::new(&mut history);
        for day in [4, 5, 7, 8] {
            ctx.record("W1", d(day), "DAY", 8.0, false);
        }
        let mut slots = Vec::new();

        let added = GapFiller::new(&roster, &AllocationConfig::default()).fill(&mut ctx, &mut slots);
        assert_eq!(added, 1);
        assert_eq!(slots[0].shift_id, "DAY");
        assert_eq!(slots[0].date, d(9));
        assert_eq!(slots[0].weekday_index, 5);
    }

    #[test]
    fn test_configured_default_priority() {
        let templates = vec![
            ShiftTemplate::new("LOW", "R1", t(6), t(14))
                .with_days(WEEKDAYS)
                .with_priority(10),
            ShiftTemplate::new("UNSET", "R1", t(14), t(22)).with_days(WEEKDAYS),
        ];
        let req = request(templates, LeaveCalendar::new());
        let roster = Roster::new(&req);

        let pick = |default_priority| {
            let mut history = ShiftHistory::new();
            let mut ctx = AllocationContext::new(&mut history);
            let mut slots = Vec::new();
            let config = AllocationConfig::default()
                .with_gap_fill_passes(1)
                .with_default_priority(default_priority);
            GapFiller::new(&roster, &config).fill(&mut ctx, &mut slots);
            slots[0].shift_id.clone()
        };
        assert_eq!(pick(50), "UNSET");
        assert_eq!(pick(5), "LOW");
    }

    #[test]
    fn test_no_op_when_quota_met() {
        let req = request(
            vec![ShiftTemplate::new("DAY", "R1", t(9), t(17)).with_days(WEEKDAYS)],
            LeaveCalendar::new(),
        );
        let roster = Roster::new(&req);
        let mut history = ShiftHistory::new();
        let mut ctx = AllocationContext::new(&mut history);
        for day in 4..9 {
            ctx.record("W1", d(day), "DAY", 8.0, false);
        }
        let mut slots = Vec::new();
        let added = GapFiller::new(&roster, &AllocationConfig::default()).fill(&mut ctx, &mut slots);
        assert_eq!(added, 0);
    }
}
