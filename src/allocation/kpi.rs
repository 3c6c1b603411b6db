//! Coverage and workload metrics for a generated week.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fill Rate | filled demand slots / demand slots |
//! | Gap-Fill Count | assignments created by top-up passes |
//! | Worker Load | assigned shifts and hours vs weekly target |
//! | Under / Over Target | workers below / above `shifts_per_week` |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{GenerationOutcome, GenerationRequest};

/// Assigned vs target load for one worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerLoad {
    /// Weekly shift quota.
    pub target: u32,
    /// Shifts assigned this week.
    pub assigned: u32,
    /// Paid hours assigned this week.
    pub hours: f64,
}

impl WorkerLoad {
    /// Shifts still missing to reach target (0 if met or exceeded).
    pub fn shortfall(&self) -> u32 {
        self.target.saturating_sub(self.assigned)
    }
}

/// Week-level coverage indicators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Demand slots generated from template quotas.
    pub demand_slots: usize,
    /// Demand slots that were filled.
    pub filled_demand_slots: usize,
    /// Fraction of demand slots filled (1.0 when there was no demand).
    pub fill_rate: f64,
    /// Assignments added by gap filling.
    pub gap_fill_assignments: usize,
    /// Per-worker load.
    pub worker_loads: BTreeMap<String, WorkerLoad>,
    /// Workers below their weekly target.
    pub under_target: Vec<String>,
    /// Workers above their weekly target (relaxed-pool overrun).
    pub over_target: Vec<String>,
}

impl CoverageReport {
    /// Computes indicators from an outcome and the request that produced it.
    pub fn calculate(outcome: &GenerationOutcome, request: &GenerationRequest) -> Self {
        let filled_demand_slots = outcome
            .demand_slots
            .saturating_sub(outcome.coverage_gaps.len());
        let fill_rate = if outcome.demand_slots == 0 {
            1.0
        } else {
            filled_demand_slots as f64 / outcome.demand_slots as f64
        };

        let mut worker_loads = BTreeMap::new();
        let mut under_target = Vec::new();
        let mut over_target = Vec::new();

        for worker in &request.workers {
            let assignments = outcome.schedule.assignments_for_worker(&worker.id);
            let hours = assignments
                .iter()
                .map(|(_, shift)| {
                    let break_minutes = request
                        .roles
                        .iter()
                        .find(|r| r.id == shift.role_id)
                        .map_or(0, |r| r.break_minutes);
                    shift.hours(break_minutes)
                })
                .sum();
            let load = WorkerLoad {
                target: worker.shifts_per_week(),
                assigned: assignments.len() as u32,
                hours,
            };
            if load.assigned < load.target {
                under_target.push(worker.id.clone());
            } else if load.assigned > load.target {
                over_target.push(worker.id.clone());
            }
            worker_loads.insert(worker.id.clone(), load);
        }

        Self {
            demand_slots: outcome.demand_slots,
            filled_demand_slots,
            fill_rate,
            gap_fill_assignments: outcome.gap_fill_assignments,
            worker_loads,
            under_target,
            over_target,
        }
    }

    /// Whether every demand slot was filled and no worker is short.
    pub fn is_fully_covered(&self) -> bool {
        self.filled_demand_slots == self.demand_slots && self.under_target.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::CoverageGap;
    use crate::models::{Role, ShiftTemplate, WeekSchedule, WeekWindow, Worker};
    use chrono::{NaiveDate, NaiveTime, Weekday};
    use std::collections::BTreeSet;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new(WeekWindow::starting_on(d(4)).unwrap())
            .with_roles(vec![Role::new("R1").with_break_minutes(30)])
            .with_workers(vec![
                Worker::new("W1", "R1").with_shifts_per_week(2),
                Worker::new("W2", "R1").with_shifts_per_week(1),
            ])
    }

    fn outcome(schedule: WeekSchedule, demand_slots: usize, gaps: usize) -> GenerationOutcome {
        GenerationOutcome {
            schedule,
            coverage_gaps: (0..gaps)
                .map(|_| CoverageGap {
                    date: d(4),
                    shift_id: "DAY".into(),
                    role_id: "R1".into(),
                })
                .collect(),
            skipped_roles: Vec::new(),
            relaxed_workers: BTreeSet::new(),
            demand_slots,
            gap_fill_assignments: 0,
        }
    }

    #[test]
    fn test_loads_and_fill_rate() {
        let day = ShiftTemplate::new(
            "DAY",
            "R1",
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        )
        .with_days([Weekday::Mon, Weekday::Tue]);
        let mut schedule = WeekSchedule::new();
        schedule.add(d(4), "W1", day.clone());
        schedule.add(d(5), "W2", day.clone());
        schedule.add(d(6), "W2", day.clone());

        let report = CoverageReport::calculate(&outcome(schedule, 4, 1), &request());

        assert_eq!(report.filled_demand_slots, 3);
        assert!((report.fill_rate - 0.75).abs() < 1e-10);
        let w1 = &report.worker_loads["W1"];
        assert_eq!((w1.target, w1.assigned), (2, 1));
        assert!((w1.hours - 7.5).abs() < 1e-10);
        assert_eq!(report.under_target, vec!["W1".to_string()]);
        assert_eq!(report.over_target, vec!["W2".to_string()]);
        assert!(!report.is_fully_covered());
    }

    #[test]
    fn test_no_demand_is_full_rate() {
        let report = CoverageReport::calculate(&outcome(WeekSchedule::new(), 0, 0), &request());
        assert!((report.fill_rate - 1.0).abs() < 1e-10);
        assert_eq!(report.worker_loads["W2"].shortfall(), 1);
    }
}
