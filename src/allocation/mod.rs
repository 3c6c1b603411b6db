//! Weekly shift allocation.
//!
//! Turns workers, roles, shift templates and leave into a [`WeekSchedule`]
//! for one Monday-first week.
//!
//! # Pipeline
//!
//! | Stage | Component |
//! |-------|-----------|
//! | Capacity | [`plan_capacity`], [`divide_capacity`] |
//! | Demand | [`generate_slots`] |
//! | Assignment | strict/relaxed pools + [`AssignmentSelector`] |
//! | Top-up | bounded gap-filling passes |
//! | Metrics | [`CoverageReport`] |
//!
//! # Usage
//!
//! ```
//! use chrono::{NaiveDate, NaiveTime, Weekday};
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use u_roster::allocation::{CoverageReport, GenerationRequest, ShiftGenerator};
//! use u_roster::models::{Role, ShiftHistory, ShiftTemplate, WeekWindow, Worker};
//!
//! let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
//! let request = GenerationRequest::new(WeekWindow::starting_on(monday).unwrap())
//!     .with_roles(vec![Role::new("cook")])
//!     .with_workers(vec![Worker::new("ana", "cook").with_hours(40.0, 8.0)])
//!     .with_templates(vec![ShiftTemplate::new(
//!         "day",
//!         "cook",
//!         NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
//!         NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
//!     )
//!     .with_days([Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri])]);
//!
//! let mut history = ShiftHistory::new();
//! let mut rng = SmallRng::seed_from_u64(7);
//! let outcome = ShiftGenerator::new().generate(&request, &mut history, &mut rng);
//! let report = CoverageReport::calculate(&outcome, &request);
//! assert!(report.is_fully_covered());
//! ```
//!
//! [`WeekSchedule`]: crate::models::WeekSchedule

mod assembler;
mod capacity;
mod context;
mod eligibility;
mod gap_fill;
mod generator;
mod kpi;
mod roster;
mod selector;
mod slots;

pub use capacity::{divide_capacity, plan_capacity, TemplateQuota};
pub use context::AllocationContext;
pub use eligibility::EligibilityMode;
pub use generator::{CoverageGap, GenerationOutcome, GenerationRequest, ShiftGenerator};
pub use kpi::{CoverageReport, WorkerLoad};
pub use selector::{AssignmentSelector, SelectionRule};
pub use slots::{generate_slots, ScheduleSlot, SlotOrigin};
