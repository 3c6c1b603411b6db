//! Weekly shift rostering.
//!
//! Generates a one-week shift schedule from workers, roles, shift templates
//! and approved leave, and classifies clock-ins against it.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Worker`, `Role`, `ShiftTemplate`,
//!   `WeekWindow`, `LeaveCalendar`, `ShiftHistory`, `WeekSchedule`,
//!   `AttendanceRecord`
//! - **`allocation`**: Capacity division, slot expansion, rotation-fair
//!   greedy assignment, gap filling, coverage metrics
//! - **`attendance`**: Clock-in punctuality classification
//! - **`validation`**: Input integrity checks (duplicate IDs, role refs, hours)
//! - **`config`**: Tunables for allocation and punctuality
//! - **`error`**: Attendance input errors
//!
//! # Guarantees
//!
//! Every generated schedule keeps each worker within their daily hour
//! limit, never assigns the same template twice on one day, never assigns
//! on a leave day, and staffs weekends only for roles that require it.
//! Weekly quotas may be exceeded only when the relaxed pool was needed to
//! fill a slot; such workers are reported on the outcome.
//!
//! # Logging
//!
//! Generation emits `tracing` events. The crate never installs a
//! subscriber.

pub mod allocation;
pub mod attendance;
pub mod config;
pub mod error;
pub mod models;
pub mod validation;

pub use allocation::{CoverageReport, GenerationOutcome, GenerationRequest, ShiftGenerator};
pub use attendance::AttendanceClassifier;
pub use config::{AllocationConfig, PunctualityPolicy};
pub use error::InputError;
