//! Rostering domain models.
//!
//! Provides the data types the allocator consumes (workers, roles, shift
//! templates, leave, rotation history) and produces (the weekly schedule,
//! attendance records). All inputs are read-only snapshots owned by the
//! caller; only [`ShiftHistory`] is mutated by a generation run.
//!
//! # Domain Mappings
//!
//! | u-roster | Retail | Healthcare | Warehouse |
//! |----------|--------|------------|-----------|
//! | Worker | Clerk | Nurse | Picker |
//! | Role | Cashier | Ward Nurse | Forklift Operator |
//! | ShiftTemplate | Opening Shift | Night Shift | Late Dock |
//! | WeekSchedule | Weekly Rota | Duty Roster | Shift Plan |

mod attendance;
mod history;
mod leave;
mod role;
mod schedule;
mod shift;
mod week;
mod worker;

pub use attendance::{AttendanceRecord, Punctuality};
pub use history::ShiftHistory;
pub use leave::{LeaveCalendar, LeaveRequest};
pub use role::Role;
pub use schedule::WeekSchedule;
pub use shift::{is_weekend, parse_weekday, ShiftTemplate, DEFAULT_PRIORITY};
pub use week::WeekWindow;
pub use worker::Worker;
