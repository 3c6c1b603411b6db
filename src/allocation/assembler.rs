//! Collapses filled slots into the public schedule.

use super::roster::Roster;
use super::slots::ScheduleSlot;
use crate::models::WeekSchedule;

/// Builds the date → worker → templates structure from filled slots.
///
/// Unfilled slots and slots whose template is unknown are skipped.
pub(crate) fn assemble(slots: &[ScheduleSlot], roster: &Roster<'_>) -> WeekSchedule {
    let mut schedule = WeekSchedule::new();
    for slot in slots {
        let (Some(worker_id), Some(shift)) = (&slot.worker_id, roster.template(&slot.shift_id))
        else {
            continue;
        };
        schedule.add(slot.date, worker_id.as_str(), shift.clone());
    }
    schedule
}
