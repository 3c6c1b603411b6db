//! Input validation for rostering problems.
//!
//! Checks structural integrity of workers, roles, and shift templates
//! before generation. Detects:
//! - Duplicate IDs
//! - Unknown role references
//! - Templates that never operate
//! - Non-positive contract hours
//! - Workers missing their role's required skills
//! - Shifts longer than any worker of the role may work in a day
//!
//! The generator does not call this itself. It skips what it cannot use
//! and keeps going, so callers that want hard failures validate first.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::models::{Role, ShiftTemplate, Worker};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A worker or template references a role that doesn't exist.
    InvalidRoleReference,
    /// A template has no operating days.
    EmptyOperatingDays,
    /// Weekly or daily hours are not positive.
    InvalidHours,
    /// No worker of the role can fit the shift into one day.
    UnstaffableShift,
    /// A worker lacks a skill its role requires.
    MissingRequiredSkills,
    /// Dates do not form a Monday-first run of seven days.
    InvalidWeek,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

const HOUR_EPSILON: f64 = 1e-9;

/// Validates the input data for a rostering problem.
///
/// Checks:
/// 1. No duplicate role, worker, or template IDs
/// 2. Every worker and template references an existing role
/// 3. Every template operates on at least one weekday
/// 4. Workers without an explicit shift count have positive hours
/// 5. Workers carry their role's required skills
/// 6. Each template fits within the daily max of at least one worker of its role
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    workers: &[Worker],
    roles: &[Role],
    templates: &[ShiftTemplate],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut role_index: HashMap<&str, &Role> = HashMap::new();
    for role in roles {
        if role_index.insert(role.id.as_str(), role).is_some() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate role ID: {}", role.id),
            ));
        }
    }

    let mut worker_ids = HashSet::new();
    for worker in workers {
        if !worker_ids.insert(worker.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate worker ID: {}", worker.id),
            ));
        }

        if worker.shifts_per_week_override.is_none()
            && (worker.weekly_hours <= 0.0 || worker.daily_max_hours <= 0.0)
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidHours,
                format!(
                    "Worker '{}' has non-positive hours (weekly {}, daily {})",
                    worker.id, worker.weekly_hours, worker.daily_max_hours
                ),
            ));
        }

        match role_index.get(worker.role_id.as_str()) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRoleReference,
                format!(
                    "Worker '{}' references unknown role '{}'",
                    worker.id, worker.role_id
                ),
            )),
            Some(role) if !worker.has_skills(&role.required_skills) => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MissingRequiredSkills,
                    format!(
                        "Worker '{}' lacks skills required by role '{}'",
                        worker.id, role.id
                    ),
                ))
            }
            Some(_) => {}
        }
    }

    let mut template_ids = HashSet::new();
    for template in templates {
        if !template_ids.insert(template.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate shift template ID: {}", template.id),
            ));
        }

        if template.days_of_week.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyOperatingDays,
                format!("Shift template '{}' has no operating days", template.id),
            ));
        }

        let Some(role) = role_index.get(template.role_id.as_str()) else {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRoleReference,
                format!(
                    "Shift template '{}' references unknown role '{}'",
                    template.id, template.role_id
                ),
            ));
            continue;
        };

        let hours = template.hours(role.break_minutes);
        let mut staff = workers.iter().filter(|w| w.role_id == role.id).peekable();
        if staff.peek().is_some() && staff.all(|w| hours > w.daily_max_hours + HOUR_EPSILON) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnstaffableShift,
                format!(
                    "Shift template '{}' ({hours}h) exceeds the daily max of every '{}' worker",
                    template.id, role.id
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Weekday};

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn day_shift(id: &str, role: &str) -> ShiftTemplate {
        ShiftTemplate::new(id, role, t(9), t(17)).with_days([Weekday::Mon, Weekday::Tue])
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result.unwrap_err().into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_input() {
        let roles = vec![Role::new("R1").with_required_skill("forklift")];
        let workers = vec![Worker::new("W1", "R1")
            .with_hours(40.0, 8.0)
            .with_skill("forklift")];
        let templates = vec![day_shift("S1", "R1")];
        assert!(validate_input(&workers, &roles, &templates).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let roles = vec![Role::new("R1"), Role::new("R1")];
        let workers = vec![
            Worker::new("W1", "R1").with_hours(40.0, 8.0),
            Worker::new("W1", "R1").with_hours(40.0, 8.0),
        ];
        let templates = vec![day_shift("S1", "R1"), day_shift("S1", "R1")];
        let result = validate_input(&workers, &roles, &templates);
        assert_eq!(
            kinds(result),
            vec![ValidationErrorKind::DuplicateId; 3]
        );
    }

    #[test]
    fn test_unknown_role() {
        let roles = vec![Role::new("R1")];
        let workers = vec![Worker::new("W1", "GHOST").with_hours(40.0, 8.0)];
        let templates = vec![day_shift("S1", "GHOST")];
        let errors = validate_input(&workers, &roles, &templates).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InvalidRoleReference));
        assert!(errors[0].to_string().contains("GHOST"));
    }

    #[test]
    fn test_empty_days() {
        let roles = vec![Role::new("R1")];
        let workers = vec![Worker::new("W1", "R1").with_hours(40.0, 8.0)];
        let templates = vec![ShiftTemplate::new("S1", "R1", t(9), t(17))];
        assert_eq!(
            kinds(validate_input(&workers, &roles, &templates)),
            vec![ValidationErrorKind::EmptyOperatingDays]
        );
    }

    #[test]
    fn test_invalid_hours() {
        let roles = vec![Role::new("R1")];
        let workers = vec![
            Worker::new("W1", "R1").with_hours(0.0, 8.0),
            // Explicit shift count bypasses the hours check.
            Worker::new("W2", "R1").with_shifts_per_week(3).with_hours(0.0, 8.0),
        ];
        assert_eq!(
            kinds(validate_input(&workers, &roles, &[])),
            vec![ValidationErrorKind::InvalidHours]
        );
    }

    #[test]
    fn test_missing_skills() {
        let roles = vec![Role::new("R1").with_required_skill("first-aid")];
        let workers = vec![Worker::new("W1", "R1").with_hours(40.0, 8.0)];
        assert_eq!(
            kinds(validate_input(&workers, &roles, &[])),
            vec![ValidationErrorKind::MissingRequiredSkills]
        );
    }

    #[test]
    fn test_unstaffable_shift() {
        let roles = vec![Role::new("R1")];
        let workers = vec![
            Worker::new("W1", "R1").with_hours(20.0, 4.0),
            Worker::new("W2", "R1").with_hours(30.0, 6.0),
        ];
        let templates = vec![day_shift("S1", "R1")];
        assert_eq!(
            kinds(validate_input(&workers, &roles, &templates)),
            vec![ValidationErrorKind::UnstaffableShift]
        );
    }

    #[test]
    fn test_break_makes_shift_fit() {
        let roles = vec![Role::new("R1").with_break_minutes(60)];
        let workers = vec![Worker::new("W1", "R1").with_hours(35.0, 7.0)];
        let templates = vec![day_shift("S1", "R1")];
        assert!(validate_input(&workers, &roles, &templates).is_ok());
    }

    #[test]
    fn test_role_without_workers_not_unstaffable() {
        let roles = vec![Role::new("R1")];
        let templates = vec![day_shift("S1", "R1")];
        assert!(validate_input(&[], &roles, &templates).is_ok());
    }
}
