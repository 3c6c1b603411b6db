//! Indexed, read-only view of one generation's input snapshot.

use std::collections::HashMap;

use tracing::warn;

use super::GenerationRequest;
use crate::models::{LeaveCalendar, Role, ShiftTemplate, WeekWindow, Worker};

/// Lookup tables over a [`GenerationRequest`].
///
/// Workers and templates whose role is unknown are left out (and logged);
/// they cannot take part in allocation. Input order is preserved within
/// each role.
#[derive(Debug)]
pub(crate) struct Roster<'a> {
    week: &'a WeekWindow,
    leave: &'a LeaveCalendar,
    roles: Vec<&'a Role>,
    role_index: HashMap<&'a str, &'a Role>,
    workers: Vec<&'a Worker>,
    workers_by_role: HashMap<&'a str, Vec<&'a Worker>>,
    templates: HashMap<&'a str, &'a ShiftTemplate>,
    templates_by_role: HashMap<&'a str, Vec<&'a ShiftTemplate>>,
    hours: HashMap<&'a str, f64>,
}

impl<'a> Roster<'a> {
    pub(crate) fn new(request: &'a GenerationRequest) -> Self {
        let role_index: HashMap<&str, &Role> =
            request.roles.iter().map(|r| (r.id.as_str(), r)).collect();

        let mut workers = Vec::with_capacity(request.workers.len());
        let mut workers_by_role: HashMap<&str, Vec<&Worker>> = HashMap::new();
        for worker in &request.workers {
            if !role_index.contains_key(worker.role_id.as_str()) {
                warn!(worker = %worker.id, role = %worker.role_id, "worker references unknown role");
                continue;
            }
            workers.push(worker);
            workers_by_role
                .entry(worker.role_id.as_str())
                .or_default()
                .push(worker);
        }

        let mut templates = HashMap::new();
        let mut templates_by_role: HashMap<&str, Vec<&ShiftTemplate>> = HashMap::new();
        let mut hours = HashMap::new();
        for template in &request.templates {
            let Some(role) = role_index.get(template.role_id.as_str()) else {
                warn!(shift = %template.id, role = %template.role_id, "shift template references unknown role");
                continue;
            };
            templates.insert(template.id.as_str(), template);
            templates_by_role
                .entry(template.role_id.as_str())
                .or_default()
                .push(template);
            hours.insert(template.id.as_str(), template.hours(role.break_minutes));
        }

        Self {
            week: &request.week,
            leave: &request.leave,
            roles: request.roles.iter().collect(),
            role_index,
            workers,
            workers_by_role,
            templates,
            templates_by_role,
            hours,
        }
    }

    pub(crate) fn week(&self) -> &'a WeekWindow {
        self.week
    }

    pub(crate) fn leave(&self) -> &'a LeaveCalendar {
        self.leave
    }

    /// Roles in input order.
    pub(crate) fn roles(&self) -> &[&'a Role] {
        &self.roles
    }

    pub(crate) fn role(&self, role_id: &str) -> Option<&'a Role> {
        self.role_index.get(role_id).copied()
    }

    /// Workers with a known role, in input order.
    pub(crate) fn workers(&self) -> &[&'a Worker] {
        &self.workers
    }

    pub(crate) fn workers_of(&self, role_id: &str) -> &[&'a Worker] {
        self.workers_by_role
            .get(role_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn template(&self, shift_id: &str) -> Option<&'a ShiftTemplate> {
        self.templates.get(shift_id).copied()
    }

    pub(crate) fn templates_of(&self, role_id: &str) -> &[&'a ShiftTemplate] {
        self.templates_by_role
            .get(role_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Paid hours of a template after its role's break.
    pub(crate) fn hours(&self, shift_id: &str) -> f64 {
        self.hours.get(shift_id).copied().unwrap_or(0.0)
    }
}
