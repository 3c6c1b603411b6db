//! Candidate ranking for slot assignment.
//!
//! Rules are applied in sequence; a later rule is consulted only when all
//! earlier rules tie. Remaining ties are broken uniformly at random.
//!
//! Default order:
//! 1. [`SelectionRule::MostRemainingNeed`]: most under-filled worker first
//! 2. [`SelectionRule::FewestOfShift`]: spread each shift type over time
//! 3. [`SelectionRule::FewestOverall`]: overall rotation fairness

use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::context::AllocationContext;
use crate::models::Worker;

/// A single ranking criterion. Lower score = preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionRule {
    /// `shifts_per_week − assigned`, descending.
    MostRemainingNeed,
    /// History count for the slot's template, ascending.
    FewestOfShift,
    /// History count across all templates, ascending.
    FewestOverall,
}

impl SelectionRule {
    /// Rule name.
    pub fn name(&self) -> &'static str {
        match self {
            SelectionRule::MostRemainingNeed => "NEED",
            SelectionRule::FewestOfShift => "ROTATION",
            SelectionRule::FewestOverall => "FAIRNESS",
        }
    }

    /// Score for `worker` taking `shift_id`. Lower = higher priority.
    pub fn evaluate(&self, worker: &Worker, shift_id: &str, ctx: &AllocationContext<'_>) -> i64 {
        match self {
            SelectionRule::MostRemainingNeed => {
                let need =
                    i64::from(worker.shifts_per_week()) - i64::from(ctx.assigned(&worker.id));
                -need
            }
            SelectionRule::FewestOfShift => i64::from(ctx.history().count(&worker.id, shift_id)),
            SelectionRule::FewestOverall => i64::from(ctx.history().total(&worker.id)),
        }
    }
}

/// Ranks eligible workers and picks one per slot.
#[derive(Debug, Clone)]
pub struct AssignmentSelector {
    rules: Vec<SelectionRule>,
}

impl AssignmentSelector {
    /// Creates a selector with the default rule order.
    pub fn new() -> Self {
        Self {
            rules: vec![
                SelectionRule::MostRemainingNeed,
                SelectionRule::FewestOfShift,
                SelectionRule::FewestOverall,
            ],
        }
    }

    /// Replaces the rule sequence.
    pub fn with_rules(mut self, rules: Vec<SelectionRule>) -> Self {
        self.rules = rules;
        self
    }

    /// The configured rule sequence.
    pub fn rules(&self) -> &[SelectionRule] {
        &self.rules
    }

    /// Orders candidates best first, ties in random order.
    pub fn rank<'w, R: Rng + ?Sized>(
        &self,
        candidates: &[&'w Worker],
        shift_id: &str,
        ctx: &AllocationContext<'_>,
        rng: &mut R,
    ) -> Vec<&'w Worker> {
        let mut scored: Vec<(Vec<i64>, &'w Worker)> = candidates
            .iter()
            .map(|w| {
                let scores = self
                    .rules
                    .iter()
                    .map(|rule| rule.evaluate(w, shift_id, ctx))
                    .collect();
                (scores, *w)
            })
            .collect();

        // Shuffle then stable-sort: equal keys keep a uniformly random order.
        scored.shuffle(rng);
        scored.sort_by(|(a, _), (b, _)| compare_sequential(a, b));
        scored.into_iter().map(|(_, w)| w).collect()
    }

    /// Picks the top-ranked candidate.
    pub fn select<'w, R: Rng + ?Sized>(
        &self,
        candidates: &[&'w Worker],
        shift_id: &str,
        ctx: &AllocationContext<'_>,
        rng: &mut R,
    ) -> Option<&'w Worker> {
        self.rank(candidates, shift_id, ctx, rng).into_iter().next()
    }
}

impl Default for AssignmentSelector {
    fn default() -> Self {
        Self::new()
    }
}

fn compare_sequential(a: &[i64], b: &[i64]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.cmp(y))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}
