//! Role capacity planning and division across shift templates.
//!
//! # Algorithm
//!
//! 1. Capacity of a role = Σ `shifts_per_week` over its workers.
//! 2. Each template gets `round(capacity × weight / Σweights)`.
//!
//! Rounding means Σquota may differ from capacity by a few slots. The
//! difference is not reconciled here; gap filling absorbs any shortfall.

use serde::{Deserialize, Serialize};

use crate::models::{ShiftTemplate, Worker};

/// Slots allocated to one shift template for the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateQuota {
    /// Shift template.
    pub shift_id: String,
    /// Weight used for the division.
    pub weight: u32,
    /// Allocated slot count.
    pub quota: u32,
}

/// Total weekly shifts a role's workforce can absorb.
pub fn plan_capacity<'a>(workers: impl IntoIterator<Item = &'a Worker>) -> u32 {
    workers.into_iter().map(Worker::shifts_per_week).sum()
}

/// Splits a role's capacity across its templates by relative weight.
///
/// Templates without a priority use `default_priority`. If all weights are
/// zero, every quota is zero.
pub fn divide_capacity(
    capacity: u32,
    templates: &[&ShiftTemplate],
    default_priority: u32,
) -> Vec<TemplateQuota> {
    let weights: Vec<u32> = templates
        .iter()
        .map(|t| t.weight(default_priority))
        .collect();
    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();

    templates
        .iter()
        .zip(weights)
        .map(|(t, weight)| {
            let quota = if total == 0 {
                0
            } else {
                (f64::from(capacity) * f64::from(weight) / total as f64).round() as u32
            };
            TemplateQuota {
                shift_id: t.id.clone(),
                weight,
                quota,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn template(id: &str, priority: Option<u32>) -> ShiftTemplate {
        let t = ShiftTemplate::new(
            id,
            "R1",
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        );
        match priority {
            Some(p) => t.with_priority(p),
            None => t,
        }
    }

    #[test]
    fn test_plan_capacity() {
        let workers = vec![
            Worker::new("W1", "R1").with_hours(40.0, 8.0), // 5
            Worker::new("W2", "R1").with_hours(20.0, 8.0), // 3
            Worker::new("W3", "R1").with_shifts_per_week(1),
        ];
        assert_eq!(plan_capacity(&workers), 9);
        assert_eq!(plan_capacity(std::iter::empty()), 0);
    }

    #[test]
    fn test_equal_weights_split_evenly() {
        let s = template("S", None);
        let t = template("T", Some(50));
        let quotas = divide_capacity(10, &[&s, &t], 50);
        assert_eq!(quotas[0].quota, 5);
        assert_eq!(quotas[1].quota, 5);
        assert_eq!(quotas[0].weight, 50);
    }

    #[test]
    fn test_weighted_split() {
        let a = template("A", Some(75));
        let b = template("B", Some(25));
        let quotas = divide_capacity(8, &[&a, &b], 50);
        assert_eq!(quotas[0].quota, 6);
        assert_eq!(quotas[1].quota, 2);
    }

    #[test]
    fn test_rounding_may_exceed_capacity() {
        // 5 × 1/2 = 2.5 → 3 each, Σ = 6 > 5
        let a = template("A", None);
        let b = template("B", None);
        let quotas = divide_capacity(5, &[&a, &b], 50);
        let sum: u32 = quotas.iter().map(|q| q.quota).sum();
        assert_eq!(sum, 6);
    }

    #[test]
    fn test_zero_weights() {
        let a = template("A", Some(0));
        let quotas = divide_capacity(10, &[&a], 50);
        assert_eq!(quotas[0].quota, 0);
    }

    #[test]
    fn test_zero_capacity() {
        let a = template("A", None);
        assert_eq!(divide_capacity(0, &[&a], 50)[0].quota, 0);
        assert!(divide_capacity(10, &[], 50).is_empty());
    }
}
