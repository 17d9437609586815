//! Deadline-Based Policy
//!
//! Each pair gets exactly one eligible tick:
//!
//! ```text
//! deadline(p, q) = p.t + (|Δattribute| + |Δt|) / E      with p.t ≥ q.t
//! ```
//!
//! The later arrival plays `p`, so a pair's deadline never precedes either
//! arrival. Smaller `E` pushes deadlines further out.
//!
//! # Comparison
//!
//! The deadline is real-valued. `Exact` compares it to the tick with f64
//! equality, which only fires when `distance / E` lands on an integer (e.g.
//! integer attributes with `E = 1`). `Rounded` fires on the tick the deadline
//! rounds to (half away from zero).

use super::{require_positive, PolicyError};
use crate::models::Entity;
use serde::{Deserialize, Serialize};

/// How the real-valued deadline is compared against the integer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineComparison {
    /// `now == deadline`
    #[default]
    Exact,
    /// `now == round(deadline)`
    Rounded,
}

/// Deadline policy parameters
///
/// # Example
///
/// ```
/// use matching_simulator_core::policy::{DeadlineComparison, DeadlinePolicy};
/// use matching_simulator_core::Entity;
///
/// let policy = DeadlinePolicy::new(1.0, DeadlineComparison::Exact);
/// let early = Entity::new(100.0, 0);
/// let late = Entity::new(103.0, 2);
///
/// // 2 + (3 + 2) / 1 = 7
/// assert_eq!(policy.deadline(&early, &late), 7.0);
/// assert!(policy.decide(&early, &late, 7));
/// assert!(!policy.decide(&early, &late, 6));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeadlinePolicy {
    /// Time-decay divisor `E`
    pub time_scale: f64,
    pub comparison: DeadlineComparison,
}

impl DeadlinePolicy {
    pub fn new(time_scale: f64, comparison: DeadlineComparison) -> Self {
        Self {
            time_scale,
            comparison,
        }
    }

    /// The pair's eligible tick, as a real number
    pub fn deadline(&self, p: &Entity, q: &Entity) -> f64 {
        let later = if p.arrival_time() >= q.arrival_time() { p } else { q };
        later.arrival_time() as f64 + p.distance(q) / self.time_scale
    }

    pub fn decide(&self, p: &Entity, q: &Entity, now: usize) -> bool {
        let deadline = self.deadline(p, q);
        match self.comparison {
            DeadlineComparison::Exact => deadline == now as f64,
            DeadlineComparison::Rounded => deadline.round() == now as f64,
        }
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        require_positive("deadline_based", "time_scale", self.time_scale)
    }
}

impl Default for DeadlinePolicy {
    fn default() -> Self {
        Self::new(1.0, DeadlineComparison::Exact)
    }
}
