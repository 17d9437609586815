//! Budget-Based Policy
//!
//! Waiting accrues a linear budget, `budget(e, now) = alpha · (now − e.t)`,
//! read as how much attribute gap the entity is willing to accept.
//!
//! A pair matches when both hold:
//! - **Sufficiency**: `budget(p) + budget(q) ≥ |Δattribute|`
//! - **Balance**: `budget(p) ≤ beta · budget(q)` and `budget(q) ≤ beta · budget(p)`
//!
//! Balance keeps a long-waiting entity from absorbing the whole gap for a
//! newcomer. Two fresh arrivals (both budgets zero) are balanced, so they
//! match immediately only on an exact attribute tie.

use super::{require_positive, PolicyError};
use crate::models::Entity;
use serde::{Deserialize, Serialize};

/// Budget policy parameters
///
/// # Example
///
/// ```
/// use matching_simulator_core::policy::BudgetPolicy;
/// use matching_simulator_core::Entity;
///
/// let policy = BudgetPolicy::new(1.0, 2.0);
/// let a = Entity::new(0.0, 0);
/// let b = Entity::new(1.0, 0);
///
/// assert!(!policy.decide(&a, &b, 0));
/// assert!(policy.decide(&a, &b, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetPolicy {
    /// Budget accrued per tick waited
    pub alpha: f64,
    /// Maximum allowed ratio between the two budgets
    pub beta: f64,
}

impl BudgetPolicy {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Budget accrued by `entity` at `now`
    pub fn budget(&self, entity: &Entity, now: usize) -> f64 {
        self.alpha * entity.wait(now) as f64
    }

    pub fn decide(&self, p: &Entity, q: &Entity, now: usize) -> bool {
        let budget_p = self.budget(p, now);
        let budget_q = self.budget(q, now);

        let sufficient = budget_p + budget_q >= p.attribute_gap(q);
        let balanced = budget_p <= self.beta * budget_q && budget_q <= self.beta * budget_p;

        sufficient && balanced
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        require_positive("budget_based", "alpha", self.alpha)?;
        if self.beta.is_finite() && self.beta > 1.0 {
            Ok(())
        } else {
            Err(PolicyError::InvalidParameter {
                policy: "budget_based",
                parameter: "beta",
                requirement: "finite and > 1",
                value: self.beta,
            })
        }
    }
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self::new(1.0, 2.0)
    }
}
