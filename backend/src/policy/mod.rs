//! Matching Policy Module
//!
//! A policy decides, for one pair of live entities at one tick, whether the
//! pair should be matched now.
//!
//! # Overview
//!
//! Every policy trades pairing quality (small attribute gap) against waiting
//! time. The pool offers each unordered pair of live, arrived entities once per
//! tick; a positive decision removes both from the live set before any further
//! pair is offered.
//!
//! Available policies:
//! 1. **DeadlineBased**: each pair has one eligible tick, `p.t + distance / E`
//! 2. **BudgetBased**: waiting time accrues a budget; match when budgets cover the gap and stay balanced
//! 3. **Probabilistic**: Bernoulli trial with success probability `1 / gap`
//! 4. **Greedy**: match once combined waits reach the gap
//! 5. **NormalizedCustom**: arrival-time gap weighted by range-normalized similarity
//!
//! Policies are a closed set, dispatched by `match` on [`MatchPolicy`]. They
//! carry only their fixed parameters; the tick, the pool's attribute range and
//! the pool's RNG arrive through [`PairContext`].
//!
//! # Configuration
//!
//! ```rust
//! use matching_simulator_core::policy::MatchPolicy;
//!
//! let policy: MatchPolicy =
//!     serde_json::from_str(r#"{ "type": "budget_based", "alpha": 1.0, "beta": 2.0 }"#).unwrap();
//! assert_eq!(policy.name(), "budget_based");
//! assert!(policy.validate().is_ok());
//! ```

use crate::models::{Entity, Match};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod budget;
pub mod deadline;
pub mod greedy;
pub mod normalized;
pub mod probabilistic;

pub use budget::BudgetPolicy;
pub use deadline::{DeadlineComparison, DeadlinePolicy};
pub use normalized::NormalizedPolicy;

/// Errors raised when validating policy parameters
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PolicyError {
    #[error("{policy}: {parameter} must be {requirement}, got {value}")]
    InvalidParameter {
        policy: &'static str,
        parameter: &'static str,
        requirement: &'static str,
        value: f64,
    },
}

/// Per-call inputs a policy may read
///
/// `attribute_range` is `max - min` attribute over the pool's arrived live
/// entities, snapshotted when the scan starts.
pub struct PairContext<'a> {
    pub now: usize,
    pub attribute_range: f64,
    pub rng: &'a mut RngManager,
}

/// The policy family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchPolicy {
    DeadlineBased(DeadlinePolicy),
    BudgetBased(BudgetPolicy),
    Probabilistic,
    Greedy,
    NormalizedCustom(NormalizedPolicy),
}

impl MatchPolicy {
    /// Decide whether `p` and `q` match at `ctx.now`
    ///
    /// Returns `None` without consulting the policy if `p` and `q` are the
    /// same entity or either has not arrived yet.
    pub fn should_match(&self, p: &Entity, q: &Entity, ctx: &mut PairContext<'_>) -> Option<Match> {
        if p == q || !p.has_arrived(ctx.now) || !q.has_arrived(ctx.now) {
            return None;
        }

        let accept = match self {
            MatchPolicy::DeadlineBased(policy) => policy.decide(p, q, ctx.now),
            MatchPolicy::BudgetBased(policy) => policy.decide(p, q, ctx.now),
            MatchPolicy::Probabilistic => probabilistic::trial(p, q, ctx.rng),
            MatchPolicy::Greedy => greedy::decide(p, q, ctx.now),
            MatchPolicy::NormalizedCustom(policy) => policy.decide(p, q, ctx.attribute_range),
        };

        accept.then(|| Match::new(*p, *q, ctx.now))
    }

    /// Stable snake_case label (same as the config tag)
    pub fn name(&self) -> &'static str {
        match self {
            MatchPolicy::DeadlineBased(_) => "deadline_based",
            MatchPolicy::BudgetBased(_) => "budget_based",
            MatchPolicy::Probabilistic => "probabilistic",
            MatchPolicy::Greedy => "greedy",
            MatchPolicy::NormalizedCustom(_) => "normalized_custom",
        }
    }

    /// True if decisions never draw from the RNG
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, MatchPolicy::Probabilistic)
    }

    /// Check parameters are in their valid domain
    pub fn validate(&self) -> Result<(), PolicyError> {
        match self {
            MatchPolicy::DeadlineBased(policy) => policy.validate(),
            MatchPolicy::BudgetBased(policy) => policy.validate(),
            MatchPolicy::Probabilistic | MatchPolicy::Greedy => Ok(()),
            MatchPolicy::NormalizedCustom(policy) => policy.validate(),
        }
    }

    /// One of each variant with default parameters
    pub fn all_defaults() -> Vec<MatchPolicy> {
        vec![
            MatchPolicy::DeadlineBased(DeadlinePolicy::default()),
            MatchPolicy::BudgetBased(BudgetPolicy::default()),
            MatchPolicy::Probabilistic,
            MatchPolicy::Greedy,
            MatchPolicy::NormalizedCustom(NormalizedPolicy::default()),
        ]
    }
}

/// Rejects non-finite or non-positive values
pub(crate) fn require_positive(
    policy: &'static str,
    parameter: &'static str,
    value: f64,
) -> Result<(), PolicyError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PolicyError::InvalidParameter {
            policy,
            parameter,
            requirement: "finite and > 0",
            value,
        })
    }
}
