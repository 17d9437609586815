//! Normalized-Custom Policy
//!
//! Scales attribute similarity by the spread of the live pool:
//!
//! ```text
//! normal = 1 − |Δattribute| / range        range = max − min over live entities
//! match  ⇔  |Δarrival_time| × normal > threshold
//! ```
//!
//! When every live entity shares one attribute value the range is zero; every
//! live gap is then zero too, so `normal` saturates to 1.

use super::PolicyError;
use crate::models::Entity;
use serde::{Deserialize, Serialize};

/// Normalized-custom policy parameters
///
/// # Example
///
/// ```
/// use matching_simulator_core::policy::NormalizedPolicy;
/// use matching_simulator_core::Entity;
///
/// let policy = NormalizedPolicy::new(500.0);
/// let a = Entity::new(100.0, 0);
/// let b = Entity::new(200.0, 1000);
///
/// // range 1000: normal = 0.9, 1000 × 0.9 = 900 > 500
/// assert!(policy.decide(&a, &b, 1000.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizedPolicy {
    pub threshold: f64,
}

impl NormalizedPolicy {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Range-normalized similarity in `(-∞, 1]`
    pub fn normal(p: &Entity, q: &Entity, attribute_range: f64) -> f64 {
        if attribute_range > 0.0 {
            1.0 - p.attribute_gap(q) / attribute_range
        } else {
            1.0
        }
    }

    pub fn decide(&self, p: &Entity, q: &Entity, attribute_range: f64) -> bool {
        p.time_gap(q) as f64 * Self::normal(p, q, attribute_range) > self.threshold
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.threshold.is_finite() && self.threshold >= 0.0 {
            Ok(())
        } else {
            Err(PolicyError::InvalidParameter {
                policy: "normalized_custom",
                parameter: "threshold",
                requirement: "finite and >= 0",
                value: self.threshold,
            })
        }
    }
}

impl Default for NormalizedPolicy {
    fn default() -> Self {
        Self::new(500.0)
    }
}
