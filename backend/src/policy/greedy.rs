//! Greedy Policy
//!
//! Matches as soon as the two parties have waited, between them, at least as
//! many ticks as their attribute gap:
//!
//! ```text
//! (now − p.t) + (now − q.t) ≥ |Δattribute|
//! ```
//!
//! Deterministic and monotone in waiting time: once a pair qualifies it keeps
//! qualifying on every later tick.

use crate::models::Entity;

/// Greedy decision rule
///
/// # Example
///
/// ```
/// use matching_simulator_core::policy::greedy;
/// use matching_simulator_core::Entity;
///
/// let a = Entity::new(10.0, 0);
/// let b = Entity::new(13.0, 2);
///
/// assert!(!greedy::decide(&a, &b, 2)); // 2 + 0 < 3
/// assert!(greedy::decide(&a, &b, 3));  // 3 + 1 ≥ 3
/// assert!(greedy::decide(&a, &b, 5));  // 5 + 3 ≥ 3
/// ```
pub fn decide(p: &Entity, q: &Entity, now: usize) -> bool {
    let combined_wait = (p.wait(now) + q.wait(now)) as f64;
    combined_wait >= p.attribute_gap(q)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotone_in_time() {
        let a = Entity::new(0.0, 0);
        let b = Entity::new(40.0, 5);
        let first = (0..100).find(|&now| decide(&a, &b, now)).unwrap();
        assert_eq!(first, 23); // 23 + 18 = 41 ≥ 40, 22 + 17 = 39 < 40
        assert!((first..100).all(|now| decide(&a, &b, now)));
    }

    #[test]
    fn test_zero_gap_matches_immediately() {
        let a = Entity::new(3.0, 4);
        let b = Entity::new(3.0, 4);
        assert!(decide(&a, &b, 4));
    }
}
