//! Probabilistic Policy (Bernoulli trial)
//!
//! Draws one uniform sample in `[0, 1)` per pair per call and matches when
//! `1 / |Δattribute| ≥ sample`. Gaps up to 1 always match; large gaps match
//! with probability close to zero.
//!
//! A zero gap would divide by zero. It is treated as a guaranteed match; the
//! sample is still drawn so every offered pair consumes exactly one draw.

use crate::models::Entity;
use crate::rng::RngManager;

/// Success probability for an attribute gap, saturated to `[0, 1]`
///
/// # Example
///
/// ```
/// use matching_simulator_core::policy::probabilistic::match_probability;
///
/// assert_eq!(match_probability(0.0), 1.0);
/// assert_eq!(match_probability(1.0), 1.0);
/// assert_eq!(match_probability(4.0), 0.25);
/// ```
pub fn match_probability(attribute_gap: f64) -> f64 {
    if attribute_gap <= 1.0 {
        1.0
    } else {
        1.0 / attribute_gap
    }
}

/// Run one trial for the pair
pub fn trial(p: &Entity, q: &Entity, rng: &mut RngManager) -> bool {
    let sample = rng.next_f64();
    let gap = p.attribute_gap(q);
    if gap == 0.0 {
        return true;
    }
    1.0 / gap >= sample
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_gap_always_matches() {
        let mut rng = RngManager::new(31);
        let a = Entity::new(10.0, 0);
        let b = Entity::new(11.0, 0);
        assert!((0..1000).all(|_| trial(&a, &b, &mut rng)));
    }

    #[test]
    fn test_zero_gap_saturates_and_consumes_draw() {
        let mut rng = RngManager::new(31);
        let a = Entity::new(10.0, 0);
        let b = Entity::new(10.0, 0);
        let before = rng.get_state();
        assert!(trial(&a, &b, &mut rng));
        assert_ne!(rng.get_state(), before);
    }

    #[test]
    fn test_large_gap_rarely_matches() {
        let mut rng = RngManager::new(8);
        let a = Entity::new(0.0, 0);
        let b = Entity::new(1000.0, 0);
        let hits = (0..10_000).filter(|_| trial(&a, &b, &mut rng)).count();
        // expected ~10
        assert!(hits < 50, "{} hits for p = 0.001", hits);
    }

    #[test]
    fn test_hit_rate_tracks_probability() {
        let mut rng = RngManager::new(99);
        let a = Entity::new(0.0, 0);
        let b = Entity::new(4.0, 0);
        let n = 20_000;
        let hits = (0..n).filter(|_| trial(&a, &b, &mut rng)).count();
        let rate = hits as f64 / n as f64;
        assert!((rate - 0.25).abs() < 0.02, "rate {} for p = 0.25", rate);
    }
}
