//! Policy Scenario Tests
//!
//! Small hand-worked scenarios for each policy, run through a real pool so the
//! scan, the eligibility rules and the policy decision are exercised together.

use matching_simulator_core::{
    policy::{
        probabilistic, BudgetPolicy, DeadlineComparison, DeadlinePolicy, NormalizedPolicy,
    },
    Entity, MatchPolicy, Pool, RngManager,
};

fn pool(policy: MatchPolicy) -> Pool {
    Pool::new(policy.name(), policy, 2024).unwrap()
}

/// Evaluate every tick in `ticks`, returning the tick of the first match
fn first_match_tick(pool: &mut Pool, ticks: std::ops::Range<usize>) -> Option<usize> {
    ticks.into_iter().find(|&now| !pool.evaluate_and_apply(now).is_empty())
}

// ============================================================================
// Greedy
// ============================================================================

#[test]
fn test_greedy_first_evaluated_after_both_arrive() {
    // A (10, t=0), B (13, t=2); at t=5 waits 5 + 3 = 8 ≥ 3
    let mut pool = pool(MatchPolicy::Greedy);
    let a = pool.insert(10.0, 0);
    let b = pool.insert(13.0, 2);

    let matched = pool.evaluate_and_apply(5).to_vec();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].first(), &a);
    assert_eq!(matched[0].second(), &b);
    assert_eq!(matched[0].match_time(), 5);
}

#[test]
fn test_greedy_evaluated_every_tick_matches_earliest() {
    // t=2: 2 + 0 < 3, t=3: 3 + 1 ≥ 3
    let mut pool = pool(MatchPolicy::Greedy);
    pool.insert(10.0, 0);
    pool.insert(13.0, 2);
    assert_eq!(first_match_tick(&mut pool, 0..10), Some(3));
}

#[test]
fn test_greedy_takes_first_qualifying_pair() {
    // Greedy takes the first pair that qualifies even if a closer one exists
    let mut pool = pool(MatchPolicy::Greedy);
    let a = pool.insert(0.0, 0);
    let far = pool.insert(10.0, 0);
    let near = pool.insert(0.5, 4);

    let matched = pool.evaluate_and_apply(5).to_vec();
    assert_eq!(matched.len(), 1);
    assert!(matched[0].involves(&a) && matched[0].involves(&far));
    assert!(pool.is_live(&near));
}

// ============================================================================
// BudgetBased
// ============================================================================

#[test]
fn test_budget_equal_arrivals_match_after_one_tick() {
    // alpha=1, beta=2: budgets (0, 0) at t=0 cannot cover |Δ|=1; (1, 1) at t=1 can
    let mut pool = pool(MatchPolicy::BudgetBased(BudgetPolicy::new(1.0, 2.0)));
    pool.insert(0.0, 0);
    pool.insert(1.0, 0);

    assert!(pool.evaluate_and_apply(0).is_empty());
    let matched = pool.evaluate_and_apply(1).to_vec();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].match_time(), 1);
}

#[test]
fn test_budget_larger_alpha_matches_sooner() {
    let run = |alpha: f64| {
        let mut pool = pool(MatchPolicy::BudgetBased(BudgetPolicy::new(alpha, 2.0)));
        pool.insert(0.0, 0);
        pool.insert(40.0, 0);
        first_match_tick(&mut pool, 0..100)
    };
    assert_eq!(run(1.0), Some(20));
    assert_eq!(run(4.0), Some(5));
}

#[test]
fn test_budget_looser_beta_tolerates_imbalance() {
    let run = |beta: f64| {
        let mut pool = pool(MatchPolicy::BudgetBased(BudgetPolicy::new(1.0, beta)));
        pool.insert(0.0, 0);
        pool.insert(1.0, 30);
        first_match_tick(&mut pool, 30..100)
    };
    // beta=2 waits until the newcomer has half the veteran's budget
    assert_eq!(run(2.0), Some(60));
    // beta=31 accepts 31 vs 1 straight away
    assert_eq!(run(31.0), Some(31));
}

// ============================================================================
// DeadlineBased
// ============================================================================

#[test]
fn test_deadline_integer_deadline_fires_exactly_once() {
    let mut pool = pool(MatchPolicy::DeadlineBased(DeadlinePolicy::default()));
    pool.insert(10.0, 0);
    pool.insert(13.0, 2);
    // 2 + (3 + 2) / 1
    assert_eq!(first_match_tick(&mut pool, 0..50), Some(7));
}

#[test]
fn test_deadline_exact_never_fires_on_fractional_deadline() {
    let policy = DeadlinePolicy::new(2.0, DeadlineComparison::Exact);
    let mut pool = pool(MatchPolicy::DeadlineBased(policy));
    pool.insert(0.0, 0);
    pool.insert(3.0, 0);
    // 0 + 3 / 2 = 1.5
    assert_eq!(first_match_tick(&mut pool, 0..50), None);
    assert_eq!(pool.live_count(), 2);
}

#[test]
fn test_deadline_rounded_fires_on_nearest_tick() {
    let policy = DeadlinePolicy::new(2.0, DeadlineComparison::Rounded);
    let mut pool = pool(MatchPolicy::DeadlineBased(policy));
    pool.insert(0.0, 0);
    pool.insert(3.0, 0);
    // 1.5 rounds half away from zero
    assert_eq!(first_match_tick(&mut pool, 0..50), Some(2));
}

#[test]
fn test_deadline_comparison_from_config() {
    let policy: MatchPolicy = serde_json::from_str(
        r#"{ "type": "deadline_based", "time_scale": 4.0, "comparison": "rounded" }"#,
    )
    .unwrap();
    assert_eq!(
        policy,
        MatchPolicy::DeadlineBased(DeadlinePolicy::new(4.0, DeadlineComparison::Rounded))
    );
}

// ============================================================================
// Probabilistic
// ============================================================================

#[test]
fn test_probabilistic_unit_gap_always_matches() {
    for seed in 1..50 {
        let mut pool = Pool::new("prob", MatchPolicy::Probabilistic, seed).unwrap();
        pool.insert(100.0, 0);
        pool.insert(101.0, 0);
        assert_eq!(pool.evaluate_and_apply(0).len(), 1, "seed {}", seed);
    }
}

#[test]
fn test_probabilistic_probability_vanishes_with_gap() {
    assert_eq!(probabilistic::match_probability(0.0), 1.0);
    assert_eq!(probabilistic::match_probability(1.0), 1.0);
    assert_eq!(probabilistic::match_probability(4.0), 0.25);
    assert!(probabilistic::match_probability(1e9) < 1e-8);

    let mut rng = RngManager::new(3);
    let a = Entity::new(0.0, 0);
    let b = Entity::new(1e9, 0);
    assert!((0..1000).all(|_| !probabilistic::trial(&a, &b, &mut rng)));
}

// ============================================================================
// NormalizedCustom
// ============================================================================

#[test]
fn test_normalized_requires_arrival_spread() {
    let mut pool = pool(MatchPolicy::NormalizedCustom(NormalizedPolicy::new(500.0)));
    pool.insert(1000.0, 0);
    pool.insert(1000.0, 400);
    // identical attributes: normal = 1, but 400 ≤ 500
    assert_eq!(first_match_tick(&mut pool, 0..2000), None);

    pool.insert(1000.0, 600);
    // 600 > 500 against the first entity once the third arrives
    assert_eq!(first_match_tick(&mut pool, 0..2000), Some(600));
    assert_eq!(pool.live_count(), 1);
    assert_eq!(pool.unmatched()[0].arrival_time(), 400);
}
