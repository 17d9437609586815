//! RNG determinism tests
//!
//! Same seed must give the same sequence, and the same arrival stream.

use matching_simulator_core::arrivals::{ArrivalConfig, ArrivalGenerator, AttributeDistribution};
use matching_simulator_core::RngManager;

#[test]
fn test_same_seed_same_sequence() {
    let mut rng1 = RngManager::new(12345);
    let mut rng2 = RngManager::new(12345);

    for _ in 0..1000 {
        assert_eq!(rng1.next(), rng2.next());
    }
}

#[test]
fn test_different_seeds_diverge() {
    let mut rng1 = RngManager::new(1);
    let mut rng2 = RngManager::new(2);

    let same = (0..100).filter(|_| rng1.next() == rng2.next()).count();
    assert_eq!(same, 0);
}

#[test]
fn test_state_resume() {
    let mut rng = RngManager::new(777);
    for _ in 0..50 {
        rng.next();
    }
    let mut resumed = RngManager::new(rng.get_state());

    for _ in 0..50 {
        assert_eq!(rng.next(), resumed.next());
    }
}

#[test]
fn test_arrival_stream_reproducible() {
    let config = ArrivalConfig {
        length: 500,
        spawn_chance: 0.1,
        attribute_distribution: AttributeDistribution::Normal {
            mean: 1000.0,
            std_dev: 250.0,
        },
        trailing_ticks: 10,
    };

    let stream1 = ArrivalGenerator::generate(&config, &mut RngManager::new(123));
    let stream2 = ArrivalGenerator::generate(&config, &mut RngManager::new(123));
    let stream3 = ArrivalGenerator::generate(&config, &mut RngManager::new(124));

    assert_eq!(stream1, stream2);
    assert_ne!(stream1, stream3);
}
