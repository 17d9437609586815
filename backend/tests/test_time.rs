//! Tests for TimeManager

use matching_simulator_core::TimeManager;

#[test]
fn test_time_manager_new() {
    let time = TimeManager::new(0);
    assert_eq!(time.current_tick(), 0);
    assert_eq!(time.elapsed_ticks(), 0);
}

#[test]
fn test_advance_tick() {
    let mut time = TimeManager::new(0);

    time.advance_tick();
    assert_eq!(time.current_tick(), 1);

    time.advance_tick();
    assert_eq!(time.current_tick(), 2);
    assert_eq!(time.elapsed_ticks(), 2);
}

#[test]
fn test_start_at_one() {
    // Reference runs start their clock at tick 1
    let mut time = TimeManager::new(1);
    assert_eq!(time.start_tick(), 1);
    assert_eq!(time.current_tick(), 1);

    for _ in 0..10 {
        time.advance_tick();
    }
    assert_eq!(time.current_tick(), 11);
    assert_eq!(time.elapsed_ticks(), 10);
}
