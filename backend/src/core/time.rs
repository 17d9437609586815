//! Time management for the simulation
//!
//! The simulation advances in discrete integer ticks. A run may start at
//! tick 0 or tick 1; arrival records carry their own arrival time, so the
//! start tick only shifts the clock the pools are evaluated against.

use serde::{Deserialize, Serialize};

/// Manages simulation time in discrete ticks
///
/// # Example
/// ```
/// use matching_simulator_core::TimeManager;
///
/// let mut time = TimeManager::new(1);
/// assert_eq!(time.current_tick(), 1);
/// assert_eq!(time.elapsed_ticks(), 0);
///
/// time.advance_tick();
/// assert_eq!(time.current_tick(), 2);
/// assert_eq!(time.elapsed_ticks(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeManager {
    /// Tick the clock started at
    start_tick: usize,
    /// Tick the next evaluation runs at
    current_tick: usize,
}

impl TimeManager {
    /// Create a clock positioned at `start_tick`
    pub fn new(start_tick: usize) -> Self {
        Self {
            start_tick,
            current_tick: start_tick,
        }
    }

    /// Advance time by one tick
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    /// Get the current tick
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Get the tick the clock started at
    pub fn start_tick(&self) -> usize {
        self.start_tick
    }

    /// Number of ticks advanced since the start
    pub fn elapsed_ticks(&self) -> usize {
        self.current_tick - self.start_tick
    }
}

impl Default for TimeManager {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_starts_at_zero() {
        let time = TimeManager::default();
        assert_eq!(time.current_tick(), 0);
        assert_eq!(time.start_tick(), 0);
    }
}
