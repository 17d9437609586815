//! Match record
//!
//! A match pairs two entities at a tick. Matches are created once, by the
//! pool that removed both parties from its live set, and never change.

use crate::models::entity::Entity;
use serde::{Deserialize, Serialize};

/// Two entities paired at `match_time`
///
/// # Example
/// ```
/// use matching_simulator_core::{Entity, Match};
///
/// let a = Entity::new(10.0, 0);
/// let b = Entity::new(13.0, 2);
/// let m = Match::new(a, b, 5);
///
/// assert_eq!(m.attribute_gap(), 3.0);
/// assert_eq!(m.latency(), 3);    // 5 - max(0, 2)
/// assert_eq!(m.cost(), 3.0 + 5.0 + 3.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    first: Entity,
    second: Entity,
    match_time: usize,
}

impl Match {
    /// Record a match
    ///
    /// # Panics
    /// Panics if the two entities are the same entity, or if `match_time`
    /// precedes either arrival.
    pub fn new(first: Entity, second: Entity, match_time: usize) -> Self {
        assert!(first != second, "an entity cannot match itself");
        assert!(
            match_time >= first.arrival_time().max(second.arrival_time()),
            "match at tick {} precedes an arrival ({}, {})",
            match_time,
            first.arrival_time(),
            second.arrival_time()
        );

        Self {
            first,
            second,
            match_time,
        }
    }

    pub fn first(&self) -> &Entity {
        &self.first
    }

    pub fn second(&self) -> &Entity {
        &self.second
    }

    pub fn match_time(&self) -> usize {
        self.match_time
    }

    /// True if `entity` is one of the two parties
    pub fn involves(&self, entity: &Entity) -> bool {
        self.first == *entity || self.second == *entity
    }

    /// `|Δattribute|` between the parties
    pub fn attribute_gap(&self) -> f64 {
        self.first.attribute_gap(&self.second)
    }

    /// Ticks between the later arrival and the match
    ///
    /// Zero for a (deserialized) match recorded before an arrival.
    pub fn latency(&self) -> usize {
        self.match_time
            .saturating_sub(self.first.arrival_time().max(self.second.arrival_time()))
    }

    /// Attribute gap plus both parties' individual waits
    pub fn cost(&self) -> f64 {
        self.attribute_gap()
            + self.first.wait(self.match_time) as f64
            + self.second.wait(self.match_time) as f64
    }
}
