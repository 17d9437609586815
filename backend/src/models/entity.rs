//! Entity model
//!
//! An entity is one arriving request waiting to be paired:
//! - Attribute (skill score, location coordinate, ...)
//! - Arrival tick
//! - Unique identity
//!
//! Entities are immutable after creation. Identity is the id, not the
//! field values: generated streams frequently produce two entities with the
//! same attribute and arrival tick, and they must stay distinguishable.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Unique entity identifier
pub type EntityId = Uuid;

/// A request waiting in a pool
///
/// # Example
/// ```
/// use matching_simulator_core::Entity;
///
/// let a = Entity::new(10.0, 0);
/// let b = Entity::new(13.0, 2);
///
/// assert_eq!(a.attribute_gap(&b), 3.0);
/// assert_eq!(a.distance(&b), 5.0); // 3 attribute + 2 time
/// assert_eq!(a.wait(5), 5);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identity (UUID v4)
    id: EntityId,

    /// Comparable trait
    attribute: f64,

    /// Tick the entity entered the pool
    arrival_time: usize,
}

impl Entity {
    /// Create a new entity with a fresh identity
    pub fn new(attribute: f64, arrival_time: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            attribute,
            arrival_time,
        }
    }

    /// Get entity ID
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Get attribute value
    pub fn attribute(&self) -> f64 {
        self.attribute
    }

    /// Get arrival tick
    pub fn arrival_time(&self) -> usize {
        self.arrival_time
    }

    /// `|Δattribute|`
    pub fn attribute_gap(&self, other: &Entity) -> f64 {
        (self.attribute - other.attribute).abs()
    }

    /// `|Δarrival_time|`
    pub fn time_gap(&self, other: &Entity) -> usize {
        self.arrival_time.abs_diff(other.arrival_time)
    }

    /// Combined distance `|Δattribute| + |Δarrival_time|`
    pub fn distance(&self, other: &Entity) -> f64 {
        self.attribute_gap(other) + self.time_gap(other) as f64
    }

    /// Ticks waited by `now`; zero if the entity has not arrived yet
    pub fn wait(&self, now: usize) -> usize {
        now.saturating_sub(self.arrival_time)
    }

    /// True once `now` has reached the arrival tick
    pub fn has_arrived(&self, now: usize) -> bool {
        self.arrival_time <= now
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_fields_are_distinct_entities() {
        let a = Entity::new(5.0, 3);
        let b = Entity::new(5.0, 3);
        assert_ne!(a, b);
        assert_eq!(a, a);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Entity::new(100.0, 4);
        let b = Entity::new(90.5, 9);
        assert_eq!(a.distance(&b), b.distance(&a));
        assert_eq!(a.distance(&b), 9.5 + 5.0);
    }

    #[test]
    fn test_wait_saturates_before_arrival() {
        let e = Entity::new(0.0, 10);
        assert_eq!(e.wait(4), 0);
        assert!(!e.has_arrived(9));
        assert!(e.has_arrived(10));
        assert_eq!(e.wait(12), 2);
    }
}
