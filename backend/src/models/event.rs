//! Event logging for simulation replay and narration.
//!
//! Every insertion and every match is recorded with its tick and pool, so a
//! run can be narrated or audited after the fact without re-running it.
//!
//! # Example
//!
//! ```rust
//! use matching_simulator_core::models::{Entity, Event, EventLog};
//!
//! let entity = Entity::new(1200.0, 4);
//! let mut log = EventLog::new();
//! log.log(Event::Arrival {
//!     tick: 4,
//!     pool: "greedy".to_string(),
//!     entity_id: entity.id(),
//!     attribute: entity.attribute(),
//! });
//!
//! assert_eq!(log.events_at_tick(4).len(), 1);
//! assert_eq!(log.events_for_entity(entity.id()).len(), 1);
//! ```

use crate::models::entity::EntityId;
use serde::{Deserialize, Serialize};

/// Simulation event capturing a state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Entity inserted into a pool's live set
    Arrival {
        tick: usize,
        pool: String,
        entity_id: EntityId,
        attribute: f64,
    },

    /// Two entities matched and left a pool's live set
    Match {
        tick: usize,
        pool: String,
        first_id: EntityId,
        second_id: EntityId,
        attribute_gap: f64,
        latency: usize,
    },
}

impl Event {
    pub fn tick(&self) -> usize {
        match self {
            Event::Arrival { tick, .. } | Event::Match { tick, .. } => *tick,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Arrival { .. } => "Arrival",
            Event::Match { .. } => "Match",
        }
    }

    pub fn pool(&self) -> &str {
        match self {
            Event::Arrival { pool, .. } | Event::Match { pool, .. } => pool,
        }
    }

    /// True if the event concerns `entity_id`
    pub fn involves(&self, entity_id: EntityId) -> bool {
        match self {
            Event::Arrival { entity_id: id, .. } => *id == entity_id,
            Event::Match {
                first_id,
                second_id,
                ..
            } => *first_id == entity_id || *second_id == entity_id,
        }
    }
}

/// Ordered event log
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn events_at_tick(&self, tick: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    pub fn events_for_pool(&self, pool: &str) -> Vec<&Event> {
        self.events.iter().filter(|e| e.pool() == pool).collect()
    }

    pub fn events_for_entity(&self, entity_id: EntityId) -> Vec<&Event> {
        self.events.iter().filter(|e| e.involves(entity_id)).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
