//! Domain models for the matching simulator

pub mod entity;
pub mod event;
pub mod matching;
pub mod pool;

// Re-exports
pub use entity::{Entity, EntityId};
pub use event::{Event, EventLog};
pub use matching::Match;
pub use pool::Pool;
