//! Matching Simulator Core - Rust Engine
//!
//! Simulates online matching: entities arrive over discrete time with a
//! numeric attribute, and competing policies decide when pairs of waiting
//! entities should be matched, trading attribute similarity against wait.
//!
//! # Architecture
//!
//! - **core**: Simulation clock
//! - **models**: Domain types (Entity, Match, Pool, Event)
//! - **policy**: Matching policies (deadline, budget, probabilistic, greedy, normalized)
//! - **orchestrator**: Main simulation loop and reports
//! - **metrics**: Gap, latency and cost statistics over match histories
//! - **arrivals**: Seeded arrival stream generation
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. No entity is matched twice
//! 2. No match precedes either party's arrival
//! 3. All randomness is deterministic (seeded RNG)

// Module declarations
pub mod arrivals;
pub mod core;
pub mod metrics;
pub mod models;
pub mod orchestrator;
pub mod policy;
pub mod rng;

// Re-exports for convenience
pub use arrivals::{ArrivalConfig, ArrivalGenerator, ArrivalRecord, ArrivalStream, AttributeDistribution};
pub use core::time::TimeManager;
pub use metrics::MatchSummary;
pub use models::{Entity, EntityId, Event, EventLog, Match, Pool};
pub use orchestrator::{
    PoolConfig, PoolReport, RunSummary, Simulation, SimulationConfig, SimulationError,
    SimulationReport, TickResult,
};
pub use policy::{MatchPolicy, PolicyError};
pub use rng::RngManager;
