//! Orchestrator - main simulation loop
//!
//! `engine` drives pools tick by tick; `report` packages their output and
//! re-checks the matching invariants.

pub mod engine;
pub mod report;

// Re-export main types for convenience
pub use engine::{
    PoolConfig, RunSummary, Simulation, SimulationConfig, SimulationError, TickResult,
};
pub use report::{compute_config_hash, validate_pool, validate_report, PoolReport, SimulationReport};
