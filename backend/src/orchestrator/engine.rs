//! Simulation Engine
//!
//! Main loop driving one or more pools from a shared arrival stream.
//!
//! # Architecture
//!
//! ```text
//! For each tick t (starting at start_tick):
//! 1. If the stream yields a record, insert it into every pool
//! 2. Evaluate every pool at t, in registration order
//! 3. Log arrivals and matches
//! 4. Advance time
//! ```
//!
//! Pools never share entities: each pool creates its own entity per record,
//! so one pool's matches cannot affect another. The loop ends when the
//! stream is exhausted.
//!
//! # Example
//!
//! ```rust
//! use matching_simulator_core::arrivals::ArrivalRecord;
//! use matching_simulator_core::orchestrator::{PoolConfig, Simulation, SimulationConfig};
//! use matching_simulator_core::MatchPolicy;
//!
//! let config = SimulationConfig {
//!     rng_seed: 7,
//!     start_tick: 0,
//!     pools: vec![PoolConfig::new("greedy", MatchPolicy::Greedy)],
//!     arrivals: None,
//! };
//! let mut sim = Simulation::new(config).unwrap();
//!
//! let stream = vec![
//!     Some(ArrivalRecord::new(10.0, 0)),
//!     None,
//!     Some(ArrivalRecord::new(13.0, 2)),
//!     None,
//!     None,
//! ];
//! let summary = sim.run(stream);
//!
//! assert_eq!(summary.ticks_executed, 5);
//! assert_eq!(summary.matches, 1);
//! assert_eq!(sim.pool("greedy").unwrap().matches()[0].match_time(), 3);
//! ```

use crate::arrivals::{ArrivalConfig, ArrivalGenerator, ArrivalRecord};
use crate::core::time::TimeManager;
use crate::models::{Event, EventLog, Pool};
use crate::orchestrator::report::{compute_config_hash, PoolReport, SimulationReport};
use crate::policy::{MatchPolicy, PolicyError};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{info, warn};

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the arrival stream; pool seeds derive from it unless set
    pub rng_seed: u64,

    /// Tick the clock starts at
    pub start_tick: usize,

    /// Pools under test, in evaluation order
    pub pools: Vec<PoolConfig>,

    /// Generated arrivals (None = the caller supplies the stream)
    pub arrivals: Option<ArrivalConfig>,
}

impl Default for SimulationConfig {
    /// One pool per policy with default parameters, default arrivals
    fn default() -> Self {
        Self {
            rng_seed: 123,
            start_tick: 0,
            pools: MatchPolicy::all_defaults()
                .into_iter()
                .map(|policy| PoolConfig::new(policy.name(), policy))
                .collect(),
            arrivals: Some(ArrivalConfig::default()),
        }
    }
}

impl SimulationConfig {
    /// Check the config can build a simulation
    ///
    /// Policy parameters are checked when the pools are built.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.pools.is_empty() {
            return Err(SimulationError::InvalidConfig(
                "Must have at least one pool".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for pool in &self.pools {
            if pool.name.trim().is_empty() {
                return Err(SimulationError::InvalidConfig(
                    "Pool name must not be empty".to_string(),
                ));
            }
            if !names.insert(pool.name.as_str()) {
                return Err(SimulationError::InvalidConfig(format!(
                    "Duplicate pool name: {}",
                    pool.name
                )));
            }
        }

        if let Some(arrivals) = &self.arrivals {
            arrivals.validate().map_err(SimulationError::InvalidConfig)?;
        }

        Ok(())
    }
}

/// Per-pool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Unique pool name
    pub name: String,

    pub policy: MatchPolicy,

    /// Seed for probabilistic trials (None = derived from the simulation seed)
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl PoolConfig {
    pub fn new(name: impl Into<String>, policy: MatchPolicy) -> Self {
        Self {
            name: name.into(),
            policy,
            rng_seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

/// Simulation error types
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid policy for pool '{pool}': {source}")]
    Policy {
        pool: String,
        #[source]
        source: PolicyError,
    },

    #[error("No arrival configuration: a generated run needs `arrivals`")]
    MissingArrivals,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

// ============================================================================
// Simulation
// ============================================================================

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub tick: usize,
    /// Whether a record arrived this tick
    pub arrived: bool,
    /// Matches formed across all pools this tick
    pub num_matches: usize,
}

/// Totals for one `run`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks_executed: usize,
    pub arrivals: usize,
    /// Matches across all pools
    pub matches: usize,
}

/// Main simulation owning the pools, the clock and the event log
///
/// # Determinism
///
/// Randomness comes only from seeded `RngManager`s: one for the generated
/// arrival stream and one per pool. Same config ⇒ same matches (up to entity ids).
pub struct Simulation {
    config: SimulationConfig,
    config_hash: String,
    time_manager: TimeManager,
    pools: Vec<Pool>,
    event_log: EventLog,
    total_arrivals: usize,
}

impl Simulation {
    /// Create a new simulation from configuration
    ///
    /// # Errors
    ///
    /// * `InvalidConfig` - no pools, duplicate pool names, or a bad arrival config
    /// * `Policy` - a pool's policy parameters are out of domain
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let pools = config
            .pools
            .iter()
            .enumerate()
            .map(|(index, pool_config)| {
                let seed = pool_config
                    .rng_seed
                    .unwrap_or_else(|| RngManager::derive(config.rng_seed, index as u64 + 1).get_state());
                Pool::new(pool_config.name.clone(), pool_config.policy.clone(), seed).map_err(
                    |source| SimulationError::Policy {
                        pool: pool_config.name.clone(),
                        source,
                    },
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let config_hash = compute_config_hash(&config)?;

        Ok(Self {
            time_manager: TimeManager::new(config.start_tick),
            config,
            config_hash,
            pools,
            event_log: EventLog::new(),
            total_arrivals: 0,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Tick the next call to `tick` evaluates
    pub fn current_tick(&self) -> usize {
        self.time_manager.current_tick()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn config_hash(&self) -> &str {
        &self.config_hash
    }

    /// Pools in registration order
    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    pub fn pool(&self, name: &str) -> Option<&Pool> {
        self.pools.iter().find(|p| p.name() == name)
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Records inserted so far
    pub fn total_arrivals(&self) -> usize {
        self.total_arrivals
    }

    // ========================================================================
    // Tick Loop
    // ========================================================================

    /// Execute one tick
    pub fn tick(&mut self, arrival: Option<ArrivalRecord>) -> TickResult {
        let now = self.time_manager.current_tick();

        if let Some(record) = arrival {
            for pool in &mut self.pools {
                let entity = pool.insert(record.attribute, record.arrival_time);
                self.event_log.log(Event::Arrival {
                    tick: now,
                    pool: pool.name().to_string(),
                    entity_id: entity.id(),
                    attribute: entity.attribute(),
                });
            }
            self.total_arrivals += 1;
        }

        let mut num_matches = 0;
        for pool in &mut self.pools {
            let name = pool.name().to_string();
            let matched = pool.evaluate_and_apply(now);
            num_matches += matched.len();
            for m in matched {
                self.event_log.log(Event::Match {
                    tick: now,
                    pool: name.clone(),
                    first_id: m.first().id(),
                    second_id: m.second().id(),
                    attribute_gap: m.attribute_gap(),
                    latency: m.latency(),
                });
            }
        }

        self.time_manager.advance_tick();

        TickResult {
            tick: now,
            arrived: arrival.is_some(),
            num_matches,
        }
    }

    /// Run until `stream` is exhausted, one tick per element
    pub fn run<I>(&mut self, stream: I) -> RunSummary
    where
        I: IntoIterator<Item = Option<ArrivalRecord>>,
    {
        info!(
            start_tick = self.current_tick(),
            pools = self.pools.len(),
            "simulation started"
        );

        let mut summary = RunSummary::default();
        for arrival in stream {
            let result = self.tick(arrival);
            summary.ticks_executed += 1;
            summary.arrivals += usize::from(result.arrived);
            summary.matches += result.num_matches;
        }

        for pool in &self.pools {
            info!(
                pool = pool.name(),
                matches = pool.match_count(),
                unmatched = pool.live_count(),
                "pool finished"
            );
            if pool.live_count() > 0 {
                warn!(
                    pool = pool.name(),
                    unmatched = pool.live_count(),
                    "entities left unmatched at end of stream"
                );
            }
        }
        info!(
            final_tick = self.current_tick(),
            ticks = summary.ticks_executed,
            arrivals = summary.arrivals,
            matches = summary.matches,
            "simulation finished"
        );

        summary
    }

    /// Generate the configured arrival stream and run it
    ///
    /// # Errors
    ///
    /// `MissingArrivals` if the config has no `arrivals` section.
    pub fn run_generated(&mut self) -> Result<RunSummary, SimulationError> {
        let arrivals = self
            .config
            .arrivals
            .clone()
            .ok_or(SimulationError::MissingArrivals)?;
        let mut rng = RngManager::new(self.config.rng_seed);
        let stream = ArrivalGenerator::generate(&arrivals, &mut rng);
        info!(
            generated_ticks = stream.records().len(),
            arrivals = stream.arrival_count(),
            "arrival stream generated"
        );
        Ok(self.run(stream))
    }

    /// Snapshot of every pool for the metrics/visualization side
    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            config_hash: self.config_hash.clone(),
            final_tick: self.current_tick(),
            ticks_executed: self.time_manager.elapsed_ticks(),
            total_arrivals: self.total_arrivals,
            pools: self.pools.iter().map(PoolReport::from).collect(),
        }
    }
}
