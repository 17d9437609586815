//! Report - Read-Only Simulation Output
//!
//! Captures, per pool, the match history, the unmatched residue and summary
//! statistics. This is the hand-off to plotting and statistics rendering.
//!
//! # Critical Invariants
//!
//! [`validate_report`] re-checks what the pool guarantees by construction:
//! - **No Double Match**: an entity appears in at most one match
//! - **Causality**: every match happens at or after both arrivals
//! - **Exclusivity**: no unmatched entity also appears in the history

use crate::metrics::MatchSummary;
use crate::models::{Entity, EntityId, Match, Pool};
use crate::orchestrator::SimulationError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

// ============================================================================
// Report Structures
// ============================================================================

/// Output of a complete run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// SHA256 of the canonical config JSON
    pub config_hash: String,

    /// Tick the clock stopped at
    pub final_tick: usize,

    pub ticks_executed: usize,

    /// Records inserted (each one into every pool)
    pub total_arrivals: usize,

    /// Per-pool output, in registration order
    pub pools: Vec<PoolReport>,
}

impl SimulationReport {
    pub fn pool(&self, name: &str) -> Option<&PoolReport> {
        self.pools.iter().find(|p| p.name == name)
    }

    /// Pretty JSON encoding
    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string_pretty(self).map_err(|e| {
            SimulationError::Serialization(format!("Report serialization failed: {}", e))
        })
    }
}

/// One pool's output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolReport {
    pub name: String,
    /// Policy label, e.g. `budget_based`
    pub policy: String,
    pub matches: Vec<Match>,
    pub unmatched: Vec<Entity>,
    pub summary: MatchSummary,
}

impl From<&Pool> for PoolReport {
    fn from(pool: &Pool) -> Self {
        PoolReport {
            name: pool.name().to_string(),
            policy: pool.policy().name().to_string(),
            matches: pool.matches().to_vec(),
            unmatched: pool.unmatched().to_vec(),
            summary: MatchSummary::from_matches(pool.matches(), pool.live_count()),
        }
    }
}

// ============================================================================
// Config Hashing
// ============================================================================

/// Compute deterministic SHA256 hash of config
///
/// Keys are sorted recursively before hashing so the digest does not depend
/// on map iteration order.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(config).map_err(|e| {
        SimulationError::Serialization(format!("Config serialization failed: {}", e))
    })?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        SimulationError::Serialization(format!("Config serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// Validation
// ============================================================================

/// Check every pool in `report` against the matching invariants
pub fn validate_report(report: &SimulationReport) -> Result<(), SimulationError> {
    report.pools.iter().try_for_each(validate_pool)
}

/// Check one pool's history and residue against the matching invariants
pub fn validate_pool(pool: &PoolReport) -> Result<(), SimulationError> {
    // 1. Causality
    for m in &pool.matches {
        let latest_arrival = m.first().arrival_time().max(m.second().arrival_time());
        if m.match_time() < latest_arrival {
            return Err(SimulationError::InvariantViolation(format!(
                "pool {}: match at tick {} precedes arrival at tick {}",
                pool.name,
                m.match_time(),
                latest_arrival
            )));
        }
    }

    // 2. No double match
    let mut seen: HashMap<EntityId, usize> = HashMap::new();
    for (index, m) in pool.matches.iter().enumerate() {
        for entity in [m.first(), m.second()] {
            if let Some(previous) = seen.insert(entity.id(), index) {
                return Err(SimulationError::InvariantViolation(format!(
                    "pool {}: entity {} matched twice (matches {} and {})",
                    pool.name,
                    entity.id(),
                    previous,
                    index
                )));
            }
        }
    }

    // 3. Exclusivity
    for entity in &pool.unmatched {
        if seen.contains_key(&entity.id()) {
            return Err(SimulationError::InvariantViolation(format!(
                "pool {}: entity {} is both unmatched and in the history",
                pool.name,
                entity.id()
            )));
        }
    }

    Ok(())
}
