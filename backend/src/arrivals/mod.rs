//! Arrival stream generation.
//!
//! Produces the timestep-indexed sequence the simulation consumes: at each
//! tick either nothing arrives or one record `(attribute, arrival_time)` does.
//! All generation is deterministic given the RNG seed.
//!
//! # Shape
//!
//! For each tick `i in 0..length` a record spawns with probability
//! `spawn_chance`, carrying `arrival_time = i` and an attribute drawn from the
//! configured distribution. The stream then continues with `trailing_ticks`
//! empty ticks so entities still waiting can finish matching. Trailing ticks
//! are produced by the iterator, not stored.
//!
//! # Example
//!
//! ```
//! use matching_simulator_core::arrivals::{ArrivalConfig, ArrivalGenerator, AttributeDistribution};
//! use matching_simulator_core::RngManager;
//!
//! let config = ArrivalConfig {
//!     length: 100,
//!     spawn_chance: 0.5,
//!     attribute_distribution: AttributeDistribution::Uniform { min: 0, max: 10 },
//!     trailing_ticks: 20,
//! };
//! let mut rng = RngManager::new(123);
//! let stream = ArrivalGenerator::generate(&config, &mut rng);
//!
//! assert_eq!(stream.len(), 120);
//! assert!(stream.records().iter().flatten().all(|r| (0.0..=10.0).contains(&r.attribute)));
//! ```

use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use std::iter;

/// One arrival: the attribute and the tick it arrives at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrivalRecord {
    pub attribute: f64,
    pub arrival_time: usize,
}

impl ArrivalRecord {
    pub fn new(attribute: f64, arrival_time: usize) -> Self {
        Self {
            attribute,
            arrival_time,
        }
    }
}

/// Attribute distribution types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttributeDistribution {
    /// Integer attributes uniform over [min, max]
    Uniform { min: i64, max: i64 },

    /// Real attributes, normally distributed
    Normal { mean: f64, std_dev: f64 },
}

/// Configuration for a generated arrival stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrivalConfig {
    /// Ticks during which arrivals may spawn
    pub length: usize,

    /// Per-tick probability that a record spawns
    pub spawn_chance: f64,

    pub attribute_distribution: AttributeDistribution,

    /// Empty ticks appended after `length`
    pub trailing_ticks: usize,
}

impl Default for ArrivalConfig {
    fn default() -> Self {
        Self {
            length: 1000,
            spawn_chance: 0.02,
            attribute_distribution: AttributeDistribution::Uniform { min: 100, max: 2400 },
            trailing_ticks: 99_999,
        }
    }
}

impl ArrivalConfig {
    /// Check the config can generate a stream
    ///
    /// Returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(format!(
                "spawn_chance must be within [0, 1], got {}",
                self.spawn_chance
            ));
        }
        match self.attribute_distribution {
            AttributeDistribution::Uniform { min, max } if min > max => Err(format!(
                "uniform attribute range is empty: min {} > max {}",
                min, max
            )),
            AttributeDistribution::Normal { mean, std_dev }
                if !mean.is_finite() || !std_dev.is_finite() || std_dev < 0.0 =>
            {
                Err(format!(
                    "normal attribute distribution needs finite mean and std_dev >= 0, got mean {} std_dev {}",
                    mean, std_dev
                ))
            }
            _ => Ok(()),
        }
    }
}

/// A finite arrival stream: generated records plus a trailing idle run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalStream {
    records: Vec<Option<ArrivalRecord>>,
    trailing_ticks: usize,
}

impl ArrivalStream {
    pub fn new(records: Vec<Option<ArrivalRecord>>, trailing_ticks: usize) -> Self {
        Self {
            records,
            trailing_ticks,
        }
    }

    /// Records for the generated ticks (trailing idle ticks excluded)
    pub fn records(&self) -> &[Option<ArrivalRecord>] {
        &self.records
    }

    /// Total ticks including the trailing run
    pub fn len(&self) -> usize {
        self.records.len() + self.trailing_ticks
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of ticks that carry a record
    pub fn arrival_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<ArrivalRecord>> + '_ {
        self.records
            .iter()
            .copied()
            .chain(iter::repeat(None).take(self.trailing_ticks))
    }
}

impl IntoIterator for ArrivalStream {
    type Item = Option<ArrivalRecord>;
    type IntoIter = iter::Chain<
        std::vec::IntoIter<Option<ArrivalRecord>>,
        iter::Take<iter::Repeat<Option<ArrivalRecord>>>,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.records
            .into_iter()
            .chain(iter::repeat(None).take(self.trailing_ticks))
    }
}

/// Generator for arrival streams
pub struct ArrivalGenerator;

impl ArrivalGenerator {
    /// Generate a stream from `config`, drawing from `rng`
    ///
    /// Each generated tick consumes one spawn draw, plus the attribute draws
    /// when a record spawns.
    pub fn generate(config: &ArrivalConfig, rng: &mut RngManager) -> ArrivalStream {
        let records = (0..config.length)
            .map(|tick| {
                rng.chance(config.spawn_chance).then(|| {
                    let attribute = Self::sample_attribute(&config.attribute_distribution, rng);
                    ArrivalRecord::new(attribute, tick)
                })
            })
            .collect();

        ArrivalStream::new(records, config.trailing_ticks)
    }

    fn sample_attribute(distribution: &AttributeDistribution, rng: &mut RngManager) -> f64 {
        match distribution {
            AttributeDistribution::Uniform { min, max } => rng.range_inclusive(*min, *max) as f64,
            AttributeDistribution::Normal { mean, std_dev } => mean + std_dev * rng.standard_normal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(spawn_chance: f64) -> ArrivalConfig {
        ArrivalConfig {
            length: 200,
            spawn_chance,
            attribute_distribution: AttributeDistribution::Uniform { min: 100, max: 2400 },
            trailing_ticks: 50,
        }
    }

    #[test]
    fn test_default_matches_reference_generator() {
        let config = ArrivalConfig::default();
        assert_eq!(config.length, 1000);
        assert_eq!(config.spawn_chance, 0.02);
        assert_eq!(config.trailing_ticks, 99_999);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_arrival_time_is_tick_index() {
        let mut rng = RngManager::new(42);
        let stream = ArrivalGenerator::generate(&config(0.3), &mut rng);
        for (tick, record) in stream.records().iter().enumerate() {
            if let Some(record) = record {
                assert_eq!(record.arrival_time, tick);
            }
        }
    }

    #[test]
    fn test_spawn_chance_extremes() {
        let mut rng = RngManager::new(42);
        assert_eq!(ArrivalGenerator::generate(&config(0.0), &mut rng).arrival_count(), 0);
        assert_eq!(ArrivalGenerator::generate(&config(1.0), &mut rng).arrival_count(), 200);
    }

    #[test]
    fn test_trailing_ticks_are_empty() {
        let mut rng = RngManager::new(1);
        let stream = ArrivalGenerator::generate(&config(1.0), &mut rng);
        let ticks: Vec<_> = stream.clone().into_iter().collect();
        assert_eq!(ticks.len(), 250);
        assert!(ticks[200..].iter().all(Option::is_none));
        assert_eq!(stream.iter().count(), 250);
    }

    #[test]
    fn test_normal_distribution_centered() {
        let mut rng = RngManager::new(5);
        let config = ArrivalConfig {
            length: 4000,
            spawn_chance: 1.0,
            attribute_distribution: AttributeDistribution::Normal {
                mean: 1250.0,
                std_dev: 100.0,
            },
            trailing_ticks: 0,
        };
        let stream = ArrivalGenerator::generate(&config, &mut rng);
        let attrs: Vec<f64> = stream.records().iter().flatten().map(|r| r.attribute).collect();
        let mean = attrs.iter().sum::<f64>() / attrs.len() as f64;
        assert!((mean - 1250.0).abs() < 10.0, "mean {}", mean);
    }

    #[test]
    fn test_uniform_extreme_bounds_generate() {
        for (min, max) in [
            (0, i64::MAX),
            (i64::MIN / 2 - 10, i64::MAX / 2 + 10),
            (i64::MIN, i64::MAX),
        ] {
            let mut config = config(1.0);
            config.attribute_distribution = AttributeDistribution::Uniform { min, max };
            assert!(config.validate().is_ok());

            let mut rng = RngManager::new(17);
            let stream = ArrivalGenerator::generate(&config, &mut rng);
            assert_eq!(stream.arrival_count(), 200);
            assert!(stream
                .records()
                .iter()
                .flatten()
                .all(|r| r.attribute >= min as f64 && r.attribute <= max as f64));
        }
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        assert!(config(1.5).validate().is_err());
        let mut empty_range = config(0.5);
        empty_range.attribute_distribution = AttributeDistribution::Uniform { min: 10, max: 5 };
        assert!(empty_range.validate().is_err());
        let mut bad_normal = config(0.5);
        bad_normal.attribute_distribution = AttributeDistribution::Normal {
            mean: 0.0,
            std_dev: -1.0,
        };
        assert!(bad_normal.validate().is_err());
    }
}
