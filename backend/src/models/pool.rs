//! Pool
//!
//! One pool holds the live (unmatched) entities for one policy under test,
//! plus the append-only history of matches that policy produced.
//!
//! # Critical Invariants
//!
//! 1. **No Double Match**: an entity appears in at most one recorded match
//! 2. **Exclusivity**: an entity is either live or in the history, never both
//! 3. **Causality**: no match is recorded before both parties have arrived
//!
//! The scan in [`Pool::evaluate_and_apply`] never mutates the live list while
//! iterating it. Matched positions are flagged in an exclusion set, skipped for
//! the rest of the scan, and compacted out once the scan ends.

use crate::models::entity::Entity;
use crate::models::matching::Match;
use crate::policy::{MatchPolicy, PairContext, PolicyError};
use crate::rng::RngManager;
use tracing::debug;

/// Live entities and match history for one policy
///
/// # Example
///
/// ```rust
/// use matching_simulator_core::{MatchPolicy, Pool};
///
/// let mut pool = Pool::new("greedy", MatchPolicy::Greedy, 42).unwrap();
/// pool.insert(10.0, 0);
/// pool.insert(13.0, 2);
///
/// assert!(pool.evaluate_and_apply(2).is_empty());
/// let matched = pool.evaluate_and_apply(3);
/// assert_eq!(matched.len(), 1);
/// assert_eq!(matched[0].match_time(), 3);
/// assert!(pool.unmatched().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Pool {
    name: String,
    policy: MatchPolicy,
    /// Source for probabilistic trials; untouched by deterministic policies
    rng: RngManager,
    /// Live entities in insertion order
    live: Vec<Entity>,
    history: Vec<Match>,
}

impl Pool {
    /// Create an empty pool
    ///
    /// # Errors
    ///
    /// Returns the policy's validation error if its parameters are out of domain.
    pub fn new(
        name: impl Into<String>,
        policy: MatchPolicy,
        rng_seed: u64,
    ) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self {
            name: name.into(),
            policy,
            rng: RngManager::new(rng_seed),
            live: Vec::new(),
            history: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Create an entity and add it to the live set
    pub fn insert(&mut self, attribute: f64, arrival_time: usize) -> Entity {
        let entity = Entity::new(attribute, arrival_time);
        self.live.push(entity);
        debug!(
            pool = %self.name,
            entity = %entity.id(),
            attribute,
            arrival_time,
            live = self.live.len(),
            "inserted"
        );
        entity
    }

    /// Offer every live unordered pair to the policy once and apply matches
    ///
    /// Pairs are enumerated in insertion order. Once an entity is matched it is
    /// excluded from every later pair in the same scan. Entities that have not
    /// arrived by `now` stay live but are not offered.
    ///
    /// Returns the matches created by this call, in discovery order.
    pub fn evaluate_and_apply(&mut self, now: usize) -> &[Match] {
        let start = self.history.len();
        let attribute_range = self.attribute_range(now);
        let mut removed = vec![false; self.live.len()];
        let mut ctx = PairContext {
            now,
            attribute_range,
            rng: &mut self.rng,
        };

        for i in 0..self.live.len() {
            if removed[i] || !self.live[i].has_arrived(now) {
                continue;
            }
            for j in (i + 1)..self.live.len() {
                if removed[j] {
                    continue;
                }
                if let Some(matched) = self.policy.should_match(&self.live[i], &self.live[j], &mut ctx) {
                    removed[i] = true;
                    removed[j] = true;
                    debug!(
                        pool = %self.name,
                        tick = now,
                        first = %matched.first().id(),
                        second = %matched.second().id(),
                        gap = matched.attribute_gap(),
                        latency = matched.latency(),
                        "matched"
                    );
                    self.history.push(matched);
                    break;
                }
            }
        }

        if self.history.len() > start {
            let mut flags = removed.into_iter();
            self.live.retain(|_| !flags.next().unwrap_or(false));
        }

        &self.history[start..]
    }

    /// Live (unmatched) entities in insertion order
    pub fn unmatched(&self) -> &[Entity] {
        &self.live
    }

    /// Match history in discovery order
    pub fn matches(&self) -> &[Match] {
        &self.history
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn match_count(&self) -> usize {
        self.history.len()
    }

    /// True if `entity` is currently live
    pub fn is_live(&self, entity: &Entity) -> bool {
        self.live.contains(entity)
    }

    /// `max − min` attribute over live entities that have arrived by `now`
    ///
    /// Zero when fewer than two such entities exist or all share one value.
    pub fn attribute_range(&self, now: usize) -> f64 {
        let mut arrived = self.live.iter().filter(|e| e.has_arrived(now));
        let Some(first) = arrived.next() else {
            return 0.0;
        };
        let (min, max) = arrived.fold((first.attribute(), first.attribute()), |(lo, hi), e| {
            (lo.min(e.attribute()), hi.max(e.attribute()))
        });
        max - min
    }
}
