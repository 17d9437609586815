//! Match quality metrics
//!
//! Pure functions over a match history. Nothing here mutates a pool; the
//! visualization side reads these lists and the [`MatchSummary`].
//!
//! Per match:
//! - **attribute gap**: `|Δattribute|`
//! - **latency**: `match_time − max(arrival times)`
//! - **cost**: `|Δattribute| + (match_time − p.t) + (match_time − q.t)`

use crate::models::Match;
use serde::{Deserialize, Serialize};

/// Attribute gap of every match, in history order
pub fn attribute_gaps(matches: &[Match]) -> Vec<f64> {
    matches.iter().map(Match::attribute_gap).collect()
}

/// Latency of every match, in history order
pub fn latencies(matches: &[Match]) -> Vec<usize> {
    matches.iter().map(Match::latency).collect()
}

/// Cost of every match, in history order
pub fn costs(matches: &[Match]) -> Vec<f64> {
    matches.iter().map(Match::cost).collect()
}

/// Sum of all match costs
pub fn total_cost(matches: &[Match]) -> f64 {
    matches.iter().map(Match::cost).sum()
}

/// Aggregate statistics for one pool
///
/// Means are zero for an empty history.
///
/// # Example
///
/// ```
/// use matching_simulator_core::{Entity, Match, MatchSummary};
///
/// let a = Entity::new(10.0, 0);
/// let b = Entity::new(13.0, 2);
/// let history = vec![Match::new(a, b, 5)];
///
/// let summary = MatchSummary::from_matches(&history, 0);
/// assert_eq!(summary.matches, 1);
/// assert_eq!(summary.mean_attribute_gap, 3.0);
/// assert_eq!(summary.max_latency, 3);
/// assert_eq!(summary.total_cost, 11.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub matches: usize,
    pub unmatched: usize,
    pub mean_attribute_gap: f64,
    pub max_attribute_gap: f64,
    pub mean_latency: f64,
    pub max_latency: usize,
    pub total_cost: f64,
    pub mean_cost: f64,
}

impl MatchSummary {
    pub fn from_matches(matches: &[Match], unmatched: usize) -> Self {
        let mut summary = MatchSummary {
            matches: matches.len(),
            unmatched,
            ..Default::default()
        };
        if matches.is_empty() {
            return summary;
        }

        let mut gap_sum = 0.0;
        let mut latency_sum = 0usize;
        for m in matches {
            let gap = m.attribute_gap();
            let latency = m.latency();
            gap_sum += gap;
            latency_sum += latency;
            summary.max_attribute_gap = summary.max_attribute_gap.max(gap);
            summary.max_latency = summary.max_latency.max(latency);
            summary.total_cost += m.cost();
        }

        let n = matches.len() as f64;
        summary.mean_attribute_gap = gap_sum / n;
        summary.mean_latency = latency_sum as f64 / n;
        summary.mean_cost = summary.total_cost / n;
        summary
    }

    /// Fraction of entities that ended up matched
    pub fn match_rate(&self) -> f64 {
        let paired = 2 * self.matches;
        let total = paired + self.unmatched;
        if total == 0 {
            0.0
        } else {
            paired as f64 / total as f64
        }
    }
}
