//! Relationship type classification and trend analysis

use super::types::*;
use std::collections::BTreeSet;

/// Number of recent events the default trend looks at
pub const DEFAULT_TREND_WINDOW: usize = 5;

/// Summed trust movement needed for a trend to count as improving/declining
const TREND_THRESHOLD: f64 = 0.1;

/// Derive the type tags for a set of metrics.
///
/// Several tags may hold at once. The result is never empty: with no match it
/// is `{acquaintance}`.
pub fn classify_types(metrics: &RelationshipMetrics) -> BTreeSet<RelationshipType> {
    let avg_positive = metrics.average_positive();
    let mut tags = BTreeSet::new();

    if avg_positive > 0.6 && metrics.affection > 0.5 {
        tags.insert(RelationshipType::Friendship);
    }
    if avg_positive < 0.4 && metrics.trust < 0.3 && metrics.respect > 0.2 {
        tags.insert(RelationshipType::Rivalry);
    }
    if metrics.respect > 0.7 && metrics.familiarity > 0.3 {
        tags.insert(RelationshipType::Professional);
    }
    if metrics.respect > 0.8 && metrics.trust > 0.6 {
        tags.insert(RelationshipType::Mentorship);
    }

    if tags.is_empty() {
        tags.insert(RelationshipType::Acquaintance);
    }
    tags
}

/// Trend over the last five logged events
pub fn trend(relationship: &AgentRelationship) -> TrendDirection {
    RelationshipAnalyzer::default().trend(relationship)
}

/// Classifies relationships and their recent direction
#[derive(Debug, Clone, Copy)]
pub struct RelationshipAnalyzer {
    trend_window: usize,
}

impl Default for RelationshipAnalyzer {
    fn default() -> Self {
        Self {
            trend_window: DEFAULT_TREND_WINDOW,
        }
    }
}

impl RelationshipAnalyzer {
    /// Create an analyzer looking at the last `trend_window` events
    pub fn new(trend_window: usize) -> Self {
        Self {
            trend_window: trend_window.max(1),
        }
    }

    /// Window used for trend calculation
    pub fn trend_window(&self) -> usize {
        self.trend_window
    }

    /// Type tags for the relationship's current metrics
    pub fn classify(&self, relationship: &AgentRelationship) -> BTreeSet<RelationshipType> {
        classify_types(&relationship.metrics)
    }

    /// Sum of trust deltas over the most recent events
    pub fn trust_movement(&self, relationship: &AgentRelationship) -> f64 {
        relationship
            .recent_events(self.trend_window)
            .map(|event| event.metric_deltas.trust)
            .sum()
    }

    /// Direction of the relationship over the most recent events
    pub fn trend(&self, relationship: &AgentRelationship) -> TrendDirection {
        let movement = self.trust_movement(relationship);
        if movement > TREND_THRESHOLD {
            TrendDirection::Improving
        } else if movement < -TREND_THRESHOLD {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        }
    }
}
