//! Relationship evolution and analysis
//!
//! Tracks one [`AgentRelationship`] per unordered pair of agents. Interactions
//! move its metrics through [`MetricsEngine`], type tags and trend are derived
//! by the analyzer, and [`RelationshipManager`] ties both to a
//! [`RelationshipStore`](crate::storage::RelationshipStore).

pub mod analyzer;
pub mod manager;
pub mod metrics;
pub mod types;

pub use analyzer::{DEFAULT_TREND_WINDOW, RelationshipAnalyzer, classify_types, trend};
pub use manager::{InteractionOutcome, RelationshipManager};
pub use metrics::{
    AffectDeltas, MetricsEngine, apply_interaction, dampen, event_bonus, sentiment_deltas,
    transition_status,
};
pub use types::{
    AgentRelationship, MetricDeltas, PAIR_KEY_SEPARATOR, PairKey, RelationshipEvent,
    RelationshipMetrics, RelationshipStatus, RelationshipType, TrendDirection, clamp_unit,
};
