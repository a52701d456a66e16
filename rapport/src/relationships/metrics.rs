//! Relationship metric evolution
//!
//! A pure state transition: `(relationship, interaction) -> relationship'`.
//! Sentiment sets the base deltas, the event kind adds a bonus, diminishing
//! returns dampen the result, and everything is clamped to `[0, 1]`.

use super::analyzer::classify_types;
use super::types::*;
use crate::config::{DampeningMode, RelationshipConfig};
use crate::sentiment::{EventKind, InteractionDescriptor, Sentiment};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Largest base change a single interaction at full intensity can cause
const MAX_CHANGE_PER_INTERACTION: f64 = 0.1;

/// Average movement needed before a relationship counts as growing/declining
const STATUS_CHANGE_THRESHOLD: f64 = 0.05;

/// Below this trust the relationship is broken, whatever the other metrics say
const BROKEN_TRUST_THRESHOLD: f64 = 0.2;

/// Minimum trust movement that gets logged for a neutral interaction
const EVENT_LOG_TRUST_THRESHOLD: f64 = 0.03;

/// Deltas to the three affective metrics before they are applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AffectDeltas {
    pub trust: f64,
    pub respect: f64,
    pub affection: f64,
}

impl AffectDeltas {
    fn add(self, other: AffectDeltas) -> Self {
        Self {
            trust: self.trust + other.trust,
            respect: self.respect + other.respect,
            affection: self.affection + other.affection,
        }
    }
}

/// Base deltas from sentiment, scaled by intensity.
///
/// Losses outweigh gains: a negative interaction costs 1.2x the trust a
/// positive one of the same intensity earns.
pub fn sentiment_deltas(sentiment: Sentiment, intensity: f64) -> AffectDeltas {
    let max_change = MAX_CHANGE_PER_INTERACTION * clamp_unit(intensity);
    match sentiment {
        Sentiment::Positive => AffectDeltas {
            trust: 0.8 * max_change,
            respect: 0.6 * max_change,
            affection: 0.7 * max_change,
        },
        Sentiment::Negative => AffectDeltas {
            trust: -1.2 * max_change,
            respect: -0.4 * max_change,
            affection: -0.5 * max_change,
        },
        Sentiment::Neutral => AffectDeltas::default(),
    }
}

/// Fixed bonus deltas added on top of the sentiment deltas
pub fn event_bonus(kind: EventKind) -> AffectDeltas {
    match kind {
        EventKind::Help => AffectDeltas {
            trust: 0.05,
            respect: 0.03,
            affection: 0.0,
        },
        EventKind::Agreement => AffectDeltas {
            trust: 0.0,
            respect: 0.02,
            affection: 0.02,
        },
        EventKind::Conflict => AffectDeltas {
            trust: -0.05,
            respect: 0.0,
            affection: -0.03,
        },
        EventKind::Betrayal => AffectDeltas {
            trust: -0.15,
            respect: -0.1,
            affection: -0.1,
        },
        EventKind::Reconciliation => AffectDeltas {
            trust: 0.08,
            respect: 0.0,
            affection: 0.05,
        },
        EventKind::FirstMeeting
        | EventKind::Bonding
        | EventKind::Disagreement => AffectDeltas::default(),
    }
}

/// Scale a delta by how much resistance the current value offers
pub fn dampen(delta: f64, current: f64, mode: DampeningMode) -> f64 {
    let factor = match mode {
        DampeningMode::Uniform => 1.0 - current * 0.5,
        DampeningMode::BoundSymmetric if delta < 0.0 => 1.0 - (1.0 - current) * 0.5,
        DampeningMode::BoundSymmetric => 1.0 - current * 0.5,
    };
    delta * factor
}

/// Status after moving from `before` to `after`
pub fn transition_status(
    before: &RelationshipMetrics,
    after: &RelationshipMetrics,
) -> RelationshipStatus {
    if after.trust < BROKEN_TRUST_THRESHOLD {
        return RelationshipStatus::Broken;
    }

    let change = after.average_positive() - before.average_positive();
    if change > STATUS_CHANGE_THRESHOLD {
        RelationshipStatus::Growing
    } else if change < -STATUS_CHANGE_THRESHOLD {
        RelationshipStatus::Declining
    } else {
        RelationshipStatus::Stable
    }
}

/// Applies interactions to relationships
#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
    config: RelationshipConfig,
}

impl MetricsEngine {
    /// Create an engine with the given relationship configuration
    pub fn new(config: RelationshipConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &RelationshipConfig {
        &self.config
    }

    /// A brand-new relationship between two agents, using the configured
    /// initial metrics
    pub fn new_relationship(&self, agent_a: &str, agent_b: &str) -> AgentRelationship {
        AgentRelationship::with_metrics(agent_a, agent_b, self.config.initial_metrics)
    }

    /// Apply one interaction and return the evolved relationship.
    ///
    /// `context` becomes the event description when the interaction is logged.
    pub fn apply(
        &self,
        relationship: &AgentRelationship,
        descriptor: &InteractionDescriptor,
        context: &str,
    ) -> AgentRelationship {
        let before = relationship.metrics;
        let mode = self.config.dampening;

        let raw = sentiment_deltas(descriptor.sentiment, descriptor.intensity)
            .add(event_bonus(descriptor.event_kind));

        let dampened = AffectDeltas {
            trust: dampen(raw.trust, before.trust, mode),
            respect: dampen(raw.respect, before.respect, mode),
            affection: dampen(raw.affection, before.affection, mode),
        };

        let after = RelationshipMetrics {
            trust: before.trust + dampened.trust,
            respect: before.respect + dampened.respect,
            affection: before.affection + dampened.affection,
            familiarity: before.familiarity + self.config.familiarity_step,
        }
        .clamped();

        let mut next = relationship.clone();
        next.metrics = after;
        next.status = transition_status(&before, &after);

        // Gate and log on the computed deltas, not the clamped difference
        let computed = MetricDeltas {
            trust: dampened.trust,
            respect: dampened.respect,
            affection: dampened.affection,
            familiarity: self.config.familiarity_step,
        };
        if computed.trust.abs() > EVENT_LOG_TRUST_THRESHOLD
            || descriptor.sentiment != Sentiment::Neutral
        {
            let description = if context.trim().is_empty() {
                format!("{} interaction ({})", descriptor.sentiment, descriptor.event_kind)
            } else {
                context.trim().to_string()
            };
            next.push_event(
                RelationshipEvent::new(descriptor.event_kind, description, computed),
                self.config.max_events,
            );
        }

        next.type_tags = classify_types(&after);
        next.interaction_count += 1;
        next.last_interaction_at = Utc::now();

        debug!(
            pair = %next.id,
            event_kind = %descriptor.event_kind,
            trust = after.trust,
            respect = after.respect,
            affection = after.affection,
            familiarity = after.familiarity,
            status = %next.status,
            "Applied interaction"
        );

        next
    }
}

/// Apply an interaction with the default relationship configuration
pub fn apply_interaction(
    relationship: &AgentRelationship,
    descriptor: &InteractionDescriptor,
    context: &str,
) -> AgentRelationship {
    MetricsEngine::default().apply(relationship, descriptor, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relationships::analyzer::trend;

    fn descriptor(sentiment: Sentiment, intensity: f64, kind: EventKind) -> InteractionDescriptor {
        InteractionDescriptor::new(sentiment, intensity, kind)
    }

    fn relationship_with(trust: f64, respect: f64, affection: f64) -> AgentRelationship {
        AgentRelationship::with_metrics(
            "a",
            "b",
            RelationshipMetrics::new(trust, respect, affection, 0.0),
        )
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_positive_bonding_deltas() {
        let rel = relationship_with(0.5, 0.5, 0.5);
        let next = apply_interaction(&rel, &descriptor(Sentiment::Positive, 1.0, EventKind::Bonding), "");

        // maxChange = 0.1, dampening factor at 0.5 = 0.75
        assert!(approx(next.metrics.trust, 0.5 + 0.08 * 0.75));
        assert!(approx(next.metrics.respect, 0.5 + 0.06 * 0.75));
        assert!(approx(next.metrics.affection, 0.5 + 0.07 * 0.75));
        assert!(approx(next.metrics.familiarity, 0.05));
        assert_eq!(next.interaction_count, 1);
    }

    #[test]
    fn test_negative_conflict_deltas() {
        let rel = relationship_with(0.6, 0.6, 0.6);
        let next = apply_interaction(&rel, &descriptor(Sentiment::Negative, 0.5, EventKind::Conflict), "");

        let factor = 1.0 - 0.6 * 0.5;
        assert!(approx(next.metrics.trust, 0.6 + (-1.2 * 0.05 - 0.05) * factor));
        assert!(approx(next.metrics.respect, 0.6 + (-0.4 * 0.05) * factor));
        assert!(approx(next.metrics.affection, 0.6 + (-0.5 * 0.05 - 0.03) * factor));
    }

    #[test]
    fn test_betrayal_breaks_low_trust() {
        let rel = relationship_with(0.3, 0.9, 0.9);
        let next = apply_interaction(&rel, &descriptor(Sentiment::Negative, 1.0, EventKind::Betrayal), "");
        assert!(next.metrics.trust < 0.2);
        assert_eq!(next.status, RelationshipStatus::Broken);
    }

    #[test]
    fn test_broken_overrides_growth() {
        let before = RelationshipMetrics::new(0.1, 0.1, 0.1, 0.0);
        let after = RelationshipMetrics::new(0.19, 0.9, 0.9, 0.0);
        assert_eq!(transition_status(&before, &after), RelationshipStatus::Broken);
    }

    #[test]
    fn test_status_thresholds() {
        let base = RelationshipMetrics::new(0.5, 0.5, 0.5, 0.0);
        let up = RelationshipMetrics::new(0.6, 0.6, 0.6, 0.0);
        let down = RelationshipMetrics::new(0.4, 0.4, 0.4, 0.0);
        let flat = RelationshipMetrics::new(0.52, 0.52, 0.52, 0.0);
        assert_eq!(transition_status(&base, &up), RelationshipStatus::Growing);
        assert_eq!(transition_status(&base, &down), RelationshipStatus::Declining);
        assert_eq!(transition_status(&base, &flat), RelationshipStatus::Stable);
    }

    #[test]
    fn test_neutral_small_change_is_not_logged() {
        let rel = relationship_with(0.5, 0.5, 0.5);
        let next = apply_interaction(&rel, &descriptor(Sentiment::Neutral, 0.2, EventKind::Bonding), "chat");
        assert_eq!(next.events.len(), rel.events.len());
        assert_eq!(next.interaction_count, 1);
        assert!(next.metrics.familiarity > rel.metrics.familiarity);
    }

    #[test]
    fn test_neutral_help_is_logged_when_trust_moves() {
        let rel = relationship_with(0.5, 0.5, 0.5);
        // help bonus 0.05 * 0.75 = 0.0375 > 0.03
        let next = apply_interaction(&rel, &descriptor(Sentiment::Neutral, 0.2, EventKind::Help), "debugging");
        assert_eq!(next.events.len(), rel.events.len() + 1);
        let event = next.events.back().unwrap();
        assert_eq!(event.kind, EventKind::Help);
        assert_eq!(event.description, "debugging");
        assert!(approx(event.metric_deltas.trust, 0.0375));
    }

    #[test]
    fn test_event_log_is_bounded() {
        let mut rel = relationship_with(0.5, 0.5, 0.5);
        let d = descriptor(Sentiment::Positive, 0.5, EventKind::Bonding);
        for _ in 0..25 {
            rel = apply_interaction(&rel, &d, "hello");
        }
        assert_eq!(rel.events.len(), 10);
        assert!(rel.events.iter().all(|e| e.kind == EventKind::Bonding));
    }

    #[test]
    fn test_generated_description_when_context_empty() {
        let rel = relationship_with(0.5, 0.5, 0.5);
        let next = apply_interaction(&rel, &descriptor(Sentiment::Positive, 0.5, EventKind::Agreement), "  ");
        assert_eq!(next.events.back().unwrap().description, "positive interaction (agreement)");
    }

    #[test]
    fn test_uniform_dampening_barely_resists_drops_near_floor() {
        let near_floor = dampen(-0.1, 0.05, DampeningMode::Uniform);
        let near_ceiling = dampen(-0.1, 0.95, DampeningMode::Uniform);
        assert!(near_floor.abs() > near_ceiling.abs());
    }

    #[test]
    fn test_bound_symmetric_dampening() {
        // Gains behave like the uniform mode
        assert!(approx(
            dampen(0.1, 0.8, DampeningMode::BoundSymmetric),
            dampen(0.1, 0.8, DampeningMode::Uniform)
        ));
        // Losses are resisted near the floor instead of the ceiling
        let near_floor = dampen(-0.1, 0.05, DampeningMode::BoundSymmetric);
        let near_ceiling = dampen(-0.1, 0.95, DampeningMode::BoundSymmetric);
        assert!(near_floor.abs() < near_ceiling.abs());
    }

    #[test]
    fn test_type_tags_recomputed() {
        let rel = relationship_with(0.9, 0.9, 0.9);
        let next = apply_interaction(&rel, &descriptor(Sentiment::Positive, 1.0, EventKind::Agreement), "");
        assert!(next.has_tag(RelationshipType::Friendship));
        assert!(next.has_tag(RelationshipType::Mentorship));
        assert!(!next.has_tag(RelationshipType::Acquaintance));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let rel = relationship_with(0.5, 0.5, 0.5);
        let _ = apply_interaction(&rel, &descriptor(Sentiment::Negative, 1.0, EventKind::Conflict), "");
        assert_eq!(rel.metrics, RelationshipMetrics::new(0.5, 0.5, 0.5, 0.0));
        assert_eq!(rel.interaction_count, 0);
    }

    #[test]
    fn test_neutral_conflict_at_floor_is_logged() {
        let rel = relationship_with(0.0, 0.5, 0.5);
        let next = apply_interaction(&rel, &descriptor(Sentiment::Neutral, 0.2, EventKind::Conflict), "");

        // Trust is already at 0, but the computed drop of 0.05 is still recorded
        assert_eq!(next.metrics.trust, 0.0);
        assert_eq!(next.events.len(), rel.events.len() + 1);
        let event = next.events.back().unwrap();
        assert_eq!(event.kind, EventKind::Conflict);
        assert!(approx(event.metric_deltas.trust, -0.05));
    }

    #[test]
    fn test_help_at_ceiling_keeps_trend_improving() {
        let mut rel = relationship_with(1.0, 1.0, 1.0);
        let d = descriptor(Sentiment::Positive, 0.5, EventKind::Help);
        for _ in 0..5 {
            rel = apply_interaction(&rel, &d, "");
        }

        assert_eq!(rel.metrics.trust, 1.0);
        assert!(rel.events.iter().skip(1).all(|e| e.metric_deltas.trust > 0.0));
        assert_eq!(trend(&rel), TrendDirection::Improving);
    }
}
