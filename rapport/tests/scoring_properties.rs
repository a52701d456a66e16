//! Behavioural properties of the pure scoring functions

use rapport::config::{ConfigBuilder, DampeningMode};
use rapport::mentorship::{
    AgentProfile, CompatibilityScorer, FocusArea, rank_mentors, score_compatibility, strengths,
    weaknesses,
};
use rapport::relationships::{
    AgentRelationship, MetricsEngine, RelationshipMetrics, RelationshipStatus, apply_interaction,
    classify_types,
};
use rapport::sentiment::{EventKind, InteractionDescriptor, Sentiment, classify_interaction};

/// Every combination of sentiment, event kind and a few intensities
fn all_descriptors() -> Vec<InteractionDescriptor> {
    let mut descriptors = Vec::new();
    for sentiment in [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral] {
        for kind in EventKind::ALL {
            for intensity in [0.0, 0.3, 1.0] {
                descriptors.push(InteractionDescriptor::new(sentiment, intensity, kind));
            }
        }
    }
    descriptors
}

fn in_unit(metrics: &RelationshipMetrics) -> bool {
    [metrics.trust, metrics.respect, metrics.affection, metrics.familiarity]
        .iter()
        .all(|v| (0.0..=1.0).contains(v))
}

#[test]
fn test_metrics_stay_bounded_and_familiarity_grows() {
    for mode in [DampeningMode::Uniform, DampeningMode::BoundSymmetric] {
        let config = ConfigBuilder::new().with_dampening(mode).build().unwrap();
        let engine = MetricsEngine::new(config.relationships);
        let descriptors = all_descriptors();

        for start in [0.0, 0.05, 0.5, 0.95, 1.0] {
            let mut rel = AgentRelationship::with_metrics(
                "a",
                "b",
                RelationshipMetrics::new(start, start, start, 0.0),
            );

            // Walk the descriptor list in a scrambled but deterministic order
            for step in 0..200 {
                let descriptor = &descriptors[(step * 17 + 3) % descriptors.len()];
                let next = engine.apply(&rel, descriptor, "");
                assert!(in_unit(&next.metrics), "{:?} escaped [0, 1]", next.metrics);
                assert!(next.metrics.familiarity >= rel.metrics.familiarity);
                assert!(!next.type_tags.is_empty());
                rel = next;
            }
        }
    }
}

#[test]
fn test_repeated_praise_converges_without_overshoot() {
    let descriptor = InteractionDescriptor::new(Sentiment::Positive, 0.5, EventKind::Bonding);
    let mut rel = AgentRelationship::new("a", "b");
    let mut previous = rel.metrics;

    for _ in 0..500 {
        rel = apply_interaction(&rel, &descriptor, "");
        assert!(rel.metrics.trust <= 1.0);
        assert!(rel.metrics.respect <= 1.0);
        assert!(rel.metrics.affection <= 1.0);
        assert!(rel.metrics.trust >= previous.trust);
        previous = rel.metrics;
    }

    assert!(rel.metrics.trust > 0.99);
    assert!(rel.metrics.respect > 0.99);
    assert!(rel.metrics.affection > 0.99);
}

#[test]
fn test_low_trust_is_always_broken() {
    let descriptor = InteractionDescriptor::new(Sentiment::Negative, 1.0, EventKind::Betrayal);
    for other in [0.0, 0.5, 1.0] {
        let rel = AgentRelationship::with_metrics(
            "a",
            "b",
            RelationshipMetrics::new(0.25, other, other, 0.5),
        );
        let next = apply_interaction(&rel, &descriptor, "");
        assert!(next.metrics.trust < 0.2);
        assert_eq!(next.status, RelationshipStatus::Broken);
    }
}

#[test]
fn test_classify_types_never_empty() {
    let steps = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];
    for trust in steps {
        for respect in steps {
            for affection in steps {
                for familiarity in [0.0, 0.5, 1.0] {
                    let metrics = RelationshipMetrics::new(trust, respect, affection, familiarity);
                    assert!(!classify_types(&metrics).is_empty());
                }
            }
        }
    }
}

#[test]
fn test_grateful_exchange_is_positive() {
    let descriptor = classify_interaction(
        "Thank you so much for your help and support!",
        "You're welcome, happy to help",
    );
    assert_eq!(descriptor.sentiment, Sentiment::Positive);
    assert!(matches!(
        descriptor.event_kind,
        EventKind::Help | EventKind::Agreement | EventKind::Bonding
    ));
    assert!(descriptor.intensity >= 0.3);
}

#[test]
fn test_skill_match_for_shared_areas() {
    let mentor = AgentProfile::new("mentor")
        .with_trait("empathy", 0.8)
        .with_trait("communication", 0.7);
    let mentee = AgentProfile::new("mentee")
        .with_trait("empathy", 0.3)
        .with_trait("communication", 0.2);

    let mut mentor_strengths = strengths(&mentor);
    let mut mentee_weaknesses = weaknesses(&mentee);
    mentor_strengths.sort();
    mentee_weaknesses.sort();
    let expected = vec![FocusArea::Communication, FocusArea::EmotionalIntelligence];
    assert_eq!(mentor_strengths, expected);
    assert_eq!(mentee_weaknesses, expected);

    let result = score_compatibility(&mentor, &mentee).unwrap();
    assert!((result.subscores.skill_match - 0.5).abs() < 1e-9);
}

#[test]
fn test_ranking_is_sorted_and_bounded() {
    let mentee = AgentProfile::new("mentee")
        .with_trait("empathy", 0.1)
        .with_trait("knowledge", 0.2);
    let mut candidates: Vec<AgentProfile> = (0..30)
        .map(|i| {
            AgentProfile::new(format!("m{}", i))
                .with_trait("empathy", (i % 10) as f64 / 10.0)
                .with_trait("knowledge", ((i * 3) % 10) as f64 / 10.0)
                .with_trait("patience", ((i * 7) % 10) as f64 / 10.0)
        })
        .collect();
    candidates.push(mentee.clone());

    for k in [0, 1, 5, 30, 100] {
        let results = rank_mentors(&mentee, &candidates, Some(k)).unwrap();
        assert!(results.len() <= k.min(30));
        assert!(results.iter().all(|r| r.mentor_id != mentee.id));
        for pair in results.windows(2) {
            assert!(pair[0].overall_score >= pair[1].overall_score);
        }
    }
}

#[test]
fn test_custom_weights_change_overall() {
    let config = ConfigBuilder::new()
        .with_score_weights(rapport::config::ScoreWeights {
            skill_match: 1.0,
            personality_fit: 0.0,
            communication_style: 0.0,
            availability: 0.0,
        })
        .build()
        .unwrap();
    let scorer = CompatibilityScorer::new(config.compatibility);

    let mentor = AgentProfile::new("m").with_trait("empathy", 0.9);
    let mentee = AgentProfile::new("e").with_trait("empathy", 0.1);
    let result = scorer.score(&mentor, &mentee).unwrap();
    assert!((result.overall_score - result.subscores.skill_match).abs() < 1e-9);
}
