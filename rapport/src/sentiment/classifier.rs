//! Keyword-count interaction classifier

use super::keywords::KeywordSets;
use super::{EventKind, Sentiment};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

/// Discrete description of one interaction between two agents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InteractionDescriptor {
    pub sentiment: Sentiment,
    /// Strength of the interaction in `[0, 1]`
    pub intensity: f64,
    pub event_kind: EventKind,
}

impl InteractionDescriptor {
    /// Build a descriptor directly, clamping intensity to `[0, 1]`.
    ///
    /// Useful for event kinds the classifier never emits on its own
    /// (betrayal, reconciliation) when the caller knows better.
    pub fn new(sentiment: Sentiment, intensity: f64, event_kind: EventKind) -> Self {
        let intensity = if intensity.is_nan() {
            0.0
        } else {
            intensity.clamp(0.0, 1.0)
        };
        Self {
            sentiment,
            intensity,
            event_kind,
        }
    }
}

/// Number of keywords from each set found in an interaction
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordHits {
    pub positive: usize,
    pub negative: usize,
    pub helping: usize,
    pub conflict: usize,
}

impl KeywordHits {
    /// Event kind implied by the hit counts. First matching rule wins.
    pub fn event_kind(&self) -> EventKind {
        if self.conflict > 2 || self.negative > self.positive + 3 {
            EventKind::Conflict
        } else if self.helping >= 2 {
            EventKind::Help
        } else if self.positive > self.negative + 2 {
            EventKind::Agreement
        } else if self.negative > self.positive {
            EventKind::Disagreement
        } else {
            EventKind::Bonding
        }
    }

    /// Sentiment implied by the hit counts
    pub fn sentiment(&self) -> Sentiment {
        if self.positive > self.negative + 1 {
            Sentiment::Positive
        } else if self.negative > self.positive + 1 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    /// Intensity implied by the hit counts, floored by sentiment
    pub fn intensity(&self, sentiment: Sentiment) -> f64 {
        let raw = ((self.positive + self.negative) as f64 / 10.0).min(1.0);
        let floor = match sentiment {
            Sentiment::Positive | Sentiment::Negative => 0.3,
            Sentiment::Neutral => 0.2,
        };
        raw.max(floor)
    }
}

/// Classifies interactions against a set of keyword lists
#[derive(Debug, Clone)]
pub struct SentimentClassifier {
    keywords: KeywordSets,
}

impl SentimentClassifier {
    /// Create a classifier for the given vocabulary
    pub fn new(keywords: KeywordSets) -> Self {
        Self {
            keywords: keywords.normalized(),
        }
    }

    /// The (normalized) vocabulary this classifier matches against
    pub fn keywords(&self) -> &KeywordSets {
        &self.keywords
    }

    /// Classify an interaction from each participant's message
    pub fn classify(&self, text_a: &str, text_b: &str) -> InteractionDescriptor {
        let hits = self.count_hits(text_a, text_b);
        let sentiment = hits.sentiment();
        let descriptor = InteractionDescriptor {
            sentiment,
            intensity: hits.intensity(sentiment),
            event_kind: hits.event_kind(),
        };

        debug!(
            positive = hits.positive,
            negative = hits.negative,
            helping = hits.helping,
            conflict = hits.conflict,
            sentiment = %descriptor.sentiment,
            event_kind = %descriptor.event_kind,
            intensity = descriptor.intensity,
            "Classified interaction"
        );

        descriptor
    }

    /// Count keyword hits in the lower-cased concatenation of both texts
    pub fn count_hits(&self, text_a: &str, text_b: &str) -> KeywordHits {
        let combined = format!("{} {}", text_a, text_b).to_lowercase();
        let count = |words: &[String]| {
            words
                .iter()
                .filter(|w| contains_at_word_start(&combined, w))
                .count()
        };

        KeywordHits {
            positive: count(&self.keywords.positive),
            negative: count(&self.keywords.negative),
            helping: count(&self.keywords.helping),
            conflict: count(&self.keywords.conflict),
        }
    }
}

/// Whether `word` occurs in `text` starting at a word boundary.
///
/// Keywords still match as prefixes ("thank" hits "thanks"), but never from
/// inside another word ("agree" does not hit "disagree").
fn contains_at_word_start(text: &str, word: &str) -> bool {
    text.match_indices(word).any(|(at, _)| {
        text[..at]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric())
    })
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new(KeywordSets::default())
    }
}

/// Classify an interaction with the default vocabulary
pub fn classify_interaction(text_a: &str, text_b: &str) -> InteractionDescriptor {
    static DEFAULT: OnceLock<SentimentClassifier> = OnceLock::new();
    DEFAULT
        .get_or_init(SentimentClassifier::default)
        .classify(text_a, text_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(positive: usize, negative: usize, helping: usize, conflict: usize) -> KeywordHits {
        KeywordHits {
            positive,
            negative,
            helping,
            conflict,
        }
    }

    #[test]
    fn test_grateful_exchange_is_positive_help() {
        let d = classify_interaction(
            "Thank you so much for your help and support!",
            "You're welcome, happy to help",
        );
        assert_eq!(d.sentiment, Sentiment::Positive);
        assert!(matches!(
            d.event_kind,
            EventKind::Help | EventKind::Agreement | EventKind::Bonding
        ));
        assert!(d.intensity >= 0.3);
    }

    #[test]
    fn test_hostile_exchange_is_conflict() {
        let d = classify_interaction(
            "I disagree, you are wrong and I refuse to argue with a liar",
            "That is stupid, I hate this",
        );
        assert_eq!(d.event_kind, EventKind::Conflict);
        assert_eq!(d.sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_empty_texts_are_neutral_bonding() {
        let d = classify_interaction("", "");
        assert_eq!(d.sentiment, Sentiment::Neutral);
        assert_eq!(d.event_kind, EventKind::Bonding);
        assert!((d.intensity - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let classifier = SentimentClassifier::default();
        let lower = classifier.count_hits("thank you, great", "");
        let upper = classifier.count_hits("THANK YOU, GREAT", "");
        assert_eq!(lower, upper);
        assert_eq!(lower.positive, 2);
    }

    #[test]
    fn test_keyword_counts_once() {
        let classifier = SentimentClassifier::default();
        let hits = classifier.count_hits("help help help", "help");
        assert_eq!(hits.helping, 1);
    }

    #[test]
    fn test_keywords_do_not_match_inside_words() {
        let classifier = SentimentClassifier::default();
        let hits = classifier.count_hits("I disagree", "");
        assert_eq!(hits.positive, 0);
        assert_eq!(hits.conflict, 1);

        let hits = classifier.count_hits("We agree, thanks", "whatever");
        assert_eq!(hits.positive, 2);
        assert_eq!(hits.negative, 0);
    }

    #[test]
    fn test_disagree_reads_as_disagreement() {
        let d = classify_interaction("I disagree, that is wrong", "");
        assert_eq!(d.event_kind, EventKind::Disagreement);
        assert_eq!(d.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_event_kind_decision_order() {
        // conflict wins over help
        assert_eq!(hits(0, 0, 3, 3).event_kind(), EventKind::Conflict);
        // heavy negativity is conflict even without conflict words
        assert_eq!(hits(0, 4, 0, 0).event_kind(), EventKind::Conflict);
        // help wins over agreement
        assert_eq!(hits(5, 0, 2, 0).event_kind(), EventKind::Help);
        assert_eq!(hits(3, 0, 1, 0).event_kind(), EventKind::Agreement);
        assert_eq!(hits(1, 2, 0, 0).event_kind(), EventKind::Disagreement);
        assert_eq!(hits(2, 0, 1, 2).event_kind(), EventKind::Bonding);
    }

    #[test]
    fn test_sentiment_thresholds() {
        assert_eq!(hits(2, 0, 0, 0).sentiment(), Sentiment::Positive);
        assert_eq!(hits(1, 0, 0, 0).sentiment(), Sentiment::Neutral);
        assert_eq!(hits(0, 2, 0, 0).sentiment(), Sentiment::Negative);
        assert_eq!(hits(3, 3, 0, 0).sentiment(), Sentiment::Neutral);
    }

    #[test]
    fn test_intensity_floor_and_cap() {
        assert!((hits(2, 0, 0, 0).intensity(Sentiment::Positive) - 0.3).abs() < 1e-12);
        assert!((hits(1, 0, 0, 0).intensity(Sentiment::Neutral) - 0.2).abs() < 1e-12);
        assert!((hits(6, 1, 0, 0).intensity(Sentiment::Positive) - 0.7).abs() < 1e-12);
        assert!((hits(9, 9, 0, 0).intensity(Sentiment::Neutral) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_custom_vocabulary() {
        let classifier = SentimentClassifier::new(KeywordSets {
            positive: vec!["Merci".into(), "génial".into()],
            negative: vec!["nul".into()],
            helping: vec!["aider".into(), "soutien".into()],
            conflict: vec!["dispute".into()],
        });
        let d = classifier.classify("Merci pour ton soutien, c'est génial", "Ravi de t'aider");
        assert_eq!(d.sentiment, Sentiment::Positive);
        assert_eq!(d.event_kind, EventKind::Help);
    }

    #[test]
    fn test_descriptor_new_clamps_intensity() {
        let d = InteractionDescriptor::new(Sentiment::Negative, 3.0, EventKind::Betrayal);
        assert_eq!(d.intensity, 1.0);
        let d = InteractionDescriptor::new(Sentiment::Neutral, f64::NAN, EventKind::Bonding);
        assert_eq!(d.intensity, 0.0);
    }
}
