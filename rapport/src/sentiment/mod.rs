//! Interaction classification
//!
//! Turns the two messages of an interaction into a discrete descriptor
//! (sentiment, intensity, event kind) by counting hits against fixed keyword
//! sets. No model, no network: the same texts always produce the same
//! descriptor, which keeps relationship updates free of inference cost.

pub mod classifier;
pub mod keywords;

pub use classifier::{InteractionDescriptor, KeywordHits, SentimentClassifier, classify_interaction};
pub use keywords::KeywordSets;

use serde::{Deserialize, Serialize};

/// Overall tone of an interaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Neutral => write!(f, "neutral"),
        }
    }
}

/// Social meaning of an interaction, distinct from its raw sentiment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    FirstMeeting,
    Bonding,
    Help,
    Agreement,
    Disagreement,
    Conflict,
    Betrayal,
    Reconciliation,
}

impl EventKind {
    /// All event kinds, in declaration order
    pub const ALL: [EventKind; 8] = [
        EventKind::FirstMeeting,
        EventKind::Bonding,
        EventKind::Help,
        EventKind::Agreement,
        EventKind::Disagreement,
        EventKind::Conflict,
        EventKind::Betrayal,
        EventKind::Reconciliation,
    ];

    /// Snake-case name used in logs and serialized records
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::FirstMeeting => "first_meeting",
            EventKind::Bonding => "bonding",
            EventKind::Help => "help",
            EventKind::Agreement => "agreement",
            EventKind::Disagreement => "disagreement",
            EventKind::Conflict => "conflict",
            EventKind::Betrayal => "betrayal",
            EventKind::Reconciliation => "reconciliation",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| format!("Unknown event kind: {}", s))
    }
}
