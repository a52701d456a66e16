//! Relationship data structures

use crate::sentiment::EventKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use uuid::Uuid;

/// Separator between the two agent ids of a [`PairKey`]
pub const PAIR_KEY_SEPARATOR: &str = "__";

/// Clamp a value to `[0, 1]`, mapping NaN to 0.
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Order-independent identifier for an unordered pair of agents.
///
/// `PairKey::new("b", "a") == PairKey::new("a", "b")`, so a relationship is
/// stored once no matter which agent's perspective it is looked up from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairKey(String);

impl PairKey {
    /// Build the canonical key for two agent ids
    pub fn new(agent_a: &str, agent_b: &str) -> Self {
        let (first, second) = canonical_order(agent_a, agent_b);
        Self(format!("{}{}{}", first, PAIR_KEY_SEPARATOR, second))
    }

    /// The key as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Both agent ids, in canonical order
    pub fn agents(&self) -> (&str, &str) {
        self.0
            .split_once(PAIR_KEY_SEPARATOR)
            .unwrap_or((self.0.as_str(), ""))
    }

    /// Whether the pair includes the given agent
    pub fn contains(&self, agent: &str) -> bool {
        let (a, b) = self.agents();
        a == agent || b == agent
    }

    /// The counterpart of `agent` in this pair
    pub fn other(&self, agent: &str) -> Option<&str> {
        match self.agents() {
            (a, b) if a == agent => Some(b),
            (a, b) if b == agent => Some(a),
            _ => None,
        }
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn canonical_order<'a>(agent_a: &'a str, agent_b: &'a str) -> (&'a str, &'a str) {
    if agent_a <= agent_b {
        (agent_a, agent_b)
    } else {
        (agent_b, agent_a)
    }
}

/// The four bounded scalars describing a pairwise bond
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RelationshipMetrics {
    pub trust: f64,
    pub respect: f64,
    pub affection: f64,
    /// Only ever grows with contact
    pub familiarity: f64,
}

impl Default for RelationshipMetrics {
    /// Neutral standing between two agents who have just met
    fn default() -> Self {
        Self {
            trust: 0.5,
            respect: 0.5,
            affection: 0.5,
            familiarity: 0.0,
        }
    }
}

impl RelationshipMetrics {
    /// Create metrics, clamping every value to `[0, 1]`
    pub fn new(trust: f64, respect: f64, affection: f64, familiarity: f64) -> Self {
        Self {
            trust,
            respect,
            affection,
            familiarity,
        }
        .clamped()
    }

    /// Copy with every value clamped to `[0, 1]`
    pub fn clamped(self) -> Self {
        Self {
            trust: clamp_unit(self.trust),
            respect: clamp_unit(self.respect),
            affection: clamp_unit(self.affection),
            familiarity: clamp_unit(self.familiarity),
        }
    }

    /// Mean of trust, respect and affection
    pub fn average_positive(&self) -> f64 {
        (self.trust + self.respect + self.affection) / 3.0
    }
}

/// Change computed for each metric by one event, before clamping
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetricDeltas {
    pub trust: f64,
    pub respect: f64,
    pub affection: f64,
    pub familiarity: f64,
}

/// A logged interaction that moved the relationship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipEvent {
    pub id: String,
    pub kind: EventKind,
    pub description: String,
    pub metric_deltas: MetricDeltas,
    pub timestamp: DateTime<Utc>,
}

impl RelationshipEvent {
    /// Create a new relationship event stamped now
    pub fn new(kind: EventKind, description: impl Into<String>, metric_deltas: MetricDeltas) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            description: description.into(),
            metric_deltas,
            timestamp: Utc::now(),
        }
    }
}

/// Qualitative classification of a relationship. Several may apply at once.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Acquaintance,
    Friendship,
    Rivalry,
    Professional,
    Mentorship,
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationshipType::Acquaintance => write!(f, "acquaintance"),
            RelationshipType::Friendship => write!(f, "friendship"),
            RelationshipType::Rivalry => write!(f, "rivalry"),
            RelationshipType::Professional => write!(f, "professional"),
            RelationshipType::Mentorship => write!(f, "mentorship"),
        }
    }
}

/// Direction the relationship moved on its latest interaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStatus {
    Growing,
    Declining,
    Stable,
    /// Trust has collapsed. The record is kept for history.
    Broken,
}

impl std::fmt::Display for RelationshipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationshipStatus::Growing => write!(f, "growing"),
            RelationshipStatus::Declining => write!(f, "declining"),
            RelationshipStatus::Stable => write!(f, "stable"),
            RelationshipStatus::Broken => write!(f, "broken"),
        }
    }
}

/// Direction of relationship trends over recent events
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Improving => write!(f, "improving"),
            TrendDirection::Stable => write!(f, "stable"),
            TrendDirection::Declining => write!(f, "declining"),
        }
    }
}

/// Persistent relationship between two agents.
///
/// One record exists per unordered pair; agent ids are stored in canonical
/// order and `id` is the pair key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRelationship {
    pub id: String,
    pub agent_id_a: String,
    pub agent_id_b: String,
    /// Never empty; defaults to `{acquaintance}`
    pub type_tags: BTreeSet<RelationshipType>,
    pub metrics: RelationshipMetrics,
    pub status: RelationshipStatus,
    pub interaction_count: u64,
    pub first_meeting_at: DateTime<Utc>,
    pub last_interaction_at: DateTime<Utc>,
    /// Bounded log, oldest first
    pub events: VecDeque<RelationshipEvent>,
}

impl AgentRelationship {
    /// Create a relationship for two agents who have just met, with default metrics
    pub fn new(agent_a: impl AsRef<str>, agent_b: impl AsRef<str>) -> Self {
        Self::with_metrics(agent_a, agent_b, RelationshipMetrics::default())
    }

    /// Create a relationship starting from the given metrics
    pub fn with_metrics(
        agent_a: impl AsRef<str>,
        agent_b: impl AsRef<str>,
        metrics: RelationshipMetrics,
    ) -> Self {
        let key = PairKey::new(agent_a.as_ref(), agent_b.as_ref());
        let (first, second) = key.agents();
        let now = Utc::now();
        let metrics = metrics.clamped();

        let mut type_tags = BTreeSet::new();
        type_tags.insert(RelationshipType::Acquaintance);

        let mut events = VecDeque::new();
        events.push_back(RelationshipEvent::new(
            EventKind::FirstMeeting,
            format!("{} and {} met", first, second),
            MetricDeltas::default(),
        ));

        Self {
            id: key.to_string(),
            agent_id_a: first.to_string(),
            agent_id_b: second.to_string(),
            type_tags,
            metrics,
            status: RelationshipStatus::Stable,
            interaction_count: 0,
            first_meeting_at: now,
            last_interaction_at: now,
            events,
        }
    }

    /// Canonical key of this relationship
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(&self.agent_id_a, &self.agent_id_b)
    }

    /// Get the other agent in this relationship
    pub fn other_agent(&self, agent: &str) -> Option<&str> {
        if self.agent_id_a == agent {
            Some(&self.agent_id_b)
        } else if self.agent_id_b == agent {
            Some(&self.agent_id_a)
        } else {
            None
        }
    }

    /// Check if this relationship involves the given agent
    pub fn involves(&self, agent: &str) -> bool {
        self.agent_id_a == agent || self.agent_id_b == agent
    }

    /// Whether the relationship carries the given tag
    pub fn has_tag(&self, tag: RelationshipType) -> bool {
        self.type_tags.contains(&tag)
    }

    /// Append an event, evicting the oldest entries beyond `max_events`
    pub fn push_event(&mut self, event: RelationshipEvent, max_events: usize) {
        self.events.push_back(event);
        while self.events.len() > max_events.max(1) {
            self.events.pop_front();
        }
    }

    /// The `n` most recent events, newest first
    pub fn recent_events(&self, n: usize) -> impl Iterator<Item = &RelationshipEvent> {
        self.events.iter().rev().take(n)
    }
}
