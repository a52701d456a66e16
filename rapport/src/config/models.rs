//! Configuration model definitions.
//!
//! This module contains the configuration structures for all Rapport components.

use crate::relationships::RelationshipMetrics;
use crate::sentiment::KeywordSets;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Main configuration structure for Rapport.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RapportConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Interaction classification configuration
    pub sentiment: SentimentConfig,

    /// Relationship evolution configuration
    pub relationships: RelationshipConfig,

    /// Mentor/mentee compatibility configuration
    pub compatibility: CompatibilityConfig,

    /// Persistence retry policy
    pub persistence: PersistenceConfig,
}

/// Configuration for interaction classification.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SentimentConfig {
    /// Keyword lists used to count hits in the interaction text
    pub keywords: KeywordSets,
}

/// Configuration for relationship evolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipConfig {
    /// Maximum number of events kept per relationship (oldest evicted first)
    pub max_events: usize,

    /// Familiarity gained on every interaction, regardless of sentiment
    pub familiarity_step: f64,

    /// How diminishing returns are applied to trust/respect/affection deltas
    pub dampening: DampeningMode,

    /// Metrics assigned to a relationship when two agents first meet
    pub initial_metrics: RelationshipMetrics,

    /// Number of most recent events considered by the trend calculation
    pub trend_window: usize,
}

impl Default for RelationshipConfig {
    fn default() -> Self {
        Self {
            max_events: 10,
            familiarity_step: 0.05,
            dampening: DampeningMode::Uniform,
            initial_metrics: RelationshipMetrics::default(),
            trend_window: 5,
        }
    }
}

/// Diminishing-returns strategy for metric deltas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DampeningMode {
    /// `delta * (1 - current * 0.5)` for both positive and negative deltas.
    ///
    /// A metric near 1 resists drops as much as gains; a metric near 0 barely
    /// dampens a further negative delta.
    #[default]
    Uniform,

    /// Resistance grows toward whichever bound the delta pushes against:
    /// gains use `1 - current * 0.5`, losses use `1 - (1 - current) * 0.5`.
    BoundSymmetric,
}

impl fmt::Display for DampeningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DampeningMode::Uniform => write!(f, "uniform"),
            DampeningMode::BoundSymmetric => write!(f, "bound_symmetric"),
        }
    }
}

/// Configuration for mentor/mentee compatibility scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompatibilityConfig {
    /// Weights of each subscore in the overall score
    pub weights: ScoreWeights,

    /// Availability subscore. Scheduling data is not modelled, so this is a
    /// constant supplied by the caller.
    pub availability: f64,

    /// Number of mentors returned by ranking when no `k` is given
    pub default_top_k: usize,

    /// Maximum number of recommended focus areas
    pub max_recommended_focus: usize,
}

impl Default for CompatibilityConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            availability: 0.7,
            default_top_k: 5,
            max_recommended_focus: 3,
        }
    }
}

/// Weights of the compatibility subscores. Must sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoreWeights {
    pub skill_match: f64,
    pub personality_fit: f64,
    pub communication_style: f64,
    pub availability: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skill_match: 0.35,
            personality_fit: 0.25,
            communication_style: 0.25,
            availability: 0.15,
        }
    }
}

impl ScoreWeights {
    /// Sum of all weights
    pub fn total(&self) -> f64 {
        self.skill_match + self.personality_fit + self.communication_style + self.availability
    }
}

/// Retry policy for relationship writes through the storage port.
///
/// A write first goes through the store's transactional read-modify-write.
/// Failed transactions are retried `transaction_retries` times; after that,
/// if `best_effort_fallback` is set, a plain read-then-put is performed and a
/// warning is surfaced to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Number of retries after the first failed transaction
    pub transaction_retries: u32,

    /// Delay between transaction attempts, in milliseconds
    pub retry_delay_ms: u64,

    /// Fall back to a non-transactional write once retries are exhausted
    pub best_effort_fallback: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            transaction_retries: 1,
            retry_delay_ms: 0,
            best_effort_fallback: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,

    /// Log format
    pub format: LogFormat,

    /// File to log to (if any)
    pub file: Option<PathBuf>,

    /// Whether to log to stdout
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Default,
            file: None,
            stdout: true,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level
    Trace,

    /// Debug level
    Debug,

    /// Info level
    Info,

    /// Warn level
    Warn,

    /// Error level
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Default format
    Default,

    /// JSON format
    Json,

    /// Compact format
    Compact,

    /// Pretty format
    Pretty,
}
