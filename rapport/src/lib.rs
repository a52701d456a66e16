//! # Rapport
//!
//! Deterministic social-dynamics scoring for multi-agent systems. Rapport
//! classifies the tone of an interaction between two agents, evolves a
//! persistent relationship between them, derives qualitative labels from that
//! relationship, and scores mentor/mentee compatibility across agent pools.
//!
//! ## Quick Start
//!
//! ```rust
//! use rapport::prelude::*;
//!
//! let descriptor = classify_interaction(
//!     "Thank you so much for your help and support!",
//!     "You're welcome, happy to help",
//! );
//! assert_eq!(descriptor.sentiment, Sentiment::Positive);
//!
//! let relationship = AgentRelationship::new("ada", "grace");
//! let updated = apply_interaction(&relationship, &descriptor, "pairing session");
//! assert!(updated.metrics.trust > relationship.metrics.trust);
//! ```
//!
//! ## Architecture
//!
//! - **Sentiment**: keyword-driven interaction classification, zero inference
//! - **Relationships**: metric evolution, type tags, status and trend
//! - **Mentorship**: compatibility scoring and top-K ranking
//! - **Storage**: a persistence port keyed by canonical pair ids, plus an
//!   in-process implementation
//!
//! Everything except the relationship manager and the storage port is a pure
//! function over immutable inputs.

pub mod config;
pub mod logging;
pub mod mentorship;
pub mod relationships;
pub mod sentiment;
pub mod storage;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ConfigBuilder, LogLevel, RapportConfig};

    pub use crate::sentiment::{
        EventKind, InteractionDescriptor, KeywordSets, Sentiment, SentimentClassifier,
        classify_interaction,
    };

    pub use crate::relationships::{
        AgentRelationship, InteractionOutcome, MetricsEngine, PairKey, RelationshipEvent,
        RelationshipManager, RelationshipMetrics, RelationshipStatus, RelationshipType,
        TrendDirection, apply_interaction, classify_types, trend,
    };

    pub use crate::mentorship::{
        AgentProfile, BigFive, CompatibilityResult, CompatibilityScorer, FocusArea,
        MentorshipSession, rank_mentors, rank_mentors_concurrent, score_compatibility,
    };

    pub use crate::storage::{MemoryRelationshipStore, RelationshipStore};

    pub use crate::{RapportError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for Rapport operations
#[derive(Debug, thiserror::Error)]
pub enum RapportError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// Error raised by the relationship persistence port
    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),

    /// A compatibility request named the same agent as mentor and mentee
    #[error(
        "Agent '{agent_id}' cannot be scored against itself. Pass two distinct agents, or use rank_mentors which skips self-matches"
    )]
    SelfMatch { agent_id: String },

    /// An interaction named the same agent on both sides
    #[error("Agent '{agent_id}' cannot have a relationship with itself")]
    SelfRelationship { agent_id: String },

    /// An agent id is empty or contains the pair key separator
    #[error("Invalid agent id: {0}")]
    InvalidAgentId(String),

    /// An agent profile is unusable (e.g. empty id)
    #[error("Invalid agent profile: {0}")]
    InvalidProfile(String),

    /// No relationship exists for the requested pair
    #[error("No relationship recorded for pair '{pair_key}'")]
    RelationshipNotFound { pair_key: String },

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for RapportError {
    fn from(err: crate::config::ConfigError) -> Self {
        RapportError::Configuration(err.to_string())
    }
}

/// Result type for Rapport operations
pub type Result<T> = std::result::Result<T, RapportError>;

/// Initialize logging from the given configuration and validate it.
///
/// Returns the validated configuration so callers can hand it straight to
/// [`relationships::RelationshipManager::new`] and friends.
///
/// # Examples
///
/// ```rust
/// use rapport::prelude::*;
///
/// fn example() -> Result<()> {
///     let config = ConfigBuilder::testing().build()?;
///     let config = rapport::init(config)?;
///     assert_eq!(config.relationships.max_events, 10);
///     Ok(())
/// }
/// ```
pub fn init(config: config::RapportConfig) -> Result<config::RapportConfig> {
    config::validate_config(&config)?;

    // Ignore errors if tracing is already initialized
    let _ = logging::init(&config.logging);

    Ok(config)
}

/// Initialize Rapport with configuration loaded from the default locations.
///
/// Looks for `rapport.toml` (and friends) in the working directory and the
/// platform config directory, then applies `RAPPORT_` environment overrides.
pub fn init_with_defaults() -> Result<config::RapportConfig> {
    let config = config::ConfigLoader::new()
        .load_default_files()
        .load_env()
        .extract()?;
    init(config)
}
