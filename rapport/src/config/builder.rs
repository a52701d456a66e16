//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use crate::relationships::RelationshipMetrics;
use crate::sentiment::KeywordSets;
use std::path::Path;

/// Builder for creating RapportConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: RapportConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: RapportConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: RapportConfig) -> Self {
        Self { config }
    }

    /// Replace the sentiment keyword sets (e.g. for a localized vocabulary).
    pub fn with_keywords(mut self, keywords: KeywordSets) -> Self {
        self.config.sentiment.keywords = keywords;
        self
    }

    /// Set the maximum number of events retained per relationship.
    pub fn with_max_events(mut self, max_events: usize) -> Self {
        self.config.relationships.max_events = max_events;
        self
    }

    /// Select the diminishing-returns strategy.
    pub fn with_dampening(mut self, mode: DampeningMode) -> Self {
        self.config.relationships.dampening = mode;
        self
    }

    /// Set the metrics a brand-new relationship starts from.
    pub fn with_initial_metrics(mut self, metrics: RelationshipMetrics) -> Self {
        self.config.relationships.initial_metrics = metrics;
        self
    }

    /// Set the compatibility subscore weights.
    pub fn with_score_weights(mut self, weights: ScoreWeights) -> Self {
        self.config.compatibility.weights = weights;
        self
    }

    /// Set the constant availability subscore.
    pub fn with_availability(mut self, availability: f64) -> Self {
        self.config.compatibility.availability = availability;
        self
    }

    /// Set the default number of mentors returned by ranking.
    pub fn with_default_top_k(mut self, k: usize) -> Self {
        self.config.compatibility.default_top_k = k;
        self
    }

    /// Configure the persistence retry policy.
    pub fn with_retry_policy(mut self, retries: u32, delay_ms: u64, best_effort_fallback: bool) -> Self {
        self.config.persistence = PersistenceConfig {
            transaction_retries: retries,
            retry_delay_ms: delay_ms,
            best_effort_fallback,
        };
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self.config.logging.stdout = false;
        self
    }

    /// Use default logging configuration (console output at Info level)
    pub fn with_default_logging(mut self) -> Self {
        self.config.logging.level = LogLevel::Info;
        self.config.logging.format = LogFormat::Json;
        self.config.logging.file = None;
        self.config.logging.stdout = true;
        self
    }

    /// Create a configuration for development with debug-level logging.
    pub fn development() -> Self {
        Self::new()
            .with_log_level(LogLevel::Debug)
            .with_log_format(LogFormat::Pretty)
    }

    /// Create a configuration for automated tests.
    ///
    /// Same engine constants as production, quiet logging, and no delay
    /// between transaction retries.
    pub fn testing() -> Self {
        Self::new()
            .with_log_level(LogLevel::Warn)
            .with_log_format(LogFormat::Compact)
            .with_retry_policy(1, 0, true)
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<RapportConfig> {
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
