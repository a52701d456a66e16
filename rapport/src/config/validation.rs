//! Configuration validation utilities.
//!
//! This module provides validation functions for configuration values.

use super::ConfigError;
use super::models::*;

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Validate the entire configuration.
pub fn validate_config(config: &RapportConfig) -> Result<(), ConfigError> {
    validate_sentiment_config(&config.sentiment)?;
    validate_relationship_config(&config.relationships)?;
    validate_compatibility_config(&config.compatibility)?;

    Ok(())
}

/// Validate sentiment configuration.
fn validate_sentiment_config(config: &SentimentConfig) -> Result<(), ConfigError> {
    let keywords = &config.keywords;
    for (name, list) in [
        ("positive", &keywords.positive),
        ("negative", &keywords.negative),
        ("helping", &keywords.helping),
        ("conflict", &keywords.conflict),
    ] {
        if list.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "The {} keyword set cannot be empty",
                name
            )));
        }
        if list.iter().any(|word| word.trim().is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "The {} keyword set contains a blank entry",
                name
            )));
        }
    }

    Ok(())
}

/// Validate relationship configuration.
fn validate_relationship_config(config: &RelationshipConfig) -> Result<(), ConfigError> {
    if config.max_events == 0 {
        return Err(ConfigError::ValidationError(
            "max_events must be at least 1".to_string(),
        ));
    }

    if config.trend_window == 0 {
        return Err(ConfigError::ValidationError(
            "trend_window must be at least 1".to_string(),
        ));
    }

    if !(0.0..=1.0).contains(&config.familiarity_step) {
        return Err(ConfigError::ValidationError(format!(
            "familiarity_step must be in [0, 1], got {}",
            config.familiarity_step
        )));
    }

    let metrics = &config.initial_metrics;
    for (name, value) in [
        ("trust", metrics.trust),
        ("respect", metrics.respect),
        ("affection", metrics.affection),
        ("familiarity", metrics.familiarity),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::ValidationError(format!(
                "initial {} must be in [0, 1], got {}",
                name, value
            )));
        }
    }

    Ok(())
}

/// Validate compatibility configuration.
fn validate_compatibility_config(config: &CompatibilityConfig) -> Result<(), ConfigError> {
    let weights = &config.weights;
    for (name, value) in [
        ("skill_match", weights.skill_match),
        ("personality_fit", weights.personality_fit),
        ("communication_style", weights.communication_style),
        ("availability", weights.availability),
    ] {
        if value < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "weight {} cannot be negative, got {}",
                name, value
            )));
        }
    }

    if (weights.total() - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(ConfigError::ValidationError(format!(
            "compatibility weights must sum to 1.0, got {}",
            weights.total()
        )));
    }

    if !(0.0..=1.0).contains(&config.availability) {
        return Err(ConfigError::ValidationError(format!(
            "availability must be in [0, 1], got {}",
            config.availability
        )));
    }

    if config.default_top_k == 0 {
        return Err(ConfigError::ValidationError(
            "default_top_k must be at least 1".to_string(),
        ));
    }

    Ok(())
}
