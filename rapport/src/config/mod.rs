//! Configuration system for Rapport.
//!
//! This module provides a flexible configuration system that supports loading
//! configuration from multiple sources (files, environment variables, etc.)
//! with proper validation and defaults. Every tunable of the engine lives
//! here, including the sentiment keyword sets, so classification can be
//! tuned or localized without touching control flow.

mod builder;
mod loader;
mod models;
mod validation;

pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use models::*;
pub use validation::validate_config;

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "rapport.toml",
    "rapport.yaml",
    "rapport.yml",
    "rapport.json",
    ".rapport/config.toml",
    ".rapport/config.yaml",
    ".rapport/config.yml",
    ".rapport/config.json",
];

/// Environment variable prefix for Rapport configuration
pub const ENV_PREFIX: &str = "RAPPORT_";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
