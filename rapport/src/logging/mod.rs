//! Structured logging infrastructure for Rapport.
//!
//! This module provides a configurable logging system based on the tracing crate,
//! supporting different output formats, log levels, and optional file output.


use crate::config::{LogFormat, LogLevel, LoggingConfig};
use std::path::Path;
use std::sync::OnceLock;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};

/// Keeps the non-blocking file writer alive for the lifetime of the process.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Error type for logging operations
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing log level
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Error in subscriber setup
    #[error("Subscriber error: {0}")]
    SubscriberError(String),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for LogError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        LogError::SubscriberError(err.to_string())
    }
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Installs a fmt subscriber on stdout or on the configured file.
/// Evaluates to the install result; it never returns from the caller.
macro_rules! install_subscriber {
    ($builder:expr, $config:expr) => {{
        let builder = $builder;
        let install = || -> Result<()> {
            match &$config.file {
                Some(file_path) if !$config.stdout => {
                    let (writer, guard) = create_non_blocking_file(file_path)?;
                    builder.with_writer(writer).try_init()?;
                    let _ = FILE_GUARD.set(guard);
                }
                Some(_) => {
                    builder.try_init()?;
                    tracing::warn!("Configured for stdout; file logging ignored");
                }
                None if $config.stdout => builder.try_init()?,
                None => {}
            }
            Ok(())
        };
        install()
    }};
}

/// Initialize the logging system with the given configuration.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let level = log_level_to_level(config.level);

    let result: Result<()> = match config.format {
        LogFormat::Json => install_subscriber!(
            tracing_subscriber::fmt()
                .json()
                .with_max_level(level)
                .with_target(true)
                .with_line_number(true)
                .with_thread_ids(true),
            config
        ),
        LogFormat::Compact => install_subscriber!(
            tracing_subscriber::fmt()
                .compact()
                .with_max_level(level)
                .with_target(true)
                .with_line_number(true),
            config
        ),
        LogFormat::Pretty | LogFormat::Default => install_subscriber!(
            tracing_subscriber::fmt()
                .pretty()
                .with_max_level(level)
                .with_target(true)
                .with_line_number(true)
                .with_thread_ids(true),
            config
        ),
    };

    // If the error is "already set", ignore it
    match result {
        Err(LogError::SubscriberError(message)) if is_already_set(&message) => Ok(()),
        other => other,
    }
}

fn is_already_set(message: &str) -> bool {
    message.contains("already")
}

/// Create a non-blocking file writer.
fn create_non_blocking_file(path: impl AsRef<Path>) -> Result<(NonBlocking, WorkerGuard)> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = tracing_appender::rolling::never(
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new(".")),
        path.file_name().unwrap_or_default(),
    );

    Ok(tracing_appender::non_blocking(file_appender))
}

/// Parse a log level string into a LogLevel enum.
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    level.parse().map_err(|_| LogError::InvalidLogLevel(level.to_string()))
}

/// Convert a LogLevel to a tracing::Level.
pub fn log_level_to_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}

/// Convert a tracing::Level to a LogLevel enum.
pub fn level_to_log_level(level: Level) -> LogLevel {
    match level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}
