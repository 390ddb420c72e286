//! Error handling for the ambient layer of Settle Core.
//!
//! The settle primitives never fail on their own: task failures are data and
//! are reported through [`SettleResult`](crate::settle::SettleResult) or
//! bundled into an [`AggregateError`](crate::aggregate::AggregateError).
//! This module covers the remaining fallible surfaces:
//! - Configuration loading
//! - Logging subscriber installation
//!
//! # Usage
//!
//! ```rust,ignore
//! use settle_core::{config::Config, Result};
//!
//! fn bootstrap() -> Result<()> {
//!     let config = Config::load()?;
//!     settle_core::telemetry::init_logging(&config.logging)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// Result Type Alias
// ═══════════════════════════════════════════════════════════════════════════════

/// A specialized Result type for Settle Core operations.
pub type Result<T> = std::result::Result<T, Error>;

// ═══════════════════════════════════════════════════════════════════════════════
// Main Error Type
// ═══════════════════════════════════════════════════════════════════════════════

/// The error type for configuration and telemetry setup.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration could not be loaded or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A log filter directive could not be parsed.
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),

    /// The global tracing subscriber could not be installed.
    #[error("logging initialization failed: {0}")]
    Logging(String),
}

impl Error {
    /// Get the error category for grouping.
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration",
            Self::InvalidFilter(_) | Self::Logging(_) => "telemetry",
        }
    }
}

impl From<tracing_subscriber::filter::ParseError> for Error {
    fn from(error: tracing_subscriber::filter::ParseError) -> Self {
        Self::InvalidFilter(error.to_string())
    }
}

impl From<tracing_subscriber::util::TryInitError> for Error {
    fn from(error: tracing_subscriber::util::TryInitError) -> Self {
        Self::Logging(error.to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_conversion() {
        let error: Error = config::ConfigError::NotFound("logging.level".to_string()).into();
        assert!(matches!(error, Error::Config(_)));
        assert_eq!(error.category(), "configuration");
        assert!(error.to_string().starts_with("configuration error:"));
    }

    #[test]
    fn test_filter_error_conversion() {
        let parse_error = tracing_subscriber::EnvFilter::try_new("settle=notalevel").unwrap_err();
        let error = Error::from(parse_error);
        assert!(matches!(error, Error::InvalidFilter(_)));
        assert_eq!(error.category(), "telemetry");
    }

    #[test]
    fn test_error_display() {
        let error = Error::Logging("a global default trace dispatcher has already been set".into());
        let display = format!("{}", error);
        assert!(display.contains("logging initialization failed"));
        assert!(display.contains("already been set"));
    }
}
