//! Error handling for GroupWarden
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

use crate::transport::TransportError;

/// Main error type for GroupWarden application
#[derive(Error, Debug)]
pub enum GroupWardenError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Command already exists: {0}")]
    CommandExists(String),

    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Dashboard rejected request: {0}")]
    Dashboard(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Result type alias for GroupWarden operations
pub type Result<T> = std::result::Result<T, GroupWardenError>;

impl GroupWardenError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            GroupWardenError::Transport(e) => !matches!(e, TransportError::LoggedOut),
            GroupWardenError::Config(_) => true,
            GroupWardenError::Settings(_) => false,
            GroupWardenError::CommandExists(_) => false,
            GroupWardenError::CommandNotFound(_) => false,
            GroupWardenError::Http(_) => true,
            GroupWardenError::Dashboard(_) => true,
            GroupWardenError::Serialization(_) => false,
            GroupWardenError::Io(_) => true,
            GroupWardenError::UrlParse(_) => false,
            GroupWardenError::InvalidInput(_) => false,
            GroupWardenError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GroupWardenError::Settings(_) => ErrorSeverity::Critical,
            GroupWardenError::Transport(TransportError::LoggedOut) => ErrorSeverity::Critical,
            GroupWardenError::Config(_) => ErrorSeverity::Warning,
            GroupWardenError::Http(_) => ErrorSeverity::Warning,
            GroupWardenError::Dashboard(_) => ErrorSeverity::Warning,
            GroupWardenError::InvalidInput(_) => ErrorSeverity::Info,
            GroupWardenError::CommandExists(_) => ErrorSeverity::Info,
            GroupWardenError::CommandNotFound(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
