//! Core error types for pomotick-core.
//!
//! Illegal timer transitions are not errors: the engine rejects them as
//! silent no-ops. What remains is configuration I/O and the completion
//! notifier, which is never allowed to affect timer state.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomotick-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Notification errors
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// Session type parse errors
    #[error(transparent)]
    ParseSessionType(#[from] ParseSessionTypeError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not determine or create the configuration directory
    #[error("Configuration directory unavailable at {path}: {source}")]
    DirUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors raised by a completion notifier.
///
/// These are logged and dropped by the runtime.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The notification backend is not available on this system
    #[error("notification backend unavailable: {0}")]
    Unavailable(String),

    /// Delivering the notification failed
    #[error("failed to deliver notification: {0}")]
    DeliveryFailed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown session type '{0}' (expected work, short_break or long_break)")]
pub struct ParseSessionTypeError(pub String);

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
