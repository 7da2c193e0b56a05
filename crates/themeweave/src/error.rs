//! Error types for theme resolution.
//!
//! [`ThemeError`] is what every [`ThemeManager`](crate::ThemeManager) operation
//! returns. The manager itself raises exactly one error,
//! [`ThemeError::NotInitialized`]; everything else is propagated from the token
//! engine ([`EngineError`]) or from configuration loading ([`ConfigError`])
//! without being caught or rewritten.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`ThemeManager`](crate::ThemeManager) operations.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// An operation that needs a resolved theme ran before the first
    /// successful `apply`.
    #[error("theme is not initialized: {operation} requires a successfully applied configuration")]
    NotInitialized {
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// The token engine rejected the configuration.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The configuration could not be loaded or normalized.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors reported by a [`TokenEngine`](crate::engine::TokenEngine).
#[derive(Debug, Error)]
pub enum EngineError {
    /// A token value has the wrong type or cannot be parsed.
    #[error("invalid value for token '{token}': {reason}")]
    InvalidToken {
        /// Token name.
        token: String,
        /// What was wrong with the value.
        reason: String,
    },

    /// A derivation algorithm failed.
    #[error("algorithm '{algorithm}' failed: {message}")]
    Algorithm {
        /// Tag of the failing algorithm.
        algorithm: String,
        /// Failure description.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for [`EngineError::InvalidToken`].
    pub fn invalid_token(token: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::InvalidToken {
            token: token.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading, parsing or normalizing a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A serialized algorithm tag does not name a registered algorithm.
    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    /// A custom algorithm tried to register under a built-in or taken name.
    #[error("algorithm name '{0}' is already registered")]
    DuplicateAlgorithm(String),

    /// The file extension does not map to a supported format.
    #[error("unsupported theme config format: {}", path.display())]
    UnsupportedFormat {
        /// The offending file.
        path: PathBuf,
    },

    /// Refresh was requested on a config that was not loaded from a file.
    #[error("cannot refresh: theme config has no source file")]
    NoSource,

    /// The config file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed.
    #[error("invalid JSON theme config: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization failed.
    #[error("invalid YAML theme config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for theme operations.
pub type Result<T> = std::result::Result<T, ThemeError>;
