//! Error types for the application.

use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Protocol-related errors (IRC line parsing).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Empty line")]
    EmptyLine,

    #[error("Missing command in line: {line}")]
    MissingCommand { line: String },
}

/// Format template errors, raised when a candidate template is validated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Unknown placeholder '{{{placeholder}}}' (use {{prefix}} and {{msg}})")]
    InvalidTemplate { placeholder: String },

    #[error("Malformed template at byte {position}: {reason}")]
    Malformed { position: usize, reason: String },
}

/// Identifier registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("'{identifier}' is not a known identifier")]
    NotFound { identifier: String },

    #[error("Identifier must not be empty")]
    EmptyIdentifier,
}

/// Persistence errors for the key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access store '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode or decode store data: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for protocol operations.
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;

/// Result type alias for template validation.
pub type TemplateResult<T> = std::result::Result<T, TemplateError>;

/// Result type alias for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
