//! Common error types for lwai

use thiserror::Error;

/// Common result type for lwai operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors shared by the lwai crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file present but not valid TOML
    #[error("Config file parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Section slug that names no known section
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    /// Record fields do not match the section's record type
    #[error("Invalid {section} record: {source}")]
    InvalidRecord {
        section: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
