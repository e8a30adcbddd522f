//! Error types for report generation

use std::path::PathBuf;

use thiserror::Error;

/// Errors that fail a single report request
///
/// Provider failures are not listed here: they are recovered locally by
/// falling back to the templated report (see [`crate::collaborator`]).
#[derive(Error, Debug)]
pub enum CoreError {
    /// Theme name not present in the registry
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// Prompt template references a field the event details do not provide
    #[error("Prompt template placeholder has no value: {{{0}}}")]
    MissingTemplatePlaceholder(String),

    /// Prompt template file could not be read
    #[error("Failed to read prompt template {path}: {source}")]
    TemplateIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Event details file could not be parsed
    #[error("Invalid event details: {0}")]
    Details(String),

    /// Error reading files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
