//! Error handling for the CYD panel
//!
//! This module defines the crate error type and a Result alias used
//! throughout the panel. None of these errors are fatal: the frontend
//! recovers from every variant and stays interactive.

use thiserror::Error;

/// Main error type for panel operations
#[derive(Error, Debug)]
pub enum PanelError {
    /// The host failed to load or store configuration or sensor state
    #[error("Host error: {0}")]
    Host(String),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// A preview page outside 1..=5 was requested
    #[error("Invalid page {0}, expected 1..=5")]
    InvalidPage(u8),

    /// Errors related to channel communication with the host worker
    #[error("Channel error: {0}")]
    Channel(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PanelError>,
    },
}

impl PanelError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PanelError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for PanelError {
    fn from(err: serde_json::Error) -> Self {
        PanelError::Serialization(err.to_string())
    }
}

/// Result type alias for panel operations
pub type Result<T> = std::result::Result<T, PanelError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| PanelError::Io(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| PanelError::Io(e).with_context(f()))
    }
}
