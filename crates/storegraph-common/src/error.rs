//! Error types and utilities for storegraph

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for storegraph operations
pub type Result<T> = std::result::Result<T, StoregraphError>;

/// Main error type for storegraph operations
#[derive(Error, Debug)]
pub enum StoregraphError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset loading errors (unreadable source file, malformed input)
    #[error("Dataset error: {message}{}", .path.as_ref().map(|p| format!(" ({})", p.display())).unwrap_or_default())]
    Dataset {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A required dataset column is absent
    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors for configuration or scenario data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StoregraphError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new dataset error
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset {
            message: msg.into(),
            path: None,
            source: None,
        }
    }

    /// Create a new dataset error carrying the attempted path
    pub fn dataset_at(msg: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Dataset {
            message: msg.into(),
            path: Some(path.into()),
            source: None,
        }
    }

    /// Create a new dataset error with path and source
    pub fn dataset_with_source(
        msg: impl Into<String>,
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Dataset {
            message: msg.into(),
            path: Some(path.into()),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new missing-column error
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error for a specific field
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Whether this error should terminate the run (spec: fatal errors)
    pub fn is_fatal(&self) -> bool {
        // Every surfaced error is fatal for a single-pass batch run; cell
        // level parse failures never become errors in the first place.
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoregraphError::config("bad scenario");
        assert_eq!(err.to_string(), "Configuration error: bad scenario");

        let err = StoregraphError::missing_column("Installs");
        assert_eq!(err.to_string(), "Missing required column: Installs");
    }

    #[test]
    fn test_dataset_error_includes_path() {
        let err = StoregraphError::dataset_at("file not found", "/data/apps.csv");
        let msg = err.to_string();
        assert!(msg.contains("file not found"));
        assert!(msg.contains("/data/apps.csv"));
    }

    #[test]
    fn test_error_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = StoregraphError::config_with_source("cannot read config", io);
        assert!(std::error::Error::source(&err).is_some());
    }
}
