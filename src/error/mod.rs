//! Error handling for the ED flow crate.

pub mod util;

use std::io;
use std::path::{Path, PathBuf};

/// Specialized error type for generation, loading and reporting
#[derive(Debug, thiserror::Error)]
pub enum EdFlowError {
    /// Error opening, reading or writing a file
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Error reading or writing delimited text
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error serializing a report
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error parsing a configuration file
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Invalid generator or dashboard parameters
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Input table does not carry the expected columns
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// A value is not one of the accepted labels or outside its bounds
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A data row could not be converted into a visit
    #[error("Parse error at row {row}: {message}")]
    ParseError {
        /// 1-based data row (header excluded)
        row: usize,
        /// What was wrong with the row
        message: String,
    },

    /// File-level failure with path context
    #[error("{message}: {}", path.display())]
    FileError {
        /// Path of the file involved
        path: PathBuf,
        /// Description of the failure
        message: String,
        /// Underlying IO error, if any
        #[source]
        source: Option<io::Error>,
    },
}

impl EdFlowError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::SchemaError(message.into())
    }

    /// Create an invalid-value error
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue(message.into())
    }

    /// Create a row-level parse error
    pub fn parse(row: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            row,
            message: message.into(),
        }
    }

    /// Create a file error without an underlying cause
    pub fn file(path: &Path, message: impl Into<String>) -> Self {
        Self::FileError {
            path: path.to_path_buf(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a file error wrapping an IO error
    pub fn file_with_source(path: &Path, message: impl Into<String>, source: io::Error) -> Self {
        Self::FileError {
            path: path.to_path_buf(),
            message: message.into(),
            source: Some(source),
        }
    }
}

/// Result type for ED flow operations
pub type Result<T> = std::result::Result<T, EdFlowError>;
