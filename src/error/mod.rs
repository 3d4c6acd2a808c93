//! Error handling module for ShortX

use thiserror::Error;

/// Main error type for ShortX operations
#[derive(Error, Debug)]
pub enum ShortxError {
    /// Required input file not found
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    /// External tool not present on PATH
    #[error("External tool not found on PATH: {tool}")]
    ToolMissing { tool: String },

    /// External tool exited non-zero
    #[error("{tool} failed with exit code {exit_code:?}: {stderr}")]
    ToolFailed {
        tool: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// External tool exceeded the invocation timeout
    #[error("{tool} timed out after {secs}s")]
    ToolTimeout { tool: String, secs: u64 },

    /// Media probe error
    #[error("Failed to probe media file: {message}")]
    ProbeError { message: String },

    /// Configuration file error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid command-line or request arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for ShortX operations
pub type ShortxResult<T> = std::result::Result<T, ShortxError>;
