//! Error handling module for aixsuma
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Every failure is fatal for the run: errors travel up to the caller, which
//! folds them into the `RunReport` and decides the exit status.

use thiserror::Error;

/// Main error type for aixsuma
#[derive(Error, Debug)]
pub enum SumaError {
    /// IO errors (directories, metadata files, process spawning)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (bad oslevel, bad schedule, missing parameter)
    #[error("Bad parameter: {0}")]
    Config(String),

    /// External command exited with a nonzero status
    #[error("{message}")]
    Command {
        message: String,
        stdout: String,
        stderr: String,
    },

    /// Edit with a malformed schedule; nothing was run
    #[error("Suma edit command '{command}' failed {source}")]
    Schedule {
        command: String,
        source: crate::schedule::BadScheduleTime,
    },

    /// Metadata could not be fetched or did not contain an SP version
    #[error("{0}")]
    Metadata(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Update flow state errors
    #[error("State error: {0}")]
    State(String),
}

/// Result type alias for aixsuma operations
pub type Result<T> = std::result::Result<T, SumaError>;

impl SumaError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a command failure carrying the captured output
    pub fn command(
        msg: impl Into<String>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::Command {
            message: msg.into(),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Create a metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }

    /// Captured (stdout, stderr) of the failing command, if any
    pub fn captured_output(&self) -> Option<(&str, &str)> {
        match self {
            Self::Command { stdout, stderr, .. } => Some((stdout, stderr)),
            _ => None,
        }
    }
}
