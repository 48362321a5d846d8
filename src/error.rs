use thiserror::Error;

use crate::collectors::Tool;

/// Errors surfaced by the sampling operations and the binary.
///
/// Parse-level problems never show up here: malformed lines are skipped by
/// the parsers, which have no error path.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// The external reporting tool could not be launched or its output could
    /// not be collected.
    #[error("failed to run {tool}: {detail}")]
    ExecutionFailed { tool: Tool, detail: String },

    /// Error from terminal or log-file I/O
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error encoding a report as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MonitorError {
    pub fn execution_failed(tool: Tool, detail: impl Into<String>) -> Self {
        MonitorError::ExecutionFailed { tool, detail: detail.into() }
    }
}

pub type Result<T> = std::result::Result<T, MonitorError>;
