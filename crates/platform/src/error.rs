//! Error types for command execution and probe parsing.

use std::time::Duration;

use thiserror::Error;

/// An external command could not be run to completion.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("failed to run `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited unsuccessfully ({status})")]
    Status { program: String, status: String },

    #[error("`{program}` did not finish within {timeout:?}")]
    TimedOut { program: String, timeout: Duration },
}

impl ExecutionError {
    pub fn program(&self) -> &str {
        match self {
            ExecutionError::Launch { program, .. }
            | ExecutionError::Status { program, .. }
            | ExecutionError::TimedOut { program, .. } => program,
        }
    }
}

/// A probe failed to produce a reading.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error("malformed output from `{program}`: {source}")]
    Parse {
        program: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
