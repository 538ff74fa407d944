//! External command execution.

use std::future::Future;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tracing::trace;

use crate::error::ExecutionError;

/// Runs a named external program and returns its standard output.
///
/// Probes only talk to the system through this trait, so tests can swap in
/// canned output.
pub trait CommandRunner: Send + Sync {
    fn run(
        &self,
        program: &str,
        args: &[&str],
    ) -> impl Future<Output = Result<String, ExecutionError>> + Send;
}

/// Runs commands as child processes, killing any that outlive the timeout.
#[derive(Debug, Clone)]
pub struct SystemCommand {
    timeout: Duration,
}

impl SystemCommand {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SystemCommand {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

impl CommandRunner for SystemCommand {
    async fn run(&self, program: &str, args: &[&str]) -> Result<String, ExecutionError> {
        let started = Instant::now();

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExecutionError::Launch {
                program: program.to_string(),
                source,
            })?;

        // Dropping the pending future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| ExecutionError::Launch {
                program: program.to_string(),
                source,
            })?,
            Err(_) => {
                return Err(ExecutionError::TimedOut {
                    program: program.to_string(),
                    timeout: self.timeout,
                })
            }
        };

        if !output.status.success() {
            return Err(ExecutionError::Status {
                program: program.to_string(),
                status: output.status.to_string(),
            });
        }

        trace!(
            program,
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = output.stdout.len(),
            "Command finished"
        );

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_launch_error() {
        let runner = SystemCommand::default();
        let err = runner
            .run("battmon-definitely-not-a-real-binary", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ExecutionError::Launch { .. }));
        assert_eq!(err.program(), "battmon-definitely-not-a-real-binary");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_stdout() {
        let runner = SystemCommand::default();
        let out = runner.run("echo", &["\"Serial\" = \"ABC\""]).await.unwrap();
        assert_eq!(out.trim(), "\"Serial\" = \"ABC\"");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_status_error() {
        let runner = SystemCommand::default();
        let err = runner.run("false", &[]).await.unwrap_err();
        assert!(matches!(err, ExecutionError::Status { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_command_times_out() {
        let runner = SystemCommand::new(Duration::from_millis(100));
        let err = runner.run("sleep", &["5"]).await.unwrap_err();
        assert!(matches!(err, ExecutionError::TimedOut { .. }));
    }
}
