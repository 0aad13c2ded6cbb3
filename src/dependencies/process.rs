use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::trace;

/// Captured output of a process that exited successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

/// Failure at the process boundary.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("command failed: {command}\n{stderr}")]
    Exited {
        command: String,
        /// Exit code, `None` when the process was terminated by a signal.
        code: Option<i32>,
        /// Signal that terminated the process, if any.
        signal: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

impl ProcessError {
    /// Captured stderr of the failed process, empty when it never started.
    pub fn stderr(&self) -> &str {
        match self {
            ProcessError::Spawn { .. } => "",
            ProcessError::Exited { stderr, .. } => stderr,
        }
    }
}

// Dependency to run a rendered command line
#[async_trait]
pub trait CommandRunner {
    /// Run the command line and wait for it to finish.
    ///
    /// A non-zero exit is reported as [`ProcessError::Exited`].
    async fn run(&self, command_line: &str) -> Result<ProcessOutput, ProcessError>;
}

/// Runs command lines through `sh -c`.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command_line: &str) -> Result<ProcessOutput, ProcessError> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(command_line)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ProcessError::Spawn {
                command: command_line.to_string(),
                source,
            })?;

        trace!(status = %output.status, "process finished");

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(ProcessError::Exited {
                command: command_line.to_string(),
                code: output.status.code(),
                signal: signal_of(&output.status),
                stdout,
                stderr,
            });
        }

        Ok(ProcessOutput { stdout, stderr })
    }
}

#[cfg(unix)]
fn signal_of(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn signal_of(_: &ExitStatus) -> Option<i32> {
    None
}


#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shell_runner_captures_output() {
        let output = ShellRunner::new()
            .run("echo out; echo err >&2")
            .await
            .expect("run should succeed");

        assert_eq!(output, ProcessOutput::new("out\n", "err\n"));
    }

    #[tokio::test]
    async fn test_shell_runner_non_zero_exit() {
        let error = ShellRunner::new()
            .run("echo partial; echo broken >&2; exit 5")
            .await
            .expect_err("run should fail");

        match error {
            ProcessError::Exited {
                command,
                code,
                signal,
                stdout,
                stderr,
            } => {
                assert_eq!(command, "echo partial; echo broken >&2; exit 5");
                assert_eq!(code, Some(5));
                assert_eq!(signal, None);
                assert_eq!(stdout, "partial\n");
                assert_eq!(stderr, "broken\n");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_shell_runner_signal() {
        let error = ShellRunner::new()
            .run("kill -9 $$")
            .await
            .expect_err("run should fail");

        assert!(matches!(
            error,
            ProcessError::Exited {
                code: None,
                signal: Some(9),
                ..
            }
        ));
    }
}
