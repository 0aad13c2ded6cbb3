//! Runs rendered command lines and normalizes what the toolkit prints.
//!
//! The executor is the only place where a command line reaches the process boundary. Every call
//! goes through three steps:
//!
//! 1. the optional validation hook runs, a failure stops the call before any process is started
//! 2. the command line is handed to the [`CommandRunner`]
//! 3. stdout is turned into [`Data`], either as raw text or as unwrapped JSON
//!
//! JSON that can not be parsed is not an error. The command itself succeeded, so the response is
//! returned without data and with a [`Diagnostic`] describing what went wrong.

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    dependencies::{CommandRunner, ProcessError, ShellRunner},
    names::NameError,
};

/// Hook that validates the inputs of a call before the process is launched.
pub type ValidationHook<'a> = dyn Fn() -> Result<(), NameError> + Send + Sync + 'a;

/// How stdout should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Json,
    Text,
}

/// Errors that stop a call.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Validation(#[from] NameError),
    #[error(transparent)]
    Process(#[from] ProcessError),
}

/// Normalized stdout of a call.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Json(Value),
    Text(String),
    /// JSON was requested but stdout could not be used.
    Missing,
}

/// Soft failures that did not stop the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Stdout was not valid JSON.
    InvalidJson { error: String },
    /// Stdout was valid JSON but did not have the expected shape.
    UnexpectedShape { error: String },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::InvalidJson { error } => write!(f, "report is not valid json: {error}"),
            Diagnostic::UnexpectedShape { error } => write!(f, "unexpected report shape: {error}"),
        }
    }
}

/// Result of a successful call.
///
/// `stdout` and `stderr` are always the untouched output of the process.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    pub stdout: String,
    pub stderr: String,
    pub data: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Response<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            stdout: self.stdout,
            stderr: self.stderr,
            data: f(self.data),
            diagnostics: self.diagnostics,
        }
    }
}

/// Executes command lines through a [`CommandRunner`].
pub struct Executor {
    runner: Box<dyn CommandRunner + Send + Sync>,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(ShellRunner::new())
    }
}

impl Executor {
    pub fn new(runner: impl CommandRunner + Send + Sync + 'static) -> Self {
        Self {
            runner: Box::new(runner),
        }
    }

    /// Execute a command line and normalize its output.
    pub async fn execute(
        &self,
        command_line: &str,
        mode: OutputMode,
        validate: Option<&ValidationHook<'_>>,
    ) -> Result<Response<Data>, ExecuteError> {
        if let Some(validate) = validate {
            validate()?;
        }

        debug!(command = command_line, "running lvm command");
        let output = self.runner.run(command_line).await?;

        let mut diagnostics = Vec::new();
        let data = match mode {
            OutputMode::Text => Data::Text(output.stdout.clone()),
            OutputMode::Json => match serde_json::from_str::<Value>(&output.stdout) {
                Ok(value) => Data::Json(unwrap_report(value)),
                Err(e) => {
                    warn!(
                        command = command_line,
                        error = %e,
                        stdout = %output.stdout,
                        "failed to parse lvm report as json"
                    );
                    diagnostics.push(Diagnostic::InvalidJson {
                        error: e.to_string(),
                    });
                    Data::Missing
                }
            },
        };

        Ok(Response {
            stdout: output.stdout,
            stderr: output.stderr,
            data,
            diagnostics,
        })
    }

    /// Execute a command line and deserialize the unwrapped JSON report into `T`.
    ///
    /// Stdout that is not valid JSON, or JSON that does not fit `T`, leaves `data` empty.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        command_line: &str,
        validate: Option<&ValidationHook<'_>>,
    ) -> Result<Response<Option<T>>, ExecuteError> {
        let mut response = self
            .execute(command_line, OutputMode::Json, validate)
            .await?;

        let data = match std::mem::replace(&mut response.data, Data::Missing) {
            Data::Json(value) => match serde_json::from_value::<T>(value) {
                Ok(data) => Some(data),
                Err(e) => {
                    warn!(command = command_line, error = %e, "unexpected lvm report shape");
                    response.diagnostics.push(Diagnostic::UnexpectedShape {
                        error: e.to_string(),
                    });
                    None
                }
            },
            Data::Text(_) | Data::Missing => None,
        };

        Ok(response.map(|_| data))
    }

    /// Execute a command line and return stdout as is.
    pub async fn execute_text(
        &self,
        command_line: &str,
        validate: Option<&ValidationHook<'_>>,
    ) -> Result<Response<String>, ExecuteError> {
        let response = self
            .execute(command_line, OutputMode::Text, validate)
            .await?;

        let stdout = response.stdout.clone();
        Ok(response.map(|_| stdout))
    }
}

/// Strip the wrapping of an LVM2 JSON report.
///
/// The toolkit prints reports as `{"report": [{"<section>": [...]}]}`. The first report entry is
/// taken and, when it only holds a single section, replaced by that section's content.
// The nesting is tied to the toolkit's report schema, it is not documented as stable.
pub fn unwrap_report(mut value: Value) -> Value {
    let first = value
        .get_mut("report")
        .and_then(Value::as_array_mut)
        .filter(|report| !report.is_empty())
        .map(|report| report.swap_remove(0));

    match first {
        Some(Value::Object(section)) if section.len() == 1 => section
            .into_iter()
            .next()
            .map(|(_, inner)| inner)
            .unwrap_or(Value::Null),
        Some(other) => other,
        None => value,
    }
}
