//! Failure normalization.
//!
//! Every way a tool invocation can go wrong is first captured as a
//! [`RawFailure`] at the spawn boundary and then folded into a single
//! [`CommandError`] shape by [`normalize`].

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Coarse classification of a failed invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The tool ran and exited with a non-zero code.
    NonZeroExit,
    /// The tool could not be located or launched.
    SpawnFailure,
    /// A time limit was exceeded.
    Timeout,
    /// Anything else (signals, cancellation, wait errors).
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NonZeroExit => "non-zero exit",
            Self::SpawnFailure => "spawn failure",
            Self::Timeout => "timeout",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Uniform error surfaced by the command executor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("command `{command_line}` failed ({kind}): {cause}")]
pub struct CommandError {
    command_line: String,
    cause: String,
    kind: ErrorKind,
}

impl CommandError {
    /// Create a normalized error.
    pub fn new(command_line: impl Into<String>, cause: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            command_line: command_line.into(),
            cause: cause.into(),
            kind,
        }
    }

    /// The command line that was attempted, for diagnostics only.
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    /// Human-readable cause.
    pub fn cause(&self) -> &str {
        &self.cause
    }

    /// Failure classification.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Raw failure observed while running a tool.
#[derive(Debug)]
pub enum RawFailure {
    /// The process exited with a non-zero code.
    Exited {
        code: i32,
        stdout: String,
        stderr: String,
    },
    /// The process was terminated without an exit code.
    Terminated {
        signal: Option<i32>,
        stderr: String,
    },
    /// The process could not be spawned.
    Spawn {
        source: io::Error,
        working_dir: Option<PathBuf>,
    },
    /// Waiting for the process failed.
    Wait(io::Error),
    /// The configured time limit elapsed.
    TimedOut { after: Duration },
    /// The caller cancelled the invocation.
    Cancelled,
}

impl RawFailure {
    /// Classify this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Exited { .. } => ErrorKind::NonZeroExit,
            Self::Spawn { .. } => ErrorKind::SpawnFailure,
            Self::TimedOut { .. } => ErrorKind::Timeout,
            Self::Wait(err) if err.kind() == io::ErrorKind::TimedOut => ErrorKind::Timeout,
            Self::Wait(_) | Self::Terminated { .. } | Self::Cancelled => ErrorKind::Unknown,
        }
    }

    fn cause(&self) -> String {
        match self {
            Self::Exited {
                code,
                stdout,
                stderr,
            } => first_non_empty(&[stderr, stdout])
                .unwrap_or_else(|| format!("exited with code {code}")),
            Self::Terminated { signal, stderr } => {
                first_non_empty(&[stderr]).unwrap_or_else(|| match signal {
                    Some(sig) => format!("terminated by signal {sig}"),
                    None => "terminated without an exit code".to_string(),
                })
            }
            Self::Spawn {
                source,
                working_dir,
            } => {
                let mut cause = format!("failed to launch: {source}");
                if let Some(dir) = working_dir.as_ref().filter(|d| !d.is_dir()) {
                    cause.push_str(&format!(
                        " (working directory {} does not exist)",
                        dir.display()
                    ));
                }
                cause
            }
            Self::Wait(err) => first_non_empty(&[&err.to_string()])
                .unwrap_or_else(|| "command failed".to_string()),
            Self::TimedOut { after } => format!("timed out after {}s", after.as_secs_f64()),
            Self::Cancelled => "command was cancelled".to_string(),
        }
    }
}

fn first_non_empty(candidates: &[&String]) -> Option<String> {
    candidates
        .iter()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Convert a raw failure into a [`CommandError`].
pub fn normalize(raw: RawFailure, command_line: impl Into<String>) -> CommandError {
    CommandError::new(command_line, raw.cause(), raw.kind())
}
