//! Command execution engine.

use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::{Duration, Instant};

use tokio::process::{Child, Command};
use tracing::{debug, warn};

use super::cancel::CancelToken;
use super::command::{ExecutionRequest, Tool, ToolConfig};
use super::environment::Environment;
use super::failure::{normalize, CommandError, RawFailure};
use super::result::ExecutionResult;

/// Default package runner used to resolve the tools.
#[cfg(windows)]
pub const DEFAULT_LAUNCHER: &str = "npx.cmd";
/// Default package runner used to resolve the tools.
#[cfg(not(windows))]
pub const DEFAULT_LAUNCHER: &str = "npx";

/// Package runner that resolves and starts a tool binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launcher {
    /// Program to spawn.
    pub program: String,
    /// Arguments placed before the tool binary name.
    pub args: Vec<String>,
}

impl Launcher {
    /// Create a launcher for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add leading arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Reconstruct the command line for diagnostics.
    pub fn command_line(&self, tool: Tool, args: &[String]) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .chain(std::iter::once(tool.binary()))
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new(DEFAULT_LAUNCHER)
    }
}

/// Runs Expo and EAS tools as subprocesses.
///
/// The executor holds no per-call state, so one instance can serve any
/// number of concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct CommandExecutor {
    launcher: Launcher,
    environment: Option<Environment>,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl CommandExecutor {
    /// Create an executor using `npx` and the host environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different package runner.
    pub fn with_launcher(mut self, launcher: Launcher) -> Self {
        self.launcher = launcher;
        self
    }

    /// Use a fixed base environment instead of the host environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Default working directory for requests that do not set one.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Kill the tool and fail with a timeout after `limit`.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    /// The configured launcher.
    pub fn launcher(&self) -> &Launcher {
        &self.launcher
    }

    /// The configured time limit, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Run an Expo CLI command and return its stdout.
    pub async fn execute_expo_command(
        &self,
        args: &[String],
        config: Option<&ToolConfig>,
        cwd: Option<&Path>,
    ) -> Result<String, CommandError> {
        self.execute_tool(Tool::Expo, args, config, cwd).await
    }

    /// Run an EAS CLI command and return its stdout.
    pub async fn execute_eas_command(
        &self,
        args: &[String],
        config: Option<&ToolConfig>,
        cwd: Option<&Path>,
    ) -> Result<String, CommandError> {
        self.execute_tool(Tool::Eas, args, config, cwd).await
    }

    async fn execute_tool(
        &self,
        tool: Tool,
        args: &[String],
        config: Option<&ToolConfig>,
        cwd: Option<&Path>,
    ) -> Result<String, CommandError> {
        let mut request = ExecutionRequest::new(tool).args(args.iter().cloned()).config(config);
        if let Some(dir) = cwd.filter(|d| !d.as_os_str().is_empty()) {
            request = request.working_dir(dir);
        }
        self.run(&request).await.map(ExecutionResult::into_stdout)
    }

    /// Run a request to completion.
    pub async fn run(&self, request: &ExecutionRequest) -> Result<ExecutionResult, CommandError> {
        self.run_cancellable(request, &CancelToken::new()).await
    }

    /// Run a request, killing the tool if `cancel` fires first.
    pub async fn run_cancellable(
        &self,
        request: &ExecutionRequest,
        cancel: &CancelToken,
    ) -> Result<ExecutionResult, CommandError> {
        let command_line = self.launcher.command_line(request.tool, &request.args);
        let start = Instant::now();

        let outcome = if cancel.is_cancelled() {
            Err(RawFailure::Cancelled)
        } else {
            self.spawn_and_wait(request, &command_line, cancel).await
        };

        match outcome {
            Ok(stdout) => {
                let result = ExecutionResult::from_bytes(&stdout, start.elapsed());
                debug!(
                    command = %command_line,
                    duration_ms = result.duration.as_millis() as u64,
                    "Command succeeded"
                );
                Ok(result)
            }
            Err(raw) => {
                let err = normalize(raw, command_line);
                warn!(
                    command = %err.command_line(),
                    kind = %err.kind(),
                    cause = %err.cause(),
                    "Command failed"
                );
                Err(err)
            }
        }
    }

    async fn spawn_and_wait(
        &self,
        request: &ExecutionRequest,
        command_line: &str,
        cancel: &CancelToken,
    ) -> Result<Vec<u8>, RawFailure> {
        let environment = self
            .environment
            .clone()
            .unwrap_or_else(Environment::capture)
            .with_auth_token(request.auth_token.as_deref());
        // An empty directory means "inherit", like an unset one.
        let non_empty = |d: &&PathBuf| !d.as_os_str().is_empty();
        let working_dir = request
            .working_dir
            .as_ref()
            .filter(non_empty)
            .or(self.working_dir.as_ref().filter(non_empty));

        let mut cmd = Command::new(&self.launcher.program);
        cmd.args(&self.launcher.args)
            .arg(request.tool.binary())
            .args(&request.args)
            .env_clear()
            .envs(environment.iter())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }

        debug!(
            command = %command_line,
            working_dir = ?working_dir,
            has_token = request.auth_token.is_some(),
            "Spawning tool"
        );

        let child = cmd.spawn().map_err(|source| RawFailure::Spawn {
            source,
            working_dir: working_dir.cloned(),
        })?;

        // Dropping the wait future drops the child, which kills it.
        let output = tokio::select! {
            output = wait_for_exit(child, self.timeout) => output?,
            _ = cancel.cancelled() => return Err(RawFailure::Cancelled),
        };

        check_status(output)
    }
}

async fn wait_for_exit(child: Child, limit: Option<Duration>) -> Result<Output, RawFailure> {
    let wait = child.wait_with_output();
    let output = match limit {
        Some(after) => match tokio::time::timeout(after, wait).await {
            Ok(output) => output,
            Err(_) => return Err(RawFailure::TimedOut { after }),
        },
        None => wait.await,
    };
    output.map_err(RawFailure::Wait)
}

fn check_status(output: Output) -> Result<Vec<u8>, RawFailure> {
    if output.status.success() {
        return Ok(output.stdout);
    }

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    match output.status.code() {
        Some(code) => Err(RawFailure::Exited {
            code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr,
        }),
        None => Err(RawFailure::Terminated {
            signal: exit_signal(&output.status),
            stderr,
        }),
    }
}

#[cfg(unix)]
fn exit_signal(status: &std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &std::process::ExitStatus) -> Option<i32> {
    None
}

/// Run an Expo CLI command with a default executor.
pub async fn execute_expo_command(
    args: &[String],
    config: Option<&ToolConfig>,
    cwd: Option<&Path>,
) -> Result<String, CommandError> {
    CommandExecutor::new()
        .execute_expo_command(args, config, cwd)
        .await
}

/// Run an EAS CLI command with a default executor.
pub async fn execute_eas_command(
    args: &[String],
    config: Option<&ToolConfig>,
    cwd: Option<&Path>,
) -> Result<String, CommandError> {
    CommandExecutor::new()
        .execute_eas_command(args, config, cwd)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::ErrorKind;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    /// Launcher running `script` through `sh`; the tool binary lands in `$0`.
    #[cfg(unix)]
    fn sh(script: &str) -> Launcher {
        Launcher::new("sh").with_args(["-c", script])
    }

    #[test]
    fn test_default_launcher() {
        let executor = CommandExecutor::new();
        assert_eq!(executor.launcher().program, DEFAULT_LAUNCHER);
        assert!(executor.launcher().args.is_empty());
        assert!(executor.timeout().is_none());
    }

    #[test]
    fn test_command_line_reconstruction() {
        let launcher = Launcher::default();
        assert_eq!(
            launcher.command_line(Tool::Eas, &strings(&["build", "--platform", "ios"])),
            format!("{DEFAULT_LAUNCHER} eas-cli build --platform ios")
        );
        assert_eq!(
            launcher.command_line(Tool::Expo, &[]),
            format!("{DEFAULT_LAUNCHER} expo")
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_passes_tool_and_args_without_shell() {
        let executor = CommandExecutor::new().with_launcher(sh(r#"printf '%s|' "$0" "$@""#));
        let out = executor
            .execute_eas_command(&strings(&["a b", "$HOME", ";echo", "x"]), None, None)
            .await
            .unwrap();
        assert_eq!(out, "eas-cli|a b|$HOME|;echo|x|");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_injected_environment_is_used() {
        let env = Environment::from_vars([("PATH", std::env::var_os("PATH").unwrap_or_default())]);
        let executor = CommandExecutor::new()
            .with_launcher(sh(r#"printf '%s' "${HOME-unset}""#))
            .with_environment(env);

        let out = executor.execute_expo_command(&[], None, None).await.unwrap();
        assert_eq!(out, "unset");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_spawn_failure_for_missing_launcher() {
        let executor =
            CommandExecutor::new().with_launcher(Launcher::new("expo-mcp-no-such-launcher-7d1e"));
        let err = executor
            .execute_expo_command(&strings(&["--version"]), None, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SpawnFailure);
        assert_eq!(err.command_line(), "expo-mcp-no-such-launcher-7d1e expo --version");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_signal_termination_is_unknown() {
        let executor = CommandExecutor::new().with_launcher(sh("kill -9 $$"));
        let err = executor.execute_expo_command(&[], None, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert!(err.cause().contains("signal 9"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_pre_cancelled_token_does_not_spawn() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran");
        let script = format!("touch {}", marker.display());
        let executor = CommandExecutor::new().with_launcher(sh(&script));

        let cancel = CancelToken::new();
        cancel.cancel();
        let err = executor
            .run_cancellable(&ExecutionRequest::new(Tool::Expo), &cancel)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert!(!marker.exists());
    }
}
