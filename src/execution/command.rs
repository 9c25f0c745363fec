//! Tool identifiers and execution requests.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// External tools reachable through the package runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// The Expo CLI (app build and config).
    Expo,
    /// The EAS CLI (cloud services).
    Eas,
}

impl Tool {
    /// Binary name handed to the package runner.
    pub fn binary(&self) -> &'static str {
        match self {
            Self::Expo => "expo",
            Self::Eas => "eas-cli",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expo" => Ok(Self::Expo),
            "eas" | "eas-cli" => Ok(Self::Eas),
            other => Err(format!("unknown tool: {other}")),
        }
    }
}

/// Per-call configuration shared by both tools.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ToolConfig {
    /// Expo access token, exported as `EXPO_TOKEN` to the child.
    pub auth_token: Option<String>,
}

impl ToolConfig {
    /// Create a config carrying the given token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            auth_token: Some(token.into()),
        }
    }
}

impl fmt::Debug for ToolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolConfig")
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A single invocation of an external tool.
#[derive(Clone)]
pub struct ExecutionRequest {
    /// Tool to run.
    pub tool: Tool,
    /// Arguments passed verbatim after the tool binary.
    pub args: Vec<String>,
    /// Working directory override (if any).
    pub working_dir: Option<PathBuf>,
    /// Token exported to the child environment.
    pub auth_token: Option<String>,
}

impl ExecutionRequest {
    /// Create a request for the given tool with no arguments.
    pub fn new(tool: Tool) -> Self {
        Self {
            tool,
            args: Vec::new(),
            working_dir: None,
            auth_token: None,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Set the auth token.
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Take the token from an optional tool config.
    pub fn config(mut self, config: Option<&ToolConfig>) -> Self {
        self.auth_token = config.and_then(|c| c.auth_token.clone());
        self
    }
}

impl fmt::Debug for ExecutionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionRequest")
            .field("tool", &self.tool)
            .field("args", &self.args)
            .field("working_dir", &self.working_dir)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
