//! Configuration management for expo-mcp.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::execution::{CommandExecutor, Launcher, ToolConfig, DEFAULT_LAUNCHER, EXPO_TOKEN_VAR};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Expo account settings.
    pub expo: ExpoSection,
    /// Tool execution settings.
    pub execution: ExecutionSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Expo account section.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpoSection {
    /// Access token exported to the tools.
    pub token: Option<String>,
}

impl fmt::Debug for ExpoSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpoSection")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Tool execution section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionSection {
    /// Package runner used to start the tools.
    pub launcher: String,
    /// Default working directory.
    pub working_dir: Option<PathBuf>,
    /// Time limit in seconds. No limit when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for ExecutionSection {
    fn default() -> Self {
        Self {
            launcher: DEFAULT_LAUNCHER.to_string(),
            working_dir: None,
            timeout_secs: None,
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source (for testing).
    pub fn apply_env_from<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = var(EXPO_TOKEN_VAR).filter(|t| !t.is_empty()) {
            self.expo.token = Some(token);
        }

        if let Some(launcher) = var("EXPO_MCP_LAUNCHER").filter(|l| !l.is_empty()) {
            self.execution.launcher = launcher;
        }

        if let Some(secs) = var("EXPO_MCP_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                self.execution.timeout_secs = Some(secs);
            }
        }

        if let Some(level) = var("EXPO_MCP_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Some(level) = var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(ref token) = args.token {
            self.expo.token = Some(token.clone());
        }

        if let Some(ref cwd) = args.cwd {
            self.execution.working_dir = Some(cwd.clone());
        }

        if let Some(ref launcher) = args.launcher {
            self.execution.launcher = launcher.clone();
        }

        if let Some(secs) = args.timeout_secs {
            self.execution.timeout_secs = Some(secs);
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match args.config {
            Some(ref path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env();
        config.apply_args(args);

        Ok(config)
    }

    /// Build an executor from the execution section.
    pub fn executor(&self) -> CommandExecutor {
        let mut executor =
            CommandExecutor::new().with_launcher(Launcher::new(self.execution.launcher.as_str()));

        if let Some(ref dir) = self.execution.working_dir {
            executor = executor.with_working_dir(dir);
        }

        if let Some(secs) = self.execution.timeout_secs {
            executor = executor.with_timeout(Duration::from_secs(secs));
        }

        executor
    }

    /// Per-call tool configuration carrying the token.
    pub fn tool_config(&self) -> ToolConfig {
        ToolConfig {
            auth_token: self.expo.token.clone(),
        }
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
