//! Expo and EAS tool execution.
//!
//! This module provides:
//! - A parameterized executor for both tools, run through a package runner
//! - Normalization of every failure into a single [`CommandError`] shape
//! - Cooperative cancellation and an optional time limit
//! - A non-failing probe for binaries on `PATH`
//!
//! # Example
//!
//! ```no_run
//! use expo_mcp::execution::{execute_eas_command, ToolConfig};
//!
//! # async fn demo() -> Result<(), expo_mcp::execution::CommandError> {
//! let config = ToolConfig::with_token("my-expo-token");
//! let args = vec!["whoami".to_string()];
//! let stdout = execute_eas_command(&args, Some(&config), None).await?;
//! println!("{stdout}");
//! # Ok(())
//! # }
//! ```

mod availability;
mod cancel;
mod command;
mod environment;
mod executor;
mod failure;
mod result;

pub use availability::{check_command_available, find_executable};
pub use cancel::CancelToken;
pub use command::{ExecutionRequest, Tool, ToolConfig};
pub use environment::{Environment, EXPO_TOKEN_VAR};
pub use executor::{
    execute_eas_command, execute_expo_command, CommandExecutor, Launcher, DEFAULT_LAUNCHER,
};
pub use failure::{normalize, CommandError, ErrorKind, RawFailure};
pub use result::ExecutionResult;
