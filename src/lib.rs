//! # expo-mcp
//!
//! Expo and EAS CLI execution layer for MCP agent integration.
//!
//! This crate runs the Expo CLI and the EAS CLI through a package runner
//! (`npx` by default) on behalf of an agent-facing protocol layer, and
//! folds every failure into one error shape the protocol layer can report.
//!
//! ## Features
//!
//! - **One executor, two tools**: `expo` and `eas-cli` share a single code path
//! - **Token forwarding**: an access token is exported as `EXPO_TOKEN`
//! - **No shell**: arguments are passed as a list, never interpolated
//! - **Normalized errors**: exit codes, spawn errors, timeouts and
//!   cancellation all become a [`CommandError`]
//! - **Documentation table**: static links to Expo and React Native docs
//!
//! ## Quick Start
//!
//! ```no_run
//! use expo_mcp::{check_command_available, CommandExecutor, ToolConfig};
//!
//! #[tokio::main]
//! async fn main() -> expo_mcp::Result<()> {
//!     expo_mcp::logging::try_init().ok();
//!
//!     if !check_command_available("npx").await {
//!         eprintln!("npx is not installed");
//!         return Ok(());
//!     }
//!
//!     let executor = CommandExecutor::new();
//!     let config = ToolConfig::with_token("my-expo-token");
//!     let version = executor
//!         .execute_expo_command(&["--version".to_string()], Some(&config), None)
//!         .await?;
//!
//!     println!("expo {}", version.trim());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod docs;
pub mod error;
pub mod execution;
pub mod logging;

// Re-export commonly used types
pub use error::{ExpoMcpError, Result};
pub use execution::{
    check_command_available, execute_eas_command, execute_expo_command, CancelToken,
    CommandError, CommandExecutor, ErrorKind, ExecutionRequest, ExecutionResult, Tool,
    ToolConfig,
};
