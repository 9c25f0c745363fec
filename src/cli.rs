//! Command-line interface for expo-mcp.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::execution::Tool;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Expo access token (overrides config file and environment).
    pub token: Option<String>,
    /// Working directory for the tool.
    pub cwd: Option<PathBuf>,
    /// Package runner program.
    pub launcher: Option<String>,
    /// Time limit in seconds.
    pub timeout_secs: Option<u64>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Binary name to probe instead of running a tool.
    pub check: Option<String>,
    /// Print the documentation table.
    pub docs: bool,
    /// Tool to run.
    pub tool: Option<Tool>,
    /// Arguments forwarded to the tool verbatim.
    pub tool_args: Vec<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// What the binary should do with the parsed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print help.
    Help,
    /// Print the version.
    Version,
    /// Print the documentation table.
    Docs,
    /// Probe for a binary on `PATH`.
    Check(String),
    /// Run a tool with the forwarded arguments.
    Run(Tool),
}

impl Args {
    /// Resolve the requested action.
    pub fn action(&self) -> Result<Action, ArgsError> {
        if self.help {
            return Ok(Action::Help);
        }
        if self.version {
            return Ok(Action::Version);
        }
        if self.docs {
            return Ok(Action::Docs);
        }
        if let Some(ref name) = self.check {
            return Ok(Action::Check(name.clone()));
        }
        self.tool.map(Action::Run).ok_or(ArgsError::MissingTool)
    }
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('t') | Long("token") => {
                result.token = Some(parser.value()?.parse()?);
            }
            Short('C') | Long("cwd") => {
                result.cwd = Some(parser.value()?.parse()?);
            }
            Long("launcher") => {
                result.launcher = Some(parser.value()?.parse()?);
            }
            Long("timeout") => {
                let value: String = parser.value()?.parse()?;
                result.timeout_secs = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("timeout", value))?,
                );
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Long("check") => {
                result.check = Some(parser.value()?.parse()?);
            }
            Long("docs") => {
                result.docs = true;
            }
            Value(val) => {
                let name = val.to_string_lossy().into_owned();
                result.tool = Some(
                    name.parse()
                        .map_err(|_| ArgsError::UnexpectedArgument(name.clone()))?,
                );

                let mut rest = parser.raw_args()?.peekable();
                if rest.peek().is_some_and(|a| a == "--") {
                    rest.next();
                }
                for raw in rest {
                    let arg = raw.into_string().map_err(|raw| {
                        ArgsError::InvalidValue("tool argument", raw.to_string_lossy().into())
                    })?;
                    result.tool_args.push(arg);
                }
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"expo-mcp {version}
Expo and EAS CLI execution layer for MCP agent integration

USAGE:
    expo-mcp [OPTIONS] <expo|eas> [ARGS...]
    expo-mcp [OPTIONS] --check <NAME>
    expo-mcp --docs

OPTIONS:
    -c, --config <FILE>     Path to configuration file (JSON)
    -t, --token <TOKEN>     Expo access token (exported as EXPO_TOKEN)
    -C, --cwd <DIR>         Working directory for the tool
        --launcher <PROG>   Package runner [default: npx]
        --timeout <SECS>    Kill the tool after this many seconds
    -l, --log-level <LVL>   Log level (error, warn, info, debug, trace)
        --check <NAME>      Report whether NAME is on PATH
        --docs              Print the documentation resources as JSON
    -h, --help              Print help
    -V, --version           Print version

ENVIRONMENT VARIABLES:
    EXPO_TOKEN              Expo access token (overrides config)
    EXPO_MCP_LAUNCHER       Package runner (overrides config)
    EXPO_MCP_TIMEOUT_SECS   Time limit (overrides config)
    EXPO_MCP_LOG_LEVEL      Log level (overrides config)
    RUST_LOG                Alternative log level setting

EXAMPLES:
    # Print the Expo CLI version
    expo-mcp expo --version

    # Start an iOS build from a project directory
    expo-mcp -C ./my-app eas build --platform ios

    # Is npx installed?
    expo-mcp --check npx
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("expo-mcp {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// Unexpected positional argument.
    UnexpectedArgument(String),
    /// No tool, `--check` or `--docs` given.
    MissingTool,
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}' (expected 'expo' or 'eas')", arg)
            }
            Self::MissingTool => write!(f, "no tool given (expected 'expo' or 'eas')"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
