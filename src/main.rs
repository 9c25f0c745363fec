//! expo-mcp binary entry point.

use std::process::ExitCode;

use expo_mcp::cli::{self, Action};
use expo_mcp::config::Config;
use expo_mcp::execution::ExecutionRequest;
use expo_mcp::{check_command_available, docs, logging};
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> expo_mcp::Result<ExitCode> {
    let args = cli::parse_args()?;

    let tool = match args.action()? {
        Action::Help => {
            cli::print_help();
            return Ok(ExitCode::SUCCESS);
        }
        Action::Version => {
            cli::print_version();
            return Ok(ExitCode::SUCCESS);
        }
        Action::Docs => {
            let table: Vec<_> = docs::all().collect();
            println!("{}", serde_json::to_string_pretty(&table)?);
            return Ok(ExitCode::SUCCESS);
        }
        Action::Check(name) => {
            let available = check_command_available(&name).await;
            println!("{}", available);
            return Ok(if available {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            });
        }
        Action::Run(tool) => tool,
    };

    let config = Config::load(&args)?;
    logging::init_with_filter(config.log_filter()).ok();
    debug!("expo-mcp v{}", env!("CARGO_PKG_VERSION"));

    let tool_config = config.tool_config();
    let request = ExecutionRequest::new(tool)
        .args(args.tool_args.iter().cloned())
        .config(Some(&tool_config));

    let result = config.executor().run(&request).await?;
    print!("{}", result.stdout);

    Ok(ExitCode::SUCCESS)
}
