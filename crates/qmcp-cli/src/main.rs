//! CLI entry point - the composition root.
//!
//! Loads `.env`, parses flags, installs logging, bootstraps the context and
//! dispatches to a handler. Errors are logged and turned into an exit code.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use qmcp_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers, logging};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(err) = logging::init(cli.log_level.as_deref(), cli.verbose) {
        eprintln!("{err}");
        return exit_code(err.exit_code());
    }

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            exit_code(code)
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = bootstrap(&CliConfig::from_cli(cli))?;

    match cli.command_or_default() {
        Commands::Serve => handlers::serve::execute(&ctx).await?,
        Commands::Tools => handlers::tools::execute(&ctx)?,
        Commands::Call { tool, prompt } => {
            handlers::call::execute(&ctx, &tool, prompt.as_deref()).await?;
        }
    }

    Ok(())
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
