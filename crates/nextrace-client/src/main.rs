//! nextrace CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use nextrace_core::init_tracing;

use nextrace_client::app::{RunSettings, load_config, show_next, tracing_config};
use nextrace_client::cli::{Cli, Command, ConfigAction};
use nextrace_client::config::ClientConfig;
use nextrace_client::error::ClientResult;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize tracing
    let log = match tracing_config(&cli, &config) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_tracing(log) {
        eprintln!("warning: {}", e);
    }

    // Run the command
    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            for line in e.report_lines() {
                eprintln!("{}", line);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: ClientConfig) -> ClientResult<()> {
    match cli.command {
        Some(Command::Config { ref action }) => match action {
            ConfigAction::Dump => nextrace_client::commands::config::dump(&config),
            ConfigAction::Validate => nextrace_client::commands::config::validate(&config),
            ConfigAction::Path => nextrace_client::commands::config::path(),
        },
        None => {
            let settings = RunSettings::resolve(&cli, &config)?;
            show_next(settings).await
        }
    }
}
