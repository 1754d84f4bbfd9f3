use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod dispatch;
mod logging;
mod output;

use cli::Cli;
use commands::config::load_config;
use commands::{CommandContext, CommandError};
use dispatch::{DataCommand, DataDispatch, MetaCommand, MetaDispatch};
use survey_filter_rs::FilterError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{error_json:#}");
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(exit_status(&e))
        }
    }
}

fn run(cli: &Cli) -> commands::Result<()> {
    // Config and completions must work even when the config file is broken.
    if let Some(dispatch) = MetaDispatch::try_from_cli(cli) {
        let ctx = CommandContext::from_cli(cli, None);
        return dispatch.execute(&ctx);
    }

    let config = load_config()?;
    let ctx = CommandContext::from_cli(cli, Some(&config));

    match DataDispatch::from_cli(cli) {
        Some(dispatch) => dispatch.execute(&ctx, &config),
        None => Ok(()),
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(FilterError::InvalidDate { .. })
        | CommandError::Filter(FilterError::InvertedDateRange) => "DATE_ERROR",
        CommandError::Filter(_) => "SELECTION_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Input { .. } => "INPUT_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the process exit status for an error.
fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Json(_) => 1,
        CommandError::Filter(_) => 2,
        CommandError::Io(_) => 3,
        CommandError::Input { .. } => 4,
        CommandError::Config(_) => 5,
    }
}
