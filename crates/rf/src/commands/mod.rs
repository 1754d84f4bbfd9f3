//! Command implementations for the rf CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod criteria;
pub mod filter;
pub mod input;
pub mod options;

use std::path::PathBuf;

use survey_filter_rs::FilterError;

use crate::cli::Cli;
use crate::output::helpers::DateFormat;
use config::Config;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Selection validation or date parsing error.
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An input document could not be read or parsed.
    #[error("cannot read {}: {message}", path.display())]
    Input {
        /// The offending file.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// How timestamps are rendered in tables.
    pub date_format: DateFormat,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments and, when loaded,
    /// the configuration file.
    ///
    /// Colors are off when `--no-color` is given, when `NO_COLOR` is set or
    /// when the config disables them.
    pub fn from_cli(cli: &Cli, config: Option<&Config>) -> Self {
        let config_color = config.and_then(|c| c.output.color);
        let date_format = config
            .and_then(|c| c.output.date_format.as_deref())
            .and_then(DateFormat::parse)
            .unwrap_or_default();

        Self {
            json_output: cli.json,
            use_colors: !cli.no_color
                && std::env::var_os("NO_COLOR").is_none()
                && config_color != Some(false),
            quiet: cli.quiet,
            verbose: cli.verbose,
            date_format,
        }
    }
}
