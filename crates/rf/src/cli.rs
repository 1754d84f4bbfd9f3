//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the rf CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// rf - Filter survey responses
#[derive(Parser, Debug)]
#[command(name = "rf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter responses with a selection
    #[command(alias = "f")]
    Filter {
        /// Survey definition (JSON)
        #[arg(short, long)]
        survey: PathBuf,

        /// Responses (JSON array)
        #[arg(short, long)]
        responses: PathBuf,

        /// Filter selection (JSON); without one every response is kept
        #[arg(short = 'S', long)]
        selection: Option<PathBuf>,

        /// Earliest creation date (YYYY-MM-DD, RFC 3339 or "today")
        #[arg(long)]
        from: Option<String>,

        /// Latest creation date (default with --from: end of today)
        #[arg(long)]
        to: Option<String>,

        /// Keep only finished responses
        #[arg(long)]
        only_complete: bool,

        /// Reject selections referencing unknown or mistyped questions
        #[arg(long)]
        strict: bool,

        /// Limit the number of printed responses
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the normalized criteria for a selection
    #[command(alias = "c")]
    Criteria {
        /// Filter selection (JSON)
        #[arg(short = 'S', long)]
        selection: PathBuf,

        /// Earliest creation date (YYYY-MM-DD, RFC 3339 or "today")
        #[arg(long)]
        from: Option<String>,

        /// Latest creation date (default with --from: end of today)
        #[arg(long)]
        to: Option<String>,

        /// Keep only finished responses
        #[arg(long)]
        only_complete: bool,
    },

    /// List the filter targets, operators and values a survey offers
    #[command(alias = "o")]
    Options {
        /// Survey definition (JSON)
        #[arg(short, long)]
        survey: PathBuf,

        /// Environment tags (JSON array)
        #[arg(short, long)]
        tags: Option<PathBuf>,

        /// Person attribute keys and known values (JSON object)
        #[arg(short, long)]
        attributes: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. filter.strict)
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}
