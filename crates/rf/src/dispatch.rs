//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands are split by whether they need the loaded configuration: meta
//! commands (config, completions, help) run without it so that a broken
//! config file can still be inspected and repaired.

use std::path::PathBuf;

use crate::cli::{Cli, Commands, ConfigCommands, Shell};
use crate::commands::config::Config;
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that run without the configuration file.
pub trait MetaCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that read survey data and honor configured defaults.
pub trait DataCommand {
    /// Execute the command with the loaded configuration.
    fn execute(&self, ctx: &CommandContext, config: &Config) -> Result<()>;
}

/// Commands that don't read the configuration.
pub enum MetaDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> MetaDispatch<'a> {
    /// Try to create a meta dispatch from the CLI command.
    /// Returns None if the command needs the configuration.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl MetaCommand for MetaDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("rf - survey response filter");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Init { force }) => commands::config::execute_init(ctx, *force),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}

/// Commands that read survey data.
pub enum DataDispatch<'a> {
    Filter {
        survey: &'a PathBuf,
        responses: &'a PathBuf,
        selection: &'a Option<PathBuf>,
        from: &'a Option<String>,
        to: &'a Option<String>,
        only_complete: bool,
        strict: bool,
        limit: Option<usize>,
    },
    Criteria {
        selection: &'a PathBuf,
        from: &'a Option<String>,
        to: &'a Option<String>,
        only_complete: bool,
    },
    Options {
        survey: &'a PathBuf,
        tags: &'a Option<PathBuf>,
        attributes: &'a Option<PathBuf>,
    },
}

impl<'a> DataDispatch<'a> {
    /// Create a data dispatch from the CLI command.
    /// Returns None for meta commands (use MetaDispatch first).
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Filter {
                survey,
                responses,
                selection,
                from,
                to,
                only_complete,
                strict,
                limit,
            }) => Some(Self::Filter {
                survey,
                responses,
                selection,
                from,
                to,
                only_complete: *only_complete,
                strict: *strict,
                limit: *limit,
            }),
            Some(Commands::Criteria {
                selection,
                from,
                to,
                only_complete,
            }) => Some(Self::Criteria {
                selection,
                from,
                to,
                only_complete: *only_complete,
            }),
            Some(Commands::Options {
                survey,
                tags,
                attributes,
            }) => Some(Self::Options {
                survey,
                tags,
                attributes,
            }),
            _ => None,
        }
    }
}

impl DataCommand for DataDispatch<'_> {
    fn execute(&self, ctx: &CommandContext, config: &Config) -> Result<()> {
        match self {
            Self::Filter {
                survey,
                responses,
                selection,
                from,
                to,
                only_complete,
                strict,
                limit,
            } => {
                let opts = commands::filter::FilterOptions {
                    survey: (*survey).clone(),
                    responses: (*responses).clone(),
                    selection: (*selection).clone(),
                    from: (*from).clone(),
                    to: (*to).clone(),
                    only_complete: *only_complete || config.filter.only_complete == Some(true),
                    strict: *strict || config.filter.strict == Some(true),
                    limit: *limit,
                };
                commands::filter::execute(ctx, &opts)
            }
            Self::Criteria {
                selection,
                from,
                to,
                only_complete,
            } => {
                let opts = commands::criteria::CriteriaOptions {
                    selection: (*selection).clone(),
                    from: (*from).clone(),
                    to: (*to).clone(),
                    only_complete: *only_complete || config.filter.only_complete == Some(true),
                };
                commands::criteria::execute(ctx, &opts)
            }
            Self::Options {
                survey,
                tags,
                attributes,
            } => {
                let opts = commands::options::OptionsInputs {
                    survey: (*survey).clone(),
                    tags: (*tags).clone(),
                    attributes: (*attributes).clone(),
                };
                commands::options::execute(ctx, &opts)
            }
        }
    }
}
