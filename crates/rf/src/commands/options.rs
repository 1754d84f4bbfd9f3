//! Options command implementation.
//!
//! Lists the filter targets a survey offers, with the operators and values
//! available for each.

use std::path::PathBuf;

use survey_filter_rs::options::generate_filter_options;
use survey_model_rs::prelude::*;

use super::input::{read_json, read_json_or_default};
use super::{CommandContext, Result};
use crate::output::{format_options_json, format_options_table};

/// Inputs for the options command.
#[derive(Debug)]
pub struct OptionsInputs {
    /// Survey file.
    pub survey: PathBuf,
    /// Environment tags file.
    pub tags: Option<PathBuf>,
    /// Person attributes file.
    pub attributes: Option<PathBuf>,
}

/// Executes the options command.
///
/// # Errors
///
/// Returns an error if an input document cannot be read.
pub fn execute(ctx: &CommandContext, opts: &OptionsInputs) -> Result<()> {
    let survey: Survey = read_json(&opts.survey)?;
    let tags: Vec<Tag> = read_json_or_default(opts.tags.as_deref())?;
    let attributes: Option<PersonAttributes> = opts
        .attributes
        .as_deref()
        .map(read_json)
        .transpose()?;

    let options = generate_filter_options(&survey, &tags, attributes.as_ref());

    if ctx.json_output {
        println!("{}", format_options_json(&options)?);
    } else if !ctx.quiet {
        print!("{}", format_options_table(&options, ctx.use_colors));
    }

    Ok(())
}
