//! Criteria command implementation.
//!
//! Normalizes a filter selection into the criteria object a storage layer
//! would apply, without touching any responses.

use std::path::PathBuf;

use survey_filter_rs::filter::{normalize, FilterSelection};

use super::input::{read_json, resolve_date_range};
use super::{CommandContext, Result};
use crate::output::{format_criteria_json, format_criteria_table};

/// Options for the criteria command.
#[derive(Debug)]
pub struct CriteriaOptions {
    /// Selection file.
    pub selection: PathBuf,
    /// Lower date bound.
    pub from: Option<String>,
    /// Upper date bound.
    pub to: Option<String>,
    /// Force the completion constraint on.
    pub only_complete: bool,
}

/// Executes the criteria command.
///
/// # Errors
///
/// Returns an error if the selection cannot be read or the dates are invalid.
pub fn execute(ctx: &CommandContext, opts: &CriteriaOptions) -> Result<()> {
    let mut selection: FilterSelection = read_json(&opts.selection)?;
    selection.only_complete |= opts.only_complete;
    let range = resolve_date_range(opts.from.as_deref(), opts.to.as_deref())?;

    let criteria = normalize(&selection, &range);

    if ctx.json_output {
        println!("{}", format_criteria_json(&criteria)?);
    } else if !ctx.quiet {
        print!("{}", format_criteria_table(&criteria, ctx.use_colors));
    }

    Ok(())
}
